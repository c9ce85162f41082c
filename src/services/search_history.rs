use crate::{
    error::{ApiError, Result},
    models::{SearchFilters, SearchHistory},
    services::storage::KeyValueStore,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

const HISTORY_KEY: &str = "search_history";
pub const MAX_HISTORY_SIZE: usize = 50;

/// Bounded, recency-ordered list of past searches.
///
/// Query text is unique (case-sensitive), the newest entry is first and at
/// most [`MAX_HISTORY_SIZE`] entries are kept.
#[derive(Clone)]
pub struct SearchHistoryService {
    store: Arc<dyn KeyValueStore>,
    // Serializes load -> dedupe -> truncate -> save
    write_lock: Arc<Mutex<()>>,
}

impl SearchHistoryService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Most recent first. Missing or unreadable data reads as empty.
    pub async fn load(&self) -> Vec<SearchHistory> {
        let raw = match self.store.get(HISTORY_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read search history: {}", e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Discarding unparseable search history: {}", e);
            Vec::new()
        })
    }

    pub async fn persist(&self, entry: SearchHistory) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut history = self.load().await;
        history.retain(|existing| existing.query != entry.query);
        history.insert(0, entry);
        history.truncate(MAX_HISTORY_SIZE);

        let json = serde_json::to_string(&history)?;
        self.store
            .put(HISTORY_KEY, json)
            .await
            .map_err(|e| ApiError::PersistenceError(format!("Failed to save search history: {}", e)))?;

        debug!("Search history now holds {} entries", history.len());
        Ok(())
    }

    /// Record a search made now with the given filters
    pub async fn save_search(&self, query: &str, filters: &SearchFilters) -> Result<SearchHistory> {
        let entry = SearchHistory::new(query, Some(filters.clone()));
        self.persist(entry.clone()).await?;
        Ok(entry)
    }

    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.store.remove(HISTORY_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DietaryRestriction;
    use crate::services::storage::InMemoryStore;

    fn service() -> (Arc<InMemoryStore>, SearchHistoryService) {
        let store = Arc::new(InMemoryStore::new());
        (store.clone(), SearchHistoryService::new(store))
    }

    fn queries(history: &[SearchHistory]) -> Vec<&str> {
        history.iter().map(|h| h.query.as_str()).collect()
    }

    #[tokio::test]
    async fn test_empty_when_nothing_stored() {
        let (_, history) = service();
        assert!(history.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_newest_first() {
        let (_, history) = service();
        history.persist(SearchHistory::new("pasta", None)).await.unwrap();
        history.persist(SearchHistory::new("curry", None)).await.unwrap();

        assert_eq!(queries(&history.load().await), vec!["curry", "pasta"]);
    }

    #[tokio::test]
    async fn test_repeated_query_moves_to_head_with_new_filters() {
        let (_, history) = service();
        history.save_search("pasta", &SearchFilters::default()).await.unwrap();
        history.save_search("curry", &SearchFilters::default()).await.unwrap();

        let vegan = SearchFilters::default().with_restriction(DietaryRestriction::Vegan);
        let latest = history.save_search("pasta", &vegan).await.unwrap();

        let entries = history.load().await;
        assert_eq!(queries(&entries), vec!["pasta", "curry"]);
        assert_eq!(entries[0].id, latest.id);
        assert_eq!(entries[0].filters.as_ref(), Some(&vegan));
        assert!(entries[0].timestamp >= entries[1].timestamp);
    }

    #[tokio::test]
    async fn test_dedupe_is_case_sensitive() {
        let (_, history) = service();
        history.persist(SearchHistory::new("Pasta", None)).await.unwrap();
        history.persist(SearchHistory::new("pasta", None)).await.unwrap();

        assert_eq!(history.load().await.len(), 2);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let (_, history) = service();
        for n in 0..=MAX_HISTORY_SIZE {
            history
                .persist(SearchHistory::new(format!("query {}", n), None))
                .await
                .unwrap();
        }

        let entries = history.load().await;
        assert_eq!(entries.len(), MAX_HISTORY_SIZE);
        assert_eq!(entries[0].query, format!("query {}", MAX_HISTORY_SIZE));
        assert_eq!(entries[MAX_HISTORY_SIZE - 1].query, "query 1");
        assert!(!entries.iter().any(|h| h.query == "query 0"));
    }

    #[tokio::test]
    async fn test_corrupted_data_reads_as_empty() {
        let (store, history) = service();
        store
            .put(HISTORY_KEY, "{not json".to_string())
            .await
            .unwrap();

        assert!(history.load().await.is_empty());

        // The next write starts over from an empty list
        history.persist(SearchHistory::new("soup", None)).await.unwrap();
        assert_eq!(queries(&history.load().await), vec!["soup"]);
    }

    #[tokio::test]
    async fn test_clear() {
        let (_, history) = service();
        history.persist(SearchHistory::new("soup", None)).await.unwrap();
        history.clear().await.unwrap();
        assert!(history.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_persists_are_not_lost() {
        let (_, history) = service();

        let tasks: Vec<_> = (0..20)
            .map(|n| {
                let history = history.clone();
                tokio::spawn(async move {
                    history
                        .persist(SearchHistory::new(format!("query {}", n), None))
                        .await
                })
            })
            .collect();

        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }

        assert_eq!(history.load().await.len(), 20);
    }
}
