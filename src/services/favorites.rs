use crate::{error::Result, models::Meal, services::storage::KeyValueStore};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

const FAVORITES_KEY: &str = "favorites";

#[derive(Clone)]
pub struct FavoritesService {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl FavoritesService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn list(&self) -> Vec<Meal> {
        match self.store.get(FAVORITES_KEY).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Discarding unparseable favorites: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read favorites: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn is_favorite(&self, meal_id: &str) -> bool {
        self.list().await.iter().any(|meal| meal.id == meal_id)
    }

    /// Returns false if the meal was already a favorite
    pub async fn add(&self, meal: Meal) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut favorites = self.list().await;
        if favorites.iter().any(|existing| existing.id == meal.id) {
            return Ok(false);
        }
        favorites.push(meal);
        self.save(&favorites).await?;
        Ok(true)
    }

    /// Returns false if no favorite had this id
    pub async fn remove(&self, meal_id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut favorites = self.list().await;
        let before = favorites.len();
        favorites.retain(|meal| meal.id != meal_id);
        if favorites.len() == before {
            return Ok(false);
        }
        self.save(&favorites).await?;
        Ok(true)
    }

    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.store.remove(FAVORITES_KEY).await
    }

    async fn save(&self, favorites: &[Meal]) -> Result<()> {
        let json = serde_json::to_string(favorites)?;
        self.store.put(FAVORITES_KEY, json).await
    }
}
