use crate::{
    models::{SearchSuggestion, SuggestionType},
    services::search_history::SearchHistoryService,
};

pub const TRENDING_SEARCHES: [&str; 6] = [
    "Chicken",
    "Pasta",
    "Vegetarian",
    "Dessert",
    "Quick meals",
    "Healthy",
];

const MAX_RECENT_SUGGESTIONS: usize = 5;
const MAX_TRENDING_SUGGESTIONS: usize = 3;

/// Suggests completions from search history and a static trending list.
/// Never touches the catalog.
#[derive(Clone)]
pub struct SuggestionEngine {
    history: SearchHistoryService,
    trending: Vec<String>,
    min_chars: usize,
}

impl SuggestionEngine {
    pub fn new(history: SearchHistoryService) -> Self {
        Self::with_trending(history, TRENDING_SEARCHES.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_trending(history: SearchHistoryService, trending: Vec<String>) -> Self {
        Self {
            history,
            trending,
            min_chars: 1,
        }
    }

    /// Partial queries with fewer non-blank characters yield no suggestions
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars.max(1);
        self
    }

    /// Recent searches first (newest first), then trending terms in list order
    pub async fn suggestions(&self, partial_query: &str) -> Vec<SearchSuggestion> {
        if partial_query.trim().chars().count() < self.min_chars {
            return Vec::new();
        }
        let needle = partial_query.to_lowercase();

        let recent = self
            .history
            .load()
            .await
            .into_iter()
            .filter(|entry| entry.query.to_lowercase().contains(&needle))
            .take(MAX_RECENT_SUGGESTIONS)
            .map(|entry| SearchSuggestion::new(entry.query, SuggestionType::RecentSearch));

        let trending = self
            .trending
            .iter()
            .filter(|term| term.to_lowercase().contains(&needle))
            .take(MAX_TRENDING_SUGGESTIONS)
            .map(|term| SearchSuggestion::new(term.clone(), SuggestionType::Trending));

        recent.chain(trending).collect()
    }
}
