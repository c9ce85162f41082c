use super::SearchFilters;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchHistory {
    pub id: Uuid,
    pub query: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub filters: Option<SearchFilters>,
}

impl SearchHistory {
    pub fn new(query: impl Into<String>, filters: Option<SearchFilters>) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.into(),
            timestamp: Utc::now(),
            filters,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionType {
    RecentSearch,
    Trending,
    Ingredient,
    Category,
    Area,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchSuggestion {
    #[schema(example = "Chicken Curry")]
    pub text: String,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl SearchSuggestion {
    pub fn new(text: impl Into<String>, kind: SuggestionType) -> Self {
        Self {
            text: text.into(),
            kind,
            count: None,
        }
    }
}
