use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use catalog::{Area, Category, ImageSize, Ingredient};
pub use filters::{DietaryRestriction, DifficultyLevel, Facet, SearchFilters};
pub use meal::{IngredientLine, IngredientSlot, Meal, MealRecord, INGREDIENT_SLOTS};
pub use search::{SearchHistory, SearchSuggestion, SuggestionType};

mod catalog;
mod filters;
mod meal;
mod search;

/// Request structure for filtered meal searches
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Free-text query matched against meal names; may be empty
    #[serde(default)]
    #[schema(example = "pasta")]
    pub query: String,
    /// Facet and dietary filters to combine with the query
    #[serde(default)]
    pub filters: SearchFilters,
}

/// Response structure for meal searches
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub meals: Vec<Meal>,
    #[schema(example = 12)]
    pub count: usize,
}

impl From<Vec<Meal>> for SearchResponse {
    fn from(meals: Vec<Meal>) -> Self {
        Self {
            count: meals.len(),
            meals,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SuggestionQuery {
    /// Partial query typed so far
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<SearchSuggestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub history: Vec<SearchHistory>,
}

/// Health check response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Status of the service
    #[schema(example = "ok")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: String,
}

/// Error response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Meal not found")]
    pub error: String,
}
