pub mod catalog;
pub mod dietary;
pub mod favorites;
pub mod filter_engine;
pub mod meal_db;
pub mod meal_provider;
pub mod search_history;
pub mod search_session;
pub mod storage;
pub mod suggestions;

// Re-export public types
pub use catalog::CatalogService;
pub use dietary::DietaryClassifier;
pub use favorites::FavoritesService;
pub use filter_engine::{CombineStep, FilterEngine};
pub use meal_db::MealDbClient;
pub use meal_provider::MealProvider;
pub use search_history::{SearchHistoryService, MAX_HISTORY_SIZE};
pub use search_session::{SearchCoordinator, SearchSessions};
pub use storage::{InMemoryStore, JsonFileStore, KeyValueStore};
pub use suggestions::{SuggestionEngine, TRENDING_SEARCHES};
