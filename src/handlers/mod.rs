pub mod favorites;
pub mod health;
pub mod meals;
pub mod search;

pub use favorites::favorites_config;
pub use health::health_check;
pub use meals::meals_config;
pub use search::{search_config, SESSION_HEADER};
