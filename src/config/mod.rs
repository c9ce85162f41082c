use crate::error::Result;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1/";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mealdb_base_url: String,
    pub request_timeout_secs: u64,
    pub data_dir: PathBuf,
    /// Partial queries shorter than this yield no suggestions.
    pub suggestion_min_chars: usize,
}

impl Config {
    /// Load configuration from `.env`, `APP_*` environment variables and defaults
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_source(config::Environment::with_prefix("APP").try_parsing(true))
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080_i64)?
            .set_default("mealdb_base_url", DEFAULT_MEALDB_BASE_URL)?
            .set_default("request_timeout_secs", 30_i64)?
            .set_default("data_dir", "./data")?
            .set_default("suggestion_min_chars", 2_i64)?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
