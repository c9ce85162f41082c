use crate::{
    error::{ApiError, Result},
    models::{Area, Category, Ingredient, Meal, MealRecord},
    services::meal_provider::MealProvider,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use tracing::debug;

/// `{"meals": [...]}`; the catalog sends `null` instead of an empty list
#[derive(Debug, Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    categories: Option<Vec<Category>>,
}

/// HTTP client for TheMealDB-compatible catalogs
#[derive(Debug, Clone)]
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(format!("{} request failed: {}", endpoint, e)))?;

        match response.status() {
            StatusCode::OK => response.json::<T>().await.map_err(|e| {
                ApiError::SerializationError(format!("Failed to parse {} response: {}", endpoint, e))
            }),
            status => Err(ApiError::NetworkError(format!(
                "Unexpected status code from {}: {}",
                endpoint, status
            ))),
        }
    }

    async fn get_meals(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Vec<Meal>> {
        let envelope: MealsEnvelope<MealRecord> = self.get(endpoint, query).await?;
        Ok(envelope
            .meals
            .unwrap_or_default()
            .into_iter()
            .map(Meal::from)
            .collect())
    }
}

#[async_trait]
impl MealProvider for MealDbClient {
    async fn search_by_name(&self, name: &str) -> Result<Vec<Meal>> {
        self.get_meals("search.php", &[("s", name)]).await
    }

    async fn meals_by_category(&self, category: &str) -> Result<Vec<Meal>> {
        self.get_meals("filter.php", &[("c", category)]).await
    }

    async fn meals_by_area(&self, area: &str) -> Result<Vec<Meal>> {
        self.get_meals("filter.php", &[("a", area)]).await
    }

    async fn meals_by_ingredient(&self, ingredient: &str) -> Result<Vec<Meal>> {
        self.get_meals("filter.php", &[("i", ingredient)]).await
    }

    async fn meal_by_id(&self, id: &str) -> Result<Option<Meal>> {
        Ok(self.get_meals("lookup.php", &[("i", id)]).await?.into_iter().next())
    }

    async fn random_meal(&self) -> Result<Meal> {
        self.get_meals("random.php", &[])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound("Catalog returned no random meal".to_string()))
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let envelope: CategoriesEnvelope = self.get("categories.php", &[]).await?;
        Ok(envelope.categories.unwrap_or_default())
    }

    async fn list_areas(&self) -> Result<Vec<Area>> {
        let envelope: MealsEnvelope<Area> = self.get("list.php", &[("a", "list")]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        let envelope: MealsEnvelope<Ingredient> = self.get("list.php", &[("i", "list")]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }
}
