use crate::{
    error::{ApiError, Result},
    models::{Area, Category, Ingredient, Meal},
    services::meal_provider::MealProvider,
};
use std::sync::Arc;
use tracing::debug;

/// Browsing operations over the catalog that need no result combination
#[derive(Clone)]
pub struct CatalogService {
    provider: Arc<dyn MealProvider>,
}

impl CatalogService {
    pub fn new(provider: Arc<dyn MealProvider>) -> Self {
        Self { provider }
    }

    pub async fn meal_by_id(&self, id: &str) -> Result<Meal> {
        self.provider
            .meal_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Meal not found".to_string()))
    }

    pub async fn random_meal(&self) -> Result<Meal> {
        let meal = self.provider.random_meal().await?;
        debug!("Random pick: {} ({})", meal.name, meal.id);
        Ok(meal)
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.provider.list_categories().await
    }

    pub async fn areas(&self) -> Result<Vec<Area>> {
        self.provider.list_areas().await
    }

    pub async fn ingredients(&self) -> Result<Vec<Ingredient>> {
        self.provider.list_ingredients().await
    }

    pub async fn meals_by_category(&self, category: &str) -> Result<Vec<Meal>> {
        self.provider.meals_by_category(category).await
    }

    pub async fn meals_by_area(&self, area: &str) -> Result<Vec<Meal>> {
        self.provider.meals_by_area(area).await
    }

    pub async fn meals_by_ingredient(&self, ingredient: &str) -> Result<Vec<Meal>> {
        self.provider.meals_by_ingredient(ingredient).await
    }
}
