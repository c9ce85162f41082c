use crate::{
    error::Result,
    models::{Area, Category, Ingredient, Meal},
};
use async_trait::async_trait;

/// Read-only access to the remote recipe catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealProvider: Send + Sync {
    async fn search_by_name(&self, name: &str) -> Result<Vec<Meal>>;

    async fn meals_by_category(&self, category: &str) -> Result<Vec<Meal>>;

    async fn meals_by_area(&self, area: &str) -> Result<Vec<Meal>>;

    async fn meals_by_ingredient(&self, ingredient: &str) -> Result<Vec<Meal>>;

    /// `None` when the catalog has no meal with this id
    async fn meal_by_id(&self, id: &str) -> Result<Option<Meal>>;

    async fn random_meal(&self) -> Result<Meal>;

    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn list_areas(&self) -> Result<Vec<Area>>;

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>>;
}
