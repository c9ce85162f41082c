use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const INGREDIENT_IMAGE_BASE: &str = "https://www.themealdb.com/images/ingredients/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    #[serde(alias = "idCategory")]
    pub id: String,
    #[serde(alias = "strCategory")]
    #[schema(example = "Seafood")]
    pub name: String,
    #[serde(alias = "strCategoryThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(alias = "strCategoryDescription", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Area {
    #[serde(alias = "strArea")]
    #[schema(example = "Italian")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    #[serde(alias = "idIngredient")]
    pub id: String,
    #[serde(alias = "strIngredient")]
    #[schema(example = "Chicken")]
    pub name: String,
    #[serde(alias = "strDescription", default)]
    pub description: Option<String>,
    #[serde(alias = "strType", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Small,
    Medium,
    Large,
    Original,
}

impl ImageSize {
    fn suffix(self) -> &'static str {
        match self {
            ImageSize::Small => "-small",
            ImageSize::Medium => "-medium",
            ImageSize::Large => "-large",
            ImageSize::Original => "",
        }
    }
}

impl Ingredient {
    pub fn image_url(&self, size: ImageSize) -> String {
        format!(
            "{}{}{}.png",
            INGREDIENT_IMAGE_BASE,
            self.name.replace(' ', "_"),
            size.suffix()
        )
    }
}
