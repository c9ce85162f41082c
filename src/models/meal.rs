use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Number of ingredient/measure slots a catalog record carries.
pub const INGREDIENT_SLOTS: usize = 20;

/// One raw ingredient slot as delivered by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientSlot {
    pub ingredient: Option<String>,
    pub measure: Option<String>,
}

/// A present ingredient with its (possibly empty) measure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientLine {
    pub name: String,
    pub measure: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Meal {
    #[schema(example = "52771")]
    pub id: String,
    #[schema(example = "Spicy Arrabiata Penne")]
    pub name: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub slots: Vec<IngredientSlot>,
}

impl Meal {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail: String::new(),
            category: None,
            area: None,
            instructions: None,
            video_url: None,
            source_url: None,
            slots: Vec::new(),
        }
    }

    /// Append an ingredient slot; slots beyond the catalog limit are ignored
    pub fn with_ingredient(mut self, ingredient: &str, measure: &str) -> Self {
        if self.slots.len() < INGREDIENT_SLOTS {
            self.slots.push(IngredientSlot {
                ingredient: Some(ingredient.to_string()),
                measure: Some(measure.to_string()),
            });
        }
        self
    }

    /// Compacted ingredient list in slot order.
    ///
    /// Slots with a blank ingredient name are skipped. A present ingredient
    /// with a missing or blank measure keeps an empty measure.
    pub fn ingredients(&self) -> Vec<IngredientLine> {
        self.slots
            .iter()
            .filter_map(|slot| {
                let name = slot.ingredient.as_deref()?;
                if name.trim().is_empty() {
                    return None;
                }
                let measure = slot
                    .measure
                    .as_deref()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_default();
                Some(IngredientLine {
                    name: name.to_string(),
                    measure: measure.to_string(),
                })
            })
            .collect()
    }
}

/// Meal record in the catalog's wire format.
///
/// Filter endpoints only return id, name and thumbnail, so everything else
/// is optional. Ingredient slots arrive as `strIngredientN`/`strMeasureN`.
#[derive(Debug, Deserialize)]
pub struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strYoutube", default)]
    pub video_url: Option<String>,
    #[serde(rename = "strSource", default)]
    pub source_url: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl MealRecord {
    fn slot_value(&self, key: &str) -> Option<String> {
        self.extra
            .get(key)
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
    }
}

impl From<MealRecord> for Meal {
    fn from(record: MealRecord) -> Self {
        let slots = (1..=INGREDIENT_SLOTS)
            .map(|n| IngredientSlot {
                ingredient: record.slot_value(&format!("strIngredient{}", n)),
                measure: record.slot_value(&format!("strMeasure{}", n)),
            })
            .filter(|slot| slot.ingredient.is_some() || slot.measure.is_some())
            .collect();

        Meal {
            id: record.id,
            name: record.name,
            thumbnail: record.thumbnail.unwrap_or_default(),
            category: record.category,
            area: record.area,
            instructions: record.instructions,
            video_url: record.video_url,
            source_url: record.source_url,
            slots,
        }
    }
}
