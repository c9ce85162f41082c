use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    LowCarb,
    Keto,
    Paleo,
}

impl DietaryRestriction {
    pub const ALL: [DietaryRestriction; 7] = [
        DietaryRestriction::Vegetarian,
        DietaryRestriction::Vegan,
        DietaryRestriction::GlutenFree,
        DietaryRestriction::DairyFree,
        DietaryRestriction::LowCarb,
        DietaryRestriction::Keto,
        DietaryRestriction::Paleo,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            DietaryRestriction::Vegetarian => "Vegetarian",
            DietaryRestriction::Vegan => "Vegan",
            DietaryRestriction::GlutenFree => "Gluten Free",
            DietaryRestriction::DairyFree => "Dairy Free",
            DietaryRestriction::LowCarb => "Low Carb",
            DietaryRestriction::Keto => "Keto",
            DietaryRestriction::Paleo => "Paleo",
        }
    }
}

impl fmt::Display for DietaryRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLevel {
    pub fn display_name(self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Medium => "Medium",
            DifficultyLevel::Hard => "Hard",
        }
    }

    pub fn value(self) -> u8 {
        match self {
            DifficultyLevel::Easy => 1,
            DifficultyLevel::Medium => 2,
            DifficultyLevel::Hard => 3,
        }
    }
}

/// A filter dimension backed by its own catalog endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Category,
    Area,
    Ingredient,
}

impl Facet {
    /// Facets are always applied in this order.
    pub const ORDER: [Facet; 3] = [Facet::Category, Facet::Area, Facet::Ingredient];
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::Category => f.write_str("category"),
            Facet::Area => f.write_str("area"),
            Facet::Ingredient => f.write_str("ingredient"),
        }
    }
}

/// Filters active for a search.
///
/// `max_cooking_time` and `difficulty` are carried through (and recorded in
/// history) but not evaluated against catalog data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SearchFilters {
    #[schema(example = "Seafood")]
    pub category: Option<String>,
    #[schema(example = "Italian")]
    pub area: Option<String>,
    #[schema(example = "Tomato")]
    pub ingredient: Option<String>,
    #[schema(value_type = Vec<DietaryRestriction>)]
    pub dietary_restrictions: BTreeSet<DietaryRestriction>,
    pub max_cooking_time: Option<u32>,
    pub difficulty: Option<DifficultyLevel>,
}

impl SearchFilters {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    pub fn with_ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.ingredient = Some(ingredient.into());
        self
    }

    pub fn with_restriction(mut self, restriction: DietaryRestriction) -> Self {
        self.add_restriction(restriction);
        self
    }

    /// Returns false if the restriction was already active
    pub fn add_restriction(&mut self, restriction: DietaryRestriction) -> bool {
        self.dietary_restrictions.insert(restriction)
    }

    pub fn remove_restriction(&mut self, restriction: DietaryRestriction) -> bool {
        self.dietary_restrictions.remove(&restriction)
    }

    /// Value for a facet; blank values count as absent.
    pub fn facet(&self, facet: Facet) -> Option<&str> {
        let value = match facet {
            Facet::Category => self.category.as_deref(),
            Facet::Area => self.area.as_deref(),
            Facet::Ingredient => self.ingredient.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Active facets in application order
    pub fn facets(&self) -> Vec<(Facet, &str)> {
        Facet::ORDER
            .iter()
            .filter_map(|&facet| self.facet(facet).map(|value| (facet, value)))
            .collect()
    }

    pub fn has_facets(&self) -> bool {
        Facet::ORDER.iter().any(|&facet| self.facet(facet).is_some())
    }

    pub fn is_empty(&self) -> bool {
        !self.has_facets()
            && self.dietary_restrictions.is_empty()
            && self.max_cooking_time.is_none()
            && self.difficulty.is_none()
    }
}
