use crate::models::{DietaryRestriction, Meal};
use lazy_static::lazy_static;
use std::collections::{BTreeSet, HashMap};

const NON_VEGETARIAN: &[&str] = &["beef", "chicken", "pork", "fish", "meat", "bacon", "ham"];
const ANIMAL_PRODUCTS: &[&str] = &["milk", "cheese", "butter", "cream", "egg", "honey"];
const GLUTEN: &[&str] = &["flour", "wheat", "bread", "pasta", "noodles", "soy sauce"];
const DAIRY: &[&str] = &["milk", "cheese", "butter", "cream", "yogurt"];
const HIGH_CARB: &[&str] = &["rice", "pasta", "bread", "potato", "noodles", "flour"];
const NON_PALEO: &[&str] = &[
    "milk", "cheese", "butter", "cream", "beans", "lentils", "rice", "pasta", "bread", "flour",
];

lazy_static! {
    /// Disqualifying ingredient keywords per restriction
    pub static ref DIETARY_KEYWORDS: HashMap<DietaryRestriction, Vec<&'static str>> = {
        let mut m = HashMap::new();
        m.insert(DietaryRestriction::Vegetarian, NON_VEGETARIAN.to_vec());
        m.insert(
            DietaryRestriction::Vegan,
            NON_VEGETARIAN.iter().chain(ANIMAL_PRODUCTS).copied().collect(),
        );
        m.insert(DietaryRestriction::GlutenFree, GLUTEN.to_vec());
        m.insert(DietaryRestriction::DairyFree, DAIRY.to_vec());
        m.insert(DietaryRestriction::LowCarb, HIGH_CARB.to_vec());
        // Keto is an alias of low carb
        m.insert(DietaryRestriction::Keto, HIGH_CARB.to_vec());
        m.insert(DietaryRestriction::Paleo, NON_PALEO.to_vec());
        m
    };
}

impl DietaryRestriction {
    pub fn keywords(self) -> &'static [&'static str] {
        DIETARY_KEYWORDS
            .get(&self)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Keyword-based dietary classification over ingredient names.
///
/// Matching is a case-insensitive substring test, so "Breadcrumbs" counts
/// as bread and "Chicken Breast" as chicken.
pub struct DietaryClassifier;

impl DietaryClassifier {
    pub fn satisfies(meal: &Meal, restriction: DietaryRestriction) -> bool {
        let names: Vec<String> = meal
            .ingredients()
            .into_iter()
            .map(|line| line.name.to_lowercase())
            .collect();
        Self::names_satisfy(&names, restriction)
    }

    fn names_satisfy(lowercase_names: &[String], restriction: DietaryRestriction) -> bool {
        !restriction
            .keywords()
            .iter()
            .any(|keyword| lowercase_names.iter().any(|name| name.contains(keyword)))
    }

    pub fn satisfies_all(meal: &Meal, restrictions: &BTreeSet<DietaryRestriction>) -> bool {
        if restrictions.is_empty() {
            return true;
        }
        let names: Vec<String> = meal
            .ingredients()
            .into_iter()
            .map(|line| line.name.to_lowercase())
            .collect();
        restrictions
            .iter()
            .all(|&restriction| Self::names_satisfy(&names, restriction))
    }

    /// Keep meals that satisfy every restriction
    pub fn filter_all(meals: Vec<Meal>, restrictions: &BTreeSet<DietaryRestriction>) -> Vec<Meal> {
        if restrictions.is_empty() {
            return meals;
        }
        meals
            .into_iter()
            .filter(|meal| Self::satisfies_all(meal, restrictions))
            .collect()
    }
}
