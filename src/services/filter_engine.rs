use crate::{
    error::Result,
    models::{Facet, Meal, SearchFilters},
    services::{
        dietary::DietaryClassifier, meal_provider::MealProvider,
        search_history::SearchHistoryService,
    },
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How a facet's candidates are folded into the working result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineStep {
    /// Replace the working list with the candidates
    Seed,
    /// Keep working items whose id is among the candidates
    Intersect,
    /// Add the candidates after the working items
    Append,
}

impl CombineStep {
    /// Pick the step for the next facet.
    ///
    /// An empty working list is re-filled rather than kept empty, whether it
    /// is empty because nothing constrained it yet or because an earlier
    /// step matched nothing.
    pub fn choose(working_is_empty: bool, query_is_blank: bool) -> Self {
        match (working_is_empty, query_is_blank) {
            (true, true) => CombineStep::Seed,
            (false, _) => CombineStep::Intersect,
            (true, false) => CombineStep::Append,
        }
    }

    pub fn apply(self, working: Vec<Meal>, candidates: Vec<Meal>) -> Vec<Meal> {
        match self {
            CombineStep::Seed => candidates,
            CombineStep::Intersect => {
                let ids: HashSet<&str> = candidates.iter().map(|m| m.id.as_str()).collect();
                working
                    .into_iter()
                    .filter(|meal| ids.contains(meal.id.as_str()))
                    .collect()
            }
            CombineStep::Append => {
                let mut working = working;
                working.extend(candidates);
                working
            }
        }
    }
}

/// Keep the first occurrence of each meal id
pub fn dedupe_by_id(meals: Vec<Meal>) -> Vec<Meal> {
    let mut seen = HashSet::new();
    meals
        .into_iter()
        .filter(|meal| seen.insert(meal.id.clone()))
        .collect()
}

/// Combines text search, facet filters and dietary restrictions into one result list
#[derive(Clone)]
pub struct FilterEngine {
    provider: Arc<dyn MealProvider>,
    history: SearchHistoryService,
}

impl FilterEngine {
    pub fn new(provider: Arc<dyn MealProvider>, history: SearchHistoryService) -> Self {
        Self { provider, history }
    }

    pub fn history(&self) -> &SearchHistoryService {
        &self.history
    }

    pub async fn search(&self, query: &str, filters: &SearchFilters) -> Result<Vec<Meal>> {
        let query_is_blank = query.trim().is_empty();

        if query_is_blank && !filters.has_facets() {
            debug!("Blank query without facets, skipping catalog calls");
            return Ok(Vec::new());
        }

        let mut results = Vec::new();

        if !query_is_blank {
            match self.provider.search_by_name(query).await {
                Ok(meals) => {
                    debug!("Text search for '{}' returned {} meals", query, meals.len());
                    results = meals;
                }
                // Facet browsing still works when name search is down
                Err(e) => warn!("Text search for '{}' failed, continuing: {}", query, e),
            }
        }

        for (facet, value) in filters.facets() {
            let candidates = self.fetch_facet(facet, value).await?;
            let step = CombineStep::choose(results.is_empty(), query_is_blank);
            debug!(
                "Facet {}='{}': {:?} with {} candidates over {} results",
                facet,
                value,
                step,
                candidates.len(),
                results.len()
            );
            results = step.apply(results, candidates);
        }

        let filtered = DietaryClassifier::filter_all(results, &filters.dietary_restrictions);
        let meals = dedupe_by_id(filtered);

        if !query_is_blank {
            if let Err(e) = self.history.save_search(query, filters).await {
                warn!("Failed to save search history: {}", e);
            }
        }

        info!(
            "Search '{}' with {} facets returned {} meals",
            query,
            filters.facets().len(),
            meals.len()
        );
        Ok(meals)
    }

    async fn fetch_facet(&self, facet: Facet, value: &str) -> Result<Vec<Meal>> {
        match facet {
            Facet::Category => self.provider.meals_by_category(value).await,
            Facet::Area => self.provider.meals_by_area(value).await,
            Facet::Ingredient => self.provider.meals_by_ingredient(value).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::DietaryRestriction;
    use crate::services::meal_provider::MockMealProvider;
    use crate::services::storage::InMemoryStore;
    use mockall::{predicate::eq, Sequence};

    fn meal(id: &str) -> Meal {
        Meal::new(id, format!("Meal {}", id))
    }

    fn meals(ids: &[&str]) -> Vec<Meal> {
        ids.iter().map(|id| meal(id)).collect()
    }

    fn ids(meals: &[Meal]) -> Vec<&str> {
        meals.iter().map(|m| m.id.as_str()).collect()
    }

    fn engine(provider: MockMealProvider) -> FilterEngine {
        let history = SearchHistoryService::new(Arc::new(InMemoryStore::new()));
        FilterEngine::new(Arc::new(provider), history)
    }

    #[test]
    fn test_choose_step() {
        assert_eq!(CombineStep::choose(true, true), CombineStep::Seed);
        assert_eq!(CombineStep::choose(false, true), CombineStep::Intersect);
        assert_eq!(CombineStep::choose(false, false), CombineStep::Intersect);
        assert_eq!(CombineStep::choose(true, false), CombineStep::Append);
    }

    #[test]
    fn test_apply_steps() {
        let working = meals(&["a", "b"]);
        let candidates = meals(&["b", "c"]);

        assert_eq!(
            ids(&CombineStep::Seed.apply(working.clone(), candidates.clone())),
            vec!["b", "c"]
        );
        assert_eq!(
            ids(&CombineStep::Intersect.apply(working.clone(), candidates.clone())),
            vec!["b"]
        );
        assert_eq!(
            ids(&CombineStep::Append.apply(working, candidates)),
            vec!["a", "b", "b", "c"]
        );
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let mut first = meal("a");
        first.name = "first".into();
        let mut second = meal("a");
        second.name = "second".into();

        let deduped = dedupe_by_id(vec![first, meal("b"), second]);
        assert_eq!(ids(&deduped), vec!["a", "b"]);
        assert_eq!(deduped[0].name, "first");
    }

    #[tokio::test]
    async fn test_blank_query_without_facets_makes_no_calls() {
        // No expectations: any provider call panics
        let engine = engine(MockMealProvider::new());

        let results = engine.search("", &SearchFilters::default()).await.unwrap();
        assert!(results.is_empty());

        let only_diet = SearchFilters::default().with_restriction(DietaryRestriction::Vegan);
        assert!(engine.search("   ", &only_diet).await.unwrap().is_empty());
        assert!(engine.history().load().await.is_empty());
    }

    #[tokio::test]
    async fn test_category_seeds_blank_query() {
        let mut provider = MockMealProvider::new();
        provider
            .expect_meals_by_category()
            .with(eq("Seafood"))
            .times(1)
            .returning(|_| Ok(meals(&["1", "2", "3"])));

        let engine = engine(provider);
        let filters = SearchFilters::default().with_category("Seafood");
        let results = engine.search("", &filters).await.unwrap();

        assert_eq!(ids(&results), vec!["1", "2", "3"]);
        assert!(engine.history().load().await.is_empty());
    }

    #[tokio::test]
    async fn test_text_results_intersect_with_ingredient() {
        let mut provider = MockMealProvider::new();
        provider
            .expect_search_by_name()
            .with(eq("pasta"))
            .returning(|_| Ok(meals(&["A", "B"])));
        provider
            .expect_meals_by_ingredient()
            .with(eq("Tomato"))
            .returning(|_| Ok(meals(&["B", "C"])));

        let engine = engine(provider);
        let filters = SearchFilters::default().with_ingredient("Tomato");
        let results = engine.search("pasta", &filters).await.unwrap();

        assert_eq!(ids(&results), vec!["B"]);

        let history = engine.history().load().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].query, "pasta");
        assert_eq!(history[0].filters.as_ref(), Some(&filters));
    }

    #[tokio::test]
    async fn test_failed_text_search_falls_back_to_facet() {
        let mut provider = MockMealProvider::new();
        provider
            .expect_search_by_name()
            .returning(|_| Err(ApiError::NetworkError("connection reset".into())));
        provider
            .expect_meals_by_category()
            .with(eq("Beef"))
            .returning(|_| Ok(meals(&["10", "11"])));

        let engine = engine(provider);
        let filters = SearchFilters::default().with_category("Beef");
        let results = engine.search("anything", &filters).await.unwrap();

        assert_eq!(ids(&results), vec!["10", "11"]);
    }

    #[tokio::test]
    async fn test_failed_text_search_without_facets_is_empty_success() {
        let mut provider = MockMealProvider::new();
        provider
            .expect_search_by_name()
            .returning(|_| Err(ApiError::NetworkError("timeout".into())));

        let engine = engine(provider);
        let results = engine.search("soup", &SearchFilters::default()).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(engine.history().load().await[0].query, "soup");
    }

    #[tokio::test]
    async fn test_facet_failure_propagates() {
        let mut provider = MockMealProvider::new();
        provider
            .expect_meals_by_category()
            .returning(|_| Ok(meals(&["1"])));
        provider
            .expect_meals_by_area()
            .returning(|_| Err(ApiError::NetworkError("502 Bad Gateway".into())));
        provider.expect_meals_by_ingredient().never();

        let engine = engine(provider);
        let filters = SearchFilters::default()
            .with_category("Dessert")
            .with_area("French")
            .with_ingredient("Sugar");
        let result = engine.search("", &filters).await;

        assert!(matches!(result, Err(ApiError::NetworkError(_))));
    }

    #[tokio::test]
    async fn test_facets_called_in_fixed_order() {
        let mut seq = Sequence::new();
        let mut provider = MockMealProvider::new();
        provider
            .expect_search_by_name()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(meals(&["1", "2", "3"])));
        provider
            .expect_meals_by_category()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(meals(&["1", "2"])));
        provider
            .expect_meals_by_area()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(meals(&["2", "3"])));
        provider
            .expect_meals_by_ingredient()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(meals(&["2"])));

        let engine = engine(provider);
        let filters = SearchFilters::default()
            .with_ingredient("Garlic")
            .with_area("Indian")
            .with_category("Chicken");
        let results = engine.search("curry", &filters).await.unwrap();

        assert_eq!(ids(&results), vec!["2"]);
    }

    #[tokio::test]
    async fn test_empty_text_results_append_facet_candidates() {
        let mut provider = MockMealProvider::new();
        provider.expect_search_by_name().returning(|_| Ok(Vec::new()));
        provider
            .expect_meals_by_area()
            .returning(|_| Ok(meals(&["7", "8"])));

        let engine = engine(provider);
        let filters = SearchFilters::default().with_area("Thai");
        let results = engine.search("zzz", &filters).await.unwrap();

        assert_eq!(ids(&results), vec!["7", "8"]);
    }

    #[tokio::test]
    async fn test_facet_without_meals_empties_text_results() {
        let mut provider = MockMealProvider::new();
        provider
            .expect_search_by_name()
            .returning(|_| Ok(meals(&["1", "2"])));
        provider
            .expect_meals_by_area()
            .with(eq("Atlantis"))
            .returning(|_| Ok(Vec::new()));

        let engine = engine(provider);
        let filters = SearchFilters::default().with_area("Atlantis");
        let results = engine.search("pie", &filters).await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_emptied_intersection_is_refilled_by_next_facet() {
        let mut provider = MockMealProvider::new();
        provider
            .expect_meals_by_category()
            .returning(|_| Ok(meals(&["1", "2"])));
        provider
            .expect_meals_by_area()
            .returning(|_| Ok(meals(&["3"])));
        provider
            .expect_meals_by_ingredient()
            .returning(|_| Ok(meals(&["4", "5"])));

        let engine = engine(provider);
        let filters = SearchFilters::default()
            .with_category("Side")
            .with_area("Greek")
            .with_ingredient("Feta");
        let results = engine.search("", &filters).await.unwrap();

        assert_eq!(ids(&results), vec!["4", "5"]);
    }

    #[tokio::test]
    async fn test_vegan_removes_meal_with_butter() {
        let mut provider = MockMealProvider::new();
        provider.expect_meals_by_category().returning(|_| {
            Ok(vec![
                Meal::new("1", "Shortbread").with_ingredient("Butter", "250g"),
                Meal::new("2", "Fruit Salad").with_ingredient("Mango", "1"),
            ])
        });

        let engine = engine(provider);
        let filters = SearchFilters::default()
            .with_category("Dessert")
            .with_restriction(DietaryRestriction::Vegan);
        let results = engine.search("", &filters).await.unwrap();

        assert_eq!(ids(&results), vec!["2"]);
    }

    #[tokio::test]
    async fn test_results_never_contain_duplicate_ids() {
        let mut provider = MockMealProvider::new();
        provider
            .expect_search_by_name()
            .returning(|_| Ok(meals(&["1", "1", "2"])));
        provider
            .expect_meals_by_category()
            .returning(|_| Ok(meals(&["2", "1"])));

        let engine = engine(provider);
        let filters = SearchFilters::default().with_category("Beef");
        let results = engine.search("stew", &filters).await.unwrap();

        assert_eq!(ids(&results), vec!["1", "2"]);
    }
}
