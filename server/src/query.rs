use crate::filter::{build_predicate, FilterRequest, Predicate};
use crate::models::Recipe;
use crate::store::{RecipeStore, StoreError};
use std::collections::HashSet;
use std::sync::Arc;

/// Runs recipe predicates against a store and returns one entry per recipe.
#[derive(Debug, Clone)]
pub struct RecipeQueryEngine {
    store: Arc<dyn RecipeStore>,
}

impl RecipeQueryEngine {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// All recipes matching the filter. An empty result is not an error.
    pub fn search(&self, request: &FilterRequest) -> Result<Vec<Recipe>, StoreError> {
        self.run(&build_predicate(request))
    }

    /// Recipes whose category equals `category`, ignoring case.
    pub fn by_category(&self, category: &str) -> Result<Vec<Recipe>, StoreError> {
        Ok(distinct_by_id(self.store.fetch_by_category(category)?))
    }

    pub fn run(&self, predicate: &Predicate) -> Result<Vec<Recipe>, StoreError> {
        Ok(distinct_by_id(self.store.query(predicate)?))
    }
}

/// Drop repeated recipes (same id), keeping the first occurrence and the
/// store's order otherwise.
pub fn distinct_by_id(rows: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter().filter(|recipe| seen.insert(recipe.id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, NewRecipe};
    use crate::store::MemoryRecipeStore;
    use std::collections::BTreeMap;

    fn engine_with(recipes: &[(&str, &str, i32, &[&str])]) -> RecipeQueryEngine {
        let store = MemoryRecipeStore::new();
        for (name, category, servings, ingredients) in recipes {
            store
                .insert(NewRecipe {
                    name: name.to_string(),
                    category: category.to_string(),
                    instructions: Some(format!("Cook the {}", name.to_lowercase())),
                    servings: *servings,
                    ingredients: ingredients.iter().map(|n| Ingredient::new(*n)).collect(),
                })
                .unwrap();
        }
        RecipeQueryEngine::new(Arc::new(store))
    }

    fn names(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.name.as_str()).collect()
    }

    fn with_ingredients(pairs: &[(&str, bool)]) -> FilterRequest {
        FilterRequest {
            ingredients: Some(
                pairs
                    .iter()
                    .map(|(n, b)| (n.to_string(), *b))
                    .collect::<BTreeMap<_, _>>(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_distinct_by_id_keeps_first_occurrence() {
        let engine = engine_with(&[("Soup", "Main", 2, &["Water"])]);
        let recipe = engine.search(&FilterRequest::default()).unwrap().remove(0);
        let other = Recipe {
            id: uuid::Uuid::new_v4(),
            ..recipe.clone()
        };

        let rows = vec![recipe.clone(), other.clone(), recipe.clone()];
        assert_eq!(distinct_by_id(rows), vec![recipe, other]);
    }

    #[test]
    fn test_joined_rows_collapse_to_one_recipe() {
        let engine = engine_with(&[
            ("Paneer Tikka", "Vegetarian", 2, &["Paneer", "Curd", "Salt", "Pepper"]),
            ("Dal", "Vegetarian", 4, &["Lentils", "Salt"]),
        ]);

        let found = engine.search(&with_ingredients(&[("PEPPER", true)])).unwrap();
        assert_eq!(names(&found), vec!["Paneer Tikka"]);

        let found = engine.search(&with_ingredients(&[("pepper", false)])).unwrap();
        assert_eq!(names(&found), vec!["Dal"]);

        let found = engine.search(&with_ingredients(&[("salt", true)])).unwrap();
        assert_eq!(names(&found), vec!["Paneer Tikka", "Dal"]);
    }

    #[test]
    fn test_combined_constraints() {
        let engine = engine_with(&[
            ("Paneer Tikka", "Vegetarian", 2, &["Paneer", "Curd"]),
            ("Dal", "Vegetarian", 4, &["Lentils"]),
            ("Kheer", "Desert", 4, &["Rice", "Milk"]),
        ]);

        let request = FilterRequest {
            category: Some("vegetarian".to_string()),
            servings: Some(4),
            instructions: Some("DAL".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&engine.search(&request).unwrap()), vec!["Dal"]);
    }

    #[test]
    fn test_unmatched_search_is_empty() {
        let engine = engine_with(&[("Dal", "Vegetarian", 4, &["Lentils"])]);
        let request = FilterRequest {
            category: Some("Seafood".to_string()),
            ..Default::default()
        };
        assert!(engine.search(&request).unwrap().is_empty());
    }

    #[test]
    fn test_by_category() {
        let engine = engine_with(&[
            ("Kheer", "Desert", 4, &["Rice"]),
            ("Halwa", "desert", 6, &["Semolina"]),
            ("Dal", "Vegetarian", 4, &["Lentils"]),
        ]);
        assert_eq!(names(&engine.by_category("DESERT").unwrap()), vec!["Kheer", "Halwa"]);
        assert!(engine.by_category("Des").unwrap().is_empty());
    }
}
