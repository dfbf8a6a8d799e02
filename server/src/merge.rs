use crate::models::Ingredient;
use std::collections::BTreeMap;

/// Union two ingredient lists, keeping one ingredient per name.
///
/// On a name clash the ingredient from `current` survives, so persisted ids are
/// kept. Within a single list the first occurrence wins. Names compare
/// case-sensitively and the result is sorted by name.
pub fn merge_ingredients(current: Vec<Ingredient>, incoming: Vec<Ingredient>) -> Vec<Ingredient> {
    let mut by_name: BTreeMap<String, Ingredient> = BTreeMap::new();

    for ingredient in current.into_iter().chain(incoming) {
        by_name
            .entry(ingredient.name.clone())
            .or_insert(ingredient);
    }

    by_name.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn names(ingredients: &[Ingredient]) -> Vec<&str> {
        ingredients.iter().map(|i| i.name.as_str()).collect()
    }

    fn stored(name: &str) -> Ingredient {
        Ingredient {
            id: Some(Uuid::new_v4()),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_merge_deduplicates_by_name() {
        let current = vec![stored("Flour"), stored("Banana"), stored("Sugar")];
        let incoming = vec![Ingredient::new("Flour"), Ingredient::new("Dry-fruits")];

        let merged = merge_ingredients(current, incoming);

        assert_eq!(merged.len(), 4);
        assert_eq!(names(&merged), vec!["Banana", "Dry-fruits", "Flour", "Sugar"]);
    }

    #[test]
    fn test_current_ingredient_wins_on_clash() {
        let flour = stored("Flour");
        let merged = merge_ingredients(vec![flour.clone()], vec![Ingredient::new("Flour")]);
        assert_eq!(merged, vec![flour]);
    }

    #[test]
    fn test_new_ingredients_have_no_id() {
        let merged = merge_ingredients(vec![stored("Salt")], vec![Ingredient::new("Pepper")]);
        assert_eq!(names(&merged), vec!["Pepper", "Salt"]);
        assert!(merged[0].id.is_none());
        assert!(merged[1].id.is_some());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let merged = merge_ingredients(vec![stored("salt")], vec![Ingredient::new("Salt")]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_duplicates_within_incoming_collapse() {
        let merged = merge_ingredients(
            Vec::new(),
            vec![Ingredient::new("Curd"), Ingredient::new("Curd")],
        );
        assert_eq!(names(&merged), vec!["Curd"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge_ingredients(Vec::new(), Vec::new()).is_empty());
    }
}
