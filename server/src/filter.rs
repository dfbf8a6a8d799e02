//! Recipe search filters.
//!
//! A [`FilterRequest`] is a sparse description of what the caller wants: every
//! field is optional and an absent field places no constraint on that
//! dimension. [`build_predicate`] turns it into a [`Predicate`] tree which a
//! store either evaluates in-process ([`Predicate::matches`]) or translates to
//! SQL.

use crate::models::Recipe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Search criteria for recipes. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterRequest {
    /// Case-insensitive category match
    pub category: Option<String>,
    /// Exact number of servings
    pub servings: Option<i32>,
    /// Case-insensitive substring of the instructions
    pub instructions: Option<String>,
    /// Ingredient name -> true (must contain) / false (must not contain)
    pub ingredients: Option<BTreeMap<String, bool>>,
}

/// Text columns of a recipe a predicate can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Category,
    Instructions,
}

impl TextField {
    pub fn value<'a>(&self, recipe: &'a Recipe) -> Option<&'a str> {
        match self {
            TextField::Category => Some(recipe.category.as_str()),
            TextField::Instructions => recipe.instructions.as_deref(),
        }
    }
}

/// Integer columns of a recipe a predicate can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntField {
    Servings,
}

impl IntField {
    pub fn value(&self, recipe: &Recipe) -> i32 {
        match self {
            IntField::Servings => recipe.servings,
        }
    }
}

/// A conjunctive predicate over a recipe and its ingredients.
///
/// Text operands are stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    EqualsCi { field: TextField, value: String },
    SubstringCi { field: TextField, value: String },
    IntEquals { field: IntField, value: i32 },
    /// The recipe has an ingredient named like each of these.
    MembershipIncludes(Vec<String>),
    /// The recipe has no ingredient named like any of these.
    MembershipExcludes(Vec<String>),
    /// All children hold. An empty `And` matches every recipe.
    And(Vec<Predicate>),
}

impl Predicate {
    pub fn all() -> Self {
        Predicate::And(Vec::new())
    }

    /// Case-insensitive equality on the category.
    pub fn category(category: &str) -> Self {
        Predicate::EqualsCi {
            field: TextField::Category,
            value: category.to_lowercase(),
        }
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            Predicate::EqualsCi { field, value } => field
                .value(recipe)
                .is_some_and(|v| v.to_lowercase() == *value),
            Predicate::SubstringCi { field, value } => field
                .value(recipe)
                .is_some_and(|v| v.to_lowercase().contains(value.as_str())),
            Predicate::IntEquals { field, value } => field.value(recipe) == *value,
            Predicate::MembershipIncludes(names) => names
                .iter()
                .all(|name| has_ingredient(recipe, name)),
            Predicate::MembershipExcludes(names) => !names
                .iter()
                .any(|name| has_ingredient(recipe, name)),
            Predicate::And(children) => children.iter().all(|child| child.matches(recipe)),
        }
    }

    /// Whether evaluating this predicate requires the recipe's ingredient rows.
    pub fn joins_ingredients(&self) -> bool {
        match self {
            Predicate::MembershipIncludes(_) | Predicate::MembershipExcludes(_) => true,
            Predicate::And(children) => children.iter().any(Predicate::joins_ingredients),
            _ => false,
        }
    }
}

fn has_ingredient(recipe: &Recipe, lowered_name: &str) -> bool {
    recipe
        .ingredients
        .iter()
        .any(|ingredient| ingredient.name.to_lowercase() == lowered_name)
}

/// Build the predicate for a filter request.
///
/// Every present field contributes one conjunct. Ingredient names mapped to
/// `true` must all be present on a matching recipe; names mapped to `false`
/// must all be absent.
pub fn build_predicate(request: &FilterRequest) -> Predicate {
    let mut predicates = Vec::new();

    if let Some(category) = &request.category {
        predicates.push(Predicate::category(category));
    }

    if let Some(servings) = request.servings {
        predicates.push(Predicate::IntEquals {
            field: IntField::Servings,
            value: servings,
        });
    }

    if let Some(instructions) = &request.instructions {
        predicates.push(Predicate::SubstringCi {
            field: TextField::Instructions,
            value: instructions.to_lowercase(),
        });
    }

    if let Some(ingredients) = &request.ingredients {
        let (included, excluded): (Vec<_>, Vec<_>) =
            ingredients.iter().partition(|(_, include)| **include);

        if !included.is_empty() {
            predicates.push(Predicate::MembershipIncludes(
                included.into_iter().map(|(name, _)| name.to_lowercase()).collect(),
            ));
        }
        if !excluded.is_empty() {
            predicates.push(Predicate::MembershipExcludes(
                excluded.into_iter().map(|(name, _)| name.to_lowercase()).collect(),
            ));
        }
    }

    Predicate::And(predicates)
}

/// Escape LIKE metacharacters so the value matches literally.
pub fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ingredient;
    use uuid::Uuid;

    fn recipe(category: &str, servings: i32, instructions: Option<&str>, ingredients: &[&str]) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            name: format!("{} dish", category),
            category: category.to_string(),
            instructions: instructions.map(str::to_string),
            servings,
            ingredients: ingredients.iter().map(|name| Ingredient::new(*name)).collect(),
        }
    }

    fn ingredients(pairs: &[(&str, bool)]) -> Option<BTreeMap<String, bool>> {
        Some(
            pairs
                .iter()
                .map(|(name, include)| (name.to_string(), *include))
                .collect(),
        )
    }

    #[test]
    fn test_empty_request_matches_everything() {
        let predicate = build_predicate(&FilterRequest::default());
        assert_eq!(predicate, Predicate::all());
        assert!(predicate.matches(&recipe("Desert", 2, None, &[])));
        assert!(!predicate.joins_ingredients());
    }

    #[test]
    fn test_category_is_case_insensitive_equality() {
        let predicate = build_predicate(&FilterRequest {
            category: Some("DESERT".to_string()),
            ..Default::default()
        });
        assert!(predicate.matches(&recipe("Desert", 2, None, &["Sugar"])));
        assert!(predicate.matches(&recipe("desert", 2, None, &["Sugar"])));
        assert!(!predicate.matches(&recipe("Deserts", 2, None, &["Sugar"])));
        assert!(!predicate.matches(&recipe("Vegetarian", 2, None, &["Sugar"])));
    }

    #[test]
    fn test_servings_exact_match() {
        let predicate = build_predicate(&FilterRequest {
            servings: Some(4),
            ..Default::default()
        });
        assert!(predicate.matches(&recipe("Main", 4, None, &[])));
        assert!(!predicate.matches(&recipe("Main", 2, None, &[])));
    }

    #[test]
    fn test_instructions_substring() {
        let predicate = build_predicate(&FilterRequest {
            instructions: Some("Oven".to_string()),
            ..Default::default()
        });
        assert!(predicate.matches(&recipe("Main", 4, Some("Bake in the oven for 20 min"), &[])));
        assert!(!predicate.matches(&recipe("Main", 4, Some("Fry in a pan"), &[])));
        assert!(!predicate.matches(&recipe("Main", 4, None, &[])));
    }

    #[test]
    fn test_include_and_exclude_ingredients() {
        let include = build_predicate(&FilterRequest {
            ingredients: ingredients(&[("pepper", true)]),
            ..Default::default()
        });
        let exclude = build_predicate(&FilterRequest {
            ingredients: ingredients(&[("pepper", false)]),
            ..Default::default()
        });
        let with_pepper = recipe("Vegetarian", 2, None, &["Paneer", "Pepper"]);
        let without_pepper = recipe("Vegetarian", 2, None, &["Paneer", "Salt"]);

        assert!(include.matches(&with_pepper));
        assert!(!include.matches(&without_pepper));
        assert!(!exclude.matches(&with_pepper));
        assert!(exclude.matches(&without_pepper));
        assert!(include.joins_ingredients());
    }

    #[test]
    fn test_all_included_names_required() {
        let predicate = build_predicate(&FilterRequest {
            ingredients: ingredients(&[("salt", true), ("pepper", true)]),
            ..Default::default()
        });
        assert!(predicate.matches(&recipe("Main", 2, None, &["Salt", "Pepper"])));
        assert!(!predicate.matches(&recipe("Main", 2, None, &["Salt"])));
    }

    #[test]
    fn test_ingredient_map_is_partitioned() {
        let predicate = build_predicate(&FilterRequest {
            servings: Some(2),
            ingredients: ingredients(&[("Curd", true), ("Garlic", false), ("Salt", true)]),
            ..Default::default()
        });
        assert_eq!(
            predicate,
            Predicate::And(vec![
                Predicate::IntEquals {
                    field: IntField::Servings,
                    value: 2
                },
                Predicate::MembershipIncludes(vec!["curd".to_string(), "salt".to_string()]),
                Predicate::MembershipExcludes(vec!["garlic".to_string()]),
            ])
        );
    }

    #[test]
    fn test_empty_ingredient_map_adds_no_constraint() {
        let predicate = build_predicate(&FilterRequest {
            ingredients: Some(BTreeMap::new()),
            ..Default::default()
        });
        assert_eq!(predicate, Predicate::all());
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50% off_now"), "50\\% off\\_now");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("Desert"), "Desert");
    }
}
