use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A named component of exactly one recipe.
///
/// `id` is `None` until a store persists the ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub instructions: Option<String>,
    pub servings: i32,
    pub ingredients: Vec<Ingredient>,
}

/// A recipe that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub category: String,
    pub instructions: Option<String>,
    pub servings: i32,
    pub ingredients: Vec<Ingredient>,
}

/// Partial update of an existing recipe. `None` fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeUpdate {
    pub id: Uuid,
    pub category: Option<String>,
    pub instructions: Option<String>,
    pub servings: Option<i32>,
    pub ingredients: Vec<Ingredient>,
}

// Database rows

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub instructions: Option<String>,
    pub servings: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipeRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub category: &'a str,
    pub instructions: Option<&'a str>,
    pub servings: i32,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(belongs_to(RecipeRow, foreign_key = recipe_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IngredientRow {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub name: String,
    pub position: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredientRow<'a> {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub name: &'a str,
    pub position: i32,
}

impl RecipeRow {
    /// Attach already-loaded ingredient rows, keeping their stored order.
    pub fn into_recipe(self, mut rows: Vec<IngredientRow>) -> Recipe {
        rows.sort_by_key(|row| row.position);
        Recipe {
            id: self.id,
            name: self.name,
            category: self.category,
            instructions: self.instructions,
            servings: self.servings,
            ingredients: rows
                .into_iter()
                .map(|row| Ingredient {
                    id: Some(row.id),
                    name: row.name,
                })
                .collect(),
        }
    }
}
