//! Postgres recipe store backed by diesel and an r2d2 pool.

use super::{RecipeStore, StoreError};
use crate::db::DbPool;
use crate::filter::{escape_like, IntField, Predicate, TextField};
use crate::models::{
    Ingredient, IngredientRow, NewIngredientRow, NewRecipe, NewRecipeRow, Recipe, RecipeRow,
};
use crate::schema::{ingredients, recipes};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::fmt;
use uuid::Uuid;

/// Correlated ingredient-name test against the outer `recipes` row.
///
/// The name MUST be passed via `.bind()`, not interpolated. It is compared
/// against `LOWER(ingredients.name)`, so callers pass it lower-cased.
macro_rules! ingredient_named {
    ($exists:literal, $name:expr) => {
        diesel::dsl::sql::<diesel::sql_types::Bool>(concat!(
            $exists,
            " (SELECT 1 FROM ingredients \
             WHERE ingredients.recipe_id = recipes.id \
             AND LOWER(ingredients.name) = "
        ))
        .bind::<diesel::sql_types::Text, _>($name)
        .sql(")")
    };
}

type RecipeQuery<'a> = recipes::BoxedQuery<'a, Pg>;

pub struct PgRecipeStore {
    pool: DbPool,
}

impl PgRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl fmt::Debug for PgRecipeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgRecipeStore")
            .field("connections", &self.pool.state().connections)
            .finish()
    }
}

fn apply_predicate<'a>(query: RecipeQuery<'a>, predicate: &Predicate) -> RecipeQuery<'a> {
    match predicate {
        Predicate::And(children) => children
            .iter()
            .fold(query, |query, child| apply_predicate(query, child)),
        // ILIKE without wildcards is case-insensitive equality
        Predicate::EqualsCi { field, value } => filter_text(query, *field, escape_like(value)),
        Predicate::SubstringCi { field, value } => {
            filter_text(query, *field, format!("%{}%", escape_like(value)))
        }
        Predicate::IntEquals {
            field: IntField::Servings,
            value,
        } => query.filter(recipes::servings.eq(*value)),
        Predicate::MembershipIncludes(names) => names.iter().fold(query, |query, name| {
            query.filter(ingredient_named!("EXISTS", name.clone()))
        }),
        Predicate::MembershipExcludes(names) => names.iter().fold(query, |query, name| {
            query.filter(ingredient_named!("NOT EXISTS", name.clone()))
        }),
    }
}

fn filter_text(query: RecipeQuery<'_>, field: TextField, pattern: String) -> RecipeQuery<'_> {
    match field {
        TextField::Category => query.filter(recipes::category.ilike(pattern)),
        TextField::Instructions => query.filter(recipes::instructions.ilike(pattern)),
    }
}

fn map_write_error(e: DieselError) -> StoreError {
    match e {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreError::Conflict(info.message().to_string())
        }
        other => StoreError::Query(other),
    }
}

fn with_ids(ingredients: Vec<Ingredient>) -> Vec<Ingredient> {
    ingredients
        .into_iter()
        .map(|ingredient| Ingredient {
            id: Some(ingredient.id.unwrap_or_else(Uuid::new_v4)),
            name: ingredient.name,
        })
        .collect()
}

fn insert_ingredients(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    ingredients: &[Ingredient],
) -> QueryResult<()> {
    if ingredients.is_empty() {
        return Ok(());
    }

    let rows: Vec<NewIngredientRow> = ingredients
        .iter()
        .zip(0..)
        .map(|(ingredient, position)| NewIngredientRow {
            id: ingredient.id.unwrap_or_else(Uuid::new_v4),
            recipe_id,
            name: &ingredient.name,
            position,
        })
        .collect();

    diesel::insert_into(ingredients::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

/// Load ingredient rows for the given recipes in one query and attach them.
fn attach_ingredients(conn: &mut PgConnection, rows: Vec<RecipeRow>) -> QueryResult<Vec<Recipe>> {
    let ingredient_rows = IngredientRow::belonging_to(&rows)
        .select(IngredientRow::as_select())
        .load(conn)?;
    let grouped = ingredient_rows.grouped_by(&rows);

    Ok(rows
        .into_iter()
        .zip(grouped)
        .map(|(row, ingredients)| row.into_recipe(ingredients))
        .collect())
}

impl RecipeStore for PgRecipeStore {
    fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let mut conn = self.pool.get()?;
        let id = Uuid::new_v4();
        let ingredients = with_ids(recipe.ingredients);

        conn.transaction::<_, DieselError, _>(|conn| {
            diesel::insert_into(recipes::table)
                .values(&NewRecipeRow {
                    id,
                    name: &recipe.name,
                    category: &recipe.category,
                    instructions: recipe.instructions.as_deref(),
                    servings: recipe.servings,
                })
                .execute(conn)?;
            insert_ingredients(conn, id, &ingredients)
        })
        .map_err(map_write_error)?;

        Ok(Recipe {
            id,
            name: recipe.name,
            category: recipe.category,
            instructions: recipe.instructions,
            servings: recipe.servings,
            ingredients,
        })
    }

    fn update(&self, recipe: Recipe) -> Result<Recipe, StoreError> {
        let mut conn = self.pool.get()?;
        let recipe = Recipe {
            ingredients: with_ids(recipe.ingredients),
            ..recipe
        };

        let updated = conn
            .transaction::<_, DieselError, _>(|conn| {
                let count = diesel::update(recipes::table.find(recipe.id))
                    .set((
                        recipes::category.eq(&recipe.category),
                        recipes::instructions.eq(recipe.instructions.as_deref()),
                        recipes::servings.eq(recipe.servings),
                    ))
                    .execute(conn)?;
                if count == 0 {
                    return Ok(false);
                }

                // Ingredient rows are rewritten wholesale; surviving ones keep their ids.
                diesel::delete(ingredients::table.filter(ingredients::recipe_id.eq(recipe.id)))
                    .execute(conn)?;
                insert_ingredients(conn, recipe.id, &recipe.ingredients)?;
                Ok(true)
            })
            .map_err(map_write_error)?;

        if !updated {
            return Err(StoreError::Missing(recipe.id));
        }
        Ok(recipe)
    }

    fn fetch_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        let mut conn = self.pool.get()?;

        let row = recipes::table
            .find(id)
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(attach_ingredients(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn fetch_all(&self) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.pool.get()?;

        let rows = recipes::table
            .select(RecipeRow::as_select())
            .order(recipes::name.asc())
            .load(&mut conn)?;

        Ok(attach_ingredients(&mut conn, rows)?)
    }

    fn exists_by_name(&self, name: &str) -> Result<bool, StoreError> {
        let mut conn = self.pool.get()?;

        let exists = diesel::select(diesel::dsl::exists(
            recipes::table.filter(recipes::name.eq(name)),
        ))
        .get_result(&mut conn)?;

        Ok(exists)
    }

    fn exists_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut conn = self.pool.get()?;

        let exists = diesel::select(diesel::dsl::exists(recipes::table.find(id)))
            .get_result(&mut conn)?;

        Ok(exists)
    }

    fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let mut conn = self.pool.get()?;

        // Ingredient rows go with it (ON DELETE CASCADE)
        diesel::delete(recipes::table.find(id)).execute(&mut conn)?;
        Ok(())
    }

    fn fetch_by_category(&self, category: &str) -> Result<Vec<Recipe>, StoreError> {
        self.query(&Predicate::category(category))
    }

    fn query(&self, predicate: &Predicate) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.pool.get()?;

        tracing::debug!(?predicate, "querying recipes");

        let rows = apply_predicate(recipes::table.into_boxed(), predicate)
            .select(RecipeRow::as_select())
            .order(recipes::name.asc())
            .load(&mut conn)?;

        Ok(attach_ingredients(&mut conn, rows)?)
    }
}
