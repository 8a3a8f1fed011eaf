//! # Recipe Repository
//!
//! The catalog store. Recipes are saved together with their ingredient rows
//! in one transaction and deleted with them through `ON DELETE CASCADE`.
//!
//! The store does not cap the catalog or check names beyond the UNIQUE
//! index; the service runs the admission rules first.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::QuantityRow;
use brew_core::validation::lookup_key;
use brew_core::{Ingredient, Recipe};

#[derive(Debug, sqlx::FromRow)]
struct RecipeRow {
    id: String,
    name: String,
    price: i64,
}

/// Repository for recipe database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.recipes();
/// let saved = repo.save(&recipe).await?;
/// let found = repo.find_by_name("latte").await?;
/// ```
#[derive(Debug, Clone)]
pub struct RecipeRepository {
    pool: SqlitePool,
}

impl RecipeRepository {
    /// Creates a new RecipeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RecipeRepository { pool }
    }

    /// Finds a recipe by name (trimmed, case-insensitive).
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Recipe>> {
        let key = lookup_key(name);

        let row = sqlx::query_as::<_, RecipeRow>(
            "SELECT id, name, price FROM recipes WHERE name = ?1",
        )
        .bind(&key)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Lists every recipe in insertion order.
    pub async fn find_all(&self) -> DbResult<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            "SELECT id, name, price FROM recipes ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in rows {
            recipes.push(self.hydrate(row).await?);
        }

        debug!(count = recipes.len(), "Loaded recipes");
        Ok(recipes)
    }

    /// Number of stored recipes.
    pub async fn count(&self) -> DbResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Saves a new recipe and its ingredients.
    ///
    /// Returns the recipe with its freshly assigned id.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - a recipe with this name exists
    pub async fn save(&self, recipe: &Recipe) -> DbResult<Recipe> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(id = %id, name = %recipe.name(), "Saving recipe");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            "INSERT INTO recipes (id, name, price, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
        )
        .bind(&id)
        .bind(recipe.name())
        .bind(recipe.price())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, recipe.name()),
            other => other,
        })?;

        for (position, ing) in recipe.ingredients().iter().enumerate() {
            sqlx::query(
                "INSERT INTO recipe_ingredients (recipe_id, position, name, quantity)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(&id)
            .bind(position as i64)
            .bind(ing.name())
            .bind(ing.quantity())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(recipe.clone().with_id(id))
    }

    /// Deletes a recipe by name. Returns `false` if none matched.
    pub async fn delete(&self, name: &str) -> DbResult<bool> {
        let key = lookup_key(name);
        debug!(name = %key, "Deleting recipe");

        let result = sqlx::query("DELETE FROM recipes WHERE name = ?1")
            .bind(&key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes every recipe. Returns the number removed.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM recipes")
            .execute(&self.pool)
            .await?;

        debug!(removed = result.rows_affected(), "Deleted all recipes");
        Ok(result.rows_affected())
    }

    /// Rebuilds a domain recipe from its row and ingredient rows.
    async fn hydrate(&self, row: RecipeRow) -> DbResult<Recipe> {
        let ingredients = sqlx::query_as::<_, QuantityRow>(
            "SELECT name, quantity FROM recipe_ingredients
             WHERE recipe_id = ?1 ORDER BY position",
        )
        .bind(&row.id)
        .fetch_all(&self.pool)
        .await?;

        let invalid = |e: brew_core::CoreError| DbError::invalid("recipe", e);

        let mut builder = Recipe::builder()
            .name(&row.name)
            .and_then(|b| b.price(row.price))
            .map_err(|e| invalid(e.into()))?;

        for ing in ingredients {
            let ingredient =
                Ingredient::new(&ing.name, ing.quantity).map_err(|e| invalid(e.into()))?;
            builder = builder.ingredient(ingredient).map_err(|e| invalid(e.into()))?;
        }

        Ok(builder.build().map_err(invalid)?.with_id(row.id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use brew_core::{Ingredient, Recipe};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn recipe(name: &str, price: i64) -> Recipe {
        Recipe::builder()
            .name(name)
            .unwrap()
            .price(price)
            .unwrap()
            .ingredient(Ingredient::new("coffee", 3).unwrap())
            .unwrap()
            .ingredient(Ingredient::new("milk", 1).unwrap())
            .unwrap()
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let db = db().await;
        let repo = db.recipes();

        let saved = repo.save(&recipe("Latte", 60)).await.unwrap();
        assert!(saved.id().is_some());

        let found = repo.find_by_name(" LATTE ").await.unwrap().unwrap();
        assert_eq!(found, saved);
        assert_eq!(found.id(), saved.id());
        assert_eq!(found.ingredients()[0].name(), "coffee");
        assert_eq!(found.ingredients()[1].name(), "milk");

        assert!(repo.find_by_name("mocha").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let db = db().await;
        let repo = db.recipes();
        for name in ["b", "a", "c"] {
            repo.save(&recipe(name, 10)).await.unwrap();
        }

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected_by_store() {
        let db = db().await;
        let repo = db.recipes();
        repo.save(&recipe("mocha", 10)).await.unwrap();

        let err = repo.save(&recipe("Mocha", 20)).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_ingredients() {
        let db = db().await;
        let repo = db.recipes();
        repo.save(&recipe("mocha", 10)).await.unwrap();

        assert!(repo.delete("MOCHA").await.unwrap());
        assert!(!repo.delete("mocha").await.unwrap());

        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipe_ingredients")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let db = db().await;
        let repo = db.recipes();
        repo.save(&recipe("a", 10)).await.unwrap();
        repo.save(&recipe("b", 10)).await.unwrap();

        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_recipe_without_ingredients_is_invalid() {
        let db = db().await;
        sqlx::query(
            "INSERT INTO recipes (id, name, price, created_at, updated_at)
             VALUES ('x', 'ghost', 5, '2024-01-01', '2024-01-01')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = db.recipes().find_by_name("ghost").await.unwrap_err();
        assert!(matches!(err, DbError::InvalidData { .. }));
    }
}
