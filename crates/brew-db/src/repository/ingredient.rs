//! # Ingredient Repository
//!
//! Standalone ingredient definitions. These are unrelated to the inventory
//! and to the ingredients stored inside recipes; several definitions may
//! share a name.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::StoredIngredient;
use brew_core::validation::lookup_key;
use brew_core::Ingredient;

#[derive(Debug, sqlx::FromRow)]
struct IngredientRow {
    id: String,
    name: String,
    quantity: i64,
}

impl TryFrom<IngredientRow> for StoredIngredient {
    type Error = DbError;

    fn try_from(row: IngredientRow) -> DbResult<Self> {
        let ingredient = Ingredient::new(&row.name, row.quantity)
            .map_err(|e| DbError::invalid("ingredient", e))?;
        Ok(StoredIngredient {
            id: row.id,
            ingredient,
        })
    }
}

/// Repository for standalone ingredient definitions.
#[derive(Debug, Clone)]
pub struct IngredientRepository {
    pool: SqlitePool,
}

impl IngredientRepository {
    /// Creates a new IngredientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        IngredientRepository { pool }
    }

    /// Inserts a definition under a fresh id.
    pub async fn insert(&self, ingredient: &Ingredient) -> DbResult<StoredIngredient> {
        let id = Uuid::new_v4().to_string();
        debug!(id = %id, name = %ingredient.name(), "Inserting ingredient");

        sqlx::query(
            "INSERT INTO ingredients (id, name, quantity, created_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&id)
        .bind(ingredient.name())
        .bind(ingredient.quantity())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(StoredIngredient {
            id,
            ingredient: ingredient.clone(),
        })
    }

    /// Lists every definition in insertion order.
    pub async fn list(&self) -> DbResult<Vec<StoredIngredient>> {
        sqlx::query_as::<_, IngredientRow>(
            "SELECT id, name, quantity FROM ingredients ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(StoredIngredient::try_from)
        .collect()
    }

    /// Finds the oldest definition with this name.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<StoredIngredient>> {
        sqlx::query_as::<_, IngredientRow>(
            "SELECT id, name, quantity FROM ingredients
             WHERE name = ?1 ORDER BY rowid LIMIT 1",
        )
        .bind(lookup_key(name))
        .fetch_optional(&self.pool)
        .await?
        .map(StoredIngredient::try_from)
        .transpose()
    }

    /// Deletes the oldest definition with this name.
    ///
    /// Returns `false` if no definition matched.
    pub async fn delete_by_name(&self, name: &str) -> DbResult<bool> {
        let key = lookup_key(name);
        debug!(name = %key, "Deleting ingredient");

        let result = sqlx::query(
            "DELETE FROM ingredients WHERE id =
             (SELECT id FROM ingredients WHERE name = ?1 ORDER BY rowid LIMIT 1)",
        )
        .bind(&key)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use brew_core::Ingredient;

    #[tokio::test]
    async fn test_duplicates_allowed_and_deleted_one_at_a_time() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.ingredients();

        let first = repo.insert(&Ingredient::new("milk", 2).unwrap()).await.unwrap();
        repo.insert(&Ingredient::new("Milk", 7).unwrap()).await.unwrap();
        repo.insert(&Ingredient::named("foam").unwrap()).await.unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 3);

        let found = repo.find_by_name(" MILK").await.unwrap().unwrap();
        assert_eq!(found, first);

        assert!(repo.delete_by_name("milk").await.unwrap());
        let found = repo.find_by_name("milk").await.unwrap().unwrap();
        assert_eq!(found.ingredient.quantity(), 7);

        assert!(repo.delete_by_name("milk").await.unwrap());
        assert!(!repo.delete_by_name("milk").await.unwrap());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
