//! # Inventory Repository
//!
//! Load and save for the singleton stock ledger.
//!
//! ## Singleton Row
//! ```text
//! inventory (id = 1)
//!     └── inventory_ingredients (position, name, quantity)
//! ```
//!
//! `load` creates the singleton row on first access. `save` replaces every
//! ingredient row in one transaction, so a reader never sees half of a
//! purchase applied.
//!
//! Neither method serializes a load/mutate/save round trip. The service holds
//! a writer lock around the whole sequence.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::QuantityRow;
use brew_core::{Ingredient, Inventory};

const INVENTORY_ID: i64 = 1;

/// Repository for the inventory singleton.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Loads the inventory, provisioning an empty one on first call.
    pub async fn load(&self) -> DbResult<Inventory> {
        self.ensure_singleton().await?;

        let rows = sqlx::query_as::<_, QuantityRow>(
            "SELECT name, quantity FROM inventory_ingredients
             WHERE inventory_id = ?1 ORDER BY position",
        )
        .bind(INVENTORY_ID)
        .fetch_all(&self.pool)
        .await?;

        let mut ingredients = Vec::with_capacity(rows.len());
        for row in rows {
            let ingredient = Ingredient::restore_stock(&row.name, row.quantity)
                .map_err(|e| DbError::invalid("inventory", e))?;
            ingredients.push(ingredient);
        }

        debug!(count = ingredients.len(), "Loaded inventory");
        Ok(Inventory::from_ingredients(ingredients))
    }

    /// Replaces the stored inventory with `inventory`.
    pub async fn save(&self, inventory: &Inventory) -> DbResult<()> {
        debug!(count = inventory.len(), "Saving inventory");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            "INSERT INTO inventory (id, updated_at) VALUES (?1, ?2)
             ON CONFLICT (id) DO UPDATE SET updated_at = excluded.updated_at",
        )
        .bind(INVENTORY_ID)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM inventory_ingredients WHERE inventory_id = ?1")
            .bind(INVENTORY_ID)
            .execute(&mut *tx)
            .await?;

        for (position, ing) in inventory.ingredients().iter().enumerate() {
            sqlx::query(
                "INSERT INTO inventory_ingredients (inventory_id, position, name, quantity)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(INVENTORY_ID)
            .bind(position as i64)
            .bind(ing.name())
            .bind(ing.quantity())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    async fn ensure_singleton(&self) -> DbResult<()> {
        let result = sqlx::query("INSERT OR IGNORE INTO inventory (id) VALUES (?1)")
            .bind(INVENTORY_ID)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            debug!("Provisioned empty inventory");
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
