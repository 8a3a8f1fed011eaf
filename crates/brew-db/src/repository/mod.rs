//! # Repository Module
//!
//! Database repository implementations for Brew.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CoffeeMakerService                                                    │
//! │       │                                                                 │
//! │       │  db.recipes().find_by_name("latte")                            │
//! │       ▼                                                                 │
//! │  RecipeRepository        InventoryRepository    IngredientRepository   │
//! │  ├── find_by_name        ├── load               ├── insert             │
//! │  ├── find_all            └── save               ├── list               │
//! │  ├── count                                      ├── find_by_name       │
//! │  ├── save                                       └── delete_by_name     │
//! │  ├── delete                                                             │
//! │  └── delete_all                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories never enforce business rules. Rows are turned back into
//! domain values through the brew-core constructors, so a row that breaks a
//! bound surfaces as [`DbError::InvalidData`](crate::DbError::InvalidData).
//!
//! ## Available Repositories
//!
//! - [`RecipeRepository`](recipe::RecipeRepository) - The recipe catalog store
//! - [`InventoryRepository`](inventory::InventoryRepository) - The singleton stock ledger
//! - [`IngredientRepository`](ingredient::IngredientRepository) - Standalone ingredient definitions

pub mod ingredient;
pub mod inventory;
pub mod recipe;

use serde::Serialize;

/// A `(name, quantity)` row shared by the ingredient tables.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct QuantityRow {
    pub name: String,
    pub quantity: i64,
}

/// A standalone ingredient definition with its storage id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredIngredient {
    pub id: String,
    #[serde(flatten)]
    pub ingredient: brew_core::Ingredient,
}
