//! # brew-db: Database Layer for Brew
//!
//! SQLite record store for the coffee maker, built on sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Brew Data Flow                                   │
//! │                                                                         │
//! │  CoffeeMakerService::make_coffee                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     brew-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │  │   │
//! │  │   │               │    │ RecipeRepo     │   │              │  │   │
//! │  │   │ SqlitePool    │◄───│ InventoryRepo  │   │ 001_initial  │  │   │
//! │  │   │               │    │ IngredientRepo │   │              │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (brew.db)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use brew_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("brew.db")).await?;
//! let mut inventory = db.inventory().load().await?;
//! inventory.add_quantity("coffee", 10);
//! db.inventory().save(&inventory).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::ingredient::IngredientRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::recipe::RecipeRepository;
pub use repository::StoredIngredient;
