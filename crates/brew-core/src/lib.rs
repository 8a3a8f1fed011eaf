//! # brew-core: Pure Business Rules for the Coffee Maker
//!
//! This crate is the **heart** of the coffee maker. It holds every business
//! rule as plain synchronous code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Brew Architecture                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    brew-service                                 │   │
//! │  │    make_coffee, create_recipe, restock, clear_inventory, ...    │   │
//! │  │    (single-writer lock around every inventory mutation)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ brew-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐ ┌──────────┐ ┌───────────┐ ┌───────────────┐  │   │
//! │  │  │ ingredient │ │  recipe  │ │ inventory │ │   purchase    │  │   │
//! │  │  │ name + qty │ │ builder  │ │ check +   │ │ funds → stock │  │   │
//! │  │  │ validated  │ │ equality │ │ consume   │ │ → change      │  │   │
//! │  │  └────────────┘ └──────────┘ └───────────┘ └───────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO LOGGING • DETERMINISTIC            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    brew-db (Record Store)                       │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`ingredient`] - Named, bounded quantity
//! - [`recipe`] - Priced beverage definition and its builder
//! - [`inventory`] - The stock ledger
//! - [`catalog`] - Admission rules for the bounded recipe catalog
//! - [`purchase`] - The purchase transaction
//! - [`validation`] - Field validators shared by the above
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use brew_core::{purchase, Catalog, Ingredient, Inventory, PurchaseRequest, Recipe};
//!
//! let mut inventory = Inventory::new();
//! inventory.add_ingredient(Ingredient::new("coffee", 15).unwrap());
//!
//! let coffee = Recipe::builder()
//!     .name("Coffee").unwrap()
//!     .price(50).unwrap()
//!     .ingredient(Ingredient::new("coffee", 3).unwrap()).unwrap()
//!     .build()
//!     .unwrap();
//!
//! let mut catalog = Catalog::new();
//! catalog.add(coffee).unwrap();
//!
//! let receipt = purchase(&catalog, &mut inventory, &PurchaseRequest::new("coffee", 60)).unwrap();
//! assert_eq!(receipt.change, 10);
//! assert_eq!(inventory.ingredient("coffee").unwrap().quantity(), 12);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod ingredient;
pub mod inventory;
pub mod purchase;
pub mod recipe;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ingredient::{Ingredient, IngredientSpec};
pub use inventory::Inventory;
pub use purchase::{make_coffee, purchase, PurchaseReceipt, PurchaseRequest};
pub use recipe::{Recipe, RecipeBuilder, RecipeSpec};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a recipe or ingredient name, after trimming.
pub const MAX_NAME_LENGTH: usize = 30;

/// Smallest quantity an ingredient may be created or set to.
pub const MIN_QUANTITY: i64 = 1;

/// Largest quantity an ingredient may hold, in a recipe or in stock.
pub const MAX_QUANTITY: i64 = 1000;

/// Smallest recipe price.
pub const MIN_PRICE: i64 = 1;

/// Largest recipe price.
pub const MAX_PRICE: i64 = 1000;

/// Maximum number of recipes the catalog holds.
///
/// ## Business Reason
/// The machine has three beverage buttons.
pub const MAX_RECIPES: usize = 3;
