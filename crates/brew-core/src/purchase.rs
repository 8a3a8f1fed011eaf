//! # Purchase Transaction
//!
//! Turns a buy request into either change or a typed failure.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        purchase(request)                                │
//! │                                                                         │
//! │   1. Lookup        catalog.find(recipe_name)                           │
//! │      └── absent ──────────────────────────────► RecipeNotFound         │
//! │                                                                         │
//! │   2. Funds         amount_paid ≥ price ?                               │
//! │      └── no ──────────────────────────────────► InsufficientFunds      │
//! │                    (inventory never touched)                            │
//! │                                                                         │
//! │   3. Stock         inventory.use_ingredients(recipe)                   │
//! │      └── false ───────────────────────────────► InsufficientStock      │
//! │                    (inventory unchanged)                                │
//! │                                                                         │
//! │   4. Success       change = amount_paid − price                        │
//! │                    (inventory already decremented)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Consumption is the last side effect, so no compensation step exists.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::recipe::Recipe;

// =============================================================================
// Request / Response
// =============================================================================

/// A request to buy one beverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub recipe_name: String,
    pub amount_paid: i64,
}

impl PurchaseRequest {
    pub fn new(recipe_name: impl Into<String>, amount_paid: i64) -> Self {
        Self {
            recipe_name: recipe_name.into(),
            amount_paid,
        }
    }
}

/// The result of a successful purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseReceipt {
    /// Amount paid minus the recipe price. Never negative.
    pub change: i64,
}

// =============================================================================
// Transaction
// =============================================================================

/// Runs the full purchase against a catalog snapshot and the inventory.
///
/// The caller must hold exclusive access to `inventory` across loading it,
/// calling this, and saving it.
pub fn purchase(
    catalog: &Catalog,
    inventory: &mut Inventory,
    request: &PurchaseRequest,
) -> CoreResult<PurchaseReceipt> {
    let recipe = catalog
        .find(&request.recipe_name)
        .ok_or_else(|| CoreError::RecipeNotFound(request.recipe_name.clone()))?;

    make_coffee(recipe, request.amount_paid, inventory)
}

/// Pays for an already resolved recipe and consumes its ingredients.
pub fn make_coffee(
    recipe: &Recipe,
    amount_paid: i64,
    inventory: &mut Inventory,
) -> CoreResult<PurchaseReceipt> {
    if amount_paid < recipe.price() {
        return Err(CoreError::InsufficientFunds {
            price: recipe.price(),
            paid: amount_paid,
        });
    }

    if !inventory.use_ingredients(recipe) {
        return Err(CoreError::InsufficientStock {
            recipe: recipe.name().to_string(),
        });
    }

    Ok(PurchaseReceipt {
        change: amount_paid - recipe.price(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
