//! # Ingredient
//!
//! A named, bounded quantity. The same type is used for the amount a recipe
//! needs and for the amount the inventory holds.
//!
//! ## Invariants
//! - The name is trimmed, lowercased and 1 to 30 characters long
//! - The quantity is between 1 and 1000 when created or set
//!
//! The inventory may drain a stock ingredient down to zero while consuming a
//! recipe. That path is crate-private; from the outside a quantity can only be
//! set through [`Ingredient::set_quantity`], which validates.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::validation::{normalize_name, validate_quantity, validate_stock, ValidationResult};
use crate::MIN_QUANTITY;

// =============================================================================
// Ingredient
// =============================================================================

/// A named quantity of some ingredient.
///
/// ## Example
/// ```rust
/// use brew_core::Ingredient;
///
/// let milk = Ingredient::new("  Milk ", 4).unwrap();
/// assert_eq!(milk.name(), "milk");
/// assert_eq!(milk.quantity(), 4);
/// assert!(Ingredient::new("milk", 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IngredientSpec")]
pub struct Ingredient {
    name: String,
    quantity: i64,
}

impl Ingredient {
    /// Creates an ingredient, validating both fields.
    pub fn new(name: &str, quantity: i64) -> ValidationResult<Self> {
        let name = normalize_name("name", name)?;
        validate_quantity(quantity)?;
        Ok(Self { name, quantity })
    }

    /// Creates an ingredient with the default quantity of 1.
    pub fn named(name: &str) -> ValidationResult<Self> {
        Self::new(name, MIN_QUANTITY)
    }

    /// Rebuilds a stock ingredient read back from storage.
    ///
    /// Unlike [`Ingredient::new`] this accepts a quantity of zero.
    pub fn restore_stock(name: &str, quantity: i64) -> ValidationResult<Self> {
        let name = normalize_name("name", name)?;
        validate_stock(quantity)?;
        Ok(Self { name, quantity })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Sets the quantity. On error the ingredient is unchanged.
    pub fn set_quantity(&mut self, quantity: i64) -> ValidationResult<()> {
        validate_quantity(quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    /// Overwrites the stock level. Callers check the 0..=1000 bound.
    pub(crate) fn put_stock(&mut self, quantity: i64) {
        debug_assert!(validate_stock(quantity).is_ok());
        self.quantity = quantity;
    }

    /// Returns the wire shape of this ingredient.
    pub fn to_spec(&self) -> IngredientSpec {
        IngredientSpec {
            name: self.name.clone(),
            quantity: self.quantity,
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ingredient [ingredient={}, amount={}]", self.name, self.quantity)
    }
}

// =============================================================================
// Wire Shape
// =============================================================================

/// Unvalidated ingredient as it arrives from a client.
///
/// Converting it into an [`Ingredient`] runs every field validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IngredientSpec {
    pub name: String,
    pub quantity: i64,
}

impl TryFrom<IngredientSpec> for Ingredient {
    type Error = crate::error::ValidationError;

    fn try_from(spec: IngredientSpec) -> Result<Self, Self::Error> {
        Ingredient::new(&spec.name, spec.quantity)
    }
}

impl From<&Ingredient> for IngredientSpec {
    fn from(ingredient: &Ingredient) -> Self {
        ingredient.to_spec()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
