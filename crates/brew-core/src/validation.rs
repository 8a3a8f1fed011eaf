//! # Validation Module
//!
//! Field validators shared by ingredients and recipes.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Transport (whatever calls brew-service)                      │
//! │  └── Type validation (deserialization into IngredientSpec/RecipeSpec)  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE, called from every constructor and setter        │
//! │  ├── Names: trimmed, lowercased, 1-30 characters                       │
//! │  └── Quantities and prices: 1-1000                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK constraints on quantity and price                           │
//! │  └── UNIQUE constraints on names                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brew_core::validation::{normalize_name, validate_quantity};
//!
//! assert_eq!(normalize_name("name", "  Mocha ").unwrap(), "mocha");
//! assert!(validate_quantity(1001).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_NAME_LENGTH, MAX_PRICE, MAX_QUANTITY, MIN_PRICE, MIN_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Trims and lowercases a name, enforcing 1 to 30 characters.
///
/// ## Rules
/// - Blank after trimming → `Required`
/// - More than 30 characters after trimming → `TooLong`
///
/// Length is counted in characters, not bytes.
///
/// ## Example
/// ```rust
/// use brew_core::validation::normalize_name;
///
/// assert_eq!(normalize_name("name", " Black Coffee ").unwrap(), "black coffee");
/// assert!(normalize_name("name", "   ").is_err());
/// ```
pub fn normalize_name(field: &str, raw: &str) -> ValidationResult<String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(trimmed.to_lowercase())
}

/// Normalizes a lookup key without validating it.
///
/// Lookups never fail; a key that could never be a valid name simply
/// matches nothing.
#[inline]
pub fn lookup_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an ingredient quantity.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed 1000
///
/// ## User Workflow
/// ```text
/// Recipe form: coffee × 3
///       │
///       ▼
/// validate_quantity(3) ← THIS FUNCTION
///       │
///       ├── qty < 1?     → "quantity must be a positive integer"
///       ├── qty > 1000?  → "quantity must be between 1 and 1000"
///       └── OK → Ingredient is constructed
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    bounded("quantity", qty, MIN_QUANTITY, MAX_QUANTITY)
}

/// Validates a recipe price.
///
/// ## Example
/// ```rust
/// use brew_core::validation::validate_price;
///
/// assert!(validate_price(50).is_ok());
/// assert!(validate_price(0).is_err());
/// assert!(validate_price(1001).is_err());
/// ```
pub fn validate_price(price: i64) -> ValidationResult<()> {
    bounded("price", price, MIN_PRICE, MAX_PRICE)
}

/// Validates a stock level read back from storage.
///
/// Stock may drain to zero through consumption, so zero is accepted here.
pub fn validate_stock(qty: i64) -> ValidationResult<()> {
    if (0..=MAX_QUANTITY).contains(&qty) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_QUANTITY,
        })
    }
}

fn bounded(field: &str, value: i64, min: i64, max: i64) -> ValidationResult<()> {
    if value < min {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
