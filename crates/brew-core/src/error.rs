//! # Error Types
//!
//! Domain-specific error types for brew-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  brew-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Field out of bounds                            │
//! │                                                                         │
//! │  brew-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  brew-service errors                                                   │
//! │  └── ApiError         - What a client sees (serialized)                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stable Messages
//! Three purchase failures carry messages clients branch on. They are part
//! of the contract and must not change:
//! - `RecipeNotFound` → "Recipe does not exist"
//! - `InsufficientFunds` → "Not enough money paid"
//! - `InsufficientStock` → "Not enough Inventory or Ingredient not found in Inventory"

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business rule errors.
///
/// Every variant is a local, recoverable condition. None of them is retried
/// automatically: a failed purchase needs a new request with other inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A field was out of bounds. The offending mutation was not applied.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A structural rule would be broken.
    ///
    /// ## When This Occurs
    /// - Removing the last ingredient of a recipe
    /// - Building a recipe without any ingredient
    #[error("{0}")]
    InvariantViolation(String),

    /// No recipe with the requested name is in the catalog.
    #[error("Recipe does not exist")]
    RecipeNotFound(String),

    /// The amount paid is below the recipe price.
    ///
    /// ## User Workflow
    /// ```text
    /// Buy "coffee" (price 50), pay 40
    ///      │
    ///      ▼
    /// InsufficientFunds { price: 50, paid: 40 }
    ///      │
    ///      ▼
    /// Inventory is never touched
    /// ```
    #[error("Not enough money paid")]
    InsufficientFunds { price: i64, paid: i64 },

    /// Inventory is missing an ingredient or holds too little of it.
    ///
    /// The two cases are deliberately not distinguished for the caller.
    #[error("Not enough Inventory or Ingredient not found in Inventory")]
    InsufficientStock { recipe: String },

    /// A recipe with this name is already in the catalog.
    #[error("Recipe with the name {0} already exists")]
    DuplicateName(String),

    /// The catalog already holds the maximum number of recipes.
    #[error("Insufficient space in recipe book for recipe {name} (maximum {max})")]
    CatalogFull { name: String, max: usize },
}

impl CoreError {
    /// Creates an InvariantViolation with the given reason.
    pub fn invariant(reason: impl Into<String>) -> Self {
        CoreError::InvariantViolation(reason.into())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised synchronously by the constructor or setter that received the bad
/// value. The object is left exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be at least one.
    #[error("{field} must be a positive integer")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., the same ingredient twice in one recipe).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
