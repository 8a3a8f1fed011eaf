//! # Recipe
//!
//! A named, priced beverage and the ingredient amounts it requires.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Recipe Lifecycle                                 │
//! │                                                                         │
//! │   RecipeBuilder                                                         │
//! │   ├── .name("Latte")?        ← validated immediately (fail-fast)       │
//! │   ├── .price(60)?            ← validated immediately                   │
//! │   ├── .ingredient(milk)?     ← duplicate names rejected                │
//! │   └── .build()?              ← at least one ingredient required        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │   Recipe (id = None)  ──Catalog admission──►  RecipeRepository::save   │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                                          Recipe (id = Some(uuid))      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Equality
//! Two recipes are equal when their names, prices and ingredient
//! (name, quantity) sets match, regardless of insertion order. Ids are only
//! compared when both sides have one. Hashing uses the name alone so that
//! equal recipes always hash equally.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::ingredient::{Ingredient, IngredientSpec};
use crate::validation::{lookup_key, normalize_name, validate_price, ValidationResult};

// =============================================================================
// Recipe
// =============================================================================

/// A beverage definition.
///
/// The ingredients are local copies owned by the recipe. They share nothing
/// with the inventory's ingredients except the name used for lookup.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    /// Storage id, assigned when the recipe is first saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
    price: i64,
    ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Starts building a new recipe.
    pub fn builder() -> RecipeBuilder {
        RecipeBuilder::default()
    }

    /// Attaches a storage id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    /// Ingredients in insertion order.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Renames the recipe. On error the name is unchanged.
    pub fn set_name(&mut self, name: &str) -> ValidationResult<()> {
        self.name = normalize_name("name", name)?;
        Ok(())
    }

    /// Changes the price. On error the price is unchanged.
    pub fn set_price(&mut self, price: i64) -> ValidationResult<()> {
        validate_price(price)?;
        self.price = price;
        Ok(())
    }

    /// Case-insensitive lookup of a required ingredient.
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        let key = lookup_key(name);
        self.ingredients.iter().find(|i| i.name() == key)
    }

    /// Appends an ingredient.
    ///
    /// Returns `false` without mutating when given `None` or when an
    /// ingredient with the same name is already required.
    pub fn add_ingredient(&mut self, ingredient: impl Into<Option<Ingredient>>) -> bool {
        match ingredient.into() {
            Some(ing) if self.ingredient(ing.name()).is_none() => {
                self.ingredients.push(ing);
                true
            }
            _ => false,
        }
    }

    /// Appends each ingredient in order.
    ///
    /// Stops at the first rejected entry and returns `false`. Entries before
    /// it stay added.
    pub fn add_ingredients<I, T>(&mut self, ingredients: I) -> bool
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<Ingredient>>,
    {
        ingredients
            .into_iter()
            .all(|ingredient| self.add_ingredient(ingredient))
    }

    /// Removes a required ingredient by name.
    ///
    /// Fails with `InvariantViolation` whenever the recipe holds a single
    /// ingredient, whether or not `name` matches it. Otherwise returns the
    /// removed ingredient, or `None` if no ingredient had that name.
    pub fn remove_ingredient(&mut self, name: &str) -> CoreResult<Option<Ingredient>> {
        if self.ingredients.len() <= 1 {
            return Err(CoreError::invariant(
                "Recipe must have at least one ingredient",
            ));
        }

        let key = lookup_key(name);
        Ok(self
            .ingredients
            .iter()
            .position(|i| i.name() == key)
            .map(|idx| self.ingredients.remove(idx)))
    }

    /// Returns the wire shape of this recipe.
    pub fn to_spec(&self) -> RecipeSpec {
        RecipeSpec {
            name: self.name.clone(),
            price: self.price,
            ingredients: self.ingredients.iter().map(Ingredient::to_spec).collect(),
        }
    }

    fn ingredient_set(&self) -> BTreeMap<&str, i64> {
        self.ingredients
            .iter()
            .map(|i| (i.name(), i.quantity()))
            .collect()
    }
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (&self.id, &other.id) {
            if a != b {
                return false;
            }
        }

        self.name == other.name
            && self.price == other.price
            && self.ingredients.len() == other.ingredients.len()
            && self.ingredient_set() == other.ingredient_set()
    }
}

impl Eq for Recipe {}

impl Hash for Recipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        writeln!(f, "Price: {}", self.price)?;
        write!(f, "Ingredients: ")?;
        for ing in &self.ingredients {
            write!(f, "{}: {}, ", ing.name(), ing.quantity())?;
        }
        Ok(())
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Fail-fast builder for [`Recipe`].
///
/// Every setter validates its argument and returns the error right away, so
/// a builder can never hold an invalid value.
///
/// ## Example
/// ```rust
/// use brew_core::{Ingredient, Recipe};
///
/// let mocha = Recipe::builder()
///     .name("Mocha").unwrap()
///     .price(75).unwrap()
///     .ingredient(Ingredient::new("coffee", 2).unwrap()).unwrap()
///     .ingredient(Ingredient::new("chocolate", 1).unwrap()).unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(mocha.name(), "mocha");
/// assert!(Recipe::builder().price(0).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecipeBuilder {
    name: Option<String>,
    price: Option<i64>,
    ingredients: Vec<Ingredient>,
}

impl RecipeBuilder {
    pub fn name(mut self, name: &str) -> ValidationResult<Self> {
        self.name = Some(normalize_name("name", name)?);
        Ok(self)
    }

    pub fn price(mut self, price: i64) -> ValidationResult<Self> {
        validate_price(price)?;
        self.price = Some(price);
        Ok(self)
    }

    /// Adds a required ingredient. Names must be unique within the recipe.
    pub fn ingredient(mut self, ingredient: Ingredient) -> ValidationResult<Self> {
        if self.ingredients.iter().any(|i| i.name() == ingredient.name()) {
            return Err(ValidationError::Duplicate {
                field: "ingredient".to_string(),
                value: ingredient.name().to_string(),
            });
        }
        self.ingredients.push(ingredient);
        Ok(self)
    }

    pub fn build(self) -> CoreResult<Recipe> {
        let name = self.name.ok_or_else(|| ValidationError::Required {
            field: "name".to_string(),
        })?;
        let price = self.price.ok_or_else(|| ValidationError::Required {
            field: "price".to_string(),
        })?;

        if self.ingredients.is_empty() {
            return Err(CoreError::invariant(
                "Recipe must have at least one ingredient",
            ));
        }

        Ok(Recipe {
            id: None,
            name,
            price,
            ingredients: self.ingredients,
        })
    }
}

// =============================================================================
// Wire Shape
// =============================================================================

/// Unvalidated recipe as it arrives from a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecipeSpec {
    pub name: String,
    pub price: i64,
    pub ingredients: Vec<IngredientSpec>,
}

impl TryFrom<RecipeSpec> for Recipe {
    type Error = CoreError;

    fn try_from(spec: RecipeSpec) -> CoreResult<Self> {
        let mut builder = Recipe::builder().name(&spec.name)?.price(spec.price)?;
        for ing in spec.ingredients {
            builder = builder.ingredient(Ingredient::try_from(ing)?)?;
        }
        builder.build()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn ing(name: &str, qty: i64) -> Ingredient {
        Ingredient::new(name, qty).unwrap()
    }

    fn coffee() -> Recipe {
        Recipe::builder()
            .name("Coffee")
            .unwrap()
            .price(50)
            .unwrap()
            .ingredient(ing("coffee", 3))
            .unwrap()
            .ingredient(ing("milk", 1))
            .unwrap()
            .build()
            .unwrap()
    }

    fn hash_of(r: &Recipe) -> u64 {
        let mut h = DefaultHasher::new();
        r.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_builder_normalizes_and_validates() {
        let r = coffee();
        assert_eq!(r.name(), "coffee");
        assert_eq!(r.price(), 50);
        assert_eq!(r.ingredients().len(), 2);
        assert!(r.id().is_none());

        assert!(Recipe::builder().name("  ").is_err());
        assert!(Recipe::builder().name(&"n".repeat(31)).is_err());
        assert!(Recipe::builder().price(0).is_err());
        assert!(Recipe::builder().price(1001).is_err());
    }

    #[test]
    fn test_builder_requires_an_ingredient() {
        let result = Recipe::builder()
            .name("Empty")
            .unwrap()
            .price(10)
            .unwrap()
            .build();
        assert!(matches!(result, Err(CoreError::InvariantViolation(_))));
    }

    #[test]
    fn test_builder_rejects_duplicate_ingredient() {
        let result = Recipe::builder()
            .ingredient(ing("milk", 1))
            .unwrap()
            .ingredient(ing("MILK", 2));
        assert!(matches!(result, Err(ValidationError::Duplicate { .. })));
    }

    #[test]
    fn test_setters_leave_state_on_error() {
        let mut r = coffee();
        assert!(r.set_price(0).is_err());
        assert!(r.set_name("").is_err());
        assert_eq!(r.price(), 50);
        assert_eq!(r.name(), "coffee");

        r.set_name(" Black Coffee ").unwrap();
        r.set_price(1000).unwrap();
        assert_eq!(r.name(), "black coffee");
        assert_eq!(r.price(), 1000);
    }

    #[test]
    fn test_add_ingredient() {
        let mut r = coffee();
        assert!(!r.add_ingredient(None));
        assert!(!r.add_ingredient(ing("Milk", 4)));
        assert!(r.add_ingredient(ing("sugar", 1)));
        assert_eq!(r.ingredients().len(), 3);
    }

    #[test]
    fn test_add_ingredients_short_circuits_without_rollback() {
        let mut r = coffee();
        let added = r.add_ingredients(vec![
            Some(ing("sugar", 1)),
            None,
            Some(ing("chocolate", 1)),
        ]);
        assert!(!added);
        assert!(r.ingredient("sugar").is_some());
        assert!(r.ingredient("chocolate").is_none());

        assert!(r.add_ingredients(vec![ing("chocolate", 2)]));
    }

    #[test]
    fn test_remove_ingredient() {
        let mut r = coffee();
        let removed = r.remove_ingredient(" MILK ").unwrap();
        assert_eq!(removed.map(|i| i.quantity()), Some(1));
        assert_eq!(r.ingredients().len(), 1);

        assert!(matches!(
            r.remove_ingredient("coffee"),
            Err(CoreError::InvariantViolation(_))
        ));
        assert!(r.remove_ingredient("absent").is_err());
        assert_eq!(r.ingredients().len(), 1);
    }

    #[test]
    fn test_remove_absent_ingredient_is_noop() {
        let mut r = coffee();
        assert_eq!(r.remove_ingredient("cream").unwrap(), None);
        assert_eq!(r.ingredients().len(), 2);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let r = coffee();
        assert_eq!(r.ingredient("  COFFEE").map(|i| i.quantity()), Some(3));
        assert!(r.ingredient("tea").is_none());
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = coffee();
        let b = Recipe::builder()
            .name("coffee")
            .unwrap()
            .price(50)
            .unwrap()
            .ingredient(ing("milk", 1))
            .unwrap()
            .ingredient(ing("coffee", 3))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_equality_checks_fields() {
        let a = coffee();

        let mut b = coffee();
        b.set_price(51).unwrap();
        assert_ne!(a, b);

        let mut c = coffee();
        c.add_ingredient(ing("sugar", 1));
        assert_ne!(a, c);

        let d = coffee().with_id("one");
        let e = coffee().with_id("two");
        assert_ne!(d, e);
        assert_eq!(d, a);
    }

    #[test]
    fn test_display() {
        let r = Recipe::builder()
            .name("Black Coffee")
            .unwrap()
            .price(1)
            .unwrap()
            .ingredient(ing("Coffee", 1))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(r.to_string(), "black coffee:\nPrice: 1\nIngredients: coffee: 1, ");
    }

    #[test]
    fn test_spec_conversion() {
        let spec = RecipeSpec {
            name: "Latte".to_string(),
            price: 60,
            ingredients: vec![IngredientSpec {
                name: "Milk".to_string(),
                quantity: 3,
            }],
        };
        let r = Recipe::try_from(spec).unwrap();
        assert_eq!(r.name(), "latte");
        assert_eq!(r.to_spec().ingredients[0].name, "milk");

        let bad = RecipeSpec {
            name: "Latte".to_string(),
            price: 60,
            ingredients: vec![],
        };
        assert!(Recipe::try_from(bad).is_err());
    }
}

// =============================================================================
// Property Tests
// =============================================================================
