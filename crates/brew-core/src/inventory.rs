//! # Inventory
//!
//! The stock ledger: one ingredient entry per unique name.
//!
//! ## Consumption Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     use_ingredients(recipe)                             │
//! │                                                                         │
//! │   Phase 1: enough_ingredients(recipe)                                  │
//! │   ├── every required name present?                                     │
//! │   └── every stock quantity ≥ required amount?                          │
//! │           │                                                             │
//! │           ├── NO  → return false, nothing touched                      │
//! │           │                                                             │
//! │           ▼ YES                                                         │
//! │   Phase 2: decrement each required ingredient in recipe order          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │   return true                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two phases run inside one call on an exclusively borrowed inventory.
//! Across requests, the caller that loads and saves the inventory must hold a
//! single-writer lock for the whole load/mutate/save round trip.
//!
//! ## Status Results
//! Mutators return `bool` rather than errors. A `false` means nothing
//! changed; callers branch on it without treating it as exceptional.

use std::fmt;

use serde::Serialize;

use crate::ingredient::Ingredient;
use crate::recipe::Recipe;
use crate::validation::lookup_key;
use crate::{MAX_QUANTITY, MIN_QUANTITY};

/// The ingredient stock of the machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    ingredients: Vec<Ingredient>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an inventory from stored entries, keeping the first entry
    /// for any repeated name.
    pub fn from_ingredients(ingredients: impl IntoIterator<Item = Ingredient>) -> Self {
        let mut inventory = Self::new();
        for ing in ingredients {
            inventory.add_ingredient(ing);
        }
        inventory
    }

    /// Stock entries in insertion order.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    /// Case-insensitive lookup.
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        let key = lookup_key(name);
        self.ingredients.iter().find(|i| i.name() == key)
    }

    fn ingredient_mut(&mut self, name: &str) -> Option<&mut Ingredient> {
        let key = lookup_key(name);
        self.ingredients.iter_mut().find(|i| i.name() == key)
    }

    /// Adds a new stock entry.
    ///
    /// First write wins: returns `false` without mutating when given `None`
    /// or when the name is already stocked.
    pub fn add_ingredient(&mut self, ingredient: impl Into<Option<Ingredient>>) -> bool {
        match ingredient.into() {
            Some(ing) if self.ingredient(ing.name()).is_none() => {
                self.ingredients.push(ing);
                true
            }
            _ => false,
        }
    }

    /// Increases the stock of an existing entry.
    ///
    /// Returns `false` without mutating when the name is not stocked, when
    /// `delta` is below 1, or when the result would exceed 1000.
    pub fn add_quantity(&mut self, name: &str, delta: i64) -> bool {
        if delta < MIN_QUANTITY {
            return false;
        }
        let Some(ing) = self.ingredient_mut(name) else {
            return false;
        };
        match ing.quantity().checked_add(delta) {
            Some(total) if total <= MAX_QUANTITY => {
                ing.put_stock(total);
                true
            }
            _ => false,
        }
    }

    /// Overwrites the stock of an existing entry.
    ///
    /// Returns `false` without mutating when the name is not stocked or the
    /// quantity is outside 1..=1000.
    pub fn set_ingredient(&mut self, name: &str, quantity: i64) -> bool {
        match self.ingredient_mut(name) {
            Some(ing) => ing.set_quantity(quantity).is_ok(),
            None => false,
        }
    }

    /// Removes a stock entry. Returns `false` if the name was not stocked.
    pub fn remove_ingredient(&mut self, name: &str) -> bool {
        let key = lookup_key(name);
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i.name() != key);
        self.ingredients.len() != before
    }

    /// Decrements one entry if enough is stocked.
    ///
    /// When the stock is too low, or the name is missing, nothing changes and
    /// `false` is returned. Only [`Inventory::use_ingredients`] calls this
    /// after a full sufficiency check, so the skip never fires there.
    pub fn use_ingredient(&mut self, name: &str, amount: i64) -> bool {
        if amount < 0 {
            return false;
        }
        match self.ingredient_mut(name) {
            Some(ing) if ing.quantity() >= amount => {
                let remaining = ing.quantity() - amount;
                ing.put_stock(remaining);
                true
            }
            _ => false,
        }
    }

    /// True when every ingredient the recipe needs is stocked in at least
    /// the required amount.
    pub fn enough_ingredients(&self, recipe: &Recipe) -> bool {
        recipe.ingredients().iter().all(|need| {
            self.ingredient(need.name())
                .is_some_and(|have| have.quantity() >= need.quantity())
        })
    }

    /// Names of the recipe ingredients that are missing or short.
    pub fn shortfalls(&self, recipe: &Recipe) -> Vec<String> {
        recipe
            .ingredients()
            .iter()
            .filter(|need| {
                self.ingredient(need.name())
                    .is_none_or(|have| have.quantity() < need.quantity())
            })
            .map(|need| need.name().to_string())
            .collect()
    }

    /// Consumes everything a recipe needs, or nothing at all.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::{Ingredient, Inventory, Recipe};
    ///
    /// let mut inv = Inventory::new();
    /// inv.add_ingredient(Ingredient::new("coffee", 2).unwrap());
    /// inv.add_ingredient(Ingredient::new("milk", 5).unwrap());
    ///
    /// let latte = Recipe::builder()
    ///     .name("latte").unwrap()
    ///     .price(40).unwrap()
    ///     .ingredient(Ingredient::new("milk", 3).unwrap()).unwrap()
    ///     .ingredient(Ingredient::new("coffee", 3).unwrap()).unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(!inv.use_ingredients(&latte));
    /// assert_eq!(inv.ingredient("milk").unwrap().quantity(), 5);
    /// ```
    pub fn use_ingredients(&mut self, recipe: &Recipe) -> bool {
        if !self.enough_ingredients(recipe) {
            return false;
        }

        for need in recipe.ingredients() {
            self.use_ingredient(need.name(), need.quantity());
        }
        true
    }

    /// Removes every stock entry.
    pub fn clear(&mut self) {
        self.ingredients.clear();
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ing in &self.ingredients {
            writeln!(f, "{}: {}", ing.name(), ing.quantity())?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ing(name: &str, qty: i64) -> Ingredient {
        Ingredient::new(name, qty).unwrap()
    }

    fn stocked(qty: i64) -> Inventory {
        Inventory::from_ingredients(vec![
            ing("coffee", qty),
            ing("milk", qty),
            ing("sugar", qty),
            ing("chocolate", qty),
        ])
    }

    fn coffee_recipe() -> Recipe {
        Recipe::builder()
            .name("Coffee")
            .unwrap()
            .price(50)
            .unwrap()
            .ingredient(ing("coffee", 3))
            .unwrap()
            .ingredient(ing("milk", 1))
            .unwrap()
            .ingredient(ing("sugar", 1))
            .unwrap()
            .ingredient(ing("chocolate", 1))
            .unwrap()
            .build()
            .unwrap()
    }

    fn qty(inv: &Inventory, name: &str) -> i64 {
        inv.ingredient(name).map(|i| i.quantity()).unwrap_or(-1)
    }

    #[test]
    fn test_add_ingredient_first_write_wins() {
        let mut inv = Inventory::new();
        assert!(inv.add_ingredient(ing("milk", 5)));
        assert!(!inv.add_ingredient(ing("Milk", 99)));
        assert!(!inv.add_ingredient(None));
        assert_eq!(qty(&inv, "milk"), 5);
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_add_quantity() {
        let mut inv = stocked(15);
        assert!(inv.add_quantity("coffee", 5));
        assert_eq!(qty(&inv, "coffee"), 20);

        assert!(!inv.add_quantity("coffee", 0));
        assert!(!inv.add_quantity("coffee", -5));
        assert!(!inv.add_quantity("tea", 5));
        assert_eq!(qty(&inv, "coffee"), 20);
    }

    #[test]
    fn test_add_quantity_rejects_overflow() {
        let mut inv = stocked(990);
        assert!(inv.add_quantity("milk", 10));
        assert!(!inv.add_quantity("milk", 1));
        assert!(!inv.add_quantity("sugar", i64::MAX));
        assert_eq!(qty(&inv, "milk"), 1000);
        assert_eq!(qty(&inv, "sugar"), 990);
    }

    #[test]
    fn test_set_ingredient() {
        let mut inv = stocked(15);
        assert!(inv.set_ingredient("Sugar", 40));
        assert_eq!(qty(&inv, "sugar"), 40);

        assert!(!inv.set_ingredient("sugar", 0));
        assert!(!inv.set_ingredient("tea", 4));
        assert_eq!(qty(&inv, "sugar"), 40);
    }

    #[test]
    fn test_remove_ingredient() {
        let mut inv = stocked(15);
        assert!(inv.remove_ingredient(" MILK"));
        assert!(!inv.remove_ingredient("milk"));
        assert_eq!(inv.len(), 3);
    }

    #[test]
    fn test_use_ingredient_skips_when_short() {
        let mut inv = stocked(2);
        assert!(!inv.use_ingredient("coffee", 3));
        assert_eq!(qty(&inv, "coffee"), 2);

        assert!(inv.use_ingredient("coffee", 2));
        assert_eq!(qty(&inv, "coffee"), 0);
    }

    #[test]
    fn test_use_ingredients_success() {
        let mut inv = stocked(15);
        assert!(inv.shortfalls(&coffee_recipe()).is_empty());
        assert!(inv.use_ingredients(&coffee_recipe()));
        assert_eq!(qty(&inv, "coffee"), 12);
        assert_eq!(qty(&inv, "milk"), 14);
        assert_eq!(qty(&inv, "sugar"), 14);
        assert_eq!(qty(&inv, "chocolate"), 14);
    }

    #[test]
    fn test_use_ingredients_all_or_nothing() {
        let mut inv = stocked(15);
        inv.set_ingredient("coffee", 1);
        let before = inv.clone();

        assert!(!inv.enough_ingredients(&coffee_recipe()));
        assert!(!inv.use_ingredients(&coffee_recipe()));
        assert_eq!(inv, before);
        assert_eq!(inv.shortfalls(&coffee_recipe()), vec!["coffee".to_string()]);
    }

    #[test]
    fn test_missing_ingredient_is_insufficient() {
        let mut inv = stocked(15);
        inv.remove_ingredient("chocolate");
        assert!(!inv.enough_ingredients(&coffee_recipe()));
        assert_eq!(inv.shortfalls(&coffee_recipe()), vec!["chocolate".to_string()]);
    }

    #[test]
    fn test_stock_may_drain_to_zero() {
        let mut inv = Inventory::from_ingredients(vec![
            ing("coffee", 3),
            ing("milk", 1),
            ing("sugar", 1),
            ing("chocolate", 1),
        ]);
        assert!(inv.use_ingredients(&coffee_recipe()));
        assert!(inv.ingredients().iter().all(|i| i.quantity() == 0));
        assert!(!inv.use_ingredients(&coffee_recipe()));
    }

    #[test]
    fn test_clear_and_display() {
        let mut inv = Inventory::from_ingredients(vec![ing("chocolate", 500), ing("coffee", 500)]);
        assert_eq!(inv.to_string(), "chocolate: 500\ncoffee: 500\n");

        inv.clear();
        assert!(inv.is_empty());
        assert_eq!(inv.to_string(), "");
    }
}

// =============================================================================
// Property Tests
// =============================================================================
