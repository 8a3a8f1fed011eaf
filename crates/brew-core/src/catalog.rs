//! # Catalog
//!
//! Admission rules for the recipe catalog.
//!
//! The catalog holds at most [`MAX_RECIPES`] recipes with unique names. The
//! record store never enforces these rules itself, so they are checked here
//! before anything is saved:
//!
//! ```text
//! create recipe ──► check_admission ──┬── name taken? ──► DuplicateName
//!                                     ├── 3 stored?   ──► CatalogFull
//!                                     └── OK          ──► save
//! ```
//!
//! The duplicate check runs first, so re-submitting an existing recipe to a
//! full catalog reports the name collision.

use crate::error::{CoreError, CoreResult};
use crate::recipe::Recipe;
use crate::validation::lookup_key;
use crate::MAX_RECIPES;

/// An in-memory snapshot of the stored recipes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps recipes loaded from storage.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.recipes.len() >= MAX_RECIPES
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Recipe> {
        let key = lookup_key(name);
        self.recipes.iter().find(|r| r.name() == key)
    }

    /// Checks whether `recipe` may be added.
    pub fn check_admission(&self, recipe: &Recipe) -> CoreResult<()> {
        if self.find(recipe.name()).is_some() {
            return Err(CoreError::DuplicateName(recipe.name().to_string()));
        }
        if self.is_full() {
            return Err(CoreError::CatalogFull {
                name: recipe.name().to_string(),
                max: MAX_RECIPES,
            });
        }
        Ok(())
    }

    /// Adds a recipe after the admission check.
    pub fn add(&mut self, recipe: Recipe) -> CoreResult<()> {
        self.check_admission(&recipe)?;
        self.recipes.push(recipe);
        Ok(())
    }

    /// Removes and returns the recipe with this name.
    pub fn remove(&mut self, name: &str) -> Option<Recipe> {
        let key = lookup_key(name);
        let idx = self.recipes.iter().position(|r| r.name() == key)?;
        Some(self.recipes.remove(idx))
    }

    pub fn clear(&mut self) {
        self.recipes.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::Ingredient;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig { cases: 100, ..ProptestConfig::default() })]

        #[test]
        fn prop_catalog_never_exceeds_cap(names in prop::collection::vec("[a-f]{1,3}", 0..12)) {
            let mut catalog = Catalog::new();
            for name in &names {
                let r = Recipe::builder()
                    .name(name).unwrap()
                    .price(5).unwrap()
                    .ingredient(Ingredient::new("water", 1).unwrap()).unwrap()
                    .build().unwrap();
                let _ = catalog.add(r);
                prop_assert!(catalog.len() <= MAX_RECIPES);
            }
        }
    }
}
