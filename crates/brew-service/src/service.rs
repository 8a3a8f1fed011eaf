//! # Coffee Maker Service
//!
//! Every user operation goes through [`CoffeeMakerService`].
//!
//! ## Concurrency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request A ──┐                                                          │
//! │  request B ──┼──► writer lock ──► load ──► core rules ──► save ──► unlock│
//! │  request C ──┘        (one mutation at a time)                          │
//! │                                                                         │
//! │  reads (list_recipes, inventory, ...) skip the lock                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The inventory is loaded, mutated and saved while the lock is held, so two
//! purchases can never both pass the stock check against the same snapshot.
//! Recipe creation holds it too, which keeps the catalog cap exact.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use brew_core::validation::validate_quantity;
use brew_core::{
    Catalog, CoreError, Ingredient, IngredientSpec, Inventory, PurchaseReceipt, PurchaseRequest,
    Recipe, RecipeSpec,
};
use brew_db::{Database, DbConfig, StoredIngredient};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::ServiceConfig;
use crate::error::{ApiError, ApiResult};

/// Outcome of a bulk restock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RestockReport {
    /// Inventory after the restock.
    pub inventory: Vec<IngredientSpec>,

    /// Names whose entry was not applied.
    pub rejected: Vec<String>,
}

/// Application service owning the database and the writer lock.
///
/// Cloning is cheap and clones share the lock.
///
/// ## Usage
/// ```rust,ignore
/// let service = CoffeeMakerService::open(DbConfig::in_memory()).await?;
/// let receipt = service.make_coffee(PurchaseRequest::new("coffee", 60)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CoffeeMakerService {
    db: Database,
    writer: Arc<Mutex<()>>,
}

impl CoffeeMakerService {
    /// Wraps an already opened database.
    pub fn new(db: Database) -> Self {
        CoffeeMakerService {
            db,
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Opens the database described by `config`.
    pub async fn open(config: DbConfig) -> ApiResult<Self> {
        let db = Database::new(config).await?;
        Ok(Self::new(db))
    }

    /// Opens the configured database file, creating its directory.
    pub async fn connect(config: &ServiceConfig) -> ApiResult<Self> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    error!(path = %parent.display(), error = %e, "Cannot create data directory");
                    ApiError::internal("Cannot create the database directory")
                })?;
            }
        }
        Self::open(config.db_config()).await
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    // =========================================================================
    // Recipes
    // =========================================================================

    /// Validates and stores a new recipe.
    ///
    /// ## Errors
    /// - `VALIDATION_ERROR` / `BUSINESS_LOGIC` for an invalid recipe
    /// - `CONFLICT` when the name is taken
    /// - `CATALOG_FULL` when three recipes are stored
    pub async fn create_recipe(&self, spec: RecipeSpec) -> ApiResult<Recipe> {
        let recipe = Recipe::try_from(spec)?;

        let _guard = self.writer.lock().await;
        let catalog = self.catalog().await?;
        catalog.check_admission(&recipe)?;

        let saved = self.db.recipes().save(&recipe).await?;
        info!(
            name = %saved.name(),
            price = saved.price(),
            recipes = catalog.len() + 1,
            "Recipe created"
        );
        Ok(saved)
    }

    pub async fn list_recipes(&self) -> ApiResult<Vec<Recipe>> {
        Ok(self.db.recipes().find_all().await?)
    }

    pub async fn get_recipe(&self, name: &str) -> ApiResult<Recipe> {
        self.db
            .recipes()
            .find_by_name(name)
            .await?
            .ok_or_else(|| CoreError::RecipeNotFound(name.to_string()).into())
    }

    pub async fn delete_recipe(&self, name: &str) -> ApiResult<()> {
        let _guard = self.writer.lock().await;
        if !self.db.recipes().delete(name).await? {
            return Err(CoreError::RecipeNotFound(name.to_string()).into());
        }
        info!(name = %name, "Recipe deleted");
        Ok(())
    }

    /// Removes every recipe. Returns how many were removed.
    pub async fn delete_all_recipes(&self) -> ApiResult<u64> {
        let _guard = self.writer.lock().await;
        let removed = self.db.recipes().delete_all().await?;
        info!(removed, "All recipes deleted");
        Ok(removed)
    }

    async fn catalog(&self) -> ApiResult<Catalog> {
        Ok(Catalog::from_recipes(self.db.recipes().find_all().await?))
    }

    // =========================================================================
    // Purchase
    // =========================================================================

    /// Buys one beverage.
    ///
    /// The inventory is saved only when the purchase succeeds. Failures carry
    /// exactly one of the three stable purchase messages.
    pub async fn make_coffee(&self, request: PurchaseRequest) -> ApiResult<PurchaseReceipt> {
        let _guard = self.writer.lock().await;

        let catalog = self.catalog().await?;
        let inventory_repo = self.db.inventory();
        let mut inventory = inventory_repo.load().await?;

        match brew_core::purchase(&catalog, &mut inventory, &request) {
            Ok(receipt) => {
                inventory_repo.save(&inventory).await?;
                info!(
                    recipe = %request.recipe_name,
                    paid = request.amount_paid,
                    change = receipt.change,
                    "Purchase completed"
                );
                Ok(receipt)
            }
            Err(err) => {
                if let CoreError::InsufficientStock { recipe } = &err {
                    let short = catalog
                        .find(recipe)
                        .map(|r| inventory.shortfalls(r))
                        .unwrap_or_default();
                    warn!(recipe = %recipe, short = ?short, "Purchase failed on stock");
                } else {
                    info!(
                        recipe = %request.recipe_name,
                        paid = request.amount_paid,
                        reason = %err,
                        "Purchase rejected"
                    );
                }
                Err(err.into())
            }
        }
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    pub async fn inventory(&self) -> ApiResult<Inventory> {
        Ok(self.db.inventory().load().await?)
    }

    /// Stocks a new ingredient with quantity 1.
    pub async fn create_inventory_ingredient(&self, name: &str) -> ApiResult<Inventory> {
        let ingredient = Ingredient::named(name)?;

        self.mutate_inventory(|inventory| {
            let stocked = ingredient.name().to_string();
            if inventory.add_ingredient(ingredient) {
                Ok(())
            } else {
                Err(ApiError::conflict(format!(
                    "{} already exists in the Inventory",
                    stocked
                )))
            }
        })
        .await
    }

    /// Adds each entry's quantity to the matching stock.
    ///
    /// Entries for unknown names, with a quantity below 1, or that would push
    /// the stock past 1000 are skipped and reported.
    pub async fn restock(&self, entries: Vec<IngredientSpec>) -> ApiResult<RestockReport> {
        let _guard = self.writer.lock().await;
        let repo = self.db.inventory();
        let mut inventory = repo.load().await?;

        let mut rejected = Vec::new();
        for entry in &entries {
            if !inventory.add_quantity(&entry.name, entry.quantity) {
                rejected.push(entry.name.clone());
            }
        }

        if rejected.len() < entries.len() {
            repo.save(&inventory).await?;
        }
        if !rejected.is_empty() {
            warn!(rejected = ?rejected, "Restock entries skipped");
        }
        debug!(applied = entries.len() - rejected.len(), "Inventory restocked");

        Ok(RestockReport {
            inventory: inventory.ingredients().iter().map(IngredientSpec::from).collect(),
            rejected,
        })
    }

    /// Overwrites the stock of one ingredient.
    pub async fn set_inventory_quantity(&self, name: &str, quantity: i64) -> ApiResult<Inventory> {
        validate_quantity(quantity)?;

        self.mutate_inventory(|inventory| {
            if inventory.set_ingredient(name, quantity) {
                Ok(())
            } else {
                Err(ApiError::not_found("Ingredient", name))
            }
        })
        .await
    }

    pub async fn remove_inventory_ingredient(&self, name: &str) -> ApiResult<Inventory> {
        self.mutate_inventory(|inventory| {
            if inventory.remove_ingredient(name) {
                Ok(())
            } else {
                Err(ApiError::not_found("Ingredient", name))
            }
        })
        .await
    }

    pub async fn clear_inventory(&self) -> ApiResult<()> {
        self.mutate_inventory(|inventory| {
            inventory.clear();
            Ok(())
        })
        .await?;
        info!("Inventory cleared");
        Ok(())
    }

    /// Load, apply `f`, save. Nothing is saved when `f` fails.
    async fn mutate_inventory<F>(&self, f: F) -> ApiResult<Inventory>
    where
        F: FnOnce(&mut Inventory) -> ApiResult<()>,
    {
        let _guard = self.writer.lock().await;
        let repo = self.db.inventory();
        let mut inventory = repo.load().await?;
        f(&mut inventory)?;
        repo.save(&inventory).await?;
        Ok(inventory)
    }

    // =========================================================================
    // Standalone Ingredients
    // =========================================================================

    /// Stores an ingredient definition. Quantity defaults to 1.
    pub async fn create_ingredient(
        &self,
        name: &str,
        quantity: Option<i64>,
    ) -> ApiResult<StoredIngredient> {
        let ingredient = match quantity {
            Some(q) => Ingredient::new(name, q)?,
            None => Ingredient::named(name)?,
        };
        let stored = self.db.ingredients().insert(&ingredient).await?;
        debug!(id = %stored.id, name = %ingredient.name(), "Ingredient created");
        Ok(stored)
    }

    pub async fn list_ingredients(&self) -> ApiResult<Vec<StoredIngredient>> {
        Ok(self.db.ingredients().list().await?)
    }

    pub async fn get_ingredient(&self, name: &str) -> ApiResult<StoredIngredient> {
        self.db
            .ingredients()
            .find_by_name(name)
            .await?
            .ok_or_else(|| ApiError::not_found("Ingredient", name))
    }

    pub async fn delete_ingredient(&self, name: &str) -> ApiResult<()> {
        if self.db.ingredients().delete_by_name(name).await? {
            Ok(())
        } else {
            Err(ApiError::not_found("Ingredient", name))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    async fn service() -> CoffeeMakerService {
        CoffeeMakerService::open(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_connect_reports_unusable_data_dir() {
        // A regular file where the data directory should be
        let blocker =
            std::env::temp_dir().join(format!("brew-not-a-dir-{}", std::process::id()));
        std::fs::write(&blocker, b"").unwrap();

        let config = ServiceConfig {
            db_path: blocker.join("brew.db"),
            max_connections: 1,
            log_filter: "warn".to_string(),
        };
        let err = CoffeeMakerService::connect(&config).await.unwrap_err();
        std::fs::remove_file(&blocker).unwrap();

        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.message, "Cannot create the database directory");
    }

    fn spec(name: &str, qty: i64) -> IngredientSpec {
        IngredientSpec {
            name: name.to_string(),
            quantity: qty,
        }
    }

    #[tokio::test]
    async fn test_create_inventory_ingredient_conflict() {
        let svc = service().await;

        let inv = svc.create_inventory_ingredient(" Cinnamon ").await.unwrap();
        assert_eq!(inv.ingredient("cinnamon").unwrap().quantity(), 1);

        let err = svc.create_inventory_ingredient("CINNAMON").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "cinnamon already exists in the Inventory");
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_a_conflict() {
        let svc = service().await;
        svc.create_inventory_ingredient("coffee").await.unwrap();
        svc.database().close().await;

        let err = svc.create_inventory_ingredient("coffee").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn test_set_and_remove_inventory_ingredient() {
        let svc = service().await;
        svc.create_inventory_ingredient("milk").await.unwrap();

        let inv = svc.set_inventory_quantity("milk", 40).await.unwrap();
        assert_eq!(inv.ingredient("milk").unwrap().quantity(), 40);

        let err = svc.set_inventory_quantity("milk", 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = svc.set_inventory_quantity("cream", 5).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let inv = svc.remove_inventory_ingredient("milk").await.unwrap();
        assert!(inv.is_empty());
        assert!(svc.remove_inventory_ingredient("milk").await.is_err());
    }

    #[tokio::test]
    async fn test_restock_reports_rejected_entries() {
        let svc = service().await;
        svc.create_inventory_ingredient("coffee").await.unwrap();
        svc.create_inventory_ingredient("milk").await.unwrap();

        let report = svc
            .restock(vec![
                spec("coffee", 10),
                spec("milk", 0),
                spec("tea", 5),
                spec("milk", 1000),
            ])
            .await
            .unwrap();

        assert_eq!(report.rejected, vec!["milk", "tea", "milk"]);
        assert_eq!(report.inventory, vec![spec("coffee", 11), spec("milk", 1)]);

        let stored = svc.inventory().await.unwrap();
        assert_eq!(stored.ingredient("coffee").unwrap().quantity(), 11);
    }

    #[tokio::test]
    async fn test_clear_inventory() {
        let svc = service().await;
        svc.create_inventory_ingredient("sugar").await.unwrap();
        svc.clear_inventory().await.unwrap();
        assert!(svc.inventory().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_standalone_ingredients() {
        let svc = service().await;

        let first = svc.create_ingredient("Vanilla", None).await.unwrap();
        assert_eq!(first.ingredient.quantity(), 1);
        svc.create_ingredient("vanilla", Some(7)).await.unwrap();
        assert_eq!(svc.list_ingredients().await.unwrap().len(), 2);

        let err = svc.create_ingredient("vanilla", Some(1001)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(svc.get_ingredient("VANILLA").await.unwrap().id, first.id);
        svc.delete_ingredient("vanilla").await.unwrap();
        assert_eq!(svc.get_ingredient("vanilla").await.unwrap().ingredient.quantity(), 7);

        svc.delete_ingredient("vanilla").await.unwrap();
        let err = svc.delete_ingredient("vanilla").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_recipe_lookup_errors() {
        let svc = service().await;

        let err = svc.get_recipe("mocha").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Recipe does not exist");

        assert!(svc.delete_recipe("mocha").await.is_err());
        assert_eq!(svc.delete_all_recipes().await.unwrap(), 0);
    }
}
