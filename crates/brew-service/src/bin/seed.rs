//! # Seed Data Generator
//!
//! Stocks an empty database with a starter inventory and menu.
//!
//! ## Usage
//! ```bash
//! # Use BREW_DB_PATH or the platform data directory
//! cargo run -p brew-service --bin seed
//!
//! # Specify database path
//! cargo run -p brew-service --bin seed -- --db ./data/brew.db
//! ```
//!
//! Existing inventory entries and recipes are left alone.

use std::env;
use std::path::PathBuf;

use brew_core::{IngredientSpec, RecipeSpec, MAX_RECIPES};
use brew_service::{init_tracing, CoffeeMakerService, ErrorCode, ServiceConfig};

/// Starter stock: (name, quantity)
const STARTER_STOCK: &[(&str, i64)] = &[
    ("coffee", 15),
    ("milk", 15),
    ("sugar", 15),
    ("chocolate", 15),
];

/// Starter menu: (name, price, ingredients)
const STARTER_MENU: &[(&str, i64, &[(&str, i64)])] = &[
    ("coffee", 50, &[("coffee", 3), ("milk", 1), ("sugar", 1)]),
    ("latte", 60, &[("coffee", 2), ("milk", 3)]),
    ("mocha", 75, &[("coffee", 3), ("milk", 1), ("sugar", 1), ("chocolate", 2)]),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config = ServiceConfig::from_env()?;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.db_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Brew Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $BREW_DB_PATH)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    init_tracing(&config.log_filter);

    println!("Brew Seed Data Generator");
    println!("========================");
    println!("Database: {}", config.db_path.display());
    println!();

    let service = CoffeeMakerService::connect(&config).await?;
    println!("✓ Connected to database");

    // Inventory
    let mut stocked = 0;
    for (name, quantity) in STARTER_STOCK {
        match service.create_inventory_ingredient(name).await {
            Ok(_) => {}
            Err(e) if e.code == ErrorCode::Conflict => {
                println!("  {} already stocked", name);
                continue;
            }
            Err(e) => return Err(e.into()),
        }
        // New entries start at 1
        let report = service
            .restock(vec![IngredientSpec {
                name: name.to_string(),
                quantity: quantity - 1,
            }])
            .await?;
        if report.rejected.is_empty() {
            stocked += 1;
        }
    }
    println!("✓ Stocked {} ingredients", stocked);

    // Recipes
    let existing = service.list_recipes().await?.len();
    if existing >= MAX_RECIPES {
        println!("⚠ Catalog already has {} recipes, skipping menu", existing);
    } else {
        let mut created = 0;
        for (name, price, ingredients) in STARTER_MENU {
            let spec = RecipeSpec {
                name: name.to_string(),
                price: *price,
                ingredients: ingredients
                    .iter()
                    .map(|(n, q)| IngredientSpec {
                        name: n.to_string(),
                        quantity: *q,
                    })
                    .collect(),
            };
            match service.create_recipe(spec).await {
                Ok(_) => created += 1,
                Err(e) => eprintln!("  Skipped {}: {}", name, e.message),
            }
        }
        println!("✓ Created {} recipes", created);
    }

    println!();
    println!("{}", service.inventory().await?);
    println!("✓ Seed complete!");

    Ok(())
}
