//! # brew-service: Service Layer for Brew
//!
//! Owns the database handle and the single-writer lock, and exposes every
//! user operation of the coffee maker.
//!
//! ## Module Organization
//! ```text
//! brew_service/
//! ├── config.rs     - ServiceConfig (environment variables)
//! ├── error.rs      - ApiError / ErrorCode (what a client sees)
//! ├── service.rs    - CoffeeMakerService (all operations)
//! └── telemetry.rs  - tracing subscriber bootstrap
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let config = ServiceConfig::from_env()?;
//! init_tracing(&config.log_filter);
//!
//! let service = CoffeeMakerService::connect(&config).await?;
//! let receipt = service.make_coffee(PurchaseRequest::new("coffee", 60)).await?;
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod telemetry;

pub use config::{ConfigError, ServiceConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use service::{CoffeeMakerService, RestockReport};
pub use telemetry::init_tracing;
