//! Shared domain types and configuration for the pedidos pipeline.
//!
//! Holds the value objects exchanged between the notes extractor, the order
//! interpreter, and the caller that merges both into an invoice request:
//! [`RecipientRecord`], [`LineItemCandidate`], [`InterpretationResult`], and
//! the [`CatalogLookup`] contract plus an in-memory [`StaticCatalog`] for
//! tests and pre-loaded catalogs. Application configuration is loaded from
//! environment variables via [`load_app_config`].

use thiserror::Error;

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod orders;
pub mod recipient;

pub use app_config::{AppConfig, Environment};
pub use catalog::{CatalogLookup, CatalogProduct, StaticCatalog};
pub use config::{load_app_config, load_app_config_from_env};
pub use orders::{average_confidence, CatalogMatch, InterpretationResult, LineItemCandidate};
pub use recipient::RecipientRecord;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
