//! Product-catalog lookup contract consumed by the order interpreter.
//!
//! The interpreter never talks to a database: callers hand it anything that
//! implements [`CatalogLookup`]. [`StaticCatalog`] wraps an already-loaded
//! product list, which is what tests use and what callers with a cached
//! catalog pass in directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Catalog metadata for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Internal product code (e.g. `"LIQUIPP07"`).
    pub code: String,
    pub name: String,
    pub category: Option<String>,
    pub price: Option<f64>,
}

/// Read-only product lookup.
///
/// "Not found" is a normal per-item outcome for the interpreter, so every
/// method returns empty rather than failing — a catalog that can error
/// underneath (DB, HTTP) should log and degrade to empty results.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Products to ground the completion-service prompt, capped at `limit`.
    async fn context_products(&self, limit: usize) -> Vec<CatalogProduct>;

    /// Exact lookup by internal code.
    async fn find_by_code(&self, code: &str) -> Option<CatalogProduct>;

    /// Case-insensitive name search, best matches first: an exact name
    /// match ranks above a prefix match, which ranks above a substring
    /// match. At most three results.
    async fn search_by_name(&self, fragment: &str) -> Vec<CatalogProduct>;
}

/// An in-memory catalog over a pre-loaded product list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<CatalogProduct>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        Self { products }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

const MAX_NAME_MATCHES: usize = 3;

#[async_trait]
impl CatalogLookup for StaticCatalog {
    async fn context_products(&self, limit: usize) -> Vec<CatalogProduct> {
        self.products.iter().take(limit).cloned().collect()
    }

    async fn find_by_code(&self, code: &str) -> Option<CatalogProduct> {
        self.products
            .iter()
            .find(|p| p.code.eq_ignore_ascii_case(code))
            .cloned()
    }

    async fn search_by_name(&self, fragment: &str) -> Vec<CatalogProduct> {
        let needle = fragment.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<(u8, &CatalogProduct)> = self
            .products
            .iter()
            .filter_map(|p| {
                let name = p.name.to_lowercase();
                if name == needle {
                    Some((0, p))
                } else if name.starts_with(&needle) {
                    Some((1, p))
                } else if name.contains(&needle) {
                    Some((2, p))
                } else {
                    None
                }
            })
            .collect();

        ranked.sort_by_key(|(rank, _)| *rank);
        ranked
            .into_iter()
            .take(MAX_NAME_MATCHES)
            .map(|(_, p)| p.clone())
            .collect()
    }
}
