//! Catalog enrichment of parsed line-item candidates.
//!
//! Resolution order: exact code lookup when the service reported a code,
//! otherwise ranked name search. A match fills the gaps the service left
//! (missing code, missing or zero price) and records whether the match was
//! unique or ambiguous. No match leaves the candidate exactly as reported —
//! an unresolved candidate is a valid outcome for downstream human review,
//! not an error.

use pedidos_core::{CatalogLookup, CatalogMatch, CatalogProduct, LineItemCandidate};

pub(crate) async fn apply<C: CatalogLookup + ?Sized>(
    catalog: &C,
    items: &mut [LineItemCandidate],
) {
    for item in items.iter_mut() {
        let matches = find_matches(catalog, item).await;

        let Some(best) = matches.first() else {
            tracing::debug!(product = %item.product_name, "no catalog match");
            continue;
        };

        if item.product_code.is_none() {
            item.product_code = Some(best.code.clone());
        }
        if item.unit_price.is_none() || item.unit_price == Some(0.0) {
            item.unit_price = best.price;
        }
        item.catalog_match = if matches.len() == 1 {
            CatalogMatch::Unique
        } else {
            CatalogMatch::Ambiguous
        };

        tracing::debug!(
            product = %item.product_name,
            code = %best.code,
            ambiguous = matches.len() > 1,
            "catalog match applied"
        );
    }
}

async fn find_matches<C: CatalogLookup + ?Sized>(
    catalog: &C,
    item: &LineItemCandidate,
) -> Vec<CatalogProduct> {
    if let Some(code) = &item.product_code {
        if let Some(product) = catalog.find_by_code(code).await {
            return vec![product];
        }
    }
    catalog.search_by_name(&item.product_name).await
}
