//! Line-item candidates produced by the natural-language order interpreter.

use serde::{Deserialize, Serialize};

/// Outcome of matching one candidate against the product catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogMatch {
    /// Lookup found nothing (or was not attempted); the candidate keeps the
    /// fields exactly as the completion service reported them.
    #[default]
    None,
    /// Exactly one catalog product matched.
    Unique,
    /// Several products matched by name; the best-ranked one was applied.
    Ambiguous,
}

impl CatalogMatch {
    /// Numeric match certainty for review UIs: `0.9` for a unique match,
    /// `0.7` when the match was ambiguous, `None` when nothing matched.
    #[must_use]
    pub fn match_confidence(self) -> Option<f64> {
        match self {
            CatalogMatch::None => None,
            CatalogMatch::Unique => Some(0.9),
            CatalogMatch::Ambiguous => Some(0.7),
        }
    }
}

/// One product/quantity/price guess detected in the order text.
///
/// Confidence is the completion service's own certainty, passed through
/// unchanged. Candidates are never filtered by confidence here — flagging
/// low-confidence items for human review is the caller's policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemCandidate {
    pub product_code: Option<String>,
    pub product_name: String,
    pub quantity: f64,
    /// Unit as reported in the order text ("unidades", "cajas", "kg", …).
    pub unit: Option<String>,
    pub unit_price: Option<f64>,
    /// Service certainty in `[0, 1]`.
    pub confidence: f64,
    pub notes: Option<String>,
    #[serde(default)]
    pub catalog_match: CatalogMatch,
}

/// The interpreter's full answer for one order text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationResult {
    pub original_text: String,
    pub items: Vec<LineItemCandidate>,
    /// Arithmetic mean of item confidences; `0.0` when `items` is empty.
    /// An empty-but-successful interpretation is distinct from a failed one.
    pub average_confidence: f64,
    /// Human-readable notes accumulated during parsing and enrichment:
    /// ambiguities flagged by the service, items dropped as unparseable, …
    pub processing_notes: Vec<String>,
    /// Token usage reported by the completion service, when available.
    pub tokens_used: Option<u64>,
}

/// Mean of the candidates' confidence scores, `0.0` for an empty slice.
#[must_use]
pub fn average_confidence(items: &[LineItemCandidate]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = items.len() as f64;
    items.iter().map(|i| i.confidence).sum::<f64>() / denom
}
