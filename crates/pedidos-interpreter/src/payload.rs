//! Validation of the assistant's order payload.
//!
//! The service is asked for a fixed schema but does not always deliver one.
//! Policy: recover everything recoverable. Only content with no item
//! structure at all is rejected; individually broken items are dropped with
//! an explanatory note so the caller can show what was lost.

use pedidos_core::{CatalogMatch, LineItemCandidate};

use crate::types::{ItemPayload, OrderPayload};

/// Items recovered from a payload plus the notes explaining what was
/// skipped or flagged along the way.
#[derive(Debug, Default)]
pub(crate) struct ParsedPayload {
    pub items: Vec<LineItemCandidate>,
    pub notes: Vec<String>,
}

/// Parses the assistant's message content.
///
/// # Errors
///
/// Returns a human-readable reason when the content is not JSON, not an
/// object, or carries no `items` array — the cases where nothing at all is
/// recoverable and the caller must surface `MalformedResponse`.
pub(crate) fn parse_payload(content: &str) -> Result<ParsedPayload, String> {
    let payload: OrderPayload = serde_json::from_str(content)
        .map_err(|e| format!("assistant content is not a JSON object: {e}"))?;

    let Some(items_value) = payload.items else {
        return Err("payload has no \"items\" field".to_owned());
    };
    let Some(raw_items) = items_value.as_array().cloned() else {
        return Err("payload \"items\" is not an array".to_owned());
    };

    let mut parsed = ParsedPayload::default();

    for (index, raw) in raw_items.into_iter().enumerate() {
        match serde_json::from_value::<ItemPayload>(raw) {
            Ok(item) => match validate_item(index, item) {
                Ok(candidate) => parsed.items.push(candidate),
                Err(note) => parsed.notes.push(note),
            },
            Err(e) => parsed
                .notes
                .push(format!("item {index} dropped: unreadable entry ({e})")),
        }
    }

    for ambiguity in payload.ambiguities {
        parsed.notes.push(format!("service flagged ambiguity: {ambiguity}"));
    }

    Ok(parsed)
}

/// Per-item validation, mirroring what the service was instructed to emit:
/// a non-empty name, a positive quantity, and a confidence in `[0, 1]`.
fn validate_item(index: usize, item: ItemPayload) -> Result<LineItemCandidate, String> {
    let name = match item.product_name {
        Some(ref n) if !n.trim().is_empty() => n.trim().to_owned(),
        _ => return Err(format!("item {index} dropped: missing product_name")),
    };

    let quantity = match item.quantity {
        Some(q) if q.is_finite() && q > 0.0 => q,
        _ => {
            return Err(format!(
                "item {index} ({name}) dropped: quantity must be a positive number"
            ))
        }
    };

    let confidence = match item.confidence {
        Some(c) if (0.0..=1.0).contains(&c) => c,
        _ => {
            return Err(format!(
                "item {index} ({name}) dropped: confidence must be between 0 and 1"
            ))
        }
    };

    Ok(LineItemCandidate {
        product_code: item.product_code.filter(|c| !c.trim().is_empty()),
        product_name: name,
        quantity,
        unit: item.unit.filter(|u| !u.trim().is_empty()),
        unit_price: item.unit_price,
        confidence,
        notes: item.notes.filter(|n| !n.trim().is_empty()),
        catalog_match: CatalogMatch::None,
    })
}
