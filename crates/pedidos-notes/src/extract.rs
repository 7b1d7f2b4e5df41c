//! Line-oriented extraction of recipient data from a raw note.

use pedidos_core::RecipientRecord;

use crate::labels::{FieldTarget, RULES};

/// Extracts recipient data from an optional raw note.
///
/// `None` or blank input short-circuits to `None`. See [`extract_str`] for
/// the extraction rules.
#[must_use]
pub fn extract(raw_note: Option<&str>) -> Option<RecipientRecord> {
    extract_str(raw_note?)
}

/// Extracts recipient data from a raw note.
///
/// Each non-blank line is normalized (lowercased, diacritics stripped,
/// whitespace collapsed) and tested against the label table in order; the
/// first matching rule consumes the line. The field value is everything
/// after the *first* colon of the original line, so values may themselves
/// contain colons. Lines matching no rule are skipped.
///
/// Overwrite policy: a direct label match always overwrites an earlier value
/// of the same field, while the combined `destino` line only fills city and
/// department when they are still unset. The asymmetry is inherited from the
/// established note format and kept intact.
///
/// Returns `Some` only when the collected record is useful per
/// [`RecipientRecord::is_useful`]; anything less yields `None`.
#[must_use]
pub fn extract_str(raw_note: &str) -> Option<RecipientRecord> {
    if raw_note.trim().is_empty() {
        return None;
    }

    let mut record = RecipientRecord::default();
    let mut matched_lines = 0usize;

    for line in raw_note.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let normalized = normalize_line(trimmed);

        for rule in RULES {
            if rule.matches(&normalized) {
                if let Some(value) = value_after_colon(trimmed) {
                    apply(&mut record, rule.target, value);
                }
                matched_lines += 1;
                break;
            }
        }
    }

    tracing::debug!(matched_lines, useful = record.is_useful(), "note extraction finished");

    record.is_useful().then_some(record)
}

/// Lowercases, strips diacritics, and collapses whitespace runs to single
/// spaces. Only used for label matching — field values keep the original
/// spelling.
fn normalize_line(line: &str) -> String {
    let folded: String = line.to_lowercase().chars().map(fold_diacritic).collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Maps accented Latin letters to their base letter. Covers the marks that
/// actually occur in the note labels (Spanish plus common French/Portuguese
/// spillover from autocorrect).
fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Everything after the first colon, trimmed. Returns `None` when there is
/// no colon or the value is blank — a labeled line with an empty value is
/// still consumed by its rule, it just writes nothing.
fn value_after_colon(line: &str) -> Option<&str> {
    let (_, value) = line.split_once(':')?;
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn apply(record: &mut RecipientRecord, target: FieldTarget, value: &str) {
    match target {
        FieldTarget::ShippingPayment => record.shipping_payment_method = Some(value.to_owned()),
        FieldTarget::OrderPayment => record.order_payment_method = Some(value.to_owned()),
        FieldTarget::Name => record.name = Some(value.to_owned()),
        FieldTarget::NationalId => record.national_id = Some(value.to_owned()),
        FieldTarget::Phone => record.phone = Some(value.to_owned()),
        FieldTarget::Department => record.department = Some(value.to_owned()),
        FieldTarget::City => record.city = Some(value.to_owned()),
        FieldTarget::Destination => apply_destination(record, value),
        FieldTarget::Address => record.address = Some(value.to_owned()),
    }
}

/// `destino: Ciudad - Departamento` (or comma-separated). The first segment
/// fills city, the second department — but only fields still unset, so an
/// explicit earlier `ciudad:`/`departamento:` line wins over the combined
/// form.
fn apply_destination(record: &mut RecipientRecord, value: &str) {
    let mut segments = value
        .split(['-', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty());

    if let Some(city) = segments.next() {
        if record.city.is_none() {
            record.city = Some(city.to_owned());
        }
    }
    if let Some(department) = segments.next() {
        if record.department.is_none() {
            record.department = Some(department.to_owned());
        }
    }
}
