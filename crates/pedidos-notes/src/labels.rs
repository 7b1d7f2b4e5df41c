//! Declarative label table for note lines.
//!
//! Each rule maps a set of accepted label spellings to the recipient field it
//! populates. Rules are evaluated in table order against a normalized
//! (lowercased, diacritic-stripped, whitespace-collapsed) copy of the line;
//! the first matching rule consumes the line. Order matters: the shipping
//! payment rule must precede the order payment rule so that `pago envio:`
//! is not claimed by the bare `pago` label.

/// Recipient field a matched line writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    ShippingPayment,
    OrderPayment,
    Name,
    NationalId,
    Phone,
    Department,
    City,
    /// `destino: Ciudad - Departamento` — one line filling two fields.
    Destination,
    Address,
}

/// One label rule: the field it targets and its accepted spellings.
///
/// Spellings are pre-normalized (lowercase, no diacritics, single spaces).
/// New synonyms are added here, never in the matching code.
pub struct LabelRule {
    pub target: FieldTarget,
    pub variants: &'static [&'static str],
}

pub const RULES: &[LabelRule] = &[
    LabelRule {
        target: FieldTarget::ShippingPayment,
        variants: &["forma de pago de envio", "pago envio", "metodo envio"],
    },
    LabelRule {
        target: FieldTarget::OrderPayment,
        variants: &["medio de pago", "metodo de pago", "pago"],
    },
    LabelRule {
        target: FieldTarget::Name,
        variants: &["nombre", "destinatario"],
    },
    LabelRule {
        target: FieldTarget::NationalId,
        variants: &["nit", "documento"],
    },
    LabelRule {
        target: FieldTarget::Phone,
        variants: &["telefono", "tel", "celular", "cel", "whatsapp"],
    },
    LabelRule {
        target: FieldTarget::Department,
        variants: &["departamento destino", "departamento", "depto", "dpto", "department"],
    },
    LabelRule {
        target: FieldTarget::City,
        variants: &["ciudad destino", "ciudad", "municipio", "city"],
    },
    LabelRule {
        target: FieldTarget::Destination,
        variants: &["destino"],
    },
    LabelRule {
        target: FieldTarget::Address,
        variants: &[
            "direccion de envio",
            "direccion de entrega",
            "direccion envio",
            "direccion entrega",
            "direccion destinatario",
            "direccion",
            "dir",
        ],
    },
];

impl LabelRule {
    /// True when the normalized line starts with one of this rule's labels,
    /// followed by optional spaces and a colon.
    #[must_use]
    pub fn matches(&self, normalized_line: &str) -> bool {
        self.variants
            .iter()
            .any(|variant| label_then_colon(normalized_line, variant))
    }
}

/// Checks `line` begins with `label` at a word boundary formed by the colon:
/// `label`, optional spaces, `:`. A longer word sharing the prefix (e.g.
/// `pagos:` against label `pago`) does not match.
fn label_then_colon(line: &str, label: &str) -> bool {
    let Some(rest) = line.strip_prefix(label) else {
        return false;
    };
    rest.trim_start_matches(' ').starts_with(':')
}
