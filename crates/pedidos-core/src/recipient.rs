//! Structured shipping/contact data extracted from free-text order notes.

use serde::{Deserialize, Serialize};

/// Recipient data recovered from order notes.
///
/// Every field is optional: the extractor fills whatever the note carries
/// and leaves the rest `None`. A record is only handed back to the caller
/// when [`RecipientRecord::is_useful`] holds — otherwise the extraction
/// outcome is "no data" (`None`), which is an expected result, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientRecord {
    pub name: Option<String>,
    /// National tax/identity document number (NIT or cédula).
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    /// How the shipping itself is paid (e.g. "contraentrega").
    pub shipping_payment_method: Option<String>,
    /// How the order is paid (e.g. "transferencia").
    pub order_payment_method: Option<String>,
}

impl RecipientRecord {
    /// A record is useful when it can actually route a shipment: an address,
    /// or a city together with at least one way to identify the person.
    #[must_use]
    pub fn is_useful(&self) -> bool {
        if self.address.is_some() {
            return true;
        }
        self.city.is_some()
            && (self.name.is_some() || self.phone.is_some() || self.national_id.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_is_not_useful() {
        assert!(!RecipientRecord::default().is_useful());
    }

    #[test]
    fn address_alone_is_useful() {
        let record = RecipientRecord {
            address: Some("Cra 7 # 12-34".to_owned()),
            ..RecipientRecord::default()
        };
        assert!(record.is_useful());
    }

    #[test]
    fn city_alone_is_not_useful() {
        let record = RecipientRecord {
            city: Some("Cucuta".to_owned()),
            ..RecipientRecord::default()
        };
        assert!(!record.is_useful());
    }

    #[test]
    fn city_with_phone_is_useful() {
        let record = RecipientRecord {
            city: Some("Cali".to_owned()),
            phone: Some("3001234567".to_owned()),
            ..RecipientRecord::default()
        };
        assert!(record.is_useful());
    }

    #[test]
    fn city_with_national_id_is_useful() {
        let record = RecipientRecord {
            city: Some("Bogota".to_owned()),
            national_id: Some("900123456".to_owned()),
            ..RecipientRecord::default()
        };
        assert!(record.is_useful());
    }

    #[test]
    fn name_without_city_is_not_useful() {
        let record = RecipientRecord {
            name: Some("Ana".to_owned()),
            ..RecipientRecord::default()
        };
        assert!(!record.is_useful());
    }
}
