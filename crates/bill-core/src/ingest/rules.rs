//! Ordered metadata key rules.
//!
//! A metadata row's key is lowercased and checked against each rule in
//! order; the first rule with a needle contained in the key decides the
//! field. Keys no rule matches are ignored.

use crate::models::invoice::Invoice;

/// Invoice field a metadata row can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    InvoiceNumber,
    InvoiceDate,
    ReceiverName,
    ReceiverAddr,
    BankText,
}

impl MetadataField {
    /// Mutable access to the invoice slot backing this field.
    pub fn slot<'a>(&self, invoice: &'a mut Invoice) -> &'a mut String {
        match self {
            MetadataField::InvoiceNumber => &mut invoice.invoice_number,
            MetadataField::InvoiceDate => &mut invoice.invoice_date,
            MetadataField::ReceiverName => &mut invoice.receiver_name,
            MetadataField::ReceiverAddr => &mut invoice.receiver_addr,
            MetadataField::BankText => &mut invoice.bank_text,
        }
    }
}

/// Rules in priority order.
pub const METADATA_RULES: &[(MetadataField, &[&str])] = &[
    (
        MetadataField::InvoiceNumber,
        &["number", "invoice no", "bill no"],
    ),
    (MetadataField::InvoiceDate, &["date"]),
    (
        MetadataField::ReceiverName,
        &["receiver name", "party", "billed to", "name"],
    ),
    (MetadataField::ReceiverAddr, &["address", "addr"]),
    (MetadataField::BankText, &["bank"]),
];

/// Classify a metadata key, `None` when no rule matches.
pub fn classify(key: &str) -> Option<MetadataField> {
    let key = key.trim().to_lowercase();
    METADATA_RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|needle| key.contains(needle)))
        .map(|(field, _)| *field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys() {
        for key in ["Invoice Number", "NUMBER", "Bill No Number", "Invoice No.", "bill no"] {
            assert_eq!(classify(key), Some(MetadataField::InvoiceNumber), "{key}");
        }
    }

    #[test]
    fn test_priority_order() {
        // "number" outranks "date"
        assert_eq!(classify("Date Number"), Some(MetadataField::InvoiceNumber));
        assert_eq!(classify("Bill Date"), Some(MetadataField::InvoiceDate));
        // the name rule is checked before address and bank
        assert_eq!(classify("Party Address"), Some(MetadataField::ReceiverName));
        assert_eq!(classify("Bank Name"), Some(MetadataField::ReceiverName));
    }

    #[test]
    fn test_receiver_and_other_keys() {
        assert_eq!(classify("Billed To"), Some(MetadataField::ReceiverName));
        assert_eq!(classify("party"), Some(MetadataField::ReceiverName));
        assert_eq!(classify("Addr"), Some(MetadataField::ReceiverAddr));
        assert_eq!(classify("Bank Details"), Some(MetadataField::BankText));
        assert_eq!(classify("GSTIN"), None);
        assert_eq!(classify("  "), None);
    }
}
