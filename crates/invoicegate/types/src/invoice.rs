use serde::{Deserialize, Serialize};

/// Outcome of the extraction stage.
///
/// Only a wholly empty input text produces `Error`; every other input
/// degrades gracefully into `Ok` with missing fields and a lower
/// confidence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Ok,
    Error,
}

/// A single invoice line item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free-text description of the billed item
    pub description: String,
    /// Billed quantity
    pub quantity: f64,
    /// Price per unit
    pub unit_price: f64,
    /// Extended amount for the line
    pub amount: f64,
}

/// Structured candidate invoice produced by the extractor.
///
/// Created once per document and immutable thereafter; consumed by the
/// fraud scorer, the policy evaluator and the decision fuser. Missing
/// fields are data, not failure: optional fields are `None` (never
/// `Some("")`) and numeric fields default to zero so downstream
/// arithmetic never breaks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractedInvoice {
    /// Invoice number as printed on the document
    pub invoice_number: Option<String>,
    /// Vendor name, ISO-normalized where recognizable
    pub vendor: Option<String>,
    /// Invoice date, ISO 8601 (YYYY-MM-DD) when parseable, otherwise the
    /// raw matched substring
    pub date: Option<String>,
    /// Total amount due; 0 when absent
    pub total_amount: f64,
    /// Three-letter currency code, defaults to "USD"
    pub currency: String,
    /// Purchase order number
    pub po_number: Option<String>,
    /// Tax amount when present and positive
    pub tax_amount: Option<f64>,
    /// Parsed line items, possibly empty
    pub line_items: Vec<LineItem>,
    /// Deterministic completeness score in [0, 1]: 0.25 per critical
    /// field found, not a statistical estimate
    pub confidence: f64,
    /// Extraction outcome
    pub status: ExtractionStatus,
}

impl ExtractedInvoice {
    /// All-null/zero invoice returned for empty input text.
    pub fn empty() -> Self {
        Self {
            invoice_number: None,
            vendor: None,
            date: None,
            total_amount: 0.0,
            currency: "USD".to_string(),
            po_number: None,
            tax_amount: None,
            line_items: Vec::new(),
            confidence: 0.0,
            status: ExtractionStatus::Error,
        }
    }

    /// Critical fields missing or non-positive, in canonical order.
    ///
    /// Shared definition of "critical" used by both the fraud scorer and
    /// the basic policy field set: invoice number, vendor, date and a
    /// positive total.
    pub fn missing_critical_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !is_present(&self.invoice_number) {
            missing.push("invoice_number");
        }
        if !is_present(&self.vendor) {
            missing.push("vendor");
        }
        if !is_present(&self.date) {
            missing.push("date");
        }
        if self.total_amount <= 0.0 {
            missing.push("total_amount");
        }
        missing
    }
}

/// A textual field counts as present only when it is `Some` and not
/// blank after trimming.
pub fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_invoice_is_error_with_usd_default() {
        let inv = ExtractedInvoice::empty();
        assert_eq!(inv.status, ExtractionStatus::Error);
        assert_eq!(inv.currency, "USD");
        assert_eq!(inv.total_amount, 0.0);
        assert_eq!(inv.confidence, 0.0);
        assert!(inv.line_items.is_empty());
    }

    #[test]
    fn missing_critical_fields_in_order() {
        let inv = ExtractedInvoice::empty();
        assert_eq!(
            inv.missing_critical_fields(),
            vec!["invoice_number", "vendor", "date", "total_amount"]
        );
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let mut inv = ExtractedInvoice::empty();
        inv.invoice_number = Some("  ".into());
        assert!(inv.missing_critical_fields().contains(&"invoice_number"));
        assert!(!is_present(&Some("  ".into())));
        assert!(is_present(&Some("INV-1".into())));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ExtractionStatus::Ok).unwrap(),
            "\"ok\""
        );
        assert_eq!(
            serde_json::to_string(&ExtractionStatus::Error).unwrap(),
            "\"error\""
        );
    }
}
