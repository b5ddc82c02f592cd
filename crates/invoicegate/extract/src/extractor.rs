//! The extraction engine.

use regex::{Regex, RegexBuilder};
use tracing::{debug, info};

use invoicegate_types::{ExtractedInvoice, ExtractionStatus};

use crate::dates;
use crate::error::ExtractError;
use crate::patterns::{self, FieldPatterns};
use crate::vendor;

/// Converts raw recognized text into a structured candidate invoice.
///
/// All pattern tables are compiled once at construction. Extraction is
/// a total function over text: missing fields are data, and only
/// empty/whitespace-only input yields `status = error`.
pub struct Extractor {
    invoice_number: FieldPatterns,
    date: FieldPatterns,
    total: FieldPatterns,
    po_number: FieldPatterns,
    tax: FieldPatterns,
    amount_token: Regex,
}

impl Extractor {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            invoice_number: FieldPatterns::compile(patterns::INVOICE_NUMBER)?,
            date: FieldPatterns::compile(patterns::DATE)?,
            total: FieldPatterns::compile(patterns::TOTAL)?,
            po_number: FieldPatterns::compile(patterns::PO_NUMBER)?,
            tax: FieldPatterns::compile(patterns::TAX)?,
            amount_token: RegexBuilder::new(patterns::AMOUNT_TOKEN)
                .case_insensitive(true)
                .build()?,
        })
    }

    /// Parse raw text into structured invoice data.
    pub fn extract(&self, raw_text: &str) -> ExtractedInvoice {
        if raw_text.trim().is_empty() {
            debug!("no text to process, returning empty extraction");
            return ExtractedInvoice::empty();
        }

        let invoice_number = self
            .invoice_number
            .first_match(raw_text)
            .map(str::to_string);
        let date = self.date.first_match(raw_text).map(dates::normalize);
        let vendor = vendor::extract(raw_text);
        let total_amount = self.extract_total(raw_text);
        let currency = detect_currency(raw_text);
        let po_number = self.po_number.first_match(raw_text).map(str::to_string);
        let tax_amount = self.tax.first_match(raw_text).and_then(parse_amount);

        let confidence = completeness_score(&invoice_number, &date, &vendor, total_amount);

        info!(
            invoice_number = invoice_number.as_deref().unwrap_or("unknown"),
            vendor = vendor.as_deref().unwrap_or("unknown"),
            total_amount,
            confidence,
            "extraction complete"
        );

        ExtractedInvoice {
            invoice_number,
            vendor,
            date,
            total_amount,
            currency,
            po_number,
            tax_amount,
            // Line-item table parsing is not implemented; the decision
            // core consumes only the scalar fields.
            line_items: Vec::new(),
            confidence,
            status: ExtractionStatus::Ok,
        }
    }

    /// Total amount: labeled patterns first, then the largest positive
    /// currency-like token in the whole document, then 0.
    fn extract_total(&self, text: &str) -> f64 {
        if let Some(captured) = self.total.first_match(text) {
            if let Some(amount) = parse_amount(captured) {
                return amount;
            }
        }

        // The largest monetary figure on an invoice is assumed to be
        // the total.
        self.amount_token
            .find_iter(text)
            .filter_map(|m| parse_amount(m.as_str()))
            .filter(|amount| *amount > 0.0)
            .fold(0.0, f64::max)
    }
}

/// Strip currency symbols and thousands separators, then parse.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| *v >= 0.0)
}

/// Symbol/keyword currency scan. A dollar sign defaults to USD unless
/// Canadian or Australian markers appear alongside it.
fn detect_currency(text: &str) -> String {
    if text.contains('$') {
        if text.contains("CAD") || text.contains("Canadian") {
            return "CAD".to_string();
        }
        if text.contains("AUD") || text.contains("Australian") {
            return "AUD".to_string();
        }
        return "USD".to_string();
    }
    if text.contains('€') || text.contains("EUR") {
        return "EUR".to_string();
    }
    if text.contains('£') || text.contains("GBP") {
        return "GBP".to_string();
    }
    if text.contains('¥') || text.contains("JPY") {
        return "JPY".to_string();
    }
    if text.contains("INR") || text.contains('₹') {
        return "INR".to_string();
    }
    "USD".to_string()
}

/// Deterministic completeness score: 0.25 for each critical field
/// found, capped at 1.0.
fn completeness_score(
    invoice_number: &Option<String>,
    date: &Option<String>,
    vendor: &Option<String>,
    total_amount: f64,
) -> f64 {
    let mut score: f64 = 0.0;
    if invoice_number.is_some() {
        score += 0.25;
    }
    if date.is_some() {
        score += 0.25;
    }
    if vendor.is_some() {
        score += 0.25;
    }
    if total_amount > 0.0 {
        score += 0.25;
    }
    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
ACME Corporation
123 Business Street
New York, NY 10001

INVOICE

Invoice Number: INV-12345
Date: 01/15/2026
PO Number: PO-98765

Bill To:
Customer Company Inc

Description              Amount
Consulting Services      $4,500.00
Tax (8%):                $360.00

Total Amount Due:        $4,860.00
";

    fn extractor() -> Extractor {
        Extractor::new().unwrap()
    }

    #[test]
    fn full_invoice_extracts_all_fields() {
        let inv = extractor().extract(SAMPLE);
        assert_eq!(inv.status, ExtractionStatus::Ok);
        assert_eq!(inv.invoice_number.as_deref(), Some("INV-12345"));
        assert_eq!(inv.vendor.as_deref(), Some("ACME Corporation"));
        assert_eq!(inv.date.as_deref(), Some("2026-01-15"));
        assert_eq!(inv.total_amount, 4860.0);
        assert_eq!(inv.tax_amount, Some(360.0));
        assert_eq!(inv.po_number.as_deref(), Some("PO-98765"));
        assert_eq!(inv.currency, "USD");
        assert_eq!(inv.confidence, 1.0);
    }

    #[test]
    fn empty_text_is_error_never_panics() {
        for text in ["", "   ", "\n\t\n"] {
            let inv = extractor().extract(text);
            assert_eq!(inv.status, ExtractionStatus::Error);
            assert_eq!(inv.confidence, 0.0);
            assert_eq!(inv.total_amount, 0.0);
        }
    }

    #[test]
    fn total_falls_back_to_largest_amount() {
        let text = "Widgets $120.00\nGadgets $1,999.99\nShipping $25.00";
        let inv = extractor().extract(text);
        assert_eq!(inv.total_amount, 1999.99);
    }

    #[test]
    fn total_zero_when_nothing_parses() {
        let inv = extractor().extract("no numbers of any kind here");
        assert_eq!(inv.total_amount, 0.0);
    }

    #[test]
    fn labeled_total_beats_larger_stray_amount() {
        let text = "Reference 999,999.99\nTotal: $50.00";
        let inv = extractor().extract(text);
        assert_eq!(inv.total_amount, 50.0);
    }

    #[test]
    fn partial_invoice_gets_partial_confidence() {
        let text = "Invoice # ABC-1\nTotal: $10.00";
        let inv = extractor().extract(text);
        assert_eq!(inv.status, ExtractionStatus::Ok);
        assert_eq!(inv.confidence, 0.5);
        assert!(inv.vendor.is_none());
        assert!(inv.date.is_none());
    }

    #[test]
    fn unparseable_date_kept_raw() {
        let text = "Invoice # A-1\nDate: 01/15/26\n";
        let inv = extractor().extract(text);
        assert_eq!(inv.date.as_deref(), Some("01/15/26"));
    }

    #[test]
    fn currency_detection_variants() {
        let e = extractor();
        assert_eq!(e.extract("Total: $10.00").currency, "USD");
        assert_eq!(e.extract("Total: $10.00 CAD").currency, "CAD");
        assert_eq!(e.extract("Total: $10.00 Australian").currency, "AUD");
        assert_eq!(e.extract("Total: €10.00").currency, "EUR");
        assert_eq!(e.extract("Total: £10.00").currency, "GBP");
        assert_eq!(e.extract("Total: ¥1000").currency, "JPY");
        assert_eq!(e.extract("Total: 1000 INR").currency, "INR");
        assert_eq!(e.extract("Total: 10.00").currency, "USD");
    }

    #[test]
    fn tax_strips_thousands_separators() {
        let text = "Tax (10%): $1,234.56\n";
        let inv = extractor().extract(text);
        assert_eq!(inv.tax_amount, Some(1234.56));
    }

    #[test]
    fn line_items_always_empty() {
        assert!(extractor().extract(SAMPLE).line_items.is_empty());
    }
}
