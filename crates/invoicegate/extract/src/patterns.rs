//! Ordered field-pattern tables with first-match-wins semantics.
//!
//! Each extractable field owns an ordered list of case-insensitive
//! patterns. The first pattern that matches wins; later patterns in the
//! list are never tried once one matches. When a pattern carries a
//! capture group the captured text is the field value, otherwise the
//! whole match is.

use regex::{Regex, RegexBuilder};

use crate::error::ExtractError;

/// Ordered pattern list for one field.
#[derive(Debug, Clone)]
pub struct FieldPatterns {
    patterns: Vec<Regex>,
}

impl FieldPatterns {
    /// Compile an ordered list of case-insensitive patterns.
    pub fn compile(exprs: &[&str]) -> Result<Self, ExtractError> {
        let patterns = exprs
            .iter()
            .map(|expr| {
                RegexBuilder::new(expr)
                    .case_insensitive(true)
                    .build()
                    .map_err(ExtractError::from)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// First match across the list, in pattern order.
    ///
    /// Returns the first capture group when the winning pattern has one,
    /// otherwise the whole match, trimmed.
    pub fn first_match<'t>(&self, text: &'t str) -> Option<&'t str> {
        for pattern in &self.patterns {
            if let Some(caps) = pattern.captures(text) {
                let m = caps.get(1).or_else(|| caps.get(0));
                if let Some(m) = m {
                    return Some(m.as_str().trim());
                }
            }
        }
        None
    }
}

/// Invoice number patterns, most specific first.
pub const INVOICE_NUMBER: &[&str] = &[
    r"Invoice\s*#[\s:]*([A-Z0-9-]+)",
    r"Invoice\s*Number[\s:]*([A-Z0-9-]+)",
    r"INV[\s#:-]*([A-Z0-9-]+)",
    r"#[\s:]*([A-Z0-9]{3,}-?[A-Z0-9]*)",
];

/// Date patterns: numeric forms, then month-name forms.
pub const DATE: &[&str] = &[
    r"\d{1,2}[-/]\d{1,2}[-/]\d{2,4}",
    r"\d{4}[-/]\d{1,2}[-/]\d{1,2}",
    r"(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+\d{4}",
    r"(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{1,2},?\s+\d{4}",
];

/// Labeled total patterns with a captured numeric group.
pub const TOTAL: &[&str] = &[
    r"Total\s+Amount\s+Due[\s:]*\$?\s*(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)",
    r"(?:Grand\s+)?Total[\s:]+\$?\s*(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)",
    r"Amount\s+Due[\s:]*\$?\s*(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)",
    r"Balance\s+Due[\s:]*\$?\s*(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)",
];

/// Purchase order patterns.
pub const PO_NUMBER: &[&str] = &[
    r"PO\s*#[\s:]*([A-Z0-9-]+)",
    r"P\.?O\.?\s*Number[\s:]*([A-Z0-9-]+)",
    r"Purchase\s+Order[\s#:]*([A-Z0-9-]+)",
];

/// Tax/VAT/GST amount patterns.
pub const TAX: &[&str] = &[
    r"Tax\s*\([^)]+\)[\s:]*\$?\s*(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)",
    r"(?:Sales\s+)?Tax[\s:]+\$?\s*(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)",
    r"(?:VAT|GST)[\s:]+\$?\s*(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)",
];

/// Free-standing currency-like numeric token, used for the
/// largest-amount total fallback.
pub const AMOUNT_TOKEN: &str = r"\$?\s*\d{1,3}(?:,\d{3})*(?:\.\d{2})?";
