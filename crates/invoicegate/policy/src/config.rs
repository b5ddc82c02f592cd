use serde::{Deserialize, Serialize};

use invoicegate_types::{is_present, ExtractedInvoice};

/// Monetary ceilings per approval tier. Amounts above `requires_cfo`
/// escalate to the board.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpendingTiers {
    pub auto_approve: f64,
    pub requires_manager: f64,
    pub requires_director: f64,
    pub requires_cfo: f64,
}

impl Default for SpendingTiers {
    fn default() -> Self {
        Self {
            auto_approve: 5_000.0,
            requires_manager: 10_000.0,
            requires_director: 25_000.0,
            requires_cfo: 50_000.0,
        }
    }
}

/// A field the required-fields check can demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    InvoiceNumber,
    Vendor,
    Date,
    TotalAmount,
    Currency,
    TaxAmount,
}

impl RequiredField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::InvoiceNumber => "invoice_number",
            RequiredField::Vendor => "vendor",
            RequiredField::Date => "date",
            RequiredField::TotalAmount => "total_amount",
            RequiredField::Currency => "currency",
            RequiredField::TaxAmount => "tax_amount",
        }
    }

    /// Whether the invoice satisfies this field: textual fields must be
    /// non-blank, numeric fields must be positive.
    pub fn is_satisfied(&self, invoice: &ExtractedInvoice) -> bool {
        match self {
            RequiredField::InvoiceNumber => is_present(&invoice.invoice_number),
            RequiredField::Vendor => is_present(&invoice.vendor),
            RequiredField::Date => is_present(&invoice.date),
            RequiredField::TotalAmount => invoice.total_amount > 0.0,
            RequiredField::Currency => !invoice.currency.trim().is_empty(),
            RequiredField::TaxAmount => invoice.tax_amount.is_some_and(|t| t > 0.0),
        }
    }
}

/// Required-field sets scaling with the invoice amount.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RequiredFieldSets {
    /// Applies up to `standard_above`
    pub basic: Vec<RequiredField>,
    /// Applies above `standard_above`
    pub standard: Vec<RequiredField>,
    /// Applies above `international_above`
    pub international: Vec<RequiredField>,
    pub standard_above: f64,
    pub international_above: f64,
}

impl Default for RequiredFieldSets {
    fn default() -> Self {
        use RequiredField::*;
        Self {
            basic: vec![InvoiceNumber, Vendor, Date, TotalAmount],
            standard: vec![InvoiceNumber, Vendor, Date, TotalAmount, Currency],
            international: vec![InvoiceNumber, Vendor, Date, TotalAmount, Currency, TaxAmount],
            standard_above: 1_000.0,
            international_above: 10_000.0,
        }
    }
}

impl RequiredFieldSets {
    /// Field set applicable to the given amount.
    pub fn for_amount(&self, amount: f64) -> &[RequiredField] {
        if amount > self.international_above {
            &self.international
        } else if amount > self.standard_above {
            &self.standard
        } else {
            &self.basic
        }
    }
}

/// Scalar business rules.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicyRules {
    /// Minimum acceptable invoice amount
    pub min_amount: f64,
    /// Maximum single-invoice amount
    pub max_amount: f64,
    /// PO number required at or above this amount
    pub require_po_above: f64,
    /// Invoices older than this are rejected
    pub max_invoice_age_days: i64,
}

impl Default for PolicyRules {
    fn default() -> Self {
        Self {
            min_amount: 0.01,
            max_amount: 100_000.0,
            require_po_above: 1_000.0,
            max_invoice_age_days: 90,
        }
    }
}

/// Company payment policy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Approved vendors; exact match first, then case-insensitive
    /// substring match in either direction
    pub approved_vendors: Vec<String>,
    pub spending: SpendingTiers,
    pub required_fields: RequiredFieldSets,
    pub rules: PolicyRules,
    /// Currencies that need no additional review
    pub allowed_currencies: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            approved_vendors: [
                "Acme Corp",
                "ACME Corporation",
                "ACMECorporation",
                "TechSolutions Inc",
                "Tech Solutions Inc",
                "OfficeSupplies Co",
                "Office Supplies Co",
                "GlobalServices Ltd",
                "Global Services Ltd",
                "DataSystems Inc",
                "Data Systems Inc",
                "CloudTech Solutions",
                "Cloud Tech Solutions",
                "Microsoft",
                "Google",
                "Amazon",
                "Adobe",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            spending: SpendingTiers::default(),
            required_fields: RequiredFieldSets::default(),
            rules: PolicyRules::default(),
            allowed_currencies: ["USD", "EUR", "GBP", "CAD", "AUD", "JPY", "INR"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_sets_scale_with_amount() {
        let sets = RequiredFieldSets::default();
        assert_eq!(sets.for_amount(500.0).len(), 4);
        assert_eq!(sets.for_amount(1_000.0).len(), 4); // boundary stays basic
        assert_eq!(sets.for_amount(1_000.01).len(), 5);
        assert_eq!(sets.for_amount(10_000.0).len(), 5);
        assert_eq!(sets.for_amount(10_000.01).len(), 6);
    }

    #[test]
    fn default_config_has_seed_vendors_and_currencies() {
        let config = PolicyConfig::default();
        assert!(config
            .approved_vendors
            .iter()
            .any(|v| v == "ACME Corporation"));
        assert_eq!(config.allowed_currencies.len(), 7);
        assert_eq!(config.rules.max_amount, 100_000.0);
    }
}
