//! The fraud scoring engine.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use invoicegate_types::{
    is_present, DuplicateCheck, ExtractedInvoice, FraudAssessment, FraudCheckDetails,
    FrequencyCheck, LedgerEntry, PatternCheck, RiskLevel,
};

use crate::config::FraudConfig;
use crate::ledger::{LedgerObservation, LedgerStore};

/// Score threshold at which an invoice is considered suspicious.
const SUSPICIOUS_THRESHOLD: f64 = 0.3;

/// Acceptable tax-to-total range, in percent.
const TAX_PERCENT_MIN: f64 = 3.0;
const TAX_PERCENT_MAX: f64 = 25.0;

const CHECKS_PERFORMED: u8 = 7;

/// Sentinel flag emitted when no check fired.
pub const NO_INDICATORS: &str = "No fraud indicators detected";

/// Additive fraud risk scorer.
///
/// Stateless: all cross-invoice history lives behind the injected
/// [`LedgerStore`]. Seven independent checks each add a fixed weight;
/// the final score is clamped to [0, 1] and discretized into a
/// [`RiskLevel`].
pub struct FraudScorer {
    config: FraudConfig,
    ledger: Arc<dyn LedgerStore>,
}

impl FraudScorer {
    pub fn new(config: FraudConfig, ledger: Arc<dyn LedgerStore>) -> Self {
        Self { config, ledger }
    }

    /// Assess one invoice and record it in the ledger.
    ///
    /// The ledger entry is appended unconditionally, after scoring, as
    /// the final action, inside the same serialized ledger unit that
    /// the duplicate and frequency checks read from.
    pub fn assess(&self, invoice: &ExtractedInvoice) -> FraudAssessment {
        debug!("running fraud checks");

        let now = Utc::now();
        let mut flags = Vec::new();
        let mut score: f64 = 0.0;

        let amount = invoice.total_amount;
        let currency = invoice.currency.as_str();

        let mut txn = self.ledger.begin();
        let observation = txn.observe(
            invoice.invoice_number.as_deref().filter(|s| !s.is_empty()),
            invoice.vendor.as_deref(),
            now,
            Duration::days(self.config.duplicate_window_days),
        );

        // Check 1: duplicate invoice
        let duplicate = self.duplicate_check(invoice, &observation);
        if duplicate.is_duplicate {
            flags.push(format!("Duplicate invoice: {}", duplicate.message));
            score += 0.5;
        }

        // Check 2: very high / high amount, mutually exclusive
        if amount >= self.config.very_high_amount {
            flags.push(format!(
                "Very high amount: {currency} {amount:.2} (>= {:.0})",
                self.config.very_high_amount
            ));
            score += 0.3;
        } else if amount >= self.config.high_amount {
            flags.push(format!(
                "High amount: {currency} {amount:.2} (>= {:.0})",
                self.config.high_amount
            ));
            score += 0.2;
        }

        // Check 3: suspicious round amount
        if amount >= self.config.round_amount_min && (amount % 100.0).abs() < 1e-9 {
            flags.push(format!("Suspicious round amount: {currency} {amount:.2}"));
            score += 0.15;
        }

        // Check 4: vendor frequency anomaly
        let frequency = self.frequency_check(invoice, &observation);
        if frequency.suspicious {
            flags.push(frequency.message.clone());
            score += 0.25;
        }

        // Check 5: missing critical fields
        let missing = invoice.missing_critical_fields();
        if !missing.is_empty() {
            flags.push(format!("Missing critical fields: {}", missing.join(", ")));
            score += 0.2;
        }

        // Check 6: suspicious invoice-number pattern
        let pattern = pattern_check(invoice.invoice_number.as_deref());
        if pattern.suspicious {
            flags.push(pattern.message.clone());
            score += 0.1;
        }

        // Check 7: tax/total consistency
        if !tax_is_consistent(invoice) {
            flags.push("Tax calculation appears inconsistent".to_string());
            score += 0.1;
        }

        let score = round2(score.clamp(0.0, 1.0));
        let risk_level = RiskLevel::from_score(score);
        let is_suspicious = score >= SUSPICIOUS_THRESHOLD;

        // Unconditional append, last action of the assessment.
        txn.append(LedgerEntry::new(
            invoice.invoice_number.clone(),
            invoice.vendor.clone(),
            amount,
            invoice.date.clone(),
            now,
        ));
        drop(txn);

        if is_suspicious {
            warn!(risk_score = score, risk_level = %risk_level, flags = flags.len(), "invoice flagged as suspicious");
        } else {
            info!(risk_score = score, risk_level = %risk_level, "fraud assessment complete");
        }

        if flags.is_empty() {
            flags.push(NO_INDICATORS.to_string());
        }

        FraudAssessment {
            is_suspicious,
            risk_score: score,
            risk_level,
            flags,
            checks_performed: CHECKS_PERFORMED,
            details: FraudCheckDetails {
                duplicate,
                frequency,
                pattern,
            },
        }
    }

    fn duplicate_check(
        &self,
        invoice: &ExtractedInvoice,
        observation: &LedgerObservation,
    ) -> DuplicateCheck {
        if !is_present(&invoice.invoice_number) {
            return DuplicateCheck {
                is_duplicate: false,
                message: "No invoice number to check".to_string(),
            };
        }
        let number = invoice.invoice_number.as_deref().unwrap_or_default();
        if observation.duplicate {
            return DuplicateCheck {
                is_duplicate: true,
                message: format!(
                    "Invoice #{number} already processed for {}",
                    invoice.vendor.as_deref().unwrap_or("unknown vendor")
                ),
            };
        }
        if observation.same_number_other_vendor {
            return DuplicateCheck {
                is_duplicate: false,
                message: format!("Invoice #{number} exists for a different vendor"),
            };
        }
        DuplicateCheck {
            is_duplicate: false,
            message: "No duplicate found".to_string(),
        }
    }

    fn frequency_check(
        &self,
        invoice: &ExtractedInvoice,
        observation: &LedgerObservation,
    ) -> FrequencyCheck {
        let Some(vendor) = invoice.vendor.as_deref() else {
            return FrequencyCheck {
                suspicious: false,
                message: "No vendor to check".to_string(),
            };
        };

        if observation.vendor_entries_last_hour >= self.config.same_hour_count {
            return FrequencyCheck {
                suspicious: true,
                message: format!(
                    "Multiple invoices from {vendor} within 1 hour ({} total)",
                    observation.vendor_entries_last_hour + 1
                ),
            };
        }
        if observation.vendor_entries_last_day >= self.config.same_day_count {
            return FrequencyCheck {
                suspicious: true,
                message: format!(
                    "Multiple invoices from {vendor} today ({} total)",
                    observation.vendor_entries_last_day + 1
                ),
            };
        }
        FrequencyCheck {
            suspicious: false,
            message: "Normal frequency".to_string(),
        }
    }
}

/// Invoice numbers that look fabricated: all-digit strings of length
/// three or less, or strings composed entirely of 0s or entirely of 1s.
fn pattern_check(invoice_number: Option<&str>) -> PatternCheck {
    let Some(number) = invoice_number.filter(|s| !s.is_empty()) else {
        return PatternCheck {
            suspicious: false,
            message: "No invoice number".to_string(),
        };
    };

    if number.len() <= 3 && number.chars().all(|c| c.is_ascii_digit()) {
        return PatternCheck {
            suspicious: true,
            message: format!("Suspiciously simple invoice number: {number}"),
        };
    }
    if number.chars().all(|c| c == '0') || number.chars().all(|c| c == '1') {
        return PatternCheck {
            suspicious: true,
            message: format!("Invalid invoice number pattern: {number}"),
        };
    }
    PatternCheck {
        suspicious: false,
        message: "Normal pattern".to_string(),
    }
}

/// Tax is consistent when absent, or when it lands inside the
/// acceptable percentage band of the total.
fn tax_is_consistent(invoice: &ExtractedInvoice) -> bool {
    let Some(tax) = invoice.tax_amount.filter(|t| *t > 0.0) else {
        return true;
    };
    if invoice.total_amount <= 0.0 {
        return true;
    }
    let percent = tax / invoice.total_amount * 100.0;
    (TAX_PERCENT_MIN..=TAX_PERCENT_MAX).contains(&percent)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
