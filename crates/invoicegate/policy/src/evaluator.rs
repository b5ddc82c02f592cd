//! The policy compliance engine.

use chrono::{Datelike, NaiveDate, Utc};
use tracing::{debug, info};

use invoicegate_types::{
    is_present, AmountCheck, ApprovalCheck, ApprovalLevel, DateCheck, ExtractedInvoice, MatchType,
    PoCheck, PolicyAssessment, PolicyCheckDetails, VendorCheck,
};

use crate::config::PolicyConfig;

const CHECKS_PERFORMED: u8 = 8;

/// Date formats accepted when validating the invoice date.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Age in days past which a warning is emitted.
const AGE_WARNING_DAYS: i64 = 30;

/// Evaluates a structured invoice against company policy.
///
/// Total function over a well-formed invoice: never fails, never
/// panics; every mismatch becomes a violation or a warning.
pub struct PolicyEvaluator {
    config: PolicyConfig,
}

impl PolicyEvaluator {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Run all eight compliance checks.
    pub fn evaluate(&self, invoice: &ExtractedInvoice) -> PolicyAssessment {
        debug!("running policy compliance checks");

        let mut violations = Vec::new();
        let mut warnings = Vec::new();

        let amount = invoice.total_amount;

        // Check 1: required fields, scaled by amount
        let missing: Vec<&str> = self
            .config
            .required_fields
            .for_amount(amount)
            .iter()
            .filter(|f| !f.is_satisfied(invoice))
            .map(|f| f.as_str())
            .collect();
        if !missing.is_empty() {
            violations.push(format!("Missing required fields: {}", missing.join(", ")));
        }

        // Check 2: approved vendor
        let vendor = self.vendor_check(invoice.vendor.as_deref());
        if !vendor.approved {
            violations.push(vendor.message.clone());
        } else if vendor.match_type == Some(MatchType::Fuzzy) {
            warnings.push(vendor.message.clone());
        }

        // Check 3: spending-limit tier; a tier alone is never a violation
        let approval = self.spending_check(amount);
        if approval.level != ApprovalLevel::AutoApprove {
            warnings.push(format!(
                "Amount ${amount:.2} requires {} approval",
                approval.approver
            ));
        }

        // Check 4: amount bounds
        let amount_check = self.amount_check(amount);
        if !amount_check.valid {
            violations.push(amount_check.message.clone());
        }

        // Check 5: PO requirement
        let po = self.po_check(amount, invoice.po_number.as_deref());
        if !po.compliant {
            violations.push(po.message.clone());
        }

        // Check 6: invoice-number format, warning only, never a violation
        if let Some(note) = invoice_format_warning(invoice.invoice_number.as_deref()) {
            warnings.push(note);
        }

        // Check 7: invoice date
        let date = self.date_check(invoice.date.as_deref());
        match &date.outcome {
            DateOutcome::Violation => violations.push(date.detail.message.clone()),
            DateOutcome::Warning => warnings.push(date.detail.message.clone()),
            DateOutcome::Valid => {}
        }

        // Check 8: currency whitelist
        if !self.config.allowed_currencies.contains(&invoice.currency) {
            warnings.push(format!(
                "Unusual currency: {} - may need additional review",
                invoice.currency
            ));
        }

        let compliant = violations.is_empty();
        info!(
            compliant,
            violations = violations.len(),
            warnings = warnings.len(),
            approval_level = %approval.level,
            "policy evaluation complete"
        );

        PolicyAssessment {
            compliant,
            violations,
            warnings,
            approval_level: approval.level,
            approver_required: approval.approver.clone(),
            checks_performed: CHECKS_PERFORMED,
            details: PolicyCheckDetails {
                vendor,
                approval,
                amount: amount_check,
                po,
                date: date.detail,
            },
        }
    }

    fn vendor_check(&self, vendor: Option<&str>) -> VendorCheck {
        let Some(vendor) = vendor.map(str::trim).filter(|v| !v.is_empty()) else {
            return VendorCheck {
                approved: false,
                message: "No vendor name provided".to_string(),
                match_type: None,
            };
        };

        if self.config.approved_vendors.iter().any(|a| a == vendor) {
            return VendorCheck {
                approved: true,
                message: format!("Vendor '{vendor}' is approved"),
                match_type: Some(MatchType::Exact),
            };
        }

        let vendor_lower = vendor.to_lowercase();
        for approved in &self.config.approved_vendors {
            let approved_lower = approved.to_lowercase();
            if approved_lower.contains(&vendor_lower) || vendor_lower.contains(&approved_lower) {
                return VendorCheck {
                    approved: true,
                    message: format!(
                        "Vendor name '{vendor}' is similar to '{approved}' - verify exact match"
                    ),
                    match_type: Some(MatchType::Fuzzy),
                };
            }
        }

        VendorCheck {
            approved: false,
            message: format!("Vendor '{vendor}' is not in approved vendor list"),
            match_type: None,
        }
    }

    fn spending_check(&self, amount: f64) -> ApprovalCheck {
        let tiers = &self.config.spending;
        let level = if amount <= tiers.auto_approve {
            ApprovalLevel::AutoApprove
        } else if amount <= tiers.requires_manager {
            ApprovalLevel::RequiresManager
        } else if amount <= tiers.requires_director {
            ApprovalLevel::RequiresDirector
        } else if amount <= tiers.requires_cfo {
            ApprovalLevel::RequiresCfo
        } else {
            ApprovalLevel::RequiresBoard
        };

        let message = match level {
            ApprovalLevel::AutoApprove => "Within auto-approval limit".to_string(),
            _ => format!("Amount ${amount:.2} requires {} approval", level.approver()),
        };

        ApprovalCheck {
            level,
            approver: level.approver().to_string(),
            message,
        }
    }

    fn amount_check(&self, amount: f64) -> AmountCheck {
        let rules = &self.config.rules;
        if amount < rules.min_amount {
            return AmountCheck {
                valid: false,
                message: format!(
                    "Amount ${amount:.2} is below minimum (${:.2})",
                    rules.min_amount
                ),
            };
        }
        if amount > rules.max_amount {
            return AmountCheck {
                valid: false,
                message: format!(
                    "Amount ${amount:.2} exceeds maximum allowed (${:.0})",
                    rules.max_amount
                ),
            };
        }
        AmountCheck {
            valid: true,
            message: "Amount is within acceptable range".to_string(),
        }
    }

    fn po_check(&self, amount: f64, po_number: Option<&str>) -> PoCheck {
        let po_present = po_number.is_some_and(|po| !po.trim().is_empty());
        if amount >= self.config.rules.require_po_above && !po_present {
            return PoCheck {
                compliant: false,
                message: format!(
                    "PO number required for invoices >= ${:.0} (amount: ${amount:.2})",
                    self.config.rules.require_po_above
                ),
            };
        }
        PoCheck {
            compliant: true,
            message: "PO requirements met".to_string(),
        }
    }

    fn date_check(&self, date: Option<&str>) -> CheckedDate {
        let Some(date) = date.map(str::trim).filter(|d| !d.is_empty()) else {
            return CheckedDate {
                outcome: DateOutcome::Violation,
                detail: DateCheck {
                    valid: false,
                    message: "Invoice date is missing".to_string(),
                },
            };
        };

        // chrono accepts two-digit years for %Y; treat those as
        // unvalidatable rather than as ancient dates.
        let parsed = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
            .filter(|d| d.year() >= 1000);

        let Some(invoice_date) = parsed else {
            // Unparseable-but-present dates never block.
            return CheckedDate {
                outcome: DateOutcome::Warning,
                detail: DateCheck {
                    valid: true,
                    message: format!("Invoice date '{date}' format could not be validated"),
                },
            };
        };

        let age_days = (Utc::now().date_naive() - invoice_date).num_days();

        if age_days > self.config.rules.max_invoice_age_days {
            return CheckedDate {
                outcome: DateOutcome::Violation,
                detail: DateCheck {
                    valid: false,
                    message: format!(
                        "Invoice date {date} is {age_days} days old (max: {} days)",
                        self.config.rules.max_invoice_age_days
                    ),
                },
            };
        }
        // One day of grace for timezone skew.
        if age_days < -1 {
            return CheckedDate {
                outcome: DateOutcome::Violation,
                detail: DateCheck {
                    valid: false,
                    message: format!("Invoice date {date} is in the future"),
                },
            };
        }
        if age_days > AGE_WARNING_DAYS {
            return CheckedDate {
                outcome: DateOutcome::Warning,
                detail: DateCheck {
                    valid: true,
                    message: format!(
                        "Invoice is {age_days} days old - verify it hasn't been paid already"
                    ),
                },
            };
        }
        CheckedDate {
            outcome: DateOutcome::Valid,
            detail: DateCheck {
                valid: true,
                message: format!("Invoice date is valid ({age_days} days old)"),
            },
        }
    }
}

/// Invoice-number format issues are advisory only.
fn invoice_format_warning(invoice_number: Option<&str>) -> Option<String> {
    let Some(number) = invoice_number.map(str::trim).filter(|n| !n.is_empty()) else {
        return Some("Invoice number is missing".to_string());
    };
    if number.len() < 3 {
        return Some(format!(
            "Invoice number '{number}' is too short (minimum 3 characters)"
        ));
    }
    let valid_chars = number
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '#' || c == '-');
    if !valid_chars {
        return Some(format!(
            "Invoice number '{number}' contains unusual characters"
        ));
    }
    None
}

enum DateOutcome {
    Valid,
    Warning,
    Violation,
}

struct CheckedDate {
    outcome: DateOutcome,
    detail: DateCheck,
}
