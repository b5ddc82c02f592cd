//! The ordered decision-rule table.
//!
//! Precedence is positional: the first rule whose predicate holds wins
//! and no later rule is consulted. The final rule is a catch-all, so
//! evaluation always produces exactly one outcome.

use invoicegate_types::{
    ApprovalLevel, DecisionStatus, ExtractedInvoice, FraudAssessment, PolicyAssessment, RiskLevel,
};

/// Inputs a rule predicate and reason template can read.
pub struct RuleContext<'a> {
    pub invoice: &'a ExtractedInvoice,
    pub fraud: &'a FraudAssessment,
    pub policy: &'a PolicyAssessment,
}

impl RuleContext<'_> {
    fn vendor(&self) -> &str {
        self.invoice.vendor.as_deref().unwrap_or("Unknown")
    }

    fn amount(&self) -> f64 {
        self.invoice.total_amount
    }
}

/// One row of the precedence table.
pub struct DecisionRule {
    /// Stable identifier for logs and tests
    pub name: &'static str,
    pub status: DecisionStatus,
    /// Fixed weight tied to the rule, not learned
    pub confidence: f64,
    pub applies: fn(&RuleContext) -> bool,
    pub reason: fn(&RuleContext) -> String,
}

/// Extraction-confidence floor below which an invoice is held.
const CONFIDENCE_FLOOR: f64 = 0.75;

/// Warning count above which an invoice is held.
const WARNING_LIMIT: usize = 2;

/// The precedence table: rejections first, holds next, approvals last.
pub const RULES: &[DecisionRule] = &[
    DecisionRule {
        name: "high_fraud_risk",
        status: DecisionStatus::Reject,
        confidence: 0.95,
        applies: |ctx| ctx.fraud.risk_level == RiskLevel::High || ctx.fraud.risk_score >= 0.7,
        reason: |ctx| {
            format!(
                "High fraud risk detected (score: {:.2})",
                ctx.fraud.risk_score
            )
        },
    },
    DecisionRule {
        name: "policy_violations",
        status: DecisionStatus::Reject,
        confidence: 0.90,
        applies: |ctx| !ctx.policy.violations.is_empty(),
        reason: |ctx| {
            let shown: Vec<&str> = ctx
                .policy
                .violations
                .iter()
                .take(2)
                .map(String::as_str)
                .collect();
            format!("Policy violations: {}", shown.join("; "))
        },
    },
    DecisionRule {
        name: "medium_fraud_risk",
        status: DecisionStatus::Hold,
        confidence: 0.80,
        applies: |ctx| ctx.fraud.risk_level == RiskLevel::Medium || ctx.fraud.risk_score >= 0.4,
        reason: |ctx| {
            format!(
                "Medium fraud risk ({:.2}) - requires manual review",
                ctx.fraud.risk_score
            )
        },
    },
    DecisionRule {
        name: "executive_approval",
        status: DecisionStatus::Hold,
        confidence: 0.85,
        applies: |ctx| {
            matches!(
                ctx.policy.approval_level,
                ApprovalLevel::RequiresCfo | ApprovalLevel::RequiresBoard
            )
        },
        reason: |ctx| {
            format!(
                "Amount ${:.2} requires {} approval",
                ctx.amount(),
                ctx.policy.approver_required
            )
        },
    },
    DecisionRule {
        name: "many_warnings",
        status: DecisionStatus::Hold,
        confidence: 0.75,
        applies: |ctx| ctx.policy.warnings.len() > WARNING_LIMIT,
        reason: |ctx| {
            format!(
                "Multiple policy warnings ({}) - verify before approval",
                ctx.policy.warnings.len()
            )
        },
    },
    DecisionRule {
        name: "low_extraction_confidence",
        status: DecisionStatus::Hold,
        confidence: 0.70,
        applies: |ctx| ctx.invoice.confidence < CONFIDENCE_FLOOR,
        reason: |ctx| {
            format!(
                "Low extraction confidence ({:.0}%) - verify invoice details",
                ctx.invoice.confidence * 100.0
            )
        },
    },
    DecisionRule {
        name: "director_approval",
        status: DecisionStatus::Hold,
        confidence: 0.85,
        applies: |ctx| ctx.policy.approval_level == ApprovalLevel::RequiresDirector,
        reason: |ctx| {
            format!(
                "Amount ${:.2} requires {} approval",
                ctx.amount(),
                ctx.policy.approver_required
            )
        },
    },
    DecisionRule {
        name: "manager_approval",
        status: DecisionStatus::Approve,
        confidence: 0.80,
        applies: |ctx| ctx.policy.approval_level == ApprovalLevel::RequiresManager,
        reason: |ctx| {
            format!(
                "Approved pending manager confirmation (amount: ${:.2})",
                ctx.amount()
            )
        },
    },
    DecisionRule {
        name: "monitored_approval",
        status: DecisionStatus::Approve,
        confidence: 0.75,
        applies: |ctx| {
            ctx.fraud.risk_level == RiskLevel::Low
                || (ctx.fraud.is_suspicious && ctx.fraud.risk_score < 0.3)
        },
        reason: |ctx| {
            format!(
                "Approved with minor fraud flags - monitor {}",
                ctx.vendor()
            )
        },
    },
    DecisionRule {
        name: "clean_approval",
        status: DecisionStatus::Approve,
        confidence: 0.95,
        applies: |_| true,
        reason: |ctx| {
            format!(
                "All checks passed - invoice from {} for ${:.2}",
                ctx.vendor(),
                ctx.amount()
            )
        },
    },
];

/// First rule in the table that applies. The catch-all guarantees a
/// match.
pub fn first_matching(ctx: &RuleContext) -> &'static DecisionRule {
    RULES
        .iter()
        .find(|rule| (rule.applies)(ctx))
        .unwrap_or(&RULES[RULES.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_ten_rules_ending_in_catch_all() {
        assert_eq!(RULES.len(), 10);
        assert_eq!(RULES[RULES.len() - 1].name, "clean_approval");
        // Rejections precede holds precede approvals.
        assert_eq!(RULES[0].status, DecisionStatus::Reject);
        assert_eq!(RULES[1].status, DecisionStatus::Reject);
        assert_eq!(RULES[2].status, DecisionStatus::Hold);
        assert_eq!(RULES[9].status, DecisionStatus::Approve);
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }
}
