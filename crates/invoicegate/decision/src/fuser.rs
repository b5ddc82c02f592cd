//! The decision fusion engine.

use tracing::info;

use invoicegate_types::{
    Decision, DecisionStatus, DecisionSummary, ExtractedInvoice, FraudAssessment, PolicyAssessment,
};

use crate::rules::{first_matching, RuleContext};

/// Fuses the three upstream outputs into a terminal [`Decision`].
///
/// Total function: the precedence table always matches exactly one
/// rule, so fusion never fails.
#[derive(Default)]
pub struct DecisionFuser;

impl DecisionFuser {
    pub fn new() -> Self {
        Self
    }

    pub fn fuse(
        &self,
        invoice: &ExtractedInvoice,
        fraud: &FraudAssessment,
        policy: &PolicyAssessment,
    ) -> Decision {
        let ctx = RuleContext {
            invoice,
            fraud,
            policy,
        };
        let rule = first_matching(&ctx);
        let reason = (rule.reason)(&ctx);

        info!(
            rule = rule.name,
            status = %rule.status,
            confidence = rule.confidence,
            "decision made"
        );

        Decision {
            status: rule.status,
            reason,
            confidence: rule.confidence,
            recommendation: build_recommendation(rule.status, fraud, policy),
            summary: DecisionSummary {
                fraud_risk: fraud.risk_level,
                policy_status: if policy.compliant {
                    "Compliant".to_string()
                } else {
                    "Non-compliant".to_string()
                },
                approval_required: policy.approver_required.clone(),
                amount: invoice.total_amount,
                vendor: invoice.vendor.clone().unwrap_or_else(|| "Unknown".into()),
            },
        }
    }
}

/// Narrative for reviewers: the decision label, then up to two fraud
/// flags, up to two policy violations and a warning-count note.
fn build_recommendation(
    status: DecisionStatus,
    fraud: &FraudAssessment,
    policy: &PolicyAssessment,
) -> String {
    let mut parts = vec![match status {
        DecisionStatus::Approve => "Recommended for approval.".to_string(),
        DecisionStatus::Hold => "Recommended to HOLD for manual review.".to_string(),
        DecisionStatus::Reject => "Recommended to REJECT.".to_string(),
    }];

    if fraud.is_suspicious {
        let flags: Vec<&str> = fraud.flags.iter().take(2).map(String::as_str).collect();
        parts.push(format!("Fraud concerns: {}", flags.join(", ")));
    }

    if !policy.compliant {
        let issues: Vec<&str> = policy
            .violations
            .iter()
            .take(2)
            .map(String::as_str)
            .collect();
        parts.push(format!("Policy issues: {}", issues.join(", ")));
    }

    if !policy.warnings.is_empty() {
        parts.push(format!("Note: {} warnings flagged", policy.warnings.len()));
    }

    parts.join(" ")
}
