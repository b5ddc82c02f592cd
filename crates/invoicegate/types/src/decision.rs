use serde::{Deserialize, Serialize};

use crate::fraud::RiskLevel;

/// Final verdict for one invoice submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DecisionStatus {
    Approve,
    Hold,
    Reject,
}

impl DecisionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Approve => "APPROVE",
            DecisionStatus::Hold => "HOLD",
            DecisionStatus::Reject => "REJECT",
        }
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Denormalized snapshot of the inputs, for downstream display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub fraud_risk: RiskLevel,
    /// "Compliant" or "Non-compliant"
    pub policy_status: String,
    pub approval_required: String,
    pub amount: f64,
    pub vendor: String,
}

/// Terminal output of the decision fuser; never revised.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub status: DecisionStatus,
    /// Single string explaining the winning rule
    pub reason: String,
    /// Fixed weight tied to the winning rule, not learned
    pub confidence: f64,
    /// Composed narrative: decision label, top fraud flags, top policy
    /// violations, warning-count note
    pub recommendation: String,
    pub summary: DecisionSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&DecisionStatus::Approve).unwrap(),
            "\"APPROVE\""
        );
        assert_eq!(
            serde_json::to_string(&DecisionStatus::Reject).unwrap(),
            "\"REJECT\""
        );
    }

    #[test]
    fn status_display() {
        assert_eq!(DecisionStatus::Hold.to_string(), "HOLD");
    }
}
