use serde::{Deserialize, Serialize};

/// Spending-amount bracket determining which role must approve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalLevel {
    AutoApprove,
    RequiresManager,
    RequiresDirector,
    RequiresCfo,
    RequiresBoard,
}

impl ApprovalLevel {
    /// Role label matching the level.
    pub fn approver(&self) -> &'static str {
        match self {
            ApprovalLevel::AutoApprove => "System",
            ApprovalLevel::RequiresManager => "Manager",
            ApprovalLevel::RequiresDirector => "Director",
            ApprovalLevel::RequiresCfo => "CFO",
            ApprovalLevel::RequiresBoard => "Board of Directors",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalLevel::AutoApprove => "auto_approve",
            ApprovalLevel::RequiresManager => "requires_manager",
            ApprovalLevel::RequiresDirector => "requires_director",
            ApprovalLevel::RequiresCfo => "requires_cfo",
            ApprovalLevel::RequiresBoard => "requires_board",
        }
    }
}

impl std::fmt::Display for ApprovalLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a vendor matched the approved list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Exact, case-sensitive match
    Exact,
    /// Case-insensitive substring match in either direction
    Fuzzy,
}

/// Detail of the approved-vendor check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VendorCheck {
    pub approved: bool,
    pub message: String,
    /// Present only when approved
    pub match_type: Option<MatchType>,
}

/// Detail of the spending-limit check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApprovalCheck {
    pub level: ApprovalLevel,
    pub approver: String,
    pub message: String,
}

/// Detail of the amount-bounds check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmountCheck {
    pub valid: bool,
    pub message: String,
}

/// Detail of the PO-requirement check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoCheck {
    pub compliant: bool,
    pub message: String,
}

/// Detail of the invoice-date check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DateCheck {
    pub valid: bool,
    pub message: String,
}

/// Structured per-check details kept alongside the flat lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyCheckDetails {
    pub vendor: VendorCheck,
    pub approval: ApprovalCheck,
    pub amount: AmountCheck,
    pub po: PoCheck,
    pub date: DateCheck,
}

/// Output of the policy evaluator.
///
/// Violations block compliance and can drive rejection; warnings are
/// informational and only influence holds through aggregation or tier
/// rules. The distinction is load-bearing for the decision table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyAssessment {
    /// True iff `violations` is empty; warnings never affect this
    pub compliant: bool,
    /// Blocking policy breaches, in check order
    pub violations: Vec<String>,
    /// Non-blocking notes, in check order
    pub warnings: Vec<String>,
    /// Spending tier for the invoice amount
    pub approval_level: ApprovalLevel,
    /// Role label matching `approval_level`
    pub approver_required: String,
    /// Number of checks evaluated
    pub checks_performed: u8,
    /// Structured detail for the individual checks
    pub details: PolicyCheckDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approver_labels() {
        assert_eq!(ApprovalLevel::AutoApprove.approver(), "System");
        assert_eq!(ApprovalLevel::RequiresManager.approver(), "Manager");
        assert_eq!(ApprovalLevel::RequiresDirector.approver(), "Director");
        assert_eq!(ApprovalLevel::RequiresCfo.approver(), "CFO");
        assert_eq!(ApprovalLevel::RequiresBoard.approver(), "Board of Directors");
    }

    #[test]
    fn approval_level_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ApprovalLevel::RequiresCfo).unwrap(),
            "\"requires_cfo\""
        );
        assert_eq!(
            serde_json::to_string(&ApprovalLevel::AutoApprove).unwrap(),
            "\"auto_approve\""
        );
    }

    #[test]
    fn approval_level_ordering_follows_tiers() {
        assert!(ApprovalLevel::AutoApprove < ApprovalLevel::RequiresManager);
        assert!(ApprovalLevel::RequiresCfo < ApprovalLevel::RequiresBoard);
    }
}
