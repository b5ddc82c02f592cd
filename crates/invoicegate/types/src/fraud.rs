use serde::{Deserialize, Serialize};

/// Discretized risk bucket derived from the continuous fraud score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Minimal,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Step function over the fraud score: ≥0.7 HIGH, ≥0.4 MEDIUM,
    /// ≥0.2 LOW, otherwise MINIMAL (inclusive lower bounds).
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            RiskLevel::High
        } else if score >= 0.4 {
            RiskLevel::Medium
        } else if score >= 0.2 {
            RiskLevel::Low
        } else {
            RiskLevel::Minimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Minimal => "MINIMAL",
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detail of the duplicate-invoice check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DuplicateCheck {
    /// A prior ledger entry matched on both invoice number and vendor
    pub is_duplicate: bool,
    pub message: String,
}

/// Detail of the vendor-frequency check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrequencyCheck {
    pub suspicious: bool,
    pub message: String,
}

/// Detail of the invoice-number pattern check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternCheck {
    pub suspicious: bool,
    pub message: String,
}

/// Structured per-check details kept alongside the flat flag list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FraudCheckDetails {
    pub duplicate: DuplicateCheck,
    pub frequency: FrequencyCheck,
    pub pattern: PatternCheck,
}

/// Output of the fraud scorer. Created once, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FraudAssessment {
    /// Whether the score crossed the suspicion threshold (≥ 0.3)
    pub is_suspicious: bool,
    /// Clamped additive score in [0, 1], rounded to two decimals
    pub risk_score: f64,
    /// Pure function of the score
    pub risk_level: RiskLevel,
    /// One human-readable string per fired check, in check order;
    /// a single "no indicators" sentinel when nothing fired
    pub flags: Vec<String>,
    /// Number of checks evaluated
    pub checks_performed: u8,
    /// Structured detail for the stateful checks
    pub details: FraudCheckDetails,
}
