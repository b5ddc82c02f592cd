use serde::{Deserialize, Serialize};

/// Fraud detection thresholds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FraudConfig {
    /// Amount at or above which the high-amount check fires (+0.2)
    pub high_amount: f64,
    /// Amount at or above which the very-high-amount check fires (+0.3)
    pub very_high_amount: f64,
    /// Minimum amount for the suspicious-round-amount check
    pub round_amount_min: f64,
    /// Prior same-vendor entries within one hour that trip the
    /// frequency check
    pub same_hour_count: usize,
    /// Prior same-vendor entries within 24 hours that trip the
    /// frequency check
    pub same_day_count: usize,
    /// How far back the duplicate scan looks
    pub duplicate_window_days: i64,
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self {
            high_amount: 10_000.0,
            very_high_amount: 50_000.0,
            round_amount_min: 1_000.0,
            same_hour_count: 2,
            same_day_count: 3,
            duplicate_window_days: 90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds() {
        let config = FraudConfig::default();
        assert_eq!(config.high_amount, 10_000.0);
        assert_eq!(config.very_high_amount, 50_000.0);
        assert_eq!(config.round_amount_min, 1_000.0);
        assert_eq!(config.same_hour_count, 2);
        assert_eq!(config.same_day_count, 3);
        assert_eq!(config.duplicate_window_days, 90);
    }
}
