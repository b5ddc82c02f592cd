use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the bounded fraud history buffer.
///
/// Appended exactly once per processed invoice, immediately after
/// scoring completes; removed only by FIFO capacity eviction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub invoice_number: Option<String>,
    pub vendor: Option<String>,
    pub amount: f64,
    /// Invoice date as extracted (informational; windows use `recorded_at`)
    pub date: Option<String>,
    /// Wall-clock time the entry was recorded
    pub recorded_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn new(
        invoice_number: Option<String>,
        vendor: Option<String>,
        amount: f64,
        date: Option<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            invoice_number,
            vendor,
            amount,
            date,
            recorded_at,
        }
    }
}
