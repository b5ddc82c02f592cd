//! # invoicegate-fraud
//!
//! Scores fraud risk for a structured invoice: seven independent checks,
//! each adding a fixed weight to an accumulator that is clamped to
//! [0, 1]. Stateful checks (duplicates, vendor frequency) read a bounded
//! history ledger behind the [`LedgerStore`] seam; the scorer itself is
//! stateless and unit-testable against an in-memory store.
//!
//! Ledger access for one assessment (history lookup through the final
//! append) is one serialized unit with respect to concurrent
//! assessments, so two submissions of the same duplicate invoice can
//! never both observe "no duplicate".

pub mod config;
pub mod ledger;
pub mod scorer;

pub use config::FraudConfig;
pub use ledger::{InMemoryLedger, LedgerObservation, LedgerStore, LedgerTxn, LEDGER_CAPACITY};
pub use scorer::FraudScorer;
