//! # invoicegate-types
//!
//! Shared data model for the invoicegate decisioning pipeline:
//!
//! - **ExtractedInvoice** - structured candidate invoice produced once per
//!   document by the extractor, immutable afterwards
//! - **FraudAssessment** - additive risk score, discretized risk level and
//!   human-readable flags
//! - **PolicyAssessment** - compliance verdict with blocking violations,
//!   non-blocking warnings and the required approval tier
//! - **Decision** - terminal approve/hold/reject verdict with rationale
//! - **LedgerEntry** - one row of the bounded fraud history buffer
//! - **StageEvent** - best-effort per-stage progress notification
//! - **DecisionBundle** - the four-entity output handed to persistence

pub mod bundle;
pub mod decision;
pub mod event;
pub mod fraud;
pub mod invoice;
pub mod ledger;
pub mod policy;

pub use bundle::DecisionBundle;
pub use decision::{Decision, DecisionStatus, DecisionSummary};
pub use event::{StageEvent, StageName, StageStatus};
pub use fraud::{
    DuplicateCheck, FraudAssessment, FraudCheckDetails, FrequencyCheck, PatternCheck, RiskLevel,
};
pub use invoice::{is_present, ExtractedInvoice, ExtractionStatus, LineItem};
pub use ledger::LedgerEntry;
pub use policy::{
    AmountCheck, ApprovalCheck, ApprovalLevel, DateCheck, MatchType, PoCheck, PolicyAssessment,
    PolicyCheckDetails, VendorCheck,
};
