//! # invoicegate-decision
//!
//! Fuses the extraction, fraud and policy outputs into a final
//! approve/hold/reject [`Decision`]. The logic is an ordered table of
//! (predicate, outcome) rules evaluated first-match-wins: exactly one
//! rule fires, the fuser is total and never fails. Rules are data, so
//! new ones can be added and tested without touching control flow.
//!
//! [`Decision`]: invoicegate_types::Decision

pub mod fuser;
pub mod rules;

pub use fuser::DecisionFuser;
pub use rules::{DecisionRule, RuleContext, RULES};
