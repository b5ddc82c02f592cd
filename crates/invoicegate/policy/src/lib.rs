//! # invoicegate-policy
//!
//! Evaluates a structured invoice against company payment policy: eight
//! checks producing blocking **violations** and non-blocking
//! **warnings**, plus the spending-tier approval level. The evaluator is
//! a total function: rule mismatches become list entries, never errors.
//!
//! The violation/warning distinction is load-bearing: violations force
//! non-compliance and can drive rejection, warnings can only contribute
//! to a hold.

pub mod config;
pub mod evaluator;

pub use config::{PolicyConfig, PolicyRules, RequiredField, RequiredFieldSets, SpendingTiers};
pub use evaluator::PolicyEvaluator;
