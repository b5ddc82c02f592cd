//! # invoicegate-pipeline
//!
//! Orchestrates the four-stage decisioning run for one invoice text:
//! extraction first, fraud scoring and policy evaluation in parallel on
//! the shared extraction result, then fusion into a terminal decision.
//! Emits best-effort [`StageEvent`] progress notifications around each
//! stage over a broadcast channel.
//!
//! [`StageEvent`]: invoicegate_types::StageEvent

pub mod error;
pub mod pipeline;
pub mod progress;

pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineConfig};
pub use progress::ProgressBus;
