use thiserror::Error;

use invoicegate_extract::ExtractError;

/// Errors raised while constructing the pipeline.
///
/// A constructed pipeline never fails at runtime: empty input produces
/// an error-status extraction and the run continues to a decision.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("extractor setup failed: {0}")]
    Extract(#[from] ExtractError),
}
