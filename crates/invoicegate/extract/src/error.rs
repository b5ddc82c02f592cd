use thiserror::Error;

/// Errors from the extraction crate.
///
/// Extraction itself never fails on document content; the only failure
/// mode is a malformed pattern at construction time.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),
}
