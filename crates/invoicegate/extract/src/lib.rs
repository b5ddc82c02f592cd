//! # invoicegate-extract
//!
//! Turns raw recognized text into an [`ExtractedInvoice`]. Every field is
//! pulled by an ordered, case-insensitive pattern list evaluated with
//! first-match-wins semantics; fields that do not match degrade to `None`
//! (or zero for the total) rather than failing. Only wholly empty input
//! produces `status = error`.
//!
//! The extractor is biased toward common invoice vocabulary
//! ("Invoice #", "Total Amount Due", "PO Number") and carries fallbacks:
//! the largest monetary token stands in for a missing total, and a
//! capitalized-words heuristic stands in for a missing vendor line.
//!
//! [`ExtractedInvoice`]: invoicegate_types::ExtractedInvoice

pub mod dates;
pub mod error;
pub mod extractor;
pub mod patterns;
pub mod vendor;

pub use error::ExtractError;
pub use extractor::Extractor;
pub use patterns::FieldPatterns;
