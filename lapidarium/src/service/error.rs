//! Service error types.

use crate::selection::SelectorError;
use crate::sparql::LookupError;

/// Errors that can occur while driving a selection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    /// The gesture state machine was driven out of order.
    #[error("Selector error: {0}")]
    Selector(#[from] SelectorError),

    /// The external count lookup failed.
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// Single-click picking refused while a selection is armed or drawing.
    #[error("Picking is suppressed while rectangle selection is active")]
    PickSuppressed,
}
