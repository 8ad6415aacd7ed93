//! Render error types.

use crate::store::StoreError;
use psan_parser::{MalformedInputError, ReadError, Span};
use thiserror::Error;

/// Why a render produced no fragment.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("malformed document: {0}")]
    Malformed(#[from] MalformedInputError),

    #[error("failed to read document: {0}")]
    Io(#[source] std::io::Error),

    /// No token starts at the focus offset. Callers report this as "candidate not found".
    #[error("no token starts at focus {focus}")]
    FocusNotFound { focus: Span },

    #[error("focus {focus} is empty")]
    EmptyFocus { focus: Span },

    #[error("decision store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// The writer's own count of opens and closes disagrees with the element stack.
    #[error("render left {open} element(s) open and closed {stray} more than it opened")]
    Unbalanced { open: usize, stray: usize },
}

impl From<ReadError> for RenderError {
    fn from(error: ReadError) -> Self {
        match error {
            ReadError::Malformed(malformed) => RenderError::Malformed(malformed),
            ReadError::Io(io) => RenderError::Io(io),
        }
    }
}
