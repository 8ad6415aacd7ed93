//! Reader error types.

use thiserror::Error;

/// The markup stream is not something a render can be built from.
///
/// Every variant is fatal: the caller gets no partial output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedInputError {
    #[error("xml error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("element <{element}> is never closed")]
    Unterminated { element: String },

    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("<{element}> attribute `{attribute}` is not an offset: {value:?}")]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error("candidate ends before it starts ({start}..{end})")]
    InvertedSpan { start: usize, end: usize },

    #[error("candidate at offset {start} has no content")]
    EmptyCandidate { start: usize },

    #[error("candidate {start}..{end} closed while another element is open")]
    UnbalancedCandidate { start: usize, end: usize },
}

/// Anything that can stop a reader.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Malformed(#[from] MalformedInputError),

    #[error("failed to read markup stream: {0}")]
    Io(#[from] std::io::Error),
}

impl ReadError {
    /// Map a quick-xml failure, keeping I/O problems apart from malformed input.
    pub(crate) fn from_xml(error: quick_xml::Error, position: u64) -> Self {
        match error {
            quick_xml::Error::Io(io) => {
                ReadError::Io(std::io::Error::new(io.kind(), io.to_string()))
            }
            other => ReadError::Malformed(MalformedInputError::Syntax {
                position,
                message: other.to_string(),
            }),
        }
    }
}
