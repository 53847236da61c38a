//! Engine error taxonomy.
//!
//! Every variant describes a malformed input. Nothing here is transient, so
//! callers should report these as bad requests rather than retry.

use thiserror::Error;

/// Errors raised by the comparison and aggregation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A trim count is larger than the session it applies to.
    #[error("Trim out of range: cannot skip {skip_start} from start and {skip_end} from end of a session with {len} games")]
    Range {
        len: usize,
        skip_start: usize,
        skip_end: usize,
    },

    /// A placement string matches none of the recognized forms.
    #[error("Unrecognized placement {placement:?}: {reason}")]
    Format { placement: String, reason: String },

    /// A rate or average was requested over zero samples.
    #[error("{quantity} is undefined over zero tournaments")]
    DivisionUndefined { quantity: &'static str },
}

impl EngineError {
    pub(crate) fn format(placement: &str, reason: impl Into<String>) -> Self {
        EngineError::Format {
            placement: placement.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable taxonomy name, suitable for an error response body.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Range { .. } => "RangeError",
            EngineError::Format { .. } => "FormatError",
            EngineError::DivisionUndefined { .. } => "DivisionUndefinedError",
        }
    }

    /// Whether the error stems from caller input. Always true today.
    pub fn is_bad_input(&self) -> bool {
        true
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
