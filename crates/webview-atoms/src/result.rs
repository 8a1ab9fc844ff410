//! Result and error types for atom evaluation.

use thiserror::Error;

use crate::evaluation::{Evaluation, RawValue, ValueKind};
use crate::locator::Locator;

/// Result type for atom operations
pub type AtomResult<T> = Result<T, AtomError>;

/// Errors that can occur while building, evaluating or interpreting an atom.
///
/// Every error is terminal to the evaluation in progress. Nothing here is
/// retried; the variants carry enough context to render a test failure.
#[derive(Debug, Error)]
pub enum AtomError {
    /// Wire key matched none of the known locator strategies
    #[error("Unrecognized locator type: {wire_key:?}")]
    UnknownLocator {
        /// The key that failed to resolve
        wire_key: String,
    },

    /// Leaf atom needs an element reference but the caller supplied none
    #[error("{atom}: missing required element context")]
    MissingElementContext {
        /// Name of the leaf atom that refused to run
        atom: &'static str,
    },

    /// Cast-or-fail transformer saw a value of the wrong dynamic type
    #[error("Result type mismatch: expected {expected}, got {actual}")]
    ResultTypeMismatch {
        /// Statically expected kind
        expected: ValueKind,
        /// Raw value actually returned
        actual: RawValue,
    },

    /// Multi-element lookup returned something that is neither null nor a sequence
    #[error(
        "Unexpected non-iterable type in findMultipleElements({locator}, {value}): return evaluation: {evaluation}"
    )]
    NonIterableResult {
        /// Locator strategy used for the lookup
        locator: Locator,
        /// Lookup value
        value: String,
        /// Full raw evaluation
        evaluation: Evaluation,
    },

    /// Multi-element lookup returned a sequence with a non-reference entry
    #[error(
        "Unexpected non-elementReference in findMultipleElements({locator}, {value}): ({element}) all: {evaluation}"
    )]
    NonReferenceElement {
        /// Locator strategy used for the lookup
        locator: Locator,
        /// Lookup value
        value: String,
        /// The offending entry
        element: RawValue,
        /// Full raw evaluation
        evaluation: Evaluation,
    },

    /// Remote side reported a non-zero status
    #[error("Error in evaluation: status {status}: {message}")]
    EvaluationFailed {
        /// Remote status code
        status: i64,
        /// Remote error message (or the raw value when no message was sent)
        message: String,
    },

    /// The execution bridge failed to run the script
    #[error("Remote execution failed: {message}")]
    RemoteExecution {
        /// Error message from the bridge
        message: String,
    },

    /// Document did not decode to an evaluation
    #[error("Malformed evaluation: {message}")]
    MalformedEvaluation {
        /// What was wrong with the document
        message: String,
    },

    /// `get()` was called on an interaction that never performed an atom
    #[error("perform was never called on this interaction")]
    NoResult,

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AtomError {
    /// Build a [`AtomError::RemoteExecution`] from any displayable bridge error
    pub fn remote(err: impl std::fmt::Display) -> Self {
        Self::RemoteExecution {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_locator_message() {
        let err = AtomError::UnknownLocator {
            wire_key: "cssSelector".to_string(),
        };
        assert!(err.to_string().contains("cssSelector"));
    }

    #[test]
    fn test_missing_context_names_atom() {
        let err = AtomError::MissingElementContext { atom: "webClick" };
        assert_eq!(err.to_string(), "webClick: missing required element context");
    }

    #[test]
    fn test_type_mismatch_includes_payload() {
        let err = AtomError::ResultTypeMismatch {
            expected: ValueKind::Bool,
            actual: RawValue::String("nope".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("boolean"));
        assert!(msg.contains("nope"));
    }

    #[test]
    fn test_remote_helper() {
        let err = AtomError::remote("bridge closed");
        assert!(matches!(err, AtomError::RemoteExecution { ref message } if message == "bridge closed"));
    }
}
