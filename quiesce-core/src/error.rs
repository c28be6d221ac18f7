// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the quiesce utilities.
//!
//! Scheduling supersession is never an error; only the outcome of
//! caller-supplied operations surfaces, and only when the originating call
//! has not been superseded.

/// Root error type for caller-supplied operations.
#[derive(Debug, thiserror::Error)]
pub enum QuiesceError {
    /// An asynchronous call failed.
    #[error("call failed: {context}")]
    Call {
        /// Description of what went wrong.
        context: String,
    },

    /// Custom error from user code.
    ///
    /// Wraps errors produced by caller-supplied operations so they can be
    /// published through the caller's state channel.
    #[error("user error: {0}")]
    User(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A validator raised instead of returning a verdict.
    ///
    /// The raising validator is recovered locally; this fixed message is
    /// what callers observe.
    #[error("validation error occurred")]
    Validation,
}

impl QuiesceError {
    /// Create a call error with the given context.
    pub fn call_error(context: impl Into<String>) -> Self {
        Self::Call {
            context: context.into(),
        }
    }

    /// Wrap a user error.
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::User(Box::new(error))
    }
}

// Boxed user errors cannot be cloned; stringify them instead so state
// snapshots holding an error stay cheap to copy out of a watch channel.
impl Clone for QuiesceError {
    fn clone(&self) -> Self {
        match self {
            Self::Call { context } => Self::Call {
                context: context.clone(),
            },
            Self::User(e) => Self::Call {
                context: format!("user error: {e}"),
            },
            Self::Validation => Self::Validation,
        }
    }
}

/// Specialized `Result` for quiesce operations.
pub type Result<T> = std::result::Result<T, QuiesceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("backend unreachable")]
    struct BackendDown;

    #[test]
    fn call_error_carries_context() {
        let err = QuiesceError::call_error("lookup timed out");
        assert_eq!(err.to_string(), "call failed: lookup timed out");
    }

    #[test]
    fn user_error_preserves_source() {
        let err = QuiesceError::user_error(BackendDown);
        assert_eq!(err.to_string(), "user error: backend unreachable");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn clone_stringifies_user_errors() {
        let err = QuiesceError::user_error(BackendDown).clone();
        assert!(matches!(err, QuiesceError::Call { .. }));
        assert!(err.to_string().contains("backend unreachable"));
    }

    #[test]
    fn validation_message_is_fixed() {
        assert_eq!(
            QuiesceError::Validation.to_string(),
            "validation error occurred"
        );
    }
}
