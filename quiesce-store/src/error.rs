// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Errors at the storage boundary.
///
/// These never cross the [`StoredValue`](crate::StoredValue) boundary;
/// the handle logs them and falls back to defaults. Backends surface them
/// so alternative implementations (file-backed, remote) can report I/O.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not complete the operation.
    #[error("storage backend error: {context}")]
    Backend {
        /// Description of what went wrong.
        context: String,
    },

    /// A value could not be serialized or parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create a backend error with the given context.
    pub fn backend(context: impl Into<String>) -> Self {
        Self::Backend {
            context: context.into(),
        }
    }
}

/// Specialized `Result` for storage operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
