// ABOUTME: Unified error handling for the ahara matching engine
// ABOUTME: Defines AppError taxonomy and the AppResult alias used across modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Error Handling
//!
//! Central error types for the engine. Absence of a match is a first-class,
//! non-error outcome everywhere: an unmapped goal or an empty filter result
//! surfaces as an empty collection, never as an `Err`. Only genuinely
//! unexpected states (missing or corrupt index files, embedding dimension
//! mismatches, backend transport failures) propagate as `AppError`.

use thiserror::Error;

/// Result alias used throughout the engine
pub type AppResult<T> = Result<T, AppError>;

/// Engine error taxonomy
#[derive(Debug, Error)]
pub enum AppError {
    /// Corpus index file could not be read
    #[error("corpus index not readable at {path}: {source}")]
    IndexIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Corpus index file is not valid JSON or violates the index schema
    #[error("corpus index is corrupt: {0}")]
    IndexCorrupt(#[from] serde_json::Error),

    /// Embedding matrix does not line up with the plan list
    #[error("embedding matrix mismatch: {0}")]
    EmbeddingMatrix(String),

    /// Embedding backend failed to produce a vector
    ///
    /// Callers on the retrieval path do not normally see this: the retriever
    /// catches it and degrades to the keyword fallback. It is public so that
    /// backend implementations have a typed failure to return.
    #[error("embedding backend error: {0}")]
    EmbeddingBackend(String),

    /// Configuration could not be loaded or failed validation
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Meal cycle generation was invoked without any selected plans
    #[error("meal cycle requires at least one selected plan")]
    EmptyPlanSelection,
}

impl AppError {
    /// Build an embedding backend error from any displayable cause
    pub fn backend(cause: impl std::fmt::Display) -> Self {
        Self::EmbeddingBackend(cause.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_path() {
        let err = AppError::IndexIo {
            path: "outputs/plan_index.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = err.to_string();
        assert!(msg.contains("outputs/plan_index.json"));
    }

    #[test]
    fn test_backend_helper_wraps_cause() {
        let err = AppError::backend("connect timed out");
        assert!(matches!(err, AppError::EmbeddingBackend(_)));
        assert!(err.to_string().contains("connect timed out"));
    }
}
