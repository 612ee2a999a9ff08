// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Error types for field path resolution
//!
//! Every error here is a validation failure of the caller's path against the
//! schema. None of them are transient; the query that produced them must be
//! rejected.

use colpath_ir::ParsePathError;
use thiserror::Error;

/// Result type alias for resolution operations
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that can occur while resolving a field path
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A segment names a field that is not a relation on the current collection
    #[error("\"{collection}.{field}\" is not a relational field")]
    NotRelationalField { collection: String, field: String },

    /// A many-to-any segment was used without a `:scope` suffix
    #[error(
        "You have to provide a collection scope when traversing many-to-any field \"{collection}.{field}\""
    )]
    MissingScope { collection: String, field: String },

    /// A many-to-any scope is not one of the relation's allowed collections
    #[error("Collection \"{scope}\" is not allowed for many-to-any field \"{collection}.{field}\"")]
    ScopeNotAllowed {
        collection: String,
        field: String,
        scope: String,
    },

    /// A many-to-one relation declares no related collection
    #[error("Relation \"{collection}.{field}\" has no related collection")]
    MissingRelatedCollection { collection: String, field: String },

    /// The path ends on a relational field instead of a column
    #[error("Field path ends at relational field \"{collection}.{field}\" without selecting a column")]
    IncompletePath { collection: String, field: String },

    /// The path has no segments
    #[error("Field path is empty")]
    EmptyPath,

    /// The path traverses more relations than the configured limit
    #[error("Field path traverses {depth} relations, exceeding the limit of {limit}")]
    PathTooDeep { depth: usize, limit: usize },

    /// The path text could not be parsed
    #[error("Invalid field path: {0}")]
    InvalidPath(#[from] ParsePathError),
}

impl ResolveError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::NotRelationalField { .. } => "not_relational_field",
            ResolveError::MissingScope { .. } => "missing_scope",
            ResolveError::ScopeNotAllowed { .. } => "scope_not_allowed",
            ResolveError::MissingRelatedCollection { .. } => "missing_related_collection",
            ResolveError::IncompletePath { .. } => "incomplete_path",
            ResolveError::EmptyPath => "empty_path",
            ResolveError::PathTooDeep { .. } => "path_too_deep",
            ResolveError::InvalidPath(_) => "invalid_path",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_relational_field() {
        let err = ResolveError::NotRelationalField {
            collection: "articles".to_string(),
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "\"articles.title\" is not a relational field");
        assert_eq!(err.code(), "not_relational_field");
    }

    #[test]
    fn test_error_display_missing_scope() {
        let err = ResolveError::MissingScope {
            collection: "comments".to_string(),
            field: "item".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("collection scope"));
        assert!(msg.contains("comments.item"));
    }

    #[test]
    fn test_error_display_path_too_deep() {
        let err = ResolveError::PathTooDeep { depth: 9, limit: 8 };
        let msg = format!("{}", err);
        assert!(msg.contains("9"));
        assert!(msg.contains("8"));
    }

    #[test]
    fn test_error_from_parse_error() {
        let err: ResolveError = ParsePathError::Empty.into();
        assert_eq!(err.code(), "invalid_path");
        assert!(err.to_string().contains("empty"));
    }
}
