// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for Catalog operations
//!
//! This module defines the error types used throughout the catalog layer.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while building or loading a relation catalog
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum CatalogError {
    /// Two relations claim the same field on the same collection
    #[error("Field '{collection}.{field}' is claimed by more than one relation")]
    AmbiguousRelation { collection: String, field: String },

    /// A relation is structurally invalid
    #[error("Invalid relation '{collection}.{field}': {reason}")]
    InvalidRelation {
        collection: String,
        field: String,
        reason: String,
    },

    /// Failed to read a schema file
    #[error("Failed to read schema file '{path}': {reason}")]
    Io { path: String, reason: String },

    /// Failed to serialize or deserialize schema data
    #[error("Failed to serialize schema data: {0}")]
    SerializationError(String),

    /// The schema file format could not be determined
    #[error("Unsupported schema format: {0}")]
    UnsupportedFormat(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for CatalogError {
    fn from(err: serde_yaml::Error) -> Self {
        CatalogError::SerializationError(err.to_string())
    }
}
