// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Resolved column references

use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical column expression and the collection that owns it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReference {
    /// Qualified column, e.g. `ljnsv.name`
    pub column_path: String,
    /// Collection the column belongs to
    pub target_collection: String,
}

impl ColumnReference {
    /// Build a reference from a qualifier (alias or collection) and a column
    pub fn new(
        qualifier: &str,
        column: &str,
        target_collection: impl Into<String>,
    ) -> Self {
        Self {
            column_path: format!("{}.{}", qualifier, column),
            target_collection: target_collection.into(),
        }
    }

    /// Qualifier part of the column path
    pub fn qualifier(&self) -> &str {
        self.column_path
            .split_once('.')
            .map_or("", |(qualifier, _)| qualifier)
    }
}

impl fmt::Display for ColumnReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column_path)
    }
}
