// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Resolution-specific test helpers and custom assertions

use colpath_ir::ColumnReference;

/// Custom assertion helpers for resolution testing
pub struct ResolveAssertions;

impl ResolveAssertions {
    /// Assert that a column reference has the given path and target
    pub fn assert_column(column: &ColumnReference, column_path: &str, target_collection: &str) {
        assert_eq!(
            column.column_path, column_path,
            "Expected column path '{}', found '{}'",
            column_path, column.column_path
        );
        assert_eq!(
            column.target_collection, target_collection,
            "Expected target collection '{}', found '{}'",
            target_collection, column.target_collection
        );
    }

    /// Assert that a column is qualified by a join alias rather than `collection`
    pub fn assert_aliased(column: &ColumnReference, collection: &str) {
        assert_ne!(
            column.qualifier(),
            collection,
            "Column '{}' is qualified by the bare collection name",
            column.column_path
        );
    }
}
