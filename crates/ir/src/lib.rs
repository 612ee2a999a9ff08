// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # colpath - Shared Value Types
//!
//! This crate provides the plain data types shared by the catalog and the
//! resolver:
//! - [`Relation`]: a declared relationship edge of the schema graph
//! - [`FieldPath`] / [`PathSegment`]: logical dotted field paths
//! - [`AliasMap`]: join aliases produced by the query planner
//! - [`ColumnReference`]: the resolved physical column

pub mod alias;
pub mod column;
pub mod path;
pub mod relation;

// Re-export commonly used types
pub use alias::AliasMap;
pub use column::ColumnReference;
pub use path::{FieldPath, ParsePathError, PathSegment, PATH_SEPARATOR, SCOPE_SEPARATOR};
pub use relation::{Relation, RelationMeta};
