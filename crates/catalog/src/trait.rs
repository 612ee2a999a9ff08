// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # RelationCatalog trait
//!
//! This module defines the lookup interface the path resolver walks through.

use crate::relation_info::{RelationInfo, get_relation_info};
use colpath_ir::Relation;

/// Read-only view of the relations declared in a schema snapshot
///
/// Implementations must be pure: the same `(collection, field)` always yields
/// the same answer for the lifetime of the catalog.
///
/// # Examples
///
/// ```rust
/// use colpath_catalog::{RelationCatalog, RelationKind};
/// use colpath_ir::Relation;
///
/// let relations = vec![Relation::new("articles", "author", "users")];
/// let info = relations.relation_info("articles", "author").unwrap();
/// assert_eq!(info.kind, RelationKind::ManyToOne);
/// ```
pub trait RelationCatalog: Send + Sync {
    /// Find the relation behind `collection.field`
    ///
    /// `field` must already be stripped of any `:scope` suffix. Returns `None`
    /// if the field is not relational.
    fn relation_info(&self, collection: &str, field: &str) -> Option<RelationInfo<'_>>;

    /// All relations in the catalog
    fn relations(&self) -> &[Relation];
}

impl RelationCatalog for [Relation] {
    fn relation_info(&self, collection: &str, field: &str) -> Option<RelationInfo<'_>> {
        get_relation_info(self, collection, field)
    }

    fn relations(&self) -> &[Relation] {
        self
    }
}

impl RelationCatalog for Vec<Relation> {
    fn relation_info(&self, collection: &str, field: &str) -> Option<RelationInfo<'_>> {
        get_relation_info(self, collection, field)
    }

    fn relations(&self) -> &[Relation] {
        self
    }
}

impl<T: RelationCatalog + ?Sized> RelationCatalog for &T {
    fn relation_info(&self, collection: &str, field: &str) -> Option<RelationInfo<'_>> {
        (**self).relation_info(collection, field)
    }

    fn relations(&self) -> &[Relation] {
        (**self).relations()
    }
}

impl<T: RelationCatalog + ?Sized> RelationCatalog for std::sync::Arc<T> {
    fn relation_info(&self, collection: &str, field: &str) -> Option<RelationInfo<'_>> {
        (**self).relation_info(collection, field)
    }

    fn relations(&self) -> &[Relation] {
        (**self).relations()
    }
}
