// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Relation classification
//!
//! Every relation is stored once, on the collection holding the foreign key.
//! A field can therefore reach a relation from two directions:
//!
//! - **Owning side**: `collection.field` is the foreign key itself. This is a
//!   many-to-one edge, or a many-to-any edge when the relation is polymorphic.
//! - **Reverse side**: `field` is the `one_field` accessor declared on the
//!   related collection. This is a one-to-many edge (many-to-many edges are two
//!   one-to-many hops through a junction collection).
//!
//! The owning side is checked first.

use colpath_ir::Relation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a relational field connects its collection to the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Foreign key pointing at a single related collection
    ManyToOne,
    /// Reverse accessor listing rows of the owning collection
    OneToMany,
    /// Polymorphic foreign key; the target collection varies per row
    ManyToAny,
}

impl RelationKind {
    /// Short code used in diagnostics (`m2o`, `o2m`, `a2o`)
    pub fn code(&self) -> &'static str {
        match self {
            RelationKind::ManyToOne => "m2o",
            RelationKind::OneToMany => "o2m",
            RelationKind::ManyToAny => "a2o",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationKind::ManyToOne => "many-to-one",
            RelationKind::OneToMany => "one-to-many",
            RelationKind::ManyToAny => "many-to-any",
        };
        f.write_str(name)
    }
}

/// A relation found for a field, together with its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationInfo<'a> {
    pub relation: &'a Relation,
    pub kind: RelationKind,
}

impl<'a> RelationInfo<'a> {
    /// Classify `relation` as seen from its owning side
    pub fn owning(relation: &'a Relation) -> Self {
        let kind = if relation.is_polymorphic() {
            RelationKind::ManyToAny
        } else {
            RelationKind::ManyToOne
        };
        Self { relation, kind }
    }

    /// Classify `relation` as seen from its reverse accessor
    pub fn reverse(relation: &'a Relation) -> Self {
        Self {
            relation,
            kind: RelationKind::OneToMany,
        }
    }

    /// Collection reached by following this relation
    ///
    /// `None` for many-to-any relations, whose target depends on the caller's
    /// scope, and for many-to-one relations without a related collection.
    pub fn next_collection(&self) -> Option<&'a str> {
        match self.kind {
            RelationKind::ManyToOne => self.relation.related_collection.as_deref(),
            RelationKind::OneToMany => Some(self.relation.collection.as_str()),
            RelationKind::ManyToAny => None,
        }
    }
}

/// Find the relation behind `collection.field`
///
/// Returns `None` if the field is not relational.
///
/// # Examples
///
/// ```
/// use colpath_catalog::{get_relation_info, RelationKind};
/// use colpath_ir::Relation;
///
/// let relations = vec![Relation::new("articles", "author", "users").with_one_field("articles")];
///
/// let info = get_relation_info(&relations, "users", "articles").unwrap();
/// assert_eq!(info.kind, RelationKind::OneToMany);
/// assert!(get_relation_info(&relations, "articles", "title").is_none());
/// ```
pub fn get_relation_info<'a>(
    relations: &'a [Relation],
    collection: &str,
    field: &str,
) -> Option<RelationInfo<'a>> {
    if let Some(relation) = relations
        .iter()
        .find(|r| r.collection == collection && r.field == field)
    {
        return Some(RelationInfo::owning(relation));
    }

    relations
        .iter()
        .find(|r| {
            r.related_collection.as_deref() == Some(collection) && r.one_field() == Some(field)
        })
        .map(RelationInfo::reverse)
}
