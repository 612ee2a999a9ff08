// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Relation metadata
//!
//! A [`Relation`] is one declared edge of the schema graph. It is always stored
//! from the point of view of the collection that holds the foreign key (the
//! "many" side); the reverse accessor, if any, is recorded in
//! [`RelationMeta::one_field`].
//!
//! Polymorphic ("many-to-any") edges have no single related collection. They
//! carry the list of collections the row may point to and the name of the field
//! that stores the chosen collection at runtime.

use serde::{Deserialize, Serialize};

/// Metadata for a relation edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    /// Collection that owns the foreign key field
    pub collection: String,
    /// Foreign key field on `collection`
    pub field: String,
    /// Collection the foreign key points to (absent for polymorphic edges)
    #[serde(default)]
    pub related_collection: Option<String>,
    /// Extra relation metadata
    #[serde(default)]
    pub meta: Option<RelationMeta>,
}

/// Additional information about a relation
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationMeta {
    /// Reverse accessor field on the related collection
    #[serde(default)]
    pub one_field: Option<String>,
    /// Field storing the target collection of a polymorphic edge
    #[serde(default)]
    pub one_collection_field: Option<String>,
    /// Collections a polymorphic edge may point to
    #[serde(default)]
    pub one_allowed_collections: Option<Vec<String>>,
    /// Other foreign key of a junction collection (many-to-many)
    #[serde(default)]
    pub junction_field: Option<String>,
    /// Manual sort field on the owning collection
    #[serde(default)]
    pub sort_field: Option<String>,
}

impl Relation {
    /// Create a many-to-one relation `collection.field -> related_collection`
    pub fn new(
        collection: impl Into<String>,
        field: impl Into<String>,
        related_collection: impl Into<String>,
    ) -> Self {
        Self {
            collection: collection.into(),
            field: field.into(),
            related_collection: Some(related_collection.into()),
            meta: None,
        }
    }

    /// Create a polymorphic relation on `collection.field`
    ///
    /// `collection_field` names the field holding the runtime collection.
    pub fn many_to_any<I, S>(
        collection: impl Into<String>,
        field: impl Into<String>,
        collection_field: impl Into<String>,
        allowed: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            collection: collection.into(),
            field: field.into(),
            related_collection: None,
            meta: Some(RelationMeta {
                one_collection_field: Some(collection_field.into()),
                one_allowed_collections: Some(allowed.into_iter().map(Into::into).collect()),
                ..Default::default()
            }),
        }
    }

    /// Builder method: set the reverse accessor on the related collection
    pub fn with_one_field(mut self, one_field: impl Into<String>) -> Self {
        self.meta_mut().one_field = Some(one_field.into());
        self
    }

    /// Builder method: set the junction field
    pub fn with_junction_field(mut self, junction_field: impl Into<String>) -> Self {
        self.meta_mut().junction_field = Some(junction_field.into());
        self
    }

    /// Builder method: set the sort field
    pub fn with_sort_field(mut self, sort_field: impl Into<String>) -> Self {
        self.meta_mut().sort_field = Some(sort_field.into());
        self
    }

    /// Reverse accessor field, if one is declared
    pub fn one_field(&self) -> Option<&str> {
        self.meta.as_ref()?.one_field.as_deref()
    }

    /// Collections a polymorphic relation may target
    ///
    /// Empty for regular relations.
    pub fn allowed_collections(&self) -> &[String] {
        self.meta
            .as_ref()
            .and_then(|meta| meta.one_allowed_collections.as_deref())
            .unwrap_or(&[])
    }

    /// Whether this relation is polymorphic
    ///
    /// Both the collection field and the allowed collections must be declared.
    pub fn is_polymorphic(&self) -> bool {
        self.meta.as_ref().is_some_and(|meta| {
            meta.one_collection_field.is_some() && meta.one_allowed_collections.is_some()
        })
    }

    fn meta_mut(&mut self) -> &mut RelationMeta {
        self.meta.get_or_insert_with(RelationMeta::default)
    }
}
