// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Static Catalog
//!
//! This module provides an indexed catalog built once per schema snapshot.
//! Schema snapshots are lists of [`Relation`]s, usually exported as JSON or
//! YAML.
//!
//! ## Usage
//!
//! ```rust
//! use colpath_catalog::{RelationCatalog, RelationKind, StaticCatalog};
//!
//! let catalog = StaticCatalog::from_yaml_str(
//!     r#"
//! - collection: articles
//!   field: author
//!   related_collection: users
//!   meta:
//!     one_field: articles
//! "#,
//! )
//! .unwrap();
//!
//! let info = catalog.relation_info("users", "articles").unwrap();
//! assert_eq!(info.kind, RelationKind::OneToMany);
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use colpath_ir::Relation;
use tracing::{debug, instrument};

use crate::relation_info::RelationInfo;
use crate::{CatalogError, CatalogResult, RelationCatalog};

/// collection -> field -> index into `relations`
type FieldIndex = HashMap<String, HashMap<String, usize>>;

/// Relation catalog with hash-indexed lookups
///
/// Both the owning side and the reverse accessor of every relation are
/// indexed by collection and field, so lookups never scan the relation list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    relations: Vec<Relation>,
    owning: FieldIndex,
    reverse: FieldIndex,
}

impl StaticCatalog {
    /// Build a catalog from a relation list
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidRelation` for relations with an empty
    /// collection or field, and `CatalogError::AmbiguousRelation` when two
    /// relations claim the same field from the same side.
    #[instrument(skip_all, fields(relations = relations.len()))]
    pub fn new(relations: Vec<Relation>) -> CatalogResult<Self> {
        let mut owning = FieldIndex::new();
        let mut reverse = FieldIndex::new();

        for (index, relation) in relations.iter().enumerate() {
            validate_relation(relation)?;

            insert_unique(&mut owning, &relation.collection, &relation.field, index)?;

            if let (Some(related), Some(one_field)) =
                (relation.related_collection.as_deref(), relation.one_field())
            {
                insert_unique(&mut reverse, related, one_field, index)?;
            }
        }

        debug!(
            collections = owning.len(),
            reverse_collections = reverse.len(),
            "Indexed relation catalog"
        );

        Ok(Self {
            relations,
            owning,
            reverse,
        })
    }

    /// Load a catalog from a JSON array of relations
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let relations: Vec<Relation> = serde_json::from_str(json)?;
        Self::new(relations)
    }

    /// Load a catalog from a YAML sequence of relations
    pub fn from_yaml_str(yaml: &str) -> CatalogResult<Self> {
        let relations: Vec<Relation> = serde_yaml::from_str(yaml)?;
        Self::new(relations)
    }

    /// Load a catalog from a `.json`, `.yaml` or `.yml` file
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            other => Err(CatalogError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Number of relations in the catalog
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Whether the catalog holds no relations
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

impl RelationCatalog for StaticCatalog {
    fn relation_info(&self, collection: &str, field: &str) -> Option<RelationInfo<'_>> {
        if let Some(&index) = lookup(&self.owning, collection, field) {
            return Some(RelationInfo::owning(&self.relations[index]));
        }

        lookup(&self.reverse, collection, field)
            .map(|&index| RelationInfo::reverse(&self.relations[index]))
    }

    fn relations(&self) -> &[Relation] {
        &self.relations
    }
}

fn validate_relation(relation: &Relation) -> CatalogResult<()> {
    let invalid = |reason: &str| CatalogError::InvalidRelation {
        collection: relation.collection.clone(),
        field: relation.field.clone(),
        reason: reason.to_string(),
    };

    if relation.collection.is_empty() || relation.field.is_empty() {
        return Err(invalid("collection and field must not be empty"));
    }

    if relation.is_polymorphic() {
        if relation.allowed_collections().is_empty() {
            return Err(invalid("many-to-any relation allows no collections"));
        }
    } else if relation.related_collection.is_none() {
        return Err(invalid("related_collection is required for non-polymorphic relations"));
    }

    Ok(())
}

fn lookup<'a>(index: &'a FieldIndex, collection: &str, field: &str) -> Option<&'a usize> {
    index.get(collection)?.get(field)
}

fn insert_unique(
    index: &mut FieldIndex,
    collection: &str,
    field: &str,
    position: usize,
) -> CatalogResult<()> {
    let fields = index.entry(collection.to_string()).or_default();
    match fields.entry(field.to_string()) {
        Entry::Occupied(_) => Err(CatalogError::AmbiguousRelation {
            collection: collection.to_string(),
            field: field.to_string(),
        }),
        Entry::Vacant(entry) => {
            entry.insert(position);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RelationKind;

    fn blog() -> Vec<Relation> {
        vec![
            Relation::new("articles", "author", "users").with_one_field("articles"),
            Relation::new("users", "role", "roles").with_one_field("users"),
            Relation::many_to_any("comments", "item", "collection", ["articles", "products"]),
        ]
    }

    #[test]
    fn test_static_catalog_new() {
        let catalog = StaticCatalog::new(blog()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_static_catalog_lookup_matches_linear_scan() {
        let relations = blog();
        let catalog = StaticCatalog::new(relations.clone()).unwrap();

        for (collection, field) in [
            ("articles", "author"),
            ("users", "articles"),
            ("users", "role"),
            ("roles", "users"),
            ("comments", "item"),
            ("articles", "title"),
        ] {
            assert_eq!(
                catalog.relation_info(collection, field),
                relations.relation_info(collection, field),
                "{}.{}",
                collection,
                field
            );
        }
    }

    #[test]
    fn test_static_catalog_owning_side_first() {
        let catalog =
            StaticCatalog::new(vec![Relation::new("pages", "parent", "pages").with_one_field("parent")])
                .unwrap();
        let info = catalog.relation_info("pages", "parent").unwrap();
        assert_eq!(info.kind, RelationKind::ManyToOne);
    }

    #[test]
    fn test_static_catalog_rejects_duplicate_owning_field() {
        let result = StaticCatalog::new(vec![
            Relation::new("articles", "author", "users"),
            Relation::new("articles", "author", "editors"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::AmbiguousRelation {
                collection: "articles".to_string(),
                field: "author".to_string(),
            }
        );
    }

    #[test]
    fn test_static_catalog_rejects_duplicate_reverse_field() {
        let result = StaticCatalog::new(vec![
            Relation::new("articles", "author", "users").with_one_field("posts"),
            Relation::new("notes", "owner", "users").with_one_field("posts"),
        ]);
        assert!(matches!(result, Err(CatalogError::AmbiguousRelation { .. })));
    }

    #[test]
    fn test_static_catalog_rejects_missing_related_collection() {
        let mut relation = Relation::new("articles", "author", "users");
        relation.related_collection = None;

        let result = StaticCatalog::new(vec![relation]);
        assert!(matches!(result, Err(CatalogError::InvalidRelation { .. })));
    }

    #[test]
    fn test_static_catalog_from_json() {
        let json = r#"[
            { "collection": "articles", "field": "author", "related_collection": "users" }
        ]"#;
        let catalog = StaticCatalog::from_json_str(json).unwrap();
        assert!(catalog.relation_info("articles", "author").is_some());
    }

    #[test]
    fn test_static_catalog_from_invalid_yaml() {
        let result = StaticCatalog::from_yaml_str("- collection: [unclosed");
        assert!(matches!(result, Err(CatalogError::SerializationError(_))));
    }
}
