// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock catalog implementation for testing
//!
//! Provides an in-memory relation catalog that records every lookup, with a
//! builder pattern for easy test setup

use colpath_catalog::{RelationCatalog, RelationInfo, get_relation_info};
use colpath_ir::Relation;
use std::sync::Mutex;

use crate::fixtures::RelationFixtures;

/// In-memory mock catalog for testing
#[derive(Debug, Default)]
pub struct MockCatalog {
    relations: Vec<Relation>,
    lookups: Mutex<Vec<(String, String)>>,
}

impl MockCatalog {
    /// Create a new empty mock catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relation to the catalog
    pub fn add_relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    /// Every `(collection, field)` looked up so far, in order
    pub fn lookups(&self) -> Vec<(String, String)> {
        self.lookups.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Forget recorded lookups
    pub fn clear_lookups(&self) {
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.clear();
        }
    }
}

impl RelationCatalog for MockCatalog {
    fn relation_info(&self, collection: &str, field: &str) -> Option<RelationInfo<'_>> {
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push((collection.to_string(), field.to_string()));
        }
        get_relation_info(&self.relations, collection, field)
    }

    fn relations(&self) -> &[Relation] {
        &self.relations
    }
}

/// Builder for creating mock catalogs with a fluent API
pub struct MockCatalogBuilder {
    catalog: MockCatalog,
}

impl Default for MockCatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalogBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            catalog: MockCatalog::new(),
        }
    }

    /// Add the blog schema from [`RelationFixtures::blog`]
    pub fn with_blog_schema(mut self) -> Self {
        for relation in RelationFixtures::blog() {
            self.catalog = self.catalog.add_relation(relation);
        }
        self
    }

    /// Add a custom relation
    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.catalog = self.catalog.add_relation(relation);
        self
    }

    /// Build the mock catalog
    pub fn build(self) -> MockCatalog {
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colpath_catalog::RelationKind;

    #[test]
    fn test_mock_catalog_records_lookups() {
        let catalog = MockCatalogBuilder::new().with_blog_schema().build();

        assert!(catalog.relation_info("articles", "author").is_some());
        assert!(catalog.relation_info("articles", "title").is_none());

        assert_eq!(
            catalog.lookups(),
            vec![
                ("articles".to_string(), "author".to_string()),
                ("articles".to_string(), "title".to_string()),
            ]
        );

        catalog.clear_lookups();
        assert!(catalog.lookups().is_empty());
    }

    #[test]
    fn test_mock_catalog_custom_relation() {
        let catalog = MockCatalogBuilder::new()
            .with_relation(Relation::new("pages", "parent", "pages").with_one_field("children"))
            .build();

        let info = catalog.relation_info("pages", "children").unwrap();
        assert_eq!(info.kind, RelationKind::OneToMany);
        assert_eq!(catalog.relations().len(), 1);
    }
}
