// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # colpath - Catalog Layer
//!
//! This crate answers one question for the path resolver: given a collection
//! and a field, is the field relational, and where does it lead?
//!
//! ## Architecture
//!
//! - [`RelationCatalog`]: the lookup trait, implemented for plain relation
//!   slices (linear scan) and for [`StaticCatalog`] (hash index)
//! - [`get_relation_info`]: the classification rule shared by both
//! - [`RelationKind`]: many-to-one, one-to-many or many-to-any
//!
//! A catalog is built once per schema snapshot and is read-only afterwards,
//! so it can be shared freely between threads.
//!
//! ## Usage
//!
//! ```rust
//! use colpath_catalog::{RelationCatalog, RelationKind, StaticCatalog};
//! use colpath_ir::Relation;
//!
//! let catalog = StaticCatalog::new(vec![
//!     Relation::new("articles", "author", "users").with_one_field("articles"),
//! ])
//! .unwrap();
//!
//! let info = catalog.relation_info("articles", "author").unwrap();
//! assert_eq!(info.kind, RelationKind::ManyToOne);
//! assert_eq!(info.next_collection(), Some("users"));
//! ```

pub mod error;
pub mod relation_info;
pub mod r#static;
pub mod r#trait;

// Re-exports
pub use error::{CatalogError, CatalogResult};
pub use r#static::StaticCatalog;
pub use r#trait::RelationCatalog;
pub use relation_info::{RelationInfo, RelationKind, get_relation_info};
