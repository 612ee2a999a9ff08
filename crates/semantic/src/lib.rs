// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # colpath - Path Resolution Layer
//!
//! This crate resolves logical field paths to the physical columns a
//! generated query must reference.
//!
//! ## Overview
//!
//! Query building code refers to fields through relations, e.g.
//! `author.role.name` on `articles`. By the time a filter or sort clause is
//! rendered, the join planner has already joined `users` and `roles` and given
//! them aliases. The resolver follows the path through the relation catalog
//! and the alias map and produces the qualified column:
//!
//! ```rust
//! use colpath_ir::{AliasMap, Relation};
//! use colpath_semantic::ColumnPathResolver;
//!
//! let resolver = ColumnPathResolver::new(vec![
//!     Relation::new("articles", "author", "users"),
//!     Relation::new("users", "role", "roles"),
//! ]);
//!
//! let aliases = AliasMap::new()
//!     .with_alias("author", "kjsdf")
//!     .with_nested("kjsdf", AliasMap::new().with_alias("role", "ljnsv"));
//!
//! let column = resolver.resolve_str("author.role.name", "articles", &aliases).unwrap();
//! assert_eq!(column.column_path, "ljnsv.name");
//! assert_eq!(column.target_collection, "roles");
//! ```
//!
//! ### Polymorphic relations
//!
//! Many-to-any fields point at a different collection per row, so the path
//! must say which collection it means:
//!
//! ```rust
//! use colpath_ir::{AliasMap, Relation};
//! use colpath_semantic::{ColumnPathResolver, ResolveError};
//!
//! let resolver = ColumnPathResolver::new(vec![Relation::many_to_any(
//!     "comments",
//!     "item",
//!     "collection",
//!     ["products", "pages"],
//! )]);
//!
//! let column = resolver.resolve_str("item:products.name", "comments", &AliasMap::new()).unwrap();
//! assert_eq!(column.column_path, "products.name");
//!
//! let err = resolver.resolve_str("item.name", "comments", &AliasMap::new()).unwrap_err();
//! assert!(matches!(err, ResolveError::MissingScope { .. }));
//! ```

pub mod error;
pub mod resolution;
pub mod validator;

// Re-export commonly used types
pub use error::{ResolveError, ResolveResult};
pub use resolution::{ColumnPathResolver, ConfigError, ResolutionConfig, resolve_column_path};
pub use validator::{PathValidator, ValidationIssue, ValidationOutcome, ValidationReport};
