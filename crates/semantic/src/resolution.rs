// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Field Path Resolution
//!
//! Turns a logical field path such as `author.role.name` into the physical
//! column the generated query must reference, e.g. `ljnsv.name`.
//!
//! ## Algorithm
//!
//! The resolver walks the path one relational segment at a time, carrying the
//! collection it is standing on and the join alias of the previous hop:
//!
//! 1. Look the segment's bare field up in the catalog. A miss means the path
//!    is malformed for this schema.
//! 2. Look up the join alias for the segment, nested under the previous hop's
//!    alias when there is one.
//! 3. Step to the next collection: the related collection for many-to-one,
//!    the owning collection for one-to-many, and the `:scope` collection for
//!    many-to-any.
//! 4. When only the column segment is left, qualify it with the alias, or
//!    with the collection name when the planner assigned no alias.
//!
//! The walk is a loop, so path length does not grow the call stack.

use colpath_catalog::{RelationCatalog, RelationKind};
use colpath_ir::{AliasMap, ColumnReference, FieldPath, PathSegment, Relation};
use serde::{Deserialize, Serialize};
use std::iter;
use tracing::{debug, instrument, trace};

use crate::error::{ResolveError, ResolveResult};

/// Configuration for field path resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Maximum number of relations a path may traverse (default: unlimited)
    pub max_depth: Option<usize>,
    /// Reject many-to-any scopes outside the relation's allowed collections
    /// (default: false)
    pub enforce_allowed_scopes: bool,
}

impl ResolutionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == Some(0) {
            return Err(ConfigError::InvalidMaxDepth {
                reason: "max_depth must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Invalid depth limit
    #[error("Invalid max_depth: {reason}")]
    InvalidMaxDepth { reason: String },
}

/// Resolves field paths against a relation catalog
///
/// The resolver holds no mutable state; one instance can serve any number of
/// threads as long as the catalog is shareable.
///
/// # Examples
///
/// ```
/// use colpath_ir::{AliasMap, FieldPath, Relation};
/// use colpath_semantic::ColumnPathResolver;
///
/// let relations = vec![Relation::new("articles", "author", "users")];
/// let resolver = ColumnPathResolver::new(relations);
///
/// let path = FieldPath::parse("author.name").unwrap();
/// let aliases = AliasMap::new().with_alias("author", "usr1");
///
/// let column = resolver.resolve(&path, "articles", &aliases).unwrap();
/// assert_eq!(column.column_path, "usr1.name");
/// assert_eq!(column.target_collection, "users");
/// ```
#[derive(Debug, Clone)]
pub struct ColumnPathResolver<C> {
    catalog: C,
    config: ResolutionConfig,
}

impl<C: RelationCatalog> ColumnPathResolver<C> {
    /// Create a new resolver with default configuration
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            config: ResolutionConfig::default(),
        }
    }

    /// Create resolver with custom configuration
    pub fn with_config(catalog: C, config: ResolutionConfig) -> Self {
        Self { catalog, config }
    }

    /// The catalog this resolver reads from
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The active configuration
    pub fn config(&self) -> &ResolutionConfig {
        &self.config
    }

    /// Resolve a parsed field path starting at `root_collection`
    pub fn resolve(
        &self,
        path: &FieldPath,
        root_collection: &str,
        aliases: &AliasMap,
    ) -> ResolveResult<ColumnReference> {
        self.resolve_segments(path.segments(), root_collection, aliases)
    }

    /// Parse a dotted path and resolve it
    pub fn resolve_str(
        &self,
        path: &str,
        root_collection: &str,
        aliases: &AliasMap,
    ) -> ResolveResult<ColumnReference> {
        let path = FieldPath::parse(path)?;
        self.resolve(&path, root_collection, aliases)
    }

    /// Resolve a raw segment slice starting at `root_collection`
    ///
    /// # Errors
    ///
    /// - `EmptyPath` for an empty slice
    /// - `NotRelationalField` when a non-final segment is not a relation
    /// - `PathTooDeep` when the configured depth limit is exceeded
    /// - `MissingScope` when a many-to-any segment has no `:scope`
    /// - `IncompletePath` when the path ends on a relational field
    #[instrument(
        level = "debug",
        skip(self, path, aliases),
        fields(segments = path.len())
    )]
    pub fn resolve_segments(
        &self,
        path: &[PathSegment],
        root_collection: &str,
        aliases: &AliasMap,
    ) -> ResolveResult<ColumnReference> {
        if path.is_empty() {
            return Err(ResolveError::EmptyPath);
        }

        let mut remaining = path;
        let mut parent_collection = root_collection;
        let mut parent_alias: Option<&str> = None;
        let mut hops = 0;

        while let Some((head, rest)) = remaining.split_first() {
            let field = head.field();

            let info = self
                .catalog
                .relation_info(parent_collection, field)
                .ok_or_else(|| ResolveError::NotRelationalField {
                    collection: parent_collection.to_string(),
                    field: field.to_string(),
                })?;

            hops += 1;
            if let Some(limit) = self.config.max_depth.filter(|&limit| hops > limit) {
                return Err(ResolveError::PathTooDeep {
                    depth: path.len() - 1,
                    limit,
                });
            }

            let keys = parent_alias.into_iter().chain(iter::once(head.as_str()));
            let alias = aliases.lookup(keys);

            let next = match info.kind {
                RelationKind::ManyToAny => self.scope_target(head, parent_collection, info.relation)?,
                RelationKind::ManyToOne | RelationKind::OneToMany => {
                    info.next_collection().ok_or_else(|| {
                        ResolveError::MissingRelatedCollection {
                            collection: info.relation.collection.clone(),
                            field: info.relation.field.clone(),
                        }
                    })?
                }
            };

            trace!(
                from = parent_collection,
                field,
                kind = %info.kind,
                to = next,
                alias = alias.unwrap_or("<none>"),
                "Followed relation"
            );

            match rest {
                [] => {
                    return Err(ResolveError::IncompletePath {
                        collection: parent_collection.to_string(),
                        field: field.to_string(),
                    });
                }
                [column] => {
                    let column = ColumnReference::new(alias.unwrap_or(next), column.as_str(), next);
                    debug!(column = %column, target = %column.target_collection, "Resolved field path");
                    return Ok(column);
                }
                _ => {
                    remaining = rest;
                    parent_collection = next;
                    parent_alias = alias;
                }
            }
        }

        Err(ResolveError::EmptyPath)
    }

    /// Target collection of a many-to-any segment
    fn scope_target<'p>(
        &self,
        segment: &'p PathSegment,
        collection: &str,
        relation: &Relation,
    ) -> ResolveResult<&'p str> {
        let scope = segment.scope().ok_or_else(|| ResolveError::MissingScope {
            collection: collection.to_string(),
            field: segment.field().to_string(),
        })?;

        if self.config.enforce_allowed_scopes
            && !relation.allowed_collections().iter().any(|c| c == scope)
        {
            return Err(ResolveError::ScopeNotAllowed {
                collection: collection.to_string(),
                field: segment.field().to_string(),
                scope: scope.to_string(),
            });
        }

        Ok(scope)
    }
}

/// Resolve `path` from `collection` against a plain relation list
///
/// Convenience wrapper around [`ColumnPathResolver`] with default
/// configuration.
///
/// # Examples
///
/// ```
/// use colpath_ir::{AliasMap, FieldPath, Relation};
/// use colpath_semantic::resolve_column_path;
///
/// let relations = vec![Relation::new("articles", "author", "users")];
/// let path = FieldPath::parse("author.name").unwrap();
///
/// let column = resolve_column_path(path.segments(), "articles", &AliasMap::new(), &relations)
///     .unwrap();
/// assert_eq!(column.column_path, "users.name");
/// ```
pub fn resolve_column_path(
    path: &[PathSegment],
    collection: &str,
    alias_map: &AliasMap,
    relations: &[Relation],
) -> ResolveResult<ColumnReference> {
    ColumnPathResolver::new(relations).resolve_segments(path, collection, alias_map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relations() -> Vec<Relation> {
        vec![
            Relation::new("articles", "author", "users").with_one_field("articles"),
            Relation::new("users", "role", "roles").with_one_field("users"),
            Relation::many_to_any("comments", "item", "collection", ["products", "pages"]),
        ]
    }

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    #[test]
    fn test_many_to_one() {
        let resolver = ColumnPathResolver::new(relations());
        let column = resolver
            .resolve(&path("author.name"), "articles", &AliasMap::new())
            .unwrap();

        assert_eq!(column.column_path, "users.name");
        assert_eq!(column.target_collection, "users");
    }

    #[test]
    fn test_one_to_many() {
        let resolver = ColumnPathResolver::new(relations());
        let column = resolver
            .resolve(&path("articles.title"), "users", &AliasMap::new())
            .unwrap();

        assert_eq!(column.column_path, "articles.title");
        assert_eq!(column.target_collection, "articles");
    }

    #[test]
    fn test_nested_alias_under_parent_alias() {
        let resolver = ColumnPathResolver::new(relations());
        let aliases = AliasMap::new()
            .with_alias("author", "usr1")
            .with_nested("usr1", AliasMap::new().with_alias("role", "ljnsv"));

        let column = resolver
            .resolve(&path("author.role.name"), "articles", &aliases)
            .unwrap();

        assert_eq!(column.column_path, "ljnsv.name");
        assert_eq!(column.target_collection, "roles");
    }

    #[test]
    fn test_second_hop_without_alias_uses_collection() {
        let resolver = ColumnPathResolver::new(relations());
        let aliases = AliasMap::new().with_alias("author", "usr1");

        let column = resolver
            .resolve(&path("author.role.name"), "articles", &aliases)
            .unwrap();

        assert_eq!(column.column_path, "roles.name");
    }

    #[test]
    fn test_many_to_any_scope() {
        let resolver = ColumnPathResolver::new(relations());

        let err = resolver
            .resolve(&path("item.name"), "comments", &AliasMap::new())
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingScope {
                collection: "comments".to_string(),
                field: "item".to_string(),
            }
        );

        let column = resolver
            .resolve(&path("item:products.name"), "comments", &AliasMap::new())
            .unwrap();
        assert_eq!(column.column_path, "products.name");
        assert_eq!(column.target_collection, "products");
    }

    #[test]
    fn test_scope_alias_keyed_by_raw_segment() {
        let resolver = ColumnPathResolver::new(relations());
        let aliases = AliasMap::new().with_alias("item:products", "prd");

        let column = resolver
            .resolve(&path("item:products.name"), "comments", &aliases)
            .unwrap();
        assert_eq!(column.column_path, "prd.name");
    }

    #[test]
    fn test_enforce_allowed_scopes() {
        let config = ResolutionConfig {
            enforce_allowed_scopes: true,
            ..Default::default()
        };
        let resolver = ColumnPathResolver::with_config(relations(), config);

        let err = resolver
            .resolve(&path("item:users.name"), "comments", &AliasMap::new())
            .unwrap_err();
        assert_eq!(err.code(), "scope_not_allowed");

        assert!(resolver
            .resolve(&path("item:pages.name"), "comments", &AliasMap::new())
            .is_ok());
    }

    #[test]
    fn test_unenforced_scope_is_trusted() {
        let resolver = ColumnPathResolver::new(relations());
        let column = resolver
            .resolve(&path("item:users.name"), "comments", &AliasMap::new())
            .unwrap();
        assert_eq!(column.target_collection, "users");
    }

    #[test]
    fn test_not_relational_field() {
        let resolver = ColumnPathResolver::new(relations());
        let err = resolver
            .resolve(&path("title"), "articles", &AliasMap::new())
            .unwrap_err();

        assert_eq!(
            err,
            ResolveError::NotRelationalField {
                collection: "articles".to_string(),
                field: "title".to_string(),
            }
        );
    }

    #[test]
    fn test_not_relational_field_mid_path() {
        let resolver = ColumnPathResolver::new(relations());
        let err = resolver
            .resolve(&path("author.email.domain"), "articles", &AliasMap::new())
            .unwrap_err();

        assert_eq!(
            err,
            ResolveError::NotRelationalField {
                collection: "users".to_string(),
                field: "email".to_string(),
            }
        );
    }

    #[test]
    fn test_path_ending_on_relation_is_incomplete() {
        let resolver = ColumnPathResolver::new(relations());
        let err = resolver
            .resolve(&path("author"), "articles", &AliasMap::new())
            .unwrap_err();

        assert_eq!(
            err,
            ResolveError::IncompletePath {
                collection: "articles".to_string(),
                field: "author".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_segment_slice() {
        let resolver = ColumnPathResolver::new(relations());
        let err = resolver
            .resolve_segments(&[], "articles", &AliasMap::new())
            .unwrap_err();
        assert_eq!(err, ResolveError::EmptyPath);
    }

    #[test]
    fn test_depth_limit() {
        let config = ResolutionConfig {
            max_depth: Some(1),
            ..Default::default()
        };
        let resolver = ColumnPathResolver::with_config(relations(), config);

        assert!(resolver
            .resolve(&path("author.name"), "articles", &AliasMap::new())
            .is_ok());
        assert_eq!(
            resolver
                .resolve(&path("author.role.name"), "articles", &AliasMap::new())
                .unwrap_err(),
            ResolveError::PathTooDeep { depth: 2, limit: 1 }
        );
    }

    #[test]
    fn test_depth_limit_reports_bad_segment_first() {
        let config = ResolutionConfig {
            max_depth: Some(1),
            ..Default::default()
        };
        let resolver = ColumnPathResolver::with_config(relations(), config);

        let err = resolver
            .resolve(&path("title.author.role.name"), "articles", &AliasMap::new())
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::NotRelationalField {
                collection: "articles".to_string(),
                field: "title".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_str_parse_error() {
        let resolver = ColumnPathResolver::new(relations());
        let err = resolver
            .resolve_str("author..name", "articles", &AliasMap::new())
            .unwrap_err();
        assert_eq!(err.code(), "invalid_path");
    }

    #[test]
    fn test_config_validate() {
        assert!(ResolutionConfig::default().validate().is_ok());

        let config = ResolutionConfig {
            max_depth: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMaxDepth { .. })
        ));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: ResolutionConfig =
            serde_json::from_str(r#"{ "enforce_allowed_scopes": true }"#).unwrap();
        assert_eq!(config.max_depth, None);
        assert!(config.enforce_allowed_scopes);
    }

    #[test]
    fn test_free_function_on_slice() {
        let relations = relations();
        let column = resolve_column_path(
            path("author.name").segments(),
            "articles",
            &AliasMap::new().with_alias("author", "usr1"),
            &relations,
        )
        .unwrap();
        assert_eq!(column.column_path, "usr1.name");
    }
}
