// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Path Validator
//!
//! A query usually references several field paths at once (filters, sorts,
//! aggregation keys). The validator resolves all of them in one pass and
//! collects every failure instead of stopping at the first one, so the caller
//! can report all offending fields together.

use colpath_catalog::RelationCatalog;
use colpath_ir::{AliasMap, ColumnReference, FieldPath};
use tracing::{debug, warn};

use crate::error::ResolveError;
use crate::resolution::ColumnPathResolver;

/// Information about a path that failed to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The offending path as written
    pub path: String,

    /// The issue message
    pub message: String,

    /// Code identifying the type of issue
    pub code: &'static str,

    /// The underlying error
    pub error: ResolveError,
}

impl ValidationIssue {
    fn new(path: String, error: ResolveError) -> Self {
        Self {
            path,
            message: error.to_string(),
            code: error.code(),
            error,
        }
    }
}

/// Outcome of resolving one path in a batch
pub type ValidationOutcome = Result<ColumnReference, ValidationIssue>;

/// Outcome of validating a batch of paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// One entry per input path, in input order
    pub entries: Vec<(String, ValidationOutcome)>,
}

impl ValidationReport {
    /// Whether every path resolved
    pub fn is_valid(&self) -> bool {
        self.entries.iter().all(|(_, outcome)| outcome.is_ok())
    }

    /// Successfully resolved columns with their paths
    pub fn resolved(&self) -> impl Iterator<Item = (&str, &ColumnReference)> {
        self.entries.iter().filter_map(|(path, outcome)| {
            outcome
                .as_ref()
                .ok()
                .map(|column| (path.as_str(), column))
        })
    }

    /// Paths that failed to resolve
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.entries
            .iter()
            .filter_map(|(_, outcome)| outcome.as_ref().err())
    }

    /// All columns if every path resolved, otherwise all issues
    pub fn into_result(self) -> Result<Vec<ColumnReference>, Vec<ValidationIssue>> {
        let (resolved, issues): (Vec<_>, Vec<_>) = self
            .entries
            .into_iter()
            .map(|(_, outcome)| outcome)
            .partition(Result::is_ok);

        if issues.is_empty() {
            Ok(resolved.into_iter().filter_map(Result::ok).collect())
        } else {
            Err(issues.into_iter().filter_map(Result::err).collect())
        }
    }
}

/// Batch validator for field paths
pub struct PathValidator<C> {
    resolver: ColumnPathResolver<C>,
}

impl<C: RelationCatalog> PathValidator<C> {
    /// Create a new validator around a resolver
    pub fn new(resolver: ColumnPathResolver<C>) -> Self {
        Self { resolver }
    }

    /// The underlying resolver
    pub fn resolver(&self) -> &ColumnPathResolver<C> {
        &self.resolver
    }

    /// Resolve every parsed path, collecting all failures
    pub fn validate_all<'p, I>(
        &self,
        root_collection: &str,
        aliases: &AliasMap,
        paths: I,
    ) -> ValidationReport
    where
        I: IntoIterator<Item = &'p FieldPath>,
    {
        let mut report = ValidationReport::default();

        for path in paths {
            let result = self.resolver.resolve(path, root_collection, aliases);
            record(&mut report, path.to_string(), result);
        }

        debug!(
            paths = report.entries.len(),
            issues = report.issues().count(),
            "Validated field paths"
        );
        report
    }

    /// Parse and resolve every dotted path, collecting all failures
    ///
    /// Parse errors are reported as issues like any other failure.
    pub fn validate_strs<'p, I>(
        &self,
        root_collection: &str,
        aliases: &AliasMap,
        paths: I,
    ) -> ValidationReport
    where
        I: IntoIterator<Item = &'p str>,
    {
        let mut report = ValidationReport::default();

        for path in paths {
            let result = self.resolver.resolve_str(path, root_collection, aliases);
            record(&mut report, path.to_string(), result);
        }

        report
    }
}

fn record(
    report: &mut ValidationReport,
    path: String,
    result: Result<ColumnReference, ResolveError>,
) {
    let outcome = result.map_err(|error| {
        warn!(path = %path, code = error.code(), "Field path failed validation");
        ValidationIssue::new(path.clone(), error)
    });
    report.entries.push((path, outcome));
}

#[cfg(test)]
mod tests {
    use super::*;
    use colpath_ir::Relation;

    fn validator() -> PathValidator<Vec<Relation>> {
        PathValidator::new(ColumnPathResolver::new(vec![
            Relation::new("articles", "author", "users").with_one_field("articles"),
            Relation::many_to_any("comments", "item", "collection", ["articles"]),
        ]))
    }

    #[test]
    fn test_all_valid() {
        let report = validator().validate_strs(
            "articles",
            &AliasMap::new(),
            ["author.name", "author.email"],
        );

        assert!(report.is_valid());
        let columns = report.into_result().unwrap();
        assert_eq!(columns[0].column_path, "users.name");
        assert_eq!(columns[1].column_path, "users.email");
    }

    #[test]
    fn test_collects_every_issue() {
        let report = validator().validate_strs(
            "articles",
            &AliasMap::new(),
            ["title", "author.name", "editor.name", "author..x"],
        );

        assert!(!report.is_valid());
        assert_eq!(report.resolved().count(), 1);

        let issues: Vec<_> = report.issues().collect();
        let codes: Vec<_> = issues.iter().map(|issue| issue.code).collect();
        assert_eq!(
            codes,
            vec!["not_relational_field", "not_relational_field", "invalid_path"]
        );
        assert_eq!(issues[1].path, "editor.name");
        assert!(issues[1].message.contains("articles.editor"));
    }

    #[test]
    fn test_validate_parsed_paths() {
        let paths = vec![
            FieldPath::parse("item.title").unwrap(),
            FieldPath::parse("item:articles.title").unwrap(),
        ];

        let report = validator().validate_all("comments", &AliasMap::new(), &paths);

        let issues: Vec<_> = report.issues().collect();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "missing_scope");

        let (path, column) = report.resolved().next().unwrap();
        assert_eq!(path, "item:articles.title");
        assert_eq!(column.target_collection, "articles");
    }

    #[test]
    fn test_entries_keep_input_order() {
        let report = validator().validate_strs(
            "articles",
            &AliasMap::new(),
            ["title", "author.name", "editor.name"],
        );

        let paths: Vec<_> = report.entries.iter().map(|(path, _)| path.as_str()).collect();
        assert_eq!(paths, vec!["title", "author.name", "editor.name"]);
        assert!(report.entries[0].1.is_err());
        assert_eq!(
            report.entries[1].1.as_ref().unwrap().column_path,
            "users.name"
        );
        assert!(report.entries[2].1.is_err());
    }
}
