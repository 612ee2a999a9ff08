// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Field paths
//!
//! A field path is a dot separated list of relational fields ending in a
//! column, e.g. `author.role.name`. Segments that traverse a polymorphic
//! relation carry the target collection after a colon: `item:products.name`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between path segments
pub const PATH_SEPARATOR: char = '.';

/// Separator between a field name and its collection scope
pub const SCOPE_SEPARATOR: char = ':';

/// Errors produced while parsing a field path
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParsePathError {
    /// The input contained no segments at all
    #[error("Field path is empty")]
    Empty,

    /// A segment was empty, e.g. `author..name`
    #[error("Empty segment at position {position} in field path '{path}'")]
    EmptySegment { path: String, position: usize },

    /// A segment had a scope but no field name, e.g. `:products`
    #[error("Segment '{0}' has no field name")]
    MissingFieldName(String),
}

/// One component of a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathSegment {
    raw: String,
    field_len: usize,
}

impl PathSegment {
    /// Parse a single segment
    ///
    /// The scope is everything after the first colon. An empty scope is
    /// treated as no scope.
    ///
    /// # Examples
    ///
    /// ```
    /// use colpath_ir::PathSegment;
    ///
    /// let segment = PathSegment::parse("item:products").unwrap();
    /// assert_eq!(segment.field(), "item");
    /// assert_eq!(segment.scope(), Some("products"));
    /// ```
    pub fn parse(raw: impl Into<String>) -> Result<Self, ParsePathError> {
        let raw = raw.into();
        let field_len = raw.find(SCOPE_SEPARATOR).unwrap_or(raw.len());

        if field_len == 0 {
            return Err(if raw.is_empty() {
                ParsePathError::Empty
            } else {
                ParsePathError::MissingFieldName(raw)
            });
        }

        Ok(Self { raw, field_len })
    }

    /// Bare field name with any scope removed
    pub fn field(&self) -> &str {
        &self.raw[..self.field_len]
    }

    /// Collection scope, if present and non-empty
    pub fn scope(&self) -> Option<&str> {
        self.raw
            .get(self.field_len + SCOPE_SEPARATOR.len_utf8()..)
            .filter(|scope| !scope.is_empty())
    }

    /// Segment text exactly as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PathSegment {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PathSegment {
    type Error = ParsePathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PathSegment> for String {
    fn from(segment: PathSegment) -> Self {
        segment.raw
    }
}

/// A non-empty, ordered list of path segments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<PathSegment>", into = "Vec<PathSegment>")]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parse a dotted path such as `author.role.name`
    ///
    /// # Examples
    ///
    /// ```
    /// use colpath_ir::FieldPath;
    ///
    /// let path = FieldPath::parse("author.role.name").unwrap();
    /// assert_eq!(path.len(), 3);
    /// assert_eq!(path.to_string(), "author.role.name");
    /// ```
    pub fn parse(path: &str) -> Result<Self, ParsePathError> {
        if path.is_empty() {
            return Err(ParsePathError::Empty);
        }

        let segments = path
            .split(PATH_SEPARATOR)
            .enumerate()
            .map(|(position, raw)| {
                if raw.is_empty() {
                    Err(ParsePathError::EmptySegment {
                        path: path.to_string(),
                        position,
                    })
                } else {
                    PathSegment::parse(raw)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Build a path from individual segment strings
    pub fn from_segments<I, S>(segments: I) -> Result<Self, ParsePathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments
            .into_iter()
            .map(PathSegment::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Self::try_from(segments)
    }

    /// All segments in order
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments
    ///
    /// Paths built through `parse` or `from_segments` are never empty.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The trailing column segment
    pub fn column(&self) -> &PathSegment {
        // Non-empty by construction
        &self.segments[self.segments.len() - 1]
    }
}

impl TryFrom<Vec<PathSegment>> for FieldPath {
    type Error = ParsePathError;

    fn try_from(segments: Vec<PathSegment>) -> Result<Self, Self::Error> {
        if segments.is_empty() {
            return Err(ParsePathError::Empty);
        }
        Ok(Self { segments })
    }
}

impl From<FieldPath> for Vec<PathSegment> {
    fn from(path: FieldPath) -> Self {
        path.segments
    }
}

impl AsRef<[PathSegment]> for FieldPath {
    fn as_ref(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl FromStr for FieldPath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", PATH_SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
