// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Join alias map
//!
//! The join planner assigns a short alias to every joined collection instance
//! and records it in an [`AliasMap`] keyed by path segment. Deeper levels are
//! nested under the alias of their parent join:
//!
//! ```json
//! {
//!   "author": "ljnsv",
//!   "ljnsv": { "role": "qwxmt" }
//! }
//! ```
//!
//! The root collection is never aliased, so lookups may legitimately miss.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Nested mapping from path segments to join aliases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AliasMap {
    /// Alias assigned to a path prefix
    Leaf(String),
    /// Deeper prefixes keyed by segment
    Node(BTreeMap<String, AliasMap>),
}

impl Default for AliasMap {
    fn default() -> Self {
        AliasMap::Node(BTreeMap::new())
    }
}

impl AliasMap {
    /// Create an empty alias map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: assign `alias` to `key` at this level
    ///
    /// A leaf map is replaced by a node first.
    pub fn with_alias(mut self, key: impl Into<String>, alias: impl Into<String>) -> Self {
        self.insert(key, AliasMap::Leaf(alias.into()));
        self
    }

    /// Builder method: nest `child` under `key`
    pub fn with_nested(mut self, key: impl Into<String>, child: AliasMap) -> Self {
        self.insert(key, child);
        self
    }

    /// Insert an entry at this level
    pub fn insert(&mut self, key: impl Into<String>, value: AliasMap) {
        if let AliasMap::Leaf(_) = self {
            *self = AliasMap::default();
        }
        if let AliasMap::Node(children) = self {
            children.insert(key.into(), value);
        }
    }

    /// Follow `keys` and return the alias stored there
    ///
    /// Returns `None` when a key is missing, when a leaf is reached before the
    /// keys run out, or when the keys end on a nested level.
    ///
    /// # Examples
    ///
    /// ```
    /// use colpath_ir::AliasMap;
    ///
    /// let aliases = AliasMap::new()
    ///     .with_alias("author", "ljnsv")
    ///     .with_nested("ljnsv", AliasMap::new().with_alias("role", "qwxmt"));
    ///
    /// assert_eq!(aliases.lookup(["author"]), Some("ljnsv"));
    /// assert_eq!(aliases.lookup(["ljnsv", "role"]), Some("qwxmt"));
    /// assert_eq!(aliases.lookup(["role"]), None);
    /// ```
    pub fn lookup<'k, I>(&self, keys: I) -> Option<&str>
    where
        I: IntoIterator<Item = &'k str>,
    {
        let mut current = self;
        for key in keys {
            match current {
                AliasMap::Node(children) => current = children.get(key)?,
                AliasMap::Leaf(_) => return None,
            }
        }

        match current {
            AliasMap::Leaf(alias) => Some(alias.as_str()),
            AliasMap::Node(_) => None,
        }
    }

    /// Whether the map holds no entries
    pub fn is_empty(&self) -> bool {
        matches!(self, AliasMap::Node(children) if children.is_empty())
    }
}
