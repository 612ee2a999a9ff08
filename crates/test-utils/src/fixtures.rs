// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures and sample schemas

use colpath_ir::{AliasMap, Relation};

/// Sample relation sets for testing
///
/// The blog schema:
///
/// ```text
/// articles.author   -> users      (reverse: users.articles)
/// users.role        -> roles      (reverse: roles.users)
/// comments.article  -> articles   (reverse: articles.comments)
/// comments.item     -> any of products, pages, articles
/// articles_tags.articles_id -> articles (reverse: articles.tags)   junction
/// articles_tags.tags_id     -> tags     (reverse: tags.articles)   junction
/// ```
pub struct RelationFixtures;

impl RelationFixtures {
    /// The blog schema described above
    pub fn blog() -> Vec<Relation> {
        vec![
            Relation::new("articles", "author", "users").with_one_field("articles"),
            Relation::new("users", "role", "roles").with_one_field("users"),
            Relation::new("comments", "article", "articles").with_one_field("comments"),
            Relation::many_to_any(
                "comments",
                "item",
                "collection",
                ["products", "pages", "articles"],
            ),
            Relation::new("articles_tags", "articles_id", "articles")
                .with_one_field("tags")
                .with_junction_field("tags_id"),
            Relation::new("articles_tags", "tags_id", "tags")
                .with_one_field("articles")
                .with_junction_field("articles_id"),
        ]
    }

    /// Only `articles.author -> users` with reverse field `articles`
    pub fn articles_users() -> Vec<Relation> {
        vec![Relation::new("articles", "author", "users").with_one_field("articles")]
    }

    /// The blog schema as a YAML document
    pub fn blog_yaml() -> String {
        serde_yaml::to_string(&Self::blog()).unwrap()
    }

    /// Aliases a join planner would assign for `author.role.*` and
    /// `comments.article.author.*` starting from `articles`/`comments`
    pub fn blog_aliases() -> AliasMap {
        AliasMap::new()
            .with_alias("author", "usr1")
            .with_nested("usr1", AliasMap::new().with_alias("role", "rl2"))
            .with_alias("article", "art3")
            .with_nested("art3", AliasMap::new().with_alias("author", "usr4"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_yaml_round_trip() {
        let relations: Vec<Relation> = serde_yaml::from_str(&RelationFixtures::blog_yaml()).unwrap();
        assert_eq!(relations, RelationFixtures::blog());
    }

    #[test]
    fn test_blog_aliases() {
        let aliases = RelationFixtures::blog_aliases();
        assert_eq!(aliases.lookup(["usr1", "role"]), Some("rl2"));
        assert_eq!(aliases.lookup(["art3", "author"]), Some("usr4"));
    }
}
