// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # colpath command line
//!
//! ```text
//! colpath resolve --schema schema.yaml --collection articles \
//!     --aliases aliases.json author.role.name item:products.name
//! colpath check --schema schema.yaml
//! ```
//!
//! `resolve` prints one JSON object per path, in the order given. Schema, alias and config files
//! may be JSON or YAML.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colpath_catalog::{RelationCatalog, RelationInfo, StaticCatalog};
use colpath_ir::AliasMap;
use colpath_semantic::{ColumnPathResolver, PathValidator, ResolutionConfig};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

/// Resolve relational field paths to physical column references
#[derive(Debug, Parser)]
#[command(name = "colpath", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve one or more dotted field paths
    Resolve(ResolveArgs),
    /// Load a schema and list every relational field it declares
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Relation schema file (.json, .yaml or .yml)
    #[arg(long, short)]
    pub schema: PathBuf,

    /// Collection the paths start from
    #[arg(long, short)]
    pub collection: String,

    /// Alias map produced by the join planner
    #[arg(long, short)]
    pub aliases: Option<PathBuf>,

    /// Resolution settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Field paths, e.g. `author.role.name`
    #[arg(required = true)]
    pub paths: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Relation schema file (.json, .yaml or .yml)
    #[arg(long, short)]
    pub schema: PathBuf,
}

/// Run a parsed command, writing results to `out`
///
/// Returns `Ok(false)` when at least one path failed to resolve.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<bool> {
    match cli.command {
        Command::Resolve(args) => resolve(args, out),
        Command::Check(args) => check(args, out),
    }
}

fn resolve(args: ResolveArgs, out: &mut impl Write) -> Result<bool> {
    let catalog = load_catalog(&args.schema)?;

    let aliases = match &args.aliases {
        Some(path) => load_document::<AliasMap>(path).context("Failed to load alias map")?,
        None => AliasMap::new(),
    };

    let config = match &args.config {
        Some(path) => {
            load_document::<ResolutionConfig>(path).context("Failed to load configuration")?
        }
        None => ResolutionConfig::default(),
    };
    config.validate()?;
    debug!(?config, "Using resolution config");

    let validator = PathValidator::new(ColumnPathResolver::with_config(catalog, config));
    let report = validator.validate_strs(
        &args.collection,
        &aliases,
        args.paths.iter().map(String::as_str),
    );

    for (path, outcome) in &report.entries {
        let line = match outcome {
            Ok(column) => json!({
                "path": path,
                "columnPath": column.column_path,
                "targetCollection": column.target_collection,
            }),
            Err(issue) => json!({
                "path": path,
                "error": { "code": issue.code, "message": issue.message },
            }),
        };
        writeln!(out, "{}", line)?;
    }

    info!(
        resolved = report.resolved().count(),
        failed = report.issues().count(),
        "Resolution finished"
    );
    Ok(report.is_valid())
}

fn check(args: CheckArgs, out: &mut impl Write) -> Result<bool> {
    let catalog = load_catalog(&args.schema)?;

    for relation in catalog.relations() {
        let owning = RelationInfo::owning(relation);
        writeln!(
            out,
            "{}.{}\t{}\t{}",
            relation.collection,
            relation.field,
            owning.kind,
            target_label(&owning)
        )?;

        if let (Some(related), Some(one_field)) =
            (relation.related_collection.as_deref(), relation.one_field())
        {
            let reverse = RelationInfo::reverse(relation);
            writeln!(
                out,
                "{}.{}\t{}\t{}",
                related,
                one_field,
                reverse.kind,
                target_label(&reverse)
            )?;
        }
    }

    info!(relations = catalog.len(), "Schema is valid");
    Ok(true)
}

fn target_label(info: &RelationInfo<'_>) -> String {
    match info.next_collection() {
        Some(collection) => collection.to_string(),
        None => format!("any of [{}]", info.relation.allowed_collections().join(", ")),
    }
}

fn load_catalog(path: &Path) -> Result<StaticCatalog> {
    let catalog = StaticCatalog::from_file(path)
        .with_context(|| format!("Failed to load schema from {}", path.display()))?;
    info!(relations = catalog.len(), "Loaded relation catalog");
    Ok(catalog)
}

/// Read a JSON or YAML document; YAML parsing accepts both
fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(value)
}
