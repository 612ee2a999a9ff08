// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for colpath
//!
//! This crate provides common testing components including:
//! - A mock relation catalog that records lookups
//! - Resolution-specific assertions
//! - Sample schemas and alias maps

pub mod assertions;
pub mod fixtures;
pub mod mock_catalog;

// Re-exports for convenience
pub use assertions::ResolveAssertions;
pub use fixtures::RelationFixtures;
pub use mock_catalog::{MockCatalog, MockCatalogBuilder};
