//! Foundation types for the Delphic toolchain.
//!
//! This module provides fundamental types used throughout the analyzer:
//! - [`Position`], [`Span`] - Line/column positions for AST nodes
//! - [`FxIndexMap`] - Insertion-ordered map with the FxHash hasher
//!
//! This module has NO dependencies on other delphic modules.

mod position;

pub use position::{Position, Span};

/// Insertion-ordered hash map using the fast non-cryptographic FxHash.
pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
