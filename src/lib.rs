//! # delphic-base
//!
//! Core library for Object Pascal qualified-name resolution and semantic
//! analysis.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! semantic  → declaration store + the resolution engine
//!   ↓
//! syntax    → expression AST consumed by the resolver
//!   ↓
//! base      → primitives (Position, Span, FxIndexMap)
//! ```
//!
//! The crate answers one question: given an expression like
//! `List[I].Free` or `(Sender as TButton).Caption` and a populated
//! declaration store, which declaration does each dotted name refer to?
//! Parsing, indexing and everything else an IDE needs around that
//! question live elsewhere.

// ============================================================================
// MODULES (dependency order: base → syntax → semantic)
// ============================================================================

/// Foundation types: Position, Span, FxIndexMap
pub mod base;

/// Syntax: expression AST, identifier segments, arena handles
pub mod syntax;

/// Semantic analysis: scopes, fields, the resolution engine
pub mod semantic;

// Re-export foundation types
pub use base::{Position, Span};
