//! # Semantic Analysis
//!
//! This module provides the declaration store and the qualified-name
//! resolution engine over it. The store is populated by an external
//! indexer; resolution reads it through shared references only, so
//! independent resolves over one store may run concurrently.

pub mod error;
pub mod resolver;
pub mod symbol_table;

pub use error::{SemanticError, SemanticResult};
pub use resolver::{
    CollectSink, ExpressionResolver, FirstMatchSink, NameCursor, ResolveContext, ResolveHooks,
    ResolveSink, ResolvedRef, ScopeWalk, resolve_expression, resolve_first,
};
pub use symbol_table::{Field, FieldId, FieldKind, FieldKindSet, Scope, ScopeId, SymbolTable, Visibility};
