//! The qualified-name resolution engine.
//!
//! Given a chain of dotted/indexed/called sub-expressions, the engine
//! determines which declaration each name segment refers to, navigating
//! nested lexical scopes, type scopes reached through field types, unit
//! namespaces, `as` casts, default array properties and routine overloads
//! selected by argument count.
//!
//! Layering:
//!
//! - [`NameCursor`] - position inside one dotted name
//! - [`ResolveContext`] - one resolution attempt's parameters
//! - [`ScopeWalk`] - drives a cursor through candidate scopes, with
//!   per-call-site [`ResolveHooks`] strategies
//! - [`ExpressionResolver`] - recursive descent over the expression tree
//! - [`ResolveSink`] - caller-supplied destination for accepted matches

mod context;
mod cursor;
mod expression;
mod scope_walk;
mod sink;

pub use context::ResolveContext;
pub use cursor::NameCursor;
pub use expression::{ExpressionResolver, resolve_expression, resolve_first};
pub use scope_walk::{
    FieldHit, ResolveHooks, ScopeWalk, retrieve_field_type_scope, retrieve_scope,
};
pub use sink::{CollectSink, FirstMatchSink, ResolveSink, ResolvedRef};
