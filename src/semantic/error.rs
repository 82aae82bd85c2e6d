//! Error types for the semantic layer.
//!
//! An unresolved reference is NOT an error: source under analysis is
//! routinely incomplete, so lookups simply return `None` and walks report
//! nothing. Errors are reserved for contract violations between the
//! engine and the code that populates the declaration store.

use smol_str::SmolStr;
use thiserror::Error;

use super::symbol_table::ScopeId;

/// Errors raised while building or addressing the declaration store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// A field with this name and kind already exists in the scope.
    /// Routines are exempt: overloads share a name by design.
    #[error("field '{name}' already defined in scope '{scope}'")]
    DuplicateField { name: SmolStr, scope: SmolStr },

    /// A scope handle does not address any scope in the arena.
    #[error("unknown scope handle {0:?}")]
    UnknownScope(ScopeId),
}

pub type SemanticResult<T> = Result<T, SemanticError>;
