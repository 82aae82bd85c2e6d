//! Declaration store: scopes and the fields they own.
//!
//! The table is populated once by an external indexer and read by the
//! resolver; it never changes during a resolve call.

mod field;
mod scope;
mod table;

pub use field::{Field, FieldId, FieldKind, FieldKindSet, Visibility};
pub use scope::{Scope, ScopeId};
pub use table::SymbolTable;

#[cfg(test)]
mod tests;
