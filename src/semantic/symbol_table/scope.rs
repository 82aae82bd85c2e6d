//! A lexical or structural scope: a named container of fields.

use smol_str::SmolStr;

use crate::base::FxIndexMap;

use super::field::FieldId;

/// Unique identifier for a scope in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named container of fields. Scopes relate to each other only through
/// fields whose declared type denotes another scope; the resulting lookup
/// graph may contain cycles, which is fine because every walk is bounded
/// by the segment count of the name being resolved.
#[derive(Debug)]
pub struct Scope {
    pub name: SmolStr,
    /// Enclosing lexical scope, walked outward by the fallback search.
    pub parent: Option<ScopeId>,
    /// Members keyed by lowercased name, in declaration order; one name
    /// maps to several fields only for routine overloads and the
    /// name-sharing cases the call fallback depends on.
    pub(super) members: FxIndexMap<SmolStr, Vec<FieldId>>,
}

impl Scope {
    pub fn new(name: impl Into<SmolStr>, parent: Option<ScopeId>) -> Self {
        Self {
            name: name.into(),
            parent,
            members: FxIndexMap::default(),
        }
    }

    /// Number of fields declared in this scope.
    pub fn len(&self) -> usize {
        self.members.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
