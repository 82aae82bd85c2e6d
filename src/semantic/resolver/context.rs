//! Description of a single resolution attempt.

use std::sync::Arc;

use crate::semantic::symbol_table::{FieldKindSet, ScopeId, Visibility};

/// Immutable value describing one resolution attempt: where to start,
/// what declaration kinds may match, whether enclosing scopes take part,
/// and which unit namespaces are visible.
///
/// Contexts are copied by value when a nested resolution is derived (e.g.
/// resolving a cast target independently of the outer chain); the
/// namespace list is shared between copies and never mutated.
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// Candidate starting scope; `None` resolves nothing.
    pub scope: Option<ScopeId>,
    /// Kinds a match at the target segment may have.
    pub allowed_kinds: FieldKindSet,
    /// Walk enclosing (parent) scopes outward when the start scope misses.
    pub search_enclosing: bool,
    /// Minimum visibility a match must have; `None` admits everything.
    pub visibility: Option<Visibility>,
    /// Unit namespaces searched last, in declaration order.
    pub unit_namespaces: Arc<[ScopeId]>,
}

impl ResolveContext {
    pub fn new(scope: Option<ScopeId>, allowed_kinds: FieldKindSet, search_enclosing: bool) -> Self {
        Self {
            scope,
            allowed_kinds,
            search_enclosing,
            visibility: None,
            unit_namespaces: Vec::new().into(),
        }
    }

    pub fn with_scope(&self, scope: Option<ScopeId>) -> Self {
        Self {
            scope,
            ..self.clone()
        }
    }

    pub fn with_kinds(&self, allowed_kinds: FieldKindSet) -> Self {
        Self {
            allowed_kinds,
            ..self.clone()
        }
    }

    pub fn with_namespaces(mut self, unit_namespaces: Arc<[ScopeId]>) -> Self {
        self.unit_namespaces = unit_namespaces;
        self
    }

    pub fn with_visibility(mut self, visibility: Option<Visibility>) -> Self {
        self.visibility = visibility;
        self
    }

    /// Does a field of visibility `v` pass this context's filter?
    pub(crate) fn admits(&self, v: Visibility) -> bool {
        self.visibility.is_none_or(|min| v >= min)
    }
}
