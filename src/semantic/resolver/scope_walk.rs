//! The scope-walk driver: resolves one name cursor against one context.
//!
//! The driver visits candidate scopes segment by segment and leaves the
//! per-scope and per-field policy to a [`ResolveHooks`] strategy supplied
//! by the call site. Search order per segment is fixed: the current scope,
//! then enclosing scopes outward (when the context allows), then unit
//! namespaces in declaration order; the first match wins.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{trace, warn};

use crate::semantic::symbol_table::{
    Field, FieldId, FieldKind, FieldKindSet, ScopeId, SymbolTable,
};

use super::context::ResolveContext;
use super::cursor::NameCursor;

// Depth counter guarding against runaway declared-type chains
// (`var a: b.T` / `var b: a.T` style models).
static TYPE_DEPTH: AtomicUsize = AtomicUsize::new(0);
const MAX_TYPE_DEPTH: usize = 128;

/// A field delivered during a walk: a declaration from the table, or the
/// `default` pseudo-constant materialized for a bare type reference.
#[derive(Debug, Clone, Copy)]
pub enum FieldHit<'t> {
    Declared(FieldId, &'t Field),
    Synthetic(&'t Field),
}

impl<'t> FieldHit<'t> {
    pub fn field(&self) -> &'t Field {
        match *self {
            Self::Declared(_, field) | Self::Synthetic(field) => field,
        }
    }

    pub fn id(&self) -> Option<FieldId> {
        match self {
            Self::Declared(id, _) => Some(*id),
            Self::Synthetic(_) => None,
        }
    }
}

/// Per-call-site customization of the scope walk.
///
/// One strategy value per call site replaces the subclass-per-call-site
/// shape; strategies that need no segment-specific behavior delegate
/// straight to [`ScopeWalk::process_default`].
pub trait ResolveHooks {
    /// Invoked for every candidate scope of the current segment.
    /// Return `false` to end the walk: a field was accepted.
    fn process_scope(&mut self, walk: &mut ScopeWalk<'_, '_>, scope: ScopeId, name: &str) -> bool;

    /// Invoked for a matched field at the target segment. The return
    /// value is the caller's "continue searching" signal.
    fn process_field(
        &mut self,
        walk: &mut ScopeWalk<'_, '_>,
        declaring: ScopeId,
        hit: FieldHit<'_>,
    ) -> bool;
}

/// Drives one [`NameCursor`] through the scope graph.
pub struct ScopeWalk<'a, 'f> {
    table: &'a SymbolTable,
    /// Scope primed by a resolved qualifier expression, if any.
    start: Option<ScopeId>,
    fqn: &'f mut NameCursor,
    context: ResolveContext,
    /// Field matched for the current non-target segment, pending descent.
    matched: Option<(ScopeId, FieldId)>,
    /// Did the previous segment resolve to a TYPE declaration?
    was_type: bool,
}

impl<'a, 'f> ScopeWalk<'a, 'f> {
    pub fn new(
        table: &'a SymbolTable,
        start: Option<ScopeId>,
        fqn: &'f mut NameCursor,
        context: ResolveContext,
    ) -> Self {
        Self {
            table,
            start,
            fqn,
            context,
            matched: None,
            was_type: false,
        }
    }

    pub fn table(&self) -> &'a SymbolTable {
        self.table
    }

    pub fn context(&self) -> &ResolveContext {
        &self.context
    }

    pub fn is_target(&self) -> bool {
        self.fqn.is_target()
    }

    pub fn was_type(&self) -> bool {
        self.was_type
    }

    /// Move the cursor past the current segment.
    pub fn advance(&mut self) {
        self.fqn.advance();
    }

    /// Resolve the cursor, invoking `hooks` per candidate scope.
    ///
    /// `from_lexical_scope` selects the starting point: `true` searches
    /// from the context's scope with the full enclosing/namespace
    /// fallback; `false` searches only the scope a qualifier expression
    /// primed (nothing at all when that priming failed).
    ///
    /// Returns `true` when no field was accepted, so the caller's own
    /// fallback may proceed; `false` when a field was accepted and this
    /// cursor is done.
    pub fn resolve(&mut self, hooks: &mut dyn ResolveHooks, from_lexical_scope: bool) -> bool {
        let mut chain: Vec<ScopeId> = if from_lexical_scope {
            self.lexical_chain()
        } else {
            match self.start {
                Some(scope) => vec![scope],
                None => return true,
            }
        };

        while let Some(name) = self.fqn.current_name().cloned() {
            self.matched = None;
            for index in 0..chain.len() {
                let scope = chain[index];
                trace!(
                    "[SCOPE_WALK] segment='{}' scope={:?} target={}",
                    name,
                    scope,
                    self.fqn.is_target()
                );
                if !hooks.process_scope(self, scope, &name) {
                    trace!("[SCOPE_WALK] -> accepted in scope {:?}", scope);
                    return false;
                }
                if self.matched.is_some() {
                    break;
                }
            }

            let Some((declaring, field)) = self.matched.take() else {
                trace!("[SCOPE_WALK] segment='{}' not matched, giving up", name);
                return true;
            };
            self.was_type = self
                .table
                .field(field)
                .is_some_and(|f| f.kind == FieldKind::Type);
            self.fqn.advance();
            match retrieve_scope(self.table, field, &self.context) {
                Some(next) => {
                    trace!(
                        "[SCOPE_WALK] segment='{}' matched in {:?}, descending into {:?}",
                        name, declaring, next
                    );
                    chain = vec![next];
                }
                None => return true,
            }
        }
        true
    }

    /// Default per-scope policy: look the segment up in `scope` alone.
    /// A match at the target segment goes through the field filters and
    /// the `process_field` hook; a match earlier in the chain is recorded
    /// for descent.
    pub fn process_default(
        &mut self,
        hooks: &mut dyn ResolveHooks,
        scope: ScopeId,
        name: &str,
    ) -> bool {
        let table = self.table;
        let Some(field_id) = table.field_in_scope(scope, name) else {
            return true;
        };
        let Some(field) = table.field(field_id) else {
            return true;
        };
        if self.fqn.is_target() {
            if !self.context.allowed_kinds.contains(field.kind) {
                return true;
            }
            if !self.context.admits(field.visibility) {
                return true;
            }
            hooks.process_field(self, scope, FieldHit::Declared(field_id, field))
        } else {
            self.matched = Some((scope, field_id));
            true
        }
    }

    /// Candidate scopes for a segment searched from the lexical scope:
    /// the context scope, enclosing scopes outward, unit namespaces last.
    fn lexical_chain(&self) -> Vec<ScopeId> {
        let mut chain = Vec::new();
        if let Some(start) = self.context.scope {
            chain.push(start);
            if self.context.search_enclosing {
                let mut current = start;
                while let Some(parent) = self.table.scope_parent(current) {
                    chain.push(parent);
                    current = parent;
                }
            }
        }
        chain.extend(self.context.unit_namespaces.iter().copied());
        chain
    }
}

// ============================================================
// Field-to-type-scope resolution
// ============================================================

/// Scope a matched field leads to when the walk continues past it: a unit
/// reference denotes the unit's own scope, anything else continues in the
/// scope of its declared type.
pub fn retrieve_scope(
    table: &SymbolTable,
    field: FieldId,
    context: &ResolveContext,
) -> Option<ScopeId> {
    let f = table.field(field)?;
    if f.kind == FieldKind::Unit {
        return f.denoted_scope;
    }
    retrieve_field_type_scope(table, field, context)
}

/// The field-to-type-scope primitive: the scope a field's declared type
/// denotes, or `None` when the type does not resolve to a scope.
///
/// Types and units carry their denoted scope directly; other fields
/// resolve their declared type reference through a nested walk restricted
/// to type-denoting kinds.
pub fn retrieve_field_type_scope(
    table: &SymbolTable,
    field: FieldId,
    context: &ResolveContext,
) -> Option<ScopeId> {
    let depth = TYPE_DEPTH.fetch_add(1, Ordering::SeqCst);
    let result = if depth >= MAX_TYPE_DEPTH {
        let name = table.field(field).map(|f| f.name.as_str()).unwrap_or("?");
        warn!("[TYPE_SCOPE] depth={} field='{}', giving up", depth, name);
        None
    } else {
        field_type_scope_inner(table, field, context)
    };
    TYPE_DEPTH.fetch_sub(1, Ordering::SeqCst);
    result
}

fn field_type_scope_inner(
    table: &SymbolTable,
    field: FieldId,
    context: &ResolveContext,
) -> Option<ScopeId> {
    let f = table.field(field)?;
    if let Some(denoted) = f.denoted_scope {
        return Some(denoted);
    }
    let type_ref = f.type_ref.clone()?;
    let (_, type_field) =
        resolve_type_filtered(table, f.owner, &type_ref, context, FieldKindSet::TYPES)?;
    table.field(type_field)?.denoted_scope
}

/// Resolve a (possibly dotted) type name from `scope`, returning the
/// declaring scope and the matched field.
pub(crate) fn resolve_type(
    table: &SymbolTable,
    scope: ScopeId,
    type_name: &str,
    context: &ResolveContext,
) -> Option<(ScopeId, FieldId)> {
    resolve_type_filtered(table, scope, type_name, context, FieldKindSet::ALL)
}

fn resolve_type_filtered(
    table: &SymbolTable,
    scope: ScopeId,
    type_name: &str,
    context: &ResolveContext,
    kinds: FieldKindSet,
) -> Option<(ScopeId, FieldId)> {
    let mut cursor = NameCursor::from_name(type_name);
    if cursor.is_empty() {
        return None;
    }
    let nested = ResolveContext::new(Some(scope), kinds, true)
        .with_namespaces(context.unit_namespaces.clone());
    let mut hooks = TypeRefCapture { found: None };
    let mut walk = ScopeWalk::new(table, None, &mut cursor, nested);
    walk.resolve(&mut hooks, true);
    hooks.found
}

/// Captures the first field a nested type-reference walk accepts.
struct TypeRefCapture {
    found: Option<(ScopeId, FieldId)>,
}

impl ResolveHooks for TypeRefCapture {
    fn process_scope(&mut self, walk: &mut ScopeWalk<'_, '_>, scope: ScopeId, name: &str) -> bool {
        walk.process_default(self, scope, name)
    }

    fn process_field(
        &mut self,
        _walk: &mut ScopeWalk<'_, '_>,
        declaring: ScopeId,
        hit: FieldHit<'_>,
    ) -> bool {
        if let FieldHit::Declared(id, _) = hit {
            self.found = Some((declaring, id));
        }
        false
    }
}
