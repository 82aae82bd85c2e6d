//! Expression walker: recursive descent over the expression tree,
//! threading the current-scope slot through dotted references, pointer
//! dereferences, indexing, `as` casts and calls.

use tracing::trace;

use crate::semantic::symbol_table::{FieldId, FieldKind, ScopeId, SymbolTable};
use crate::syntax::{Expr, ExprArena, ExprId, IdentId, Operation};

use super::context::ResolveContext;
use super::cursor::NameCursor;
use super::scope_walk::{
    FieldHit, ResolveHooks, ScopeWalk, resolve_type, retrieve_scope,
};
use super::sink::{FirstMatchSink, ResolveSink, ResolvedRef};

/// Resolve the dotted name `target` inside the expression `root`,
/// reporting every accepted declaration to `sink`.
///
/// Returns `false` once the sink accepted a match and asked to stop,
/// `true` otherwise; an unresolved reference is a normal `true` outcome
/// with nothing reported.
pub fn resolve_expression(
    table: &SymbolTable,
    arena: &ExprArena,
    root: ExprId,
    target: IdentId,
    context: ResolveContext,
    sink: &mut dyn ResolveSink,
) -> bool {
    ExpressionResolver::new(table, arena, target, context, sink).walk(root, true)
}

/// Convenience wrapper returning the first accepted match, if any.
pub fn resolve_first(
    table: &SymbolTable,
    arena: &ExprArena,
    root: ExprId,
    target: IdentId,
    context: ResolveContext,
) -> Option<ResolvedRef> {
    let mut sink = FirstMatchSink::default();
    resolve_expression(table, arena, root, target, context, &mut sink);
    sink.found
}

/// Recursive-descent driver over the expression tree.
///
/// Holds the single mutable current-scope slot for the duration of one
/// top-level resolve: the scope implied by everything resolved so far, or
/// `None` once some step failed to produce one.
pub struct ExpressionResolver<'a, 's> {
    table: &'a SymbolTable,
    arena: &'a ExprArena,
    /// Cursor over the name the caller originally asked about.
    fqn: NameCursor,
    context: ResolveContext,
    sink: &'s mut dyn ResolveSink,
    current_scope: Option<ScopeId>,
}

impl<'a, 's> ExpressionResolver<'a, 's> {
    pub fn new(
        table: &'a SymbolTable,
        arena: &'a ExprArena,
        target: IdentId,
        context: ResolveContext,
        sink: &'s mut dyn ResolveSink,
    ) -> Self {
        Self {
            table,
            arena,
            fqn: NameCursor::from_ident(arena, target),
            context,
            sink,
            current_scope: None,
        }
    }

    /// Walk `expr`, `last_part` marking the branch holding the target.
    ///
    /// Returns `false` once the sink accepted a match and asked to stop.
    pub fn walk(&mut self, expr: ExprId, last_part: bool) -> bool {
        let arena = self.arena;
        let Some(node) = arena.expr(expr) else {
            return true;
        };
        match node {
            Expr::Reference { qualifier, ident } => {
                let (qualifier, ident) = (*qualifier, *ident);
                // leftmost/innermost first: the qualifier decides the
                // scope this reference is looked up in
                if let Some(qualifier) = qualifier {
                    if !self.walk(qualifier, false) {
                        return false;
                    }
                }
                self.execute(ident, qualifier.is_none())
            }
            // indirection is transparent: the pointed-to type's scope is
            // already what the operand resolves to
            Expr::Dereference { operand } => self.walk(*operand, last_part),
            Expr::Index { array, .. } => self.handle_index(*array, last_part),
            Expr::Binary {
                op: Operation::As,
                operands,
            } => {
                let lhs = operands.first().copied();
                let rhs = operands.get(1).copied();
                // names inside the cast operand still report, but the
                // cast target alone decides the resulting scope
                if let Some(lhs) = lhs {
                    if !self.walk(lhs, false) {
                        return false;
                    }
                }
                match rhs {
                    Some(rhs) => self.walk(rhs, false),
                    None => true,
                }
            }
            Expr::Call { .. } => self.handle_call(expr, last_part),
            other => match other.first_meaningful_child() {
                Some(child) => self.walk(child, last_part),
                None => true,
            },
        }
    }

    /// Resolve one reference node's dotted name.
    fn execute(&mut self, ident: IdentId, from_lexical_scope: bool) -> bool {
        let start = self.current_scope;
        if self.fqn.source_ident() != Some(ident) {
            // Not the name which originally requested resolution: a
            // nested qualifier only needs to determine a scope.
            trace!("[EXPR_RESOLVE] nested reference, priming scope from {start:?}");
            let mut cursor = NameCursor::from_ident(self.arena, ident);
            let mut hooks = ScopePrimer {
                slot: &mut self.current_scope,
            };
            let mut walk = ScopeWalk::new(self.table, start, &mut cursor, self.context.clone());
            walk.resolve(&mut hooks, from_lexical_scope);
            true
        } else {
            trace!("[EXPR_RESOLVE] target reference, reporting from {start:?}");
            let mut hooks = TargetReporter {
                sink: &mut *self.sink,
            };
            let mut walk = ScopeWalk::new(self.table, start, &mut self.fqn, self.context.clone());
            walk.resolve(&mut hooks, from_lexical_scope)
        }
    }

    /// Indexing continues in the element type of the scope's default
    /// array property; without one the chain is unresolved.
    fn handle_index(&mut self, array: ExprId, last_part: bool) -> bool {
        let result = self.walk(array, last_part);
        if !result {
            return false;
        }
        self.current_scope = self.current_scope.and_then(|scope| {
            let (_, property) = self.table.default_property(scope)?;
            let type_ref = property.type_ref.clone()?;
            let (_, element_type) = resolve_type(self.table, scope, &type_ref, &self.context)?;
            retrieve_scope(self.table, element_type, &self.context)
        });
        result
    }

    /// Calls select among same-named routines by exact argument count,
    /// remembering the first by-name match of any kind as a fallback.
    fn handle_call(&mut self, call: ExprId, last_part: bool) -> bool {
        let arena = self.arena;
        let Some(Expr::Call { callee, arguments }) = arena.expr(call) else {
            return true;
        };
        let (callee, argc) = (*callee, arguments.len());
        // only calls through an explicitly named routine are resolvable
        let Some(Expr::Reference { qualifier, ident }) = arena.expr(callee) else {
            return true;
        };
        let (qualifier, ident) = (*qualifier, *ident);
        if let Some(qualifier) = qualifier {
            if !self.walk(qualifier, false) {
                return false;
            }
        }

        let start = self.current_scope;
        let mut cursor = NameCursor::from_ident(arena, ident);
        let mut hooks = CallResolver {
            sink: &mut *self.sink,
            slot: &mut self.current_scope,
            argc,
            last_part,
            exact_match: false,
            sink_stopped: false,
            fallback: None,
        };
        let mut walk = ScopeWalk::new(self.table, start, &mut cursor, self.context.clone());
        let unresolved = walk.resolve(&mut hooks, qualifier.is_none());
        let CallResolver {
            exact_match,
            sink_stopped,
            fallback,
            ..
        } = hooks;

        if sink_stopped {
            return false;
        }
        if unresolved && !exact_match {
            // no arity-exact candidate anywhere: use the first field that
            // matched by name alone, exactly as if it had matched (covers
            // procedural variables and parameterless properties called
            // with parentheses)
            if let Some((declaring, field_id)) = fallback {
                if let Some(field) = self.table.field(field_id) {
                    trace!(
                        "[EXPR_RESOLVE] call fallback to '{}' in {:?}",
                        field.name, declaring
                    );
                    if last_part {
                        return self
                            .sink
                            .accept(self.current_scope, declaring, field, field.kind);
                    }
                    self.current_scope = retrieve_scope(self.table, field_id, &self.context);
                }
            }
        }
        true
    }
}

// ============================================================
// Per-call-site walk strategies
// ============================================================

/// Nested-qualifier strategy: update the current-scope slot with the
/// resolved field's type scope and stop; never reports to the sink.
struct ScopePrimer<'w> {
    slot: &'w mut Option<ScopeId>,
}

impl ResolveHooks for ScopePrimer<'_> {
    fn process_scope(&mut self, walk: &mut ScopeWalk<'_, '_>, scope: ScopeId, name: &str) -> bool {
        walk.process_default(self, scope, name)
    }

    fn process_field(
        &mut self,
        walk: &mut ScopeWalk<'_, '_>,
        _declaring: ScopeId,
        hit: FieldHit<'_>,
    ) -> bool {
        *self.slot = hit
            .id()
            .and_then(|id| retrieve_scope(walk.table(), id, walk.context()));
        false
    }
}

/// Target strategy: deliver accepted fields straight to the sink, with
/// the bare-type `default` pseudo-value special case.
struct TargetReporter<'s> {
    sink: &'s mut dyn ResolveSink,
}

impl ResolveHooks for TargetReporter<'_> {
    fn process_scope(&mut self, walk: &mut ScopeWalk<'_, '_>, scope: ScopeId, name: &str) -> bool {
        let is_default = name.eq_ignore_ascii_case("default");
        if (walk.is_target() || is_default) && walk.was_type() {
            // "default" type pseudo value: a real member shadows it
            let table = walk.table();
            if let Some(id) = table.field_in_scope(scope, name) {
                if let Some(field) = table.field(id) {
                    return self.process_field(walk, scope, FieldHit::Declared(id, field));
                }
            }
            walk.advance();
            if is_default {
                let synth = table.synthesize_default_constant(scope);
                return self.process_field(walk, scope, FieldHit::Synthetic(&synth));
            }
            true
        } else {
            walk.process_default(self, scope, name)
        }
    }

    fn process_field(
        &mut self,
        _walk: &mut ScopeWalk<'_, '_>,
        declaring: ScopeId,
        hit: FieldHit<'_>,
    ) -> bool {
        let field = hit.field();
        self.sink.accept(Some(declaring), declaring, field, field.kind)
    }
}

/// Call strategy: scan the whole candidate scope for a name- and
/// arity-exact routine, remembering the first by-name match of any kind
/// across scope visits as the no-candidate fallback.
struct CallResolver<'s, 'w> {
    sink: &'s mut dyn ResolveSink,
    slot: &'w mut Option<ScopeId>,
    argc: usize,
    last_part: bool,
    exact_match: bool,
    sink_stopped: bool,
    fallback: Option<(ScopeId, FieldId)>,
}

impl ResolveHooks for CallResolver<'_, '_> {
    fn process_scope(&mut self, walk: &mut ScopeWalk<'_, '_>, scope: ScopeId, name: &str) -> bool {
        if !walk.is_target() {
            return walk.process_default(self, scope, name);
        }
        let table = walk.table();
        for (id, field) in table.all_fields(scope) {
            if field.kind != FieldKind::Routine || !field.name.eq_ignore_ascii_case(name) {
                continue;
            }
            if field.parameter_count == Some(self.argc) {
                self.exact_match = true;
                if self.last_part {
                    let go_on = self.sink.accept(Some(scope), scope, field, field.kind);
                    if !go_on {
                        self.sink_stopped = true;
                    }
                    return go_on;
                }
                *self.slot = retrieve_scope(table, id, walk.context());
                return false;
            }
        }
        if self.fallback.is_none() {
            if let Some(id) = table.field_in_scope(scope, name) {
                self.fallback = Some((scope, id));
            }
        }
        true
    }

    fn process_field(
        &mut self,
        _walk: &mut ScopeWalk<'_, '_>,
        _declaring: ScopeId,
        _hit: FieldHit<'_>,
    ) -> bool {
        true
    }
}
