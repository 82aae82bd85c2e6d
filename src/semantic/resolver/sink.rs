//! Result sink capability: where accepted matches go.

use crate::semantic::symbol_table::{Field, FieldKind, ScopeId};

/// Receives accepted `(enclosing, declaring, field, kind)` tuples.
///
/// The return value is the "continue searching" signal: `false` ends the
/// walk after this delivery, `true` lets it look for further matches in
/// the remaining fallback scopes.
pub trait ResolveSink {
    fn accept(
        &mut self,
        enclosing: Option<ScopeId>,
        declaring: ScopeId,
        field: &Field,
        kind: FieldKind,
    ) -> bool;
}

/// One accepted match, detached from the walk that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRef {
    pub enclosing: Option<ScopeId>,
    pub declaring: ScopeId,
    pub field: Field,
    pub kind: FieldKind,
}

/// Accumulates every delivered match.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub matches: Vec<ResolvedRef>,
}

impl ResolveSink for CollectSink {
    fn accept(
        &mut self,
        enclosing: Option<ScopeId>,
        declaring: ScopeId,
        field: &Field,
        kind: FieldKind,
    ) -> bool {
        self.matches.push(ResolvedRef {
            enclosing,
            declaring,
            field: field.clone(),
            kind,
        });
        true
    }
}

/// Keeps the first delivered match and stops the walk.
#[derive(Debug, Default)]
pub struct FirstMatchSink {
    pub found: Option<ResolvedRef>,
}

impl ResolveSink for FirstMatchSink {
    fn accept(
        &mut self,
        enclosing: Option<ScopeId>,
        declaring: ScopeId,
        field: &Field,
        kind: FieldKind,
    ) -> bool {
        if self.found.is_none() {
            self.found = Some(ResolvedRef {
                enclosing,
                declaring,
                field: field.clone(),
                kind,
            });
        }
        false
    }
}
