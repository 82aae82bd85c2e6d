//! Cursor over the segments of one dotted name during a resolve pass.

use smol_str::SmolStr;

use crate::syntax::{ExprArena, IdentId, Identifier};

/// A mutable position inside one qualified name.
///
/// Built once per resolve invocation and discarded with it; the index only
/// ever moves forward, a segment is never revisited within one pass.
#[derive(Debug)]
pub struct NameCursor {
    /// Identity of the source name in the expression arena; `None` for
    /// synthetic names such as declared type references.
    source: Option<IdentId>,
    parts: Vec<Identifier>,
    index: usize,
}

impl NameCursor {
    /// Cursor over a dotted name from the expression arena.
    /// A dangling handle yields an empty cursor, which resolves to nothing.
    pub fn from_ident(arena: &ExprArena, ident: IdentId) -> Self {
        let parts = arena
            .ident(ident)
            .map(|qi| qi.parts().to_vec())
            .unwrap_or_default();
        Self {
            source: Some(ident),
            parts,
            index: 0,
        }
    }

    /// Cursor over a dotted name that never appeared in an expression,
    /// e.g. the declared type reference of a field.
    pub fn from_name(name: &str) -> Self {
        Self {
            source: None,
            parts: name
                .split('.')
                .filter(|part| !part.is_empty())
                .map(Identifier::synthetic)
                .collect(),
            index: 0,
        }
    }

    /// Identity token for "is this the name the resolve call started from".
    pub fn source_ident(&self) -> Option<IdentId> {
        self.source
    }

    pub fn current(&self) -> Option<&Identifier> {
        self.parts.get(self.index)
    }

    pub fn current_name(&self) -> Option<&SmolStr> {
        self.current().map(|part| &part.name)
    }

    /// Is the current segment the final one the caller asked about?
    pub fn is_target(&self) -> bool {
        !self.parts.is_empty() && self.index + 1 == self.parts.len()
    }

    /// Move to the next segment; saturates once past the last one, so
    /// callers check [`Self::is_target`] before deciding whether to move.
    pub fn advance(&mut self) {
        if self.index < self.parts.len() {
            self.index += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
