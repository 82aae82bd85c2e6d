//! Identifier segments and dotted names as they appear in source.

use smol_str::SmolStr;

use crate::base::Span;

/// Handle of a [`QualifiedIdent`] in the expression arena.
///
/// Also serves as the identity token for "is this the dotted name the
/// resolve call originally asked about" checks: two reference expressions
/// share an `IdentId` only when they wrap the very same source name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentId(pub u32);

impl IdentId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One segment of a dotted name, e.g. `B` in `A.B.C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: SmolStr,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Segment with no source location, for names that come from
    /// declarations rather than from an expression (e.g. a declared type
    /// reference on a field).
    pub fn synthetic(name: impl Into<SmolStr>) -> Self {
        Self::new(name, Span::default())
    }
}

/// A full dotted name `A.B.C` as written in source, read-only once built.
#[derive(Debug, Clone)]
pub struct QualifiedIdent {
    parts: Vec<Identifier>,
}

impl QualifiedIdent {
    pub fn new(parts: Vec<Identifier>) -> Self {
        Self { parts }
    }

    /// Build from a dotted string, with every segment sharing `span`.
    pub fn from_dotted(name: &str, span: Span) -> Self {
        Self {
            parts: name
                .split('.')
                .filter(|part| !part.is_empty())
                .map(|part| Identifier::new(part, span))
                .collect(),
        }
    }

    pub fn parts(&self) -> &[Identifier] {
        &self.parts
    }

    /// The final segment, the one a reference to this name denotes.
    pub fn name_part(&self) -> Option<&Identifier> {
        self.parts.last()
    }

    pub fn span(&self) -> Span {
        let mut iter = self.parts.iter();
        match iter.next() {
            Some(first) => iter.fold(first.span, |acc, part| acc.cover(part.span)),
            None => Span::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_dotted_splits_segments() {
        let qi = QualifiedIdent::from_dotted("System.Classes.TList", Span::default());
        let names: Vec<&str> = qi.parts().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["System", "Classes", "TList"]);
        assert_eq!(qi.name_part().map(|p| p.name.as_str()), Some("TList"));
    }

    #[test]
    fn span_covers_all_segments() {
        let qi = QualifiedIdent::new(vec![
            Identifier::new("A", Span::from_coords(2, 0, 2, 1)),
            Identifier::new("B", Span::from_coords(2, 2, 2, 3)),
        ]);
        assert_eq!(qi.span(), Span::from_coords(2, 0, 2, 3));
    }
}
