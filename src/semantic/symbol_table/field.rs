//! Declarations (fields) owned by scopes.

use smol_str::SmolStr;

use super::ScopeId;

/// Unique identifier for a field in the arena.
/// Uses u32 for compact storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(pub u32);

impl FieldId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a declaration declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Variable,
    Routine,
    Type,
    Constant,
    Property,
    Unit,
}

impl FieldKind {
    const COUNT: u8 = 6;

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Small set of [`FieldKind`]s, used to restrict what a resolution attempt
/// may match at its target segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKindSet(u8);

impl FieldKindSet {
    pub const EMPTY: Self = Self(0);
    /// Every declaration kind.
    pub const ALL: Self = Self((1 << FieldKind::COUNT) - 1);
    /// Kinds that denote a scope by themselves: types and units.
    pub const TYPES: Self = Self(FieldKind::Type.bit() | FieldKind::Unit.bit());
    /// Routines only, for callee searches.
    pub const ROUTINES: Self = Self(FieldKind::Routine.bit());

    pub fn of(kinds: &[FieldKind]) -> Self {
        let mut set = Self::EMPTY;
        for &kind in kinds {
            set.0 |= kind.bit();
        }
        set
    }

    pub fn contains(self, kind: FieldKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Member visibility, ordered from most to least restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Visibility {
    Private,
    Protected,
    Public,
}

/// A single declaration: variable, routine, type, constant, property or
/// imported unit. Created once when its scope is populated and immutable
/// afterwards; the engine itself only ever materializes the synthetic
/// `default` pseudo-constant for a bare type used as its own value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: SmolStr,
    pub kind: FieldKind,
    /// Scope this field is declared in (non-owning handle).
    pub owner: ScopeId,
    pub visibility: Visibility,
    pub is_constructor: bool,
    /// Formal parameter count; `Some` for routines only.
    pub parameter_count: Option<usize>,
    /// Declared type as a (possibly dotted) name, resolved lazily when the
    /// walk needs to continue past this field.
    pub type_ref: Option<SmolStr>,
    /// For types and units: the scope this declaration itself denotes.
    pub denoted_scope: Option<ScopeId>,
    /// Marks the default array property of a structured type.
    pub is_default_property: bool,
}

impl Field {
    pub fn new(name: impl Into<SmolStr>, kind: FieldKind, owner: ScopeId) -> Self {
        Self {
            name: name.into(),
            kind,
            owner,
            visibility: Visibility::Public,
            is_constructor: false,
            parameter_count: None,
            type_ref: None,
            denoted_scope: None,
            is_default_property: false,
        }
    }

    pub fn variable(name: impl Into<SmolStr>, owner: ScopeId, type_ref: impl Into<SmolStr>) -> Self {
        Self::new(name, FieldKind::Variable, owner).with_type_ref(type_ref)
    }

    pub fn constant(name: impl Into<SmolStr>, owner: ScopeId) -> Self {
        Self::new(name, FieldKind::Constant, owner)
    }

    pub fn routine(name: impl Into<SmolStr>, owner: ScopeId, parameter_count: usize) -> Self {
        let mut field = Self::new(name, FieldKind::Routine, owner);
        field.parameter_count = Some(parameter_count);
        field
    }

    /// A type declaration denoting `members` as its structure scope.
    pub fn type_decl(name: impl Into<SmolStr>, owner: ScopeId, members: ScopeId) -> Self {
        let mut field = Self::new(name, FieldKind::Type, owner);
        field.denoted_scope = Some(members);
        field
    }

    /// A unit reference denoting the unit's own interface scope.
    pub fn unit(name: impl Into<SmolStr>, owner: ScopeId, unit_scope: ScopeId) -> Self {
        let mut field = Self::new(name, FieldKind::Unit, owner);
        field.denoted_scope = Some(unit_scope);
        field
    }

    pub fn property(name: impl Into<SmolStr>, owner: ScopeId, type_ref: impl Into<SmolStr>) -> Self {
        Self::new(name, FieldKind::Property, owner).with_type_ref(type_ref)
    }

    pub fn with_type_ref(mut self, type_ref: impl Into<SmolStr>) -> Self {
        self.type_ref = Some(type_ref.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn as_constructor(mut self) -> Self {
        self.is_constructor = true;
        self
    }

    pub fn as_default_property(mut self) -> Self {
        self.is_default_property = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_set_membership() {
        let set = FieldKindSet::of(&[FieldKind::Type, FieldKind::Unit]);
        assert_eq!(set, FieldKindSet::TYPES);
        assert!(set.contains(FieldKind::Type));
        assert!(!set.contains(FieldKind::Variable));
        assert!(FieldKindSet::ALL.contains(FieldKind::Property));
        assert!(FieldKindSet::EMPTY.is_empty());
    }

    #[test]
    fn visibility_orders_private_lowest() {
        assert!(Visibility::Private < Visibility::Protected);
        assert!(Visibility::Protected < Visibility::Public);
    }
}
