//! Arena storage for scopes and fields.
//!
//! The table is a pure data structure: population happens up front (by an
//! indexer or by tests), resolution reads it through `&self` only. All
//! cross-references are plain handles, so cyclic scope/field graphs are
//! representable without lifetime hazards.

use smol_str::SmolStr;

use crate::semantic::error::{SemanticError, SemanticResult};

use super::field::{Field, FieldId, FieldKind, Visibility};
use super::scope::{Scope, ScopeId};

pub struct SymbolTable {
    scopes: Vec<Scope>,
    fields: Vec<Field>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: Vec::new(),
            fields: Vec::new(),
        }
    }

    // ============================================================
    // Population
    // ============================================================

    pub fn add_scope(&mut self, name: impl Into<SmolStr>, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId::new(self.scopes.len());
        self.scopes.push(Scope::new(name, parent));
        id
    }

    /// Register a field in its owner scope.
    ///
    /// Same-name declarations are legal when the kinds differ or when both
    /// are routines (overloads); an exact duplicate is a population error.
    pub fn add_field(&mut self, field: Field) -> SemanticResult<FieldId> {
        let owner = field.owner;
        if owner.index() >= self.scopes.len() {
            return Err(SemanticError::UnknownScope(owner));
        }

        let key: SmolStr = field.name.to_ascii_lowercase().into();
        if field.kind != FieldKind::Routine {
            let clash = self.scopes[owner.index()].members.get(&key).is_some_and(|bucket| {
                bucket.iter().any(|&existing| {
                    self.fields
                        .get(existing.index())
                        .is_some_and(|f| f.kind == field.kind)
                })
            });
            if clash {
                return Err(SemanticError::DuplicateField {
                    name: field.name.clone(),
                    scope: self.scopes[owner.index()].name.clone(),
                });
            }
        }

        let id = FieldId::new(self.fields.len());
        self.fields.push(field);
        self.scopes[owner.index()]
            .members
            .entry(key)
            .or_default()
            .push(id);
        Ok(id)
    }

    /// The synthetic `default` pseudo-constant for a bare type reference
    /// used as its own value. Never stored; materialized per delivery.
    pub fn synthesize_default_constant(&self, scope: ScopeId) -> Field {
        Field {
            name: SmolStr::new_static("default"),
            kind: FieldKind::Constant,
            owner: scope,
            visibility: Visibility::Public,
            is_constructor: false,
            parameter_count: None,
            type_ref: None,
            denoted_scope: None,
            is_default_property: false,
        }
    }

    // ============================================================
    // Read access (what the resolver consumes)
    // ============================================================

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.index())
    }

    pub fn scope_parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.scopes.get(id.index())?.parent
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Case-insensitive lookup of a field by name within one scope.
    /// When several fields share the name, the first declared one wins.
    pub fn field_in_scope(&self, scope: ScopeId, name: &str) -> Option<FieldId> {
        let scope = self.scopes.get(scope.index())?;
        let key: SmolStr = name.to_ascii_lowercase().into();
        scope.members.get(&key)?.first().copied()
    }

    /// All fields of a scope in declaration order, for overload scans.
    pub fn all_fields(&self, scope: ScopeId) -> impl Iterator<Item = (FieldId, &Field)> {
        self.scopes
            .get(scope.index())
            .into_iter()
            .flat_map(|s| s.members.values())
            .flatten()
            .filter_map(|&id| self.fields.get(id.index()).map(|f| (id, f)))
    }

    /// The default array property of a structured type's scope, if any.
    pub fn default_property(&self, scope: ScopeId) -> Option<(FieldId, &Field)> {
        self.all_fields(scope)
            .find(|(_, f)| f.kind == FieldKind::Property && f.is_default_property)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
