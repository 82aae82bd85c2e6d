#![allow(clippy::unwrap_used)]
use super::super::*;
use crate::semantic::SemanticError;

/// Fields are found by name regardless of spelling case
#[test]
fn test_field_lookup_is_case_insensitive() {
    let mut table = SymbolTable::new();
    let unit = table.add_scope("System", None);
    let id = table.add_field(Field::constant("MaxInt", unit)).unwrap();

    for spelling in ["MaxInt", "MAXINT", "maxint", "mAxInT"] {
        assert_eq!(table.field_in_scope(unit, spelling), Some(id), "{spelling}");
    }
}

/// Routine overloads may share one name in one scope
#[test]
fn test_routine_overloads_share_a_name() {
    let mut table = SymbolTable::new();
    let unit = table.add_scope("System", None);

    let one = table.add_field(Field::routine("Copy", unit, 1)).unwrap();
    let three = table.add_field(Field::routine("Copy", unit, 3)).unwrap();
    assert_ne!(one, three);

    // first declaration wins for the plain by-name lookup
    assert_eq!(table.field_in_scope(unit, "copy"), Some(one));

    let copies: Vec<FieldId> = table
        .all_fields(unit)
        .filter(|(_, f)| f.name.eq_ignore_ascii_case("Copy"))
        .map(|(id, _)| id)
        .collect();
    assert_eq!(copies, vec![one, three]);
}

/// A second non-routine field with the same name and kind is rejected
#[test]
fn test_duplicate_field_is_an_error() {
    let mut table = SymbolTable::new();
    let unit = table.add_scope("System", None);
    table.add_field(Field::constant("Pi", unit)).unwrap();

    let err = table.add_field(Field::constant("PI", unit)).unwrap_err();
    assert!(matches!(err, SemanticError::DuplicateField { .. }));
}

/// Fields of different kinds may coexist under one name
#[test]
fn test_same_name_different_kinds_coexist() {
    let mut table = SymbolTable::new();
    let unit = table.add_scope("System", None);

    let var = table
        .add_field(Field::variable("Notify", unit, "TNotifyProc"))
        .unwrap();
    let routine = table.add_field(Field::routine("Notify", unit, 2)).unwrap();

    assert_eq!(table.field_in_scope(unit, "notify"), Some(var));
    assert_eq!(table.all_fields(unit).count(), 2);
    assert_ne!(var, routine);
}

/// Adding a field to a scope that does not exist is a contract violation
#[test]
fn test_unknown_scope_is_an_error() {
    let mut table = SymbolTable::new();
    let bogus = ScopeId::new(42);
    let err = table.add_field(Field::constant("X", bogus)).unwrap_err();
    assert_eq!(err, SemanticError::UnknownScope(bogus));
}

/// all_fields iterates in declaration order
#[test]
fn test_all_fields_declaration_order() {
    let mut table = SymbolTable::new();
    let unit = table.add_scope("System", None);
    for name in ["First", "Second", "Third"] {
        table.add_field(Field::constant(name, unit)).unwrap();
    }

    let names: Vec<&str> = table
        .all_fields(unit)
        .map(|(_, f)| f.name.as_str())
        .collect();
    assert_eq!(names, ["First", "Second", "Third"]);
}

/// The default array property is discoverable on a type's scope
#[test]
fn test_default_property_discovery() {
    let mut table = SymbolTable::new();
    let unit = table.add_scope("System", None);
    let list = table.add_scope("TList", Some(unit));

    table
        .add_field(Field::property("Count", list, "Integer"))
        .unwrap();
    let items = table
        .add_field(Field::property("Items", list, "TObject").as_default_property())
        .unwrap();

    assert_eq!(table.default_property(list).map(|(id, _)| id), Some(items));
    assert_eq!(table.default_property(unit), None);
}

/// The synthesized pseudo-constant is owned by the requesting scope
#[test]
fn test_synthesize_default_constant() {
    let mut table = SymbolTable::new();
    let unit = table.add_scope("System", None);
    let scope = table.add_scope("TColor", Some(unit));

    let synth = table.synthesize_default_constant(scope);
    assert_eq!(synth.name.as_str(), "default");
    assert_eq!(synth.kind, FieldKind::Constant);
    assert_eq!(synth.owner, scope);
    assert_eq!(synth.visibility, Visibility::Public);
    // never registered in the arena
    assert_eq!(table.field_in_scope(scope, "default"), None);
}

/// Parent links drive the enclosing-scope chain
#[test]
fn test_scope_parent_chain() {
    let mut table = SymbolTable::new();
    let unit = table.add_scope("System", None);
    let outer = table.add_scope("TOuter", Some(unit));
    let inner = table.add_scope("TInner", Some(outer));

    assert_eq!(table.scope_parent(inner), Some(outer));
    assert_eq!(table.scope_parent(outer), Some(unit));
    assert_eq!(table.scope_parent(unit), None);
}
