//! End-to-end resolution through the public API: populate a store, build
//! expression trees by hand, resolve names the way an IDE feature would.

use std::sync::Arc;

use delphic::Span;
use delphic::semantic::{
    CollectSink, Field, FieldKind, FieldKindSet, ResolveContext, ScopeId, SymbolTable,
    resolve_expression, resolve_first,
};
use delphic::syntax::{ExprArena, LiteralKind, Operation, QualifiedIdent};

struct Project {
    table: SymbolTable,
    forms: ScopeId,
    tobject: ScopeId,
    tcontrol: ScopeId,
    tbutton: ScopeId,
    handler: ScopeId,
    namespaces: Arc<[ScopeId]>,
}

/// unit System { type TObject { Free; ClassName } }
/// unit Forms  { type TControl { SetFocus };
///               type TButton  { Caption: TObject; Click;
///                               Controls: TControl default;
///                               function FindControl(Name): TControl } }
/// handler scope: Sender: TButton
fn project() -> Project {
    let mut table = SymbolTable::new();

    let system = table.add_scope("System", None);
    let tobject = table.add_scope("TObject", Some(system));
    table
        .add_field(Field::routine("Free", tobject, 0))
        .unwrap();
    table
        .add_field(Field::routine("ClassName", tobject, 0))
        .unwrap();
    table
        .add_field(Field::type_decl("TObject", system, tobject))
        .unwrap();

    let forms = table.add_scope("Forms", None);
    let tcontrol = table.add_scope("TControl", Some(forms));
    table
        .add_field(Field::routine("SetFocus", tcontrol, 0))
        .unwrap();
    table
        .add_field(Field::type_decl("TControl", forms, tcontrol))
        .unwrap();

    let tbutton = table.add_scope("TButton", Some(forms));
    table
        .add_field(Field::property("Caption", tbutton, "TObject"))
        .unwrap();
    table
        .add_field(Field::routine("Click", tbutton, 0))
        .unwrap();
    table
        .add_field(Field::property("Controls", tbutton, "TControl").as_default_property())
        .unwrap();
    table
        .add_field(Field::routine("FindControl", tbutton, 1).with_type_ref("TControl"))
        .unwrap();
    table
        .add_field(Field::type_decl("TButton", forms, tbutton))
        .unwrap();

    let handler = table.add_scope("ButtonClickHandler", None);
    table
        .add_field(Field::variable("Sender", handler, "TButton"))
        .unwrap();

    let namespaces: Arc<[ScopeId]> = vec![system, forms].into();
    Project {
        table,
        forms,
        tobject,
        tcontrol,
        tbutton,
        handler,
        namespaces,
    }
}

fn context(p: &Project) -> ResolveContext {
    ResolveContext::new(Some(p.handler), FieldKindSet::ALL, true)
        .with_namespaces(p.namespaces.clone())
}

#[test]
fn dotted_chain_through_member_types() {
    let p = project();
    let mut arena = ExprArena::new();
    let (root, ident) = arena.reference(
        None,
        QualifiedIdent::from_dotted("Sender.Caption.Free", Span::default()),
    );

    let hit = resolve_first(&p.table, &arena, root, ident, context(&p)).unwrap();
    assert_eq!(hit.kind, FieldKind::Routine);
    assert_eq!(hit.field.name.as_str(), "Free");
    assert_eq!(hit.declaring, p.tobject);
}

#[test]
fn index_cast_and_call_compose() {
    let p = project();
    let mut arena = ExprArena::new();

    // Sender[0].SetFocus — through the default Controls property
    let (sender, _) = arena.reference(
        None,
        QualifiedIdent::from_dotted("Sender", Span::default()),
    );
    let zero = arena.literal(LiteralKind::Integer, Span::default());
    let indexed = arena.index(sender, vec![zero]);
    let (root, setfocus) = arena.reference(
        Some(indexed),
        QualifiedIdent::from_dotted("SetFocus", Span::default()),
    );
    let hit = resolve_first(&p.table, &arena, root, setfocus, context(&p)).unwrap();
    assert_eq!(hit.declaring, p.tcontrol);

    // (Sender.Caption as TButton).Click — the cast re-points the chain
    let (caption, _) = arena.reference(
        None,
        QualifiedIdent::from_dotted("Sender.Caption", Span::default()),
    );
    let (tbutton_ref, _) = arena.reference(
        None,
        QualifiedIdent::from_dotted("TButton", Span::default()),
    );
    let cast = arena.binary(Operation::As, vec![caption, tbutton_ref]);
    let (root, click) = arena.reference(
        Some(cast),
        QualifiedIdent::from_dotted("Click", Span::default()),
    );
    let hit = resolve_first(&p.table, &arena, root, click, context(&p)).unwrap();
    assert_eq!(hit.declaring, p.tbutton);

    // Sender.FindControl(Name).SetFocus — through the routine return type
    let (sender2, _) = arena.reference(
        None,
        QualifiedIdent::from_dotted("Sender", Span::default()),
    );
    let (find, _) = arena.reference(
        Some(sender2),
        QualifiedIdent::from_dotted("FindControl", Span::default()),
    );
    let name_arg = arena.literal(LiteralKind::Str, Span::default());
    let call = arena.call(find, vec![name_arg]);
    let (root, setfocus2) = arena.reference(
        Some(call),
        QualifiedIdent::from_dotted("SetFocus", Span::default()),
    );
    let hit = resolve_first(&p.table, &arena, root, setfocus2, context(&p)).unwrap();
    assert_eq!(hit.declaring, p.tcontrol);
}

#[test]
fn collecting_sink_reports_each_namespace_match() {
    let p = project();
    let mut arena = ExprArena::new();
    let (root, ident) = arena.reference(
        None,
        QualifiedIdent::from_dotted("TControl", Span::default()),
    );

    let mut sink = CollectSink::default();
    let completed = resolve_expression(&p.table, &arena, root, ident, context(&p), &mut sink);
    assert!(completed);
    assert_eq!(sink.matches.len(), 1);
    assert_eq!(sink.matches[0].declaring, p.forms);
    assert_eq!(sink.matches[0].kind, FieldKind::Type);
}
