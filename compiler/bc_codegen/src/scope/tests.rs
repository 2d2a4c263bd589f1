use pretty_assertions::assert_eq;
use smallvec::smallvec;

use super::*;

fn int_at(slot: usize) -> Variable {
    Variable {
        slot,
        ty: TypeName::Int,
    }
}

#[test]
fn test_enter_and_exit_restore_the_parent() {
    let mut tree = ScopeTree::new();
    let block = tree.enter(ScopeKind::Block, 3);
    assert_eq!(tree.current(), block);
    assert_eq!(tree.get(block).parent, Some(ScopeId::ROOT));

    assert_eq!(tree.exit(), 3);
    assert_eq!(tree.current(), ScopeId::ROOT);
    // Exited scopes are kept for validation.
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_variables_resolve_through_blocks() {
    let mut tree = ScopeTree::new();
    tree.define_variable("x", int_at(0));
    tree.enter(ScopeKind::Block, 1);
    tree.enter(ScopeKind::Block, 1);

    assert_eq!(tree.lookup_variable("x"), Some(int_at(0)));
    assert_eq!(tree.lookup_variable("y"), None);
}

#[test]
fn test_local_variable_ignores_parents() {
    let mut tree = ScopeTree::new();
    tree.define_variable("x", int_at(0));
    tree.enter(ScopeKind::Block, 1);
    assert_eq!(tree.local_variable("x"), None);

    tree.define_variable("x", int_at(1));
    assert_eq!(tree.local_variable("x"), Some(int_at(1)));
    assert_eq!(tree.lookup_variable("x"), Some(int_at(1)));

    tree.exit();
    assert_eq!(tree.lookup_variable("x"), Some(int_at(0)));
}

#[test]
fn test_variables_stop_at_function_boundary() {
    let mut tree = ScopeTree::new();
    tree.define_variable("global", int_at(0));
    tree.enter(ScopeKind::Function, 1);
    tree.define_variable("param", int_at(1));
    tree.enter(ScopeKind::Block, 3);

    assert_eq!(tree.lookup_variable("param"), Some(int_at(1)));
    assert_eq!(tree.lookup_variable("global"), None);
}

#[test]
fn test_functions_resolve_across_function_boundary() {
    let mut tree = ScopeTree::new();
    tree.define_function(
        "f",
        Signature {
            params: smallvec![TypeName::Int],
            return_ty: TypeName::String,
            position: Position::START,
        },
    );
    let body = tree.enter(ScopeKind::Function, 0);

    let found = tree.lookup_function(body, "f").map(|sig| sig.return_ty);
    assert_eq!(found, Some(TypeName::String));
    assert!(tree.lookup_function(body, "g").is_none());
}

#[test]
fn test_calls_are_recorded_on_the_current_scope() {
    let mut tree = ScopeTree::new();
    let block = tree.enter(ScopeKind::Block, 0);
    tree.record_call(CallSite {
        name: "f".into(),
        arg_types: smallvec![Some(TypeName::Int), None],
        position: Position::new(2, 5),
    });
    tree.exit();

    assert!(tree.get(ScopeId::ROOT).calls().is_empty());
    assert_eq!(tree.get(block).calls().len(), 1);
    assert_eq!(tree.get(block).calls()[0].name, "f");
}

#[test]
fn test_ancestors_are_innermost_first() {
    let mut tree = ScopeTree::new();
    let a = tree.enter(ScopeKind::Block, 0);
    let b = tree.enter(ScopeKind::Block, 0);

    let chain: Vec<ScopeId> = tree.ancestors(b).map(|(id, _)| id).collect();
    assert_eq!(chain, vec![b, a, ScopeId::ROOT]);
}
