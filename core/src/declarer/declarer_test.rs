use super::*;
use crate::ast::{Ast, AstBuilder, ExprContext, Node, NodeId, NodeKind};
use crate::errors::Error;
use crate::scope_stack::{FrameKind, Scopes};
use crate::test_utils::init_test_logging;
use bumpalo::Bump;
use pretty_assertions::assert_eq;

fn analyze<'a>(ast: &mut Ast<'a>) -> Scopes<'a> {
    Declarer::new(ast.arena()).unwrap().run(ast).unwrap()
}

fn names_of<'a>(scopes: &Scopes<'a>, owner: NodeId) -> Vec<&'a str> {
    scopes.get(owner).unwrap().names().collect()
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_function_parameters_and_locals() {
    init_test_logging();
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let x = b.param("x");
    let args = b.arguments(&[x], &[]);
    let y = b.store("y");
    let one = b.int(1);
    let assign = b.assign(&[y], one);
    let y_load = b.load("y");
    let ret = b.ret(Some(y_load));
    let f = b.function_def("f", args, &[assign, ret]);
    let mut ast = b.finish(&[f]);

    let scopes = analyze(&mut ast);

    assert_eq!(scopes.len(), 2);
    assert_eq!(names_of(&scopes, ast.root()), vec!["f"]);
    assert_eq!(names_of(&scopes, f), vec!["x", "y"]);

    let frame = scopes.get(f).unwrap();
    assert_eq!(frame.kind(), FrameKind::Function);
    assert_eq!(frame.parent(), Some(ast.root()));
    assert_eq!(frame.is_global("x"), Some(false));
    assert_eq!(frame.is_global("y"), Some(false));
}

#[test]
fn test_variadic_parameters_are_bound() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let a = b.param("a");
    let b_param = b.param("b");
    let zero = b.int(0);
    let args = b.variadic_arguments(&[a, b_param], Some("rest"), Some("options"), &[zero]);
    let body = b.pass();
    let f = b.function_def("f", args, &[body]);
    let mut ast = b.finish(&[f]);

    let scopes = analyze(&mut ast);

    assert_eq!(names_of(&scopes, f), vec!["a", "b", "rest", "options"]);
}

#[test]
fn test_tuple_parameter_binds_each_name() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let a = b.param("a");
    let inner_b = b.store("b");
    let inner_c = b.store("c");
    let pair = b.tuple(&[inner_b, inner_c], ExprContext::Store);
    let args = b.arguments(&[a, pair], &[]);
    let body = b.pass();
    let f = b.function_def("f", args, &[body]);
    let mut ast = b.finish(&[f]);

    let scopes = analyze(&mut ast);

    assert_eq!(names_of(&scopes, f), vec!["a", "b", "c"]);
    assert!(!scopes.module().unwrap().contains("b"));
}

// ============================================================================
// Globals
// ============================================================================

#[test]
fn test_global_then_assignment_stays_global() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let args = b.arguments(&[], &[]);
    let global = b.global(&["z"]);
    let z = b.store("z");
    let one = b.int(1);
    let assign = b.assign(&[z], one);
    let g = b.function_def("g", args, &[global, assign]);
    let mut ast = b.finish(&[g]);

    let scopes = analyze(&mut ast);
    let frame = scopes.get(g).unwrap();

    assert_eq!(frame.is_global("z"), Some(true));
    assert_eq!(frame.globals().collect::<Vec<_>>(), vec!["z"]);
    assert!(!scopes.module().unwrap().contains("z"));
}

#[test]
fn test_global_after_local_binding_marks_global() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let args = b.arguments(&[], &[]);
    let z = b.store("z");
    let zero = b.int(0);
    let assign = b.assign(&[z], zero);
    let global = b.global(&["z"]);
    let h = b.function_def("h", args, &[assign, global]);
    let mut ast = b.finish(&[h]);

    let scopes = analyze(&mut ast);
    let frame = scopes.get(h).unwrap();

    assert_eq!(frame.len(), 1);
    assert_eq!(frame.is_global("z"), Some(true));
}

// ============================================================================
// Targets
// ============================================================================

#[test]
fn test_nested_tuple_target() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let a = b.store("a");
    let b_name = b.store("b");
    let c = b.store("c");
    let inner = b.tuple(&[b_name, c], ExprContext::Store);
    let outer = b.tuple(&[a, inner], ExprContext::Store);
    let g = b.load("g");
    let x = b.load("x");
    let value = b.call(g, &[x]);
    let assign = b.assign(&[outer], value);
    let mut ast = b.finish(&[assign]);

    let scopes = analyze(&mut ast);

    assert_eq!(names_of(&scopes, ast.root()), vec!["a", "b", "c"]);
}

#[test]
fn test_list_target_and_chained_assignment() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let first = b.store("first");
    let second = b.store("second");
    let list = b.list(&[first, second], ExprContext::Store);
    let copy = b.store("copy");
    let pair = b.load("pair");
    let assign = b.assign(&[list, copy], pair);
    let mut ast = b.finish(&[assign]);

    let scopes = analyze(&mut ast);

    assert_eq!(names_of(&scopes, ast.root()), vec!["first", "second", "copy"]);
}

#[test]
fn test_subscript_and_attribute_targets_bind_nothing_new() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let x = b.store("x");
    let empty = b.list(&[], ExprContext::Load);
    let init = b.assign(&[x], empty);
    let x_load = b.load("x");
    let zero = b.int(0);
    let item = b.subscript(x_load, zero, ExprContext::Store);
    let one = b.int(1);
    let set_item = b.assign(&[item], one);
    let obj = b.load("obj");
    let attr = b.attribute(obj, "field", ExprContext::Store);
    let two = b.int(2);
    let set_attr = b.assign(&[attr], two);
    let mut ast = b.finish(&[init, set_item, set_attr]);

    let scopes = analyze(&mut ast);

    assert_eq!(names_of(&scopes, ast.root()), vec!["x"]);
}

#[test]
fn test_for_loop_target_is_bound() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let i = b.store("i");
    let k = b.store("k");
    let v = b.store("v");
    let kv = b.tuple(&[k, v], ExprContext::Store);
    let target = b.tuple(&[i, kv], ExprContext::Store);
    let items = b.load("items");
    let total = b.store("total");
    let i_load = b.load("i");
    let body = b.assign(&[total], i_load);
    let for_loop = b.for_loop(target, items, &[body], &[]);
    let mut ast = b.finish(&[for_loop]);

    let scopes = analyze(&mut ast);

    assert_eq!(
        names_of(&scopes, ast.root()),
        vec!["i", "k", "v", "total"]
    );
}

#[test]
fn test_aug_assign_binds_nothing() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let counter = b.store("counter");
    let one = b.int(1);
    let bump = b.aug_assign(counter, crate::ast::BinaryOp::Add, one);
    let mut ast = b.finish(&[bump]);

    let scopes = analyze(&mut ast);

    assert!(scopes.module().unwrap().is_empty());
}

#[test]
fn test_unhandled_target_is_an_error() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let f = b.load("f");
    let call = b.call(f, &[]);
    let one = b.int(1);
    let assign = b.assign(&[call], one);
    let mut ast = b.finish(&[assign]);

    let result = Declarer::new(&arena).unwrap().run(&mut ast);

    assert_eq!(
        result.unwrap_err(),
        Error::UnhandledTarget {
            kind: NodeKind::Call,
            node: call,
        }
    );
}

#[test]
fn test_unhandled_loop_target_is_an_error() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let target = b.int(3);
    let items = b.load("items");
    let body = b.pass();
    let for_loop = b.for_loop(target, items, &[body], &[]);
    let mut ast = b.finish(&[for_loop]);

    let err = Declarer::new(&arena).unwrap().run(&mut ast).unwrap_err();

    assert!(matches!(
        err,
        Error::UnhandledTarget {
            kind: NodeKind::Num,
            ..
        }
    ));
}

// ============================================================================
// Imports
// ============================================================================

#[test]
fn test_imports_bind_alias_and_normalize() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let import = b.import(&[("os", Some("o")), ("sys", None)]);
    let mut ast = b.finish(&[import]);

    let scopes = analyze(&mut ast);

    assert_eq!(names_of(&scopes, ast.root()), vec!["o", "sys"]);
    let Node::Import { names } = *ast.node(import) else {
        panic!("expected an import");
    };
    assert_eq!(
        ast.node(names[1]),
        &Node::Alias {
            name: "sys",
            asname: Some("sys"),
        }
    );
    assert_eq!(ast.unparse(), "import os as o, sys as sys\n");
}

#[test]
fn test_dotted_import_binds_package() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let import = b.import(&[("os.path", None)]);
    let mut ast = b.finish(&[import]);

    let scopes = analyze(&mut ast);

    assert_eq!(names_of(&scopes, ast.root()), vec!["os"]);
    assert_eq!(ast.unparse(), "import os.path\n");
}

#[test]
fn test_import_from() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let named = b.import_from(Some("pkg"), &[("a", None), ("b", Some("c"))], 0);
    let star = b.import_from(Some("other"), &[("*", None)], 0);
    let mut ast = b.finish(&[named, star]);

    let scopes = analyze(&mut ast);

    assert_eq!(names_of(&scopes, ast.root()), vec!["a", "c"]);
    assert_eq!(
        ast.unparse(),
        "from pkg import a as a, b as c\nfrom other import *\n"
    );
}

// ============================================================================
// Frames
// ============================================================================

#[test]
fn test_class_body_has_its_own_frame() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let base = b.load("Base");
    let attr = b.store("attr");
    let one = b.int(1);
    let class_attr = b.assign(&[attr], one);
    let this = b.param("self");
    let args = b.arguments(&[this], &[]);
    let body = b.pass();
    let method = b.function_def("m", args, &[body]);
    let class = b.class_def("C", &[base], &[class_attr, method]);
    let mut ast = b.finish(&[class]);

    let scopes = analyze(&mut ast);

    assert_eq!(names_of(&scopes, ast.root()), vec!["C"]);
    assert_eq!(names_of(&scopes, class), vec!["attr", "m"]);
    assert_eq!(names_of(&scopes, method), vec!["self"]);
    assert_eq!(scopes.get(class).unwrap().kind(), FrameKind::Class);
    assert_eq!(scopes.get(method).unwrap().parent(), Some(class));
}

#[test]
fn test_frames_are_completed_breadth_first() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let inner_args = b.arguments(&[], &[]);
    let inner_body = b.pass();
    let inner = b.function_def("inner", inner_args, &[inner_body]);
    let f_args = b.arguments(&[], &[]);
    let f = b.function_def("f", f_args, &[inner]);
    let g_args = b.arguments(&[], &[]);
    let g_body = b.pass();
    let g = b.function_def("g", g_args, &[g_body]);
    let mut ast = b.finish(&[f, g]);

    let scopes = analyze(&mut ast);

    let owners: Vec<NodeId> = scopes.iter().map(|frame| frame.owner()).collect();
    assert_eq!(owners, vec![ast.root(), f, g, inner]);
    assert_eq!(names_of(&scopes, f), vec!["inner"]);
    assert!(!scopes.module().unwrap().contains("inner"));
}

#[test]
fn test_decorators_and_bases_are_traversed() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let decorator = b.load("cached");
    let args = b.arguments(&[], &[]);
    let body = b.pass();
    let f = b.decorated_function_def("f", args, &[body], &[decorator]);
    let mut ast = b.finish(&[f]);

    let scopes = analyze(&mut ast);

    assert_eq!(names_of(&scopes, ast.root()), vec!["f"]);
    assert!(scopes.get(f).unwrap().is_empty());
}

#[test]
fn test_nested_statements_bind_in_enclosing_frame() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let cond = b.load("flag");
    let x = b.store("x");
    let one = b.int(1);
    let then = b.assign(&[x], one);
    let y = b.store("y");
    let two = b.int(2);
    let otherwise = b.assign(&[y], two);
    let branch = b.if_stmt(cond, &[then], &[otherwise]);
    let running = b.load("running");
    let z = b.store("z");
    let three = b.int(3);
    let loop_body = b.assign(&[z], three);
    let while_loop = b.while_loop(running, &[loop_body], &[]);
    let mut ast = b.finish(&[branch, while_loop]);

    let scopes = analyze(&mut ast);

    assert_eq!(scopes.len(), 1);
    assert_eq!(names_of(&scopes, ast.root()), vec!["x", "y", "z"]);
}

#[test]
fn test_analysis_is_repeatable() {
    let arena = Bump::new();
    let mut b = AstBuilder::new(&arena);
    let import = b.import(&[("json", None)]);
    let x = b.param("x");
    let args = b.arguments(&[x], &[]);
    let global = b.global(&["cache"]);
    let y = b.store("y");
    let x_load = b.load("x");
    let assign = b.assign(&[y], x_load);
    let f = b.function_def("f", args, &[global, assign]);
    let mut ast = b.finish(&[import, f]);

    let first = analyze(&mut ast);
    let second = analyze(&mut ast);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.owner(), b.owner());
        assert_eq!(a.bindings(), b.bindings());
    }
}
