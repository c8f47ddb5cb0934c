use ir_js::build;
use ir_js::ident::Ident;
use ir_js::scope::ScopeId;
use symbol_js::compute_locals;
use symbol_js::compute_scope_tree;

fn ident(name: &str) -> Ident {
  Ident::new(name).unwrap()
}

fn names(locals: &symbol_js::Locals, scope: ScopeId) -> Vec<&str> {
  locals.names(scope).map(|n| n.as_str()).collect()
}

#[test]
fn function_locals_include_hoisted_vars() {
  // var top; function f(a, b) { if (a) { var c = a + b; } for (var k in b) {} for (j in b) {} }
  let mut top = build::top_level(vec![
    build::var(ident("top"), None),
    build::func_decl(ident("f"), vec![ident("a"), ident("b")], vec![
      build::if_(
        build::id(ident("a")),
        build::block(vec![build::var(ident("c"), None)]),
        None,
      ),
      build::for_in(ident("k"), true, build::id(ident("b")), build::block(vec![])),
      build::for_in(ident("j"), false, build::id(ident("b")), build::block(vec![])),
    ]),
  ]);
  compute_scope_tree(&mut top);
  let locals = compute_locals(&top);
  assert_eq!(names(&locals, ScopeId::ROOT), vec!["top", "f"]);
  assert_eq!(names(&locals, ScopeId(1)), vec!["a", "b", "c", "k"]);
}

#[test]
fn function_expression_name_is_bound_inside() {
  // var g = function h(x) { var y; };
  let mut top = build::top_level(vec![build::var(
    ident("g"),
    Some(build::func(Some(ident("h")), vec![ident("x")], vec![
      build::var(ident("y"), None),
    ])),
  )]);
  compute_scope_tree(&mut top);
  let locals = compute_locals(&top);
  assert_eq!(names(&locals, ScopeId::ROOT), vec!["g"]);
  assert_eq!(names(&locals, ScopeId(1)), vec!["x", "h", "y"]);
}

#[test]
fn catch_scope_holds_its_parameter_and_parents_are_not_copied() {
  // function f(a) { try {} catch (e) { var z; } }
  let mut top = build::top_level(vec![build::func_decl(ident("f"), vec![ident("a")], vec![
    build::try_(
      vec![],
      Some((ident("e"), vec![build::var(ident("z"), None)])),
      None,
    )
    .unwrap(),
  ])]);
  compute_scope_tree(&mut top);
  let locals = compute_locals(&top);
  assert_eq!(names(&locals, ScopeId(1)), vec!["a"]);
  assert_eq!(names(&locals, ScopeId(2)), vec!["e", "z"]);
}

#[test]
fn scopes_without_bindings_still_have_an_entry() {
  let mut top = build::top_level(vec![build::expr_stmt(build::func(None, vec![], vec![]))]);
  compute_scope_tree(&mut top);
  let locals = compute_locals(&top);
  assert!(locals.has_scope(ScopeId::ROOT));
  assert!(locals.get(ScopeId(1)).is_some_and(|s| s.is_empty()));
}

#[test]
#[should_panic(expected = "compute_scope_tree")]
fn requires_scope_ids() {
  let top = build::top_level(vec![build::func_decl(ident("f"), vec![], vec![])]);
  compute_locals(&top);
}
