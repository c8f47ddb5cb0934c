use ir_js::ast::expr::Expr;
use ir_js::ast::node::Node;
use ir_js::ast::stmt::Stmt;
use ir_js::ast::stx::TopLevel;
use ir_js::build;
use ir_js::ident::Ident;
use ir_js::scope::ScopeId;
use symbol_js::compute_scope_tree;
use symbol_js::scope::ScopeKind;

fn ident(name: &str) -> Ident {
  Ident::new(name).unwrap()
}

// function outer(p) {
//   var g = function inner() {};
//   try { } catch (e) { (function () {}); }
// }
// function sibling() {}
fn program() -> Node<TopLevel> {
  build::top_level(vec![
    build::func_decl(ident("outer"), vec![ident("p")], vec![
      build::var(
        ident("g"),
        Some(build::func(Some(ident("inner")), vec![], vec![])),
      ),
      build::try_(
        vec![],
        Some((ident("e"), vec![build::expr_stmt(build::func(
          None,
          vec![],
          vec![],
        ))])),
        None,
      )
      .unwrap(),
    ]),
    build::func_decl(ident("sibling"), vec![], vec![]),
  ])
}

fn decl_scope(stmt: &Node<Stmt>) -> Option<ScopeId> {
  match stmt.stx.as_ref() {
    Stmt::FunctionDecl(f) => f.stx.scope,
    _ => None,
  }
}

#[test]
fn scopes_are_numbered_in_discovery_order() {
  let mut top = program();
  let tree = compute_scope_tree(&mut top);
  assert_eq!(tree.len(), 6);

  let root = tree.get(ScopeId::ROOT).unwrap();
  assert_eq!(root.kind, ScopeKind::Root);
  assert_eq!(root.parent, None);
  assert_eq!(root.children, vec![ScopeId(1), ScopeId(5)]);

  assert_eq!(tree.children(ScopeId(1)), &[ScopeId(2), ScopeId(3)]);
  assert_eq!(tree.get(ScopeId(3)).unwrap().kind, ScopeKind::Catch);
  assert_eq!(tree.children(ScopeId(3)), &[ScopeId(4)]);
  assert_eq!(tree.parent(ScopeId(4)), Some(ScopeId(3)));
  assert!(tree.children(ScopeId(5)).is_empty());

  assert_eq!(decl_scope(&top.stx.body[0]), Some(ScopeId(1)));
  assert_eq!(decl_scope(&top.stx.body[1]), Some(ScopeId(5)));
  let Stmt::FunctionDecl(outer) = top.stx.body[0].stx.as_ref() else {
    panic!("expected function");
  };
  let Stmt::VarDecl(var) = outer.stx.body[0].stx.as_ref() else {
    panic!("expected var");
  };
  let init = var.stx.declarators[0].stx.initializer.as_ref().unwrap();
  let Expr::Func(inner) = init.stx.as_ref() else {
    panic!("expected function expression");
  };
  assert_eq!(inner.stx.scope, Some(ScopeId(2)));
}

#[test]
fn every_scope_is_listed_once_by_its_parent() {
  let mut top = program();
  let tree = compute_scope_tree(&mut top);
  for (id, data) in tree.iter() {
    let Some(parent) = data.parent else {
      assert!(id.is_root());
      continue;
    };
    let listed = tree.children(parent).iter().filter(|c| **c == id).count();
    assert_eq!(listed, 1, "{id} under {parent}");
  }
}

#[test]
fn ancestors_run_up_to_the_root() {
  let mut top = program();
  let tree = compute_scope_tree(&mut top);
  let chain: Vec<_> = tree.self_and_ancestors(ScopeId(4)).collect();
  assert_eq!(chain, vec![ScopeId(4), ScopeId(3), ScopeId(1), ScopeId::ROOT]);
  assert_eq!(tree.self_and_ancestors(ScopeId(99)).count(), 0);
}

#[test]
fn rerunning_reassigns_ids() {
  let mut top = program();
  compute_scope_tree(&mut top);
  top.stx.body.remove(0);
  let tree = compute_scope_tree(&mut top);
  assert_eq!(tree.len(), 2);
  assert_eq!(decl_scope(&top.stx.body[0]), Some(ScopeId(1)));
}
