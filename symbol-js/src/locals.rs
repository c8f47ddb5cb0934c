use crate::ScopeNames;
use derive_visitor::Drive;
use derive_visitor::Visitor;
use ir_js::ast::expr::FuncExpr;
use ir_js::ast::node::Node;
use ir_js::ast::stmt::decl::FuncDecl;
use ir_js::ast::stmt::decl::VarDeclarator;
use ir_js::ast::stmt::CatchBlock;
use ir_js::ast::stmt::ForInStmt;
use ir_js::ast::stx::TopLevel;
use ir_js::ident::Ident;
use ir_js::scope::ScopeId;
use tracing::debug;
use tracing::debug_span;

/// Names bound directly in each scope: parameters, hoisted `var`s, declared for-in variables,
/// catch parameters, function statement names and a function expression's own name.
pub type Locals = ScopeNames;

type FuncExprNode = Node<FuncExpr>;
type FuncDeclNode = Node<FuncDecl>;
type CatchBlockNode = Node<CatchBlock>;
type VarDeclaratorNode = Node<VarDeclarator>;
type ForInStmtNode = Node<ForInStmt>;

pub(crate) fn scope_of(scope: Option<ScopeId>) -> ScopeId {
  scope.expect("scope analysis requires compute_scope_tree to be run first")
}

#[derive(Visitor)]
#[visitor(
  FuncExprNode(enter, exit),
  FuncDeclNode(enter, exit),
  CatchBlockNode(enter, exit),
  VarDeclaratorNode(enter),
  ForInStmtNode(enter)
)]
struct LocalsVisitor {
  locals: Locals,
  stack: Vec<ScopeId>,
}

impl LocalsVisitor {
  fn current(&self) -> ScopeId {
    *self.stack.last().unwrap_or(&ScopeId::ROOT)
  }

  fn declare(&mut self, name: &Ident) {
    let scope = self.current();
    self.locals.insert(scope, name.clone());
  }

  fn open<'a>(&mut self, scope: ScopeId, names: impl IntoIterator<Item = &'a Ident>) {
    let set = self.locals.open(scope);
    set.extend(names.into_iter().cloned());
    self.stack.push(scope);
  }

  fn enter_func_expr_node(&mut self, node: &FuncExprNode) {
    let scope = scope_of(node.stx.scope);
    self.open(
      scope,
      node.stx.parameters.iter().chain(node.stx.name.as_ref()),
    );
  }

  fn exit_func_expr_node(&mut self, _node: &FuncExprNode) {
    self.stack.pop();
  }

  fn enter_func_decl_node(&mut self, node: &FuncDeclNode) {
    // The name belongs to the enclosing scope.
    self.declare(&node.stx.name);
    let scope = scope_of(node.stx.scope);
    self.open(scope, node.stx.parameters.iter());
  }

  fn exit_func_decl_node(&mut self, _node: &FuncDeclNode) {
    self.stack.pop();
  }

  fn enter_catch_block_node(&mut self, node: &CatchBlockNode) {
    let scope = scope_of(node.stx.scope);
    self.open(scope, [&node.stx.parameter]);
  }

  fn exit_catch_block_node(&mut self, _node: &CatchBlockNode) {
    self.stack.pop();
  }

  fn enter_var_declarator_node(&mut self, node: &VarDeclaratorNode) {
    self.declare(&node.stx.name);
  }

  fn enter_for_in_stmt_node(&mut self, node: &ForInStmtNode) {
    if node.stx.declared {
      self.declare(&node.stx.variable);
    };
  }
}

/// Gathers the locals of every scope of a tree that has been through
/// [`compute_scope_tree`](crate::compute_scope_tree). Every scope gets an entry, possibly empty.
pub fn compute_locals(top_level_node: &Node<TopLevel>) -> Locals {
  let _span = debug_span!("symbol_js.locals").entered();
  let mut visitor = LocalsVisitor {
    locals: Locals::new(),
    stack: Vec::new(),
  };
  visitor.locals.open(ScopeId::ROOT);
  top_level_node.drive(&mut visitor);
  debug!(
    scopes = visitor.locals.scope_count(),
    locals = visitor.locals.name_count(),
    "gathered locals"
  );
  visitor.locals
}
