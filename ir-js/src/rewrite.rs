//! Tree rewriting with context threaded through every call.
//!
//! A [`Rewriter`] consumes a tree and produces a new one. Every method has a default that
//! rebuilds the node from its rewritten children by calling the matching `walk_*` function, so
//! a pass only overrides the variants it cares about. The context `D` is passed by reference to
//! each call; an override can substitute a different context for a subtree (e.g. a nested
//! function) by calling a `walk_*` function with it.
//!
//! Locations are carried over unchanged. A [`BlockStmt`] with `merge_with_parent` set that
//! appears in a statement list is replaced by its statements.

use crate::ast::expr::lit::{LitBoolExpr, LitNullExpr, LitNumExpr, LitRegexExpr, LitStrExpr};
use crate::ast::expr::{
  ArrExpr, BinaryExpr, CallExpr, CommaExpr, CondExpr, Expr, FuncExpr, IdExpr, MemberExpr,
  NewExpr, ObjExpr, ObjMember, ThisExpr, TypeRefExpr, UnaryExpr,
};
use crate::ast::node::Node;
use crate::ast::stmt::decl::{FuncDecl, VarDecl, VarDeclarator};
use crate::ast::stmt::{
  BlockStmt, BreakStmt, CatchBlock, CommentStmt, ContinueStmt, DoWhileStmt, ExprStmt, ForInStmt,
  ForInit, ForStmt, IfStmt, LabelStmt, ReturnStmt, Stmt, SwitchBranch, SwitchStmt, ThrowStmt,
  TryStmt, WhileStmt,
};
use crate::ast::stx::TopLevel;

pub trait Rewriter<D> {
  fn rewrite_top_level(&mut self, node: Node<TopLevel>, data: &D) -> Node<TopLevel> {
    walk_top_level(self, node, data)
  }

  fn rewrite_stmts(&mut self, stmts: Vec<Node<Stmt>>, data: &D) -> Vec<Node<Stmt>> {
    walk_stmts(self, stmts, data)
  }

  fn rewrite_stmt(&mut self, node: Node<Stmt>, data: &D) -> Node<Stmt> {
    walk_stmt(self, node, data)
  }

  fn rewrite_expr(&mut self, node: Node<Expr>, data: &D) -> Node<Expr> {
    walk_expr(self, node, data)
  }

  // Expressions.

  fn rewrite_arr_expr(&mut self, node: Node<ArrExpr>, data: &D) -> Expr {
    walk_arr_expr(self, node, data)
  }

  fn rewrite_binary_expr(&mut self, node: Node<BinaryExpr>, data: &D) -> Expr {
    walk_binary_expr(self, node, data)
  }

  fn rewrite_call_expr(&mut self, node: Node<CallExpr>, data: &D) -> Expr {
    walk_call_expr(self, node, data)
  }

  fn rewrite_comma_expr(&mut self, node: Node<CommaExpr>, data: &D) -> Expr {
    walk_comma_expr(self, node, data)
  }

  fn rewrite_cond_expr(&mut self, node: Node<CondExpr>, data: &D) -> Expr {
    walk_cond_expr(self, node, data)
  }

  fn rewrite_func_expr(&mut self, node: Node<FuncExpr>, data: &D) -> Expr {
    walk_func_expr(self, node, data)
  }

  fn rewrite_id_expr(&mut self, node: Node<IdExpr>, _data: &D) -> Expr {
    Expr::Id(node)
  }

  fn rewrite_member_expr(&mut self, node: Node<MemberExpr>, data: &D) -> Expr {
    walk_member_expr(self, node, data)
  }

  fn rewrite_new_expr(&mut self, node: Node<NewExpr>, data: &D) -> Expr {
    walk_new_expr(self, node, data)
  }

  fn rewrite_obj_expr(&mut self, node: Node<ObjExpr>, data: &D) -> Expr {
    walk_obj_expr(self, node, data)
  }

  fn rewrite_this_expr(&mut self, node: Node<ThisExpr>, _data: &D) -> Expr {
    Expr::This(node)
  }

  fn rewrite_type_ref_expr(&mut self, node: Node<TypeRefExpr>, _data: &D) -> Expr {
    Expr::TypeRef(node)
  }

  fn rewrite_unary_expr(&mut self, node: Node<UnaryExpr>, data: &D) -> Expr {
    walk_unary_expr(self, node, data)
  }

  fn rewrite_lit_bool_expr(&mut self, node: Node<LitBoolExpr>, _data: &D) -> Expr {
    Expr::LitBool(node)
  }

  fn rewrite_lit_null_expr(&mut self, node: Node<LitNullExpr>, _data: &D) -> Expr {
    Expr::LitNull(node)
  }

  fn rewrite_lit_num_expr(&mut self, node: Node<LitNumExpr>, _data: &D) -> Expr {
    Expr::LitNum(node)
  }

  fn rewrite_lit_regex_expr(&mut self, node: Node<LitRegexExpr>, _data: &D) -> Expr {
    Expr::LitRegex(node)
  }

  fn rewrite_lit_str_expr(&mut self, node: Node<LitStrExpr>, _data: &D) -> Expr {
    Expr::LitStr(node)
  }

  // Statements.

  fn rewrite_block_stmt(&mut self, node: Node<BlockStmt>, data: &D) -> Stmt {
    Stmt::Block(self.rewrite_block(node, data))
  }

  fn rewrite_break_stmt(&mut self, node: Node<BreakStmt>, _data: &D) -> Stmt {
    Stmt::Break(node)
  }

  fn rewrite_comment_stmt(&mut self, node: Node<CommentStmt>, _data: &D) -> Stmt {
    Stmt::Comment(node)
  }

  fn rewrite_continue_stmt(&mut self, node: Node<ContinueStmt>, _data: &D) -> Stmt {
    Stmt::Continue(node)
  }

  fn rewrite_do_while_stmt(&mut self, node: Node<DoWhileStmt>, data: &D) -> Stmt {
    walk_do_while_stmt(self, node, data)
  }

  fn rewrite_expr_stmt(&mut self, node: Node<ExprStmt>, data: &D) -> Stmt {
    walk_expr_stmt(self, node, data)
  }

  fn rewrite_for_stmt(&mut self, node: Node<ForStmt>, data: &D) -> Stmt {
    walk_for_stmt(self, node, data)
  }

  fn rewrite_for_in_stmt(&mut self, node: Node<ForInStmt>, data: &D) -> Stmt {
    walk_for_in_stmt(self, node, data)
  }

  fn rewrite_if_stmt(&mut self, node: Node<IfStmt>, data: &D) -> Stmt {
    walk_if_stmt(self, node, data)
  }

  fn rewrite_label_stmt(&mut self, node: Node<LabelStmt>, data: &D) -> Stmt {
    walk_label_stmt(self, node, data)
  }

  fn rewrite_return_stmt(&mut self, node: Node<ReturnStmt>, data: &D) -> Stmt {
    walk_return_stmt(self, node, data)
  }

  fn rewrite_switch_stmt(&mut self, node: Node<SwitchStmt>, data: &D) -> Stmt {
    walk_switch_stmt(self, node, data)
  }

  fn rewrite_throw_stmt(&mut self, node: Node<ThrowStmt>, data: &D) -> Stmt {
    walk_throw_stmt(self, node, data)
  }

  fn rewrite_try_stmt(&mut self, node: Node<TryStmt>, data: &D) -> Stmt {
    walk_try_stmt(self, node, data)
  }

  fn rewrite_while_stmt(&mut self, node: Node<WhileStmt>, data: &D) -> Stmt {
    walk_while_stmt(self, node, data)
  }

  fn rewrite_func_decl(&mut self, node: Node<FuncDecl>, data: &D) -> Stmt {
    walk_func_decl(self, node, data)
  }

  fn rewrite_var_decl_stmt(&mut self, node: Node<VarDecl>, data: &D) -> Stmt {
    Stmt::VarDecl(self.rewrite_var_decl(node, data))
  }

  // Auxiliary nodes.

  fn rewrite_block(&mut self, node: Node<BlockStmt>, data: &D) -> Node<BlockStmt> {
    walk_block(self, node, data)
  }

  fn rewrite_catch_block(&mut self, node: Node<CatchBlock>, data: &D) -> Node<CatchBlock> {
    walk_catch_block(self, node, data)
  }

  fn rewrite_switch_branch(&mut self, node: Node<SwitchBranch>, data: &D) -> Node<SwitchBranch> {
    walk_switch_branch(self, node, data)
  }

  fn rewrite_var_decl(&mut self, node: Node<VarDecl>, data: &D) -> Node<VarDecl> {
    walk_var_decl(self, node, data)
  }

  fn rewrite_var_declarator(
    &mut self,
    node: Node<VarDeclarator>,
    data: &D,
  ) -> Node<VarDeclarator> {
    walk_var_declarator(self, node, data)
  }
}

fn rewrite_exprs<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  exprs: Vec<Node<Expr>>,
  data: &D,
) -> Vec<Node<Expr>> {
  exprs.into_iter().map(|e| r.rewrite_expr(e, data)).collect()
}

pub fn walk_top_level<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<TopLevel>,
  data: &D,
) -> Node<TopLevel> {
  node.map_stx(|s| TopLevel {
    body: r.rewrite_stmts(s.body, data),
  })
}

pub fn walk_stmts<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  stmts: Vec<Node<Stmt>>,
  data: &D,
) -> Vec<Node<Stmt>> {
  let mut out = Vec::with_capacity(stmts.len());
  for stmt in stmts {
    let stmt = r.rewrite_stmt(stmt, data);
    match *stmt.stx {
      // Already rewritten, so its own nested merge blocks are gone.
      Stmt::Block(block) if block.stx.merge_with_parent => out.extend(block.stx.body),
      stx => out.push(Node {
        loc: stmt.loc,
        stx: Box::new(stx),
      }),
    }
  }
  out
}

pub fn walk_expr<D, R: Rewriter<D> + ?Sized>(r: &mut R, node: Node<Expr>, data: &D) -> Node<Expr> {
  node.map_stx(|e| match e {
    Expr::Arr(n) => r.rewrite_arr_expr(n, data),
    Expr::Binary(n) => r.rewrite_binary_expr(n, data),
    Expr::Call(n) => r.rewrite_call_expr(n, data),
    Expr::Comma(n) => r.rewrite_comma_expr(n, data),
    Expr::Cond(n) => r.rewrite_cond_expr(n, data),
    Expr::Func(n) => r.rewrite_func_expr(n, data),
    Expr::Id(n) => r.rewrite_id_expr(n, data),
    Expr::Member(n) => r.rewrite_member_expr(n, data),
    Expr::New(n) => r.rewrite_new_expr(n, data),
    Expr::Obj(n) => r.rewrite_obj_expr(n, data),
    Expr::This(n) => r.rewrite_this_expr(n, data),
    Expr::TypeRef(n) => r.rewrite_type_ref_expr(n, data),
    Expr::Unary(n) => r.rewrite_unary_expr(n, data),
    Expr::LitBool(n) => r.rewrite_lit_bool_expr(n, data),
    Expr::LitNull(n) => r.rewrite_lit_null_expr(n, data),
    Expr::LitNum(n) => r.rewrite_lit_num_expr(n, data),
    Expr::LitRegex(n) => r.rewrite_lit_regex_expr(n, data),
    Expr::LitStr(n) => r.rewrite_lit_str_expr(n, data),
  })
}

pub fn walk_stmt<D, R: Rewriter<D> + ?Sized>(r: &mut R, node: Node<Stmt>, data: &D) -> Node<Stmt> {
  node.map_stx(|s| match s {
    Stmt::Block(n) => r.rewrite_block_stmt(n, data),
    Stmt::Break(n) => r.rewrite_break_stmt(n, data),
    Stmt::Comment(n) => r.rewrite_comment_stmt(n, data),
    Stmt::Continue(n) => r.rewrite_continue_stmt(n, data),
    Stmt::DoWhile(n) => r.rewrite_do_while_stmt(n, data),
    Stmt::Expr(n) => r.rewrite_expr_stmt(n, data),
    Stmt::For(n) => r.rewrite_for_stmt(n, data),
    Stmt::ForIn(n) => r.rewrite_for_in_stmt(n, data),
    Stmt::If(n) => r.rewrite_if_stmt(n, data),
    Stmt::Label(n) => r.rewrite_label_stmt(n, data),
    Stmt::Return(n) => r.rewrite_return_stmt(n, data),
    Stmt::Switch(n) => r.rewrite_switch_stmt(n, data),
    Stmt::Throw(n) => r.rewrite_throw_stmt(n, data),
    Stmt::Try(n) => r.rewrite_try_stmt(n, data),
    Stmt::While(n) => r.rewrite_while_stmt(n, data),
    Stmt::FunctionDecl(n) => r.rewrite_func_decl(n, data),
    Stmt::VarDecl(n) => r.rewrite_var_decl_stmt(n, data),
  })
}

pub fn walk_arr_expr<D, R: Rewriter<D> + ?Sized>(r: &mut R, node: Node<ArrExpr>, data: &D) -> Expr {
  Expr::Arr(node.map_stx(|s| ArrExpr {
    elements: rewrite_exprs(r, s.elements, data),
  }))
}

pub fn walk_binary_expr<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<BinaryExpr>,
  data: &D,
) -> Expr {
  Expr::Binary(node.map_stx(|s| BinaryExpr {
    operator: s.operator,
    left: r.rewrite_expr(s.left, data),
    right: r.rewrite_expr(s.right, data),
  }))
}

pub fn walk_call_expr<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<CallExpr>,
  data: &D,
) -> Expr {
  Expr::Call(node.map_stx(|s| CallExpr {
    callee: r.rewrite_expr(s.callee, data),
    arguments: rewrite_exprs(r, s.arguments, data),
  }))
}

pub fn walk_comma_expr<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<CommaExpr>,
  data: &D,
) -> Expr {
  Expr::Comma(node.map_stx(|s| CommaExpr {
    expressions: rewrite_exprs(r, s.expressions, data),
  }))
}

pub fn walk_cond_expr<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<CondExpr>,
  data: &D,
) -> Expr {
  Expr::Cond(node.map_stx(|s| CondExpr {
    test: r.rewrite_expr(s.test, data),
    consequent: r.rewrite_expr(s.consequent, data),
    alternate: r.rewrite_expr(s.alternate, data),
  }))
}

pub fn walk_func_expr<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<FuncExpr>,
  data: &D,
) -> Expr {
  Expr::Func(node.map_stx(|s| FuncExpr {
    name: s.name,
    parameters: s.parameters,
    body: r.rewrite_stmts(s.body, data),
    scope: s.scope,
  }))
}

pub fn walk_member_expr<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<MemberExpr>,
  data: &D,
) -> Expr {
  Expr::Member(node.map_stx(|s| MemberExpr {
    object: r.rewrite_expr(s.object, data),
    member: s.member,
  }))
}

pub fn walk_new_expr<D, R: Rewriter<D> + ?Sized>(r: &mut R, node: Node<NewExpr>, data: &D) -> Expr {
  Expr::New(node.map_stx(|s| NewExpr {
    constructor: r.rewrite_expr(s.constructor, data),
    arguments: rewrite_exprs(r, s.arguments, data),
  }))
}

pub fn walk_obj_expr<D, R: Rewriter<D> + ?Sized>(r: &mut R, node: Node<ObjExpr>, data: &D) -> Expr {
  Expr::Obj(node.map_stx(|s| ObjExpr {
    members: s
      .members
      .into_iter()
      .map(|m| {
        m.map_stx(|m| ObjMember {
          key: m.key,
          value: r.rewrite_expr(m.value, data),
        })
      })
      .collect(),
  }))
}

pub fn walk_unary_expr<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<UnaryExpr>,
  data: &D,
) -> Expr {
  Expr::Unary(node.map_stx(|s| UnaryExpr {
    operator: s.operator,
    argument: r.rewrite_expr(s.argument, data),
  }))
}

pub fn walk_block<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<BlockStmt>,
  data: &D,
) -> Node<BlockStmt> {
  node.map_stx(|s| BlockStmt {
    body: r.rewrite_stmts(s.body, data),
    merge_with_parent: s.merge_with_parent,
  })
}

pub fn walk_do_while_stmt<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<DoWhileStmt>,
  data: &D,
) -> Stmt {
  Stmt::DoWhile(node.map_stx(|s| DoWhileStmt {
    body: r.rewrite_stmt(s.body, data),
    condition: r.rewrite_expr(s.condition, data),
  }))
}

pub fn walk_expr_stmt<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<ExprStmt>,
  data: &D,
) -> Stmt {
  Stmt::Expr(node.map_stx(|s| ExprStmt {
    expr: r.rewrite_expr(s.expr, data),
  }))
}

pub fn walk_for_stmt<D, R: Rewriter<D> + ?Sized>(r: &mut R, node: Node<ForStmt>, data: &D) -> Stmt {
  Stmt::For(node.map_stx(|s| ForStmt {
    init: match s.init {
      ForInit::None => ForInit::None,
      ForInit::Expr(e) => ForInit::Expr(r.rewrite_expr(e, data)),
      ForInit::Decl(d) => ForInit::Decl(r.rewrite_var_decl(d, data)),
    },
    condition: s.condition.map(|e| r.rewrite_expr(e, data)),
    update: s.update.map(|e| r.rewrite_expr(e, data)),
    body: r.rewrite_stmt(s.body, data),
  }))
}

pub fn walk_for_in_stmt<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<ForInStmt>,
  data: &D,
) -> Stmt {
  Stmt::ForIn(node.map_stx(|s| ForInStmt {
    variable: s.variable,
    declared: s.declared,
    object: r.rewrite_expr(s.object, data),
    body: r.rewrite_stmt(s.body, data),
  }))
}

pub fn walk_if_stmt<D, R: Rewriter<D> + ?Sized>(r: &mut R, node: Node<IfStmt>, data: &D) -> Stmt {
  Stmt::If(node.map_stx(|s| IfStmt {
    test: r.rewrite_expr(s.test, data),
    consequent: r.rewrite_stmt(s.consequent, data),
    alternate: s.alternate.map(|a| r.rewrite_stmt(a, data)),
  }))
}

pub fn walk_label_stmt<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<LabelStmt>,
  data: &D,
) -> Stmt {
  Stmt::Label(node.map_stx(|s| LabelStmt {
    label: s.label,
    statement: r.rewrite_stmt(s.statement, data),
  }))
}

pub fn walk_return_stmt<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<ReturnStmt>,
  data: &D,
) -> Stmt {
  Stmt::Return(node.map_stx(|s| ReturnStmt {
    value: s.value.map(|v| r.rewrite_expr(v, data)),
  }))
}

pub fn walk_switch_stmt<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<SwitchStmt>,
  data: &D,
) -> Stmt {
  Stmt::Switch(node.map_stx(|s| SwitchStmt {
    test: r.rewrite_expr(s.test, data),
    branches: s
      .branches
      .into_iter()
      .map(|b| r.rewrite_switch_branch(b, data))
      .collect(),
  }))
}

pub fn walk_switch_branch<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<SwitchBranch>,
  data: &D,
) -> Node<SwitchBranch> {
  node.map_stx(|s| SwitchBranch {
    case: s.case.map(|c| r.rewrite_expr(c, data)),
    body: r.rewrite_stmts(s.body, data),
  })
}

pub fn walk_throw_stmt<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<ThrowStmt>,
  data: &D,
) -> Stmt {
  Stmt::Throw(node.map_stx(|s| ThrowStmt {
    value: r.rewrite_expr(s.value, data),
  }))
}

pub fn walk_try_stmt<D, R: Rewriter<D> + ?Sized>(r: &mut R, node: Node<TryStmt>, data: &D) -> Stmt {
  Stmt::Try(node.map_stx(|s| TryStmt {
    wrapped: r.rewrite_block(s.wrapped, data),
    catch: s.catch.map(|c| r.rewrite_catch_block(c, data)),
    finally: s.finally.map(|f| r.rewrite_block(f, data)),
  }))
}

pub fn walk_catch_block<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<CatchBlock>,
  data: &D,
) -> Node<CatchBlock> {
  node.map_stx(|s| CatchBlock {
    parameter: s.parameter,
    body: r.rewrite_stmts(s.body, data),
    scope: s.scope,
  })
}

pub fn walk_while_stmt<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<WhileStmt>,
  data: &D,
) -> Stmt {
  Stmt::While(node.map_stx(|s| WhileStmt {
    condition: r.rewrite_expr(s.condition, data),
    body: r.rewrite_stmt(s.body, data),
  }))
}

pub fn walk_func_decl<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<FuncDecl>,
  data: &D,
) -> Stmt {
  Stmt::FunctionDecl(node.map_stx(|s| FuncDecl {
    name: s.name,
    parameters: s.parameters,
    body: r.rewrite_stmts(s.body, data),
    scope: s.scope,
  }))
}

pub fn walk_var_decl<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<VarDecl>,
  data: &D,
) -> Node<VarDecl> {
  node.map_stx(|s| VarDecl {
    declarators: s
      .declarators
      .into_iter()
      .map(|d| r.rewrite_var_declarator(d, data))
      .collect(),
  })
}

pub fn walk_var_declarator<D, R: Rewriter<D> + ?Sized>(
  r: &mut R,
  node: Node<VarDeclarator>,
  data: &D,
) -> Node<VarDeclarator> {
  node.map_stx(|s| VarDeclarator {
    name: s.name,
    initializer: s.initializer.map(|i| r.rewrite_expr(i, data)),
  })
}
