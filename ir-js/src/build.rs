//! Validating constructors for IR nodes, the way a front end is expected to create trees.
//!
//! Identifiers arrive already validated as [`Ident`]; the fallible helpers here check the
//! remaining structural invariants (non-empty sequences, well-formed member names, `try`
//! handlers). Every helper returns a node without a location; use [`Node::at`] to attach one.

use crate::ast::expr::lit::{LitBoolExpr, LitNullExpr, LitNumExpr, LitRegexExpr, LitStrExpr};
use crate::ast::expr::{
  ArrExpr, BinaryExpr, CallExpr, CommaExpr, CondExpr, Expr, FuncExpr, IdExpr, MemberExpr,
  NewExpr, ObjExpr, ObjMember, ThisExpr, TypeHandle, TypeRefExpr, UnaryExpr,
};
use crate::ast::node::Node;
use crate::ast::stmt::decl::{FuncDecl, VarDecl, VarDeclarator};
use crate::ast::stmt::{
  BlockStmt, BreakStmt, CatchBlock, CommentStmt, ContinueStmt, DoWhileStmt, ExprStmt, ForInStmt,
  ForInit, ForStmt, IfStmt, LabelStmt, ReturnStmt, Stmt, SwitchBranch, SwitchStmt, ThrowStmt,
  TryStmt, WhileStmt,
};
use crate::ast::stx::TopLevel;
use crate::error::IrResult;
use crate::ident::Ident;
use crate::num::JsNumber;
use crate::operator::{BinaryOperator, UnaryOperator};
use derive_visitor::{Drive, DriveMut};

fn expr<S>(stx: S) -> Node<Expr>
where
  Expr: From<Node<S>>,
  S: Drive + DriveMut,
{
  Node::new(None, stx).into_wrapped()
}

fn stmt<S>(stx: S) -> Node<Stmt>
where
  Stmt: From<Node<S>>,
  S: Drive + DriveMut,
{
  Node::new(None, stx).into_wrapped()
}

pub fn top_level(body: Vec<Node<Stmt>>) -> Node<TopLevel> {
  Node::new(None, TopLevel { body })
}

// Expressions.

pub fn id(name: Ident) -> Node<Expr> {
  expr(IdExpr { name })
}

pub fn this() -> Node<Expr> {
  expr(ThisExpr {})
}

pub fn num(value: f64) -> Node<Expr> {
  expr(LitNumExpr {
    value: JsNumber(value),
  })
}

pub fn str_lit(value: impl Into<String>) -> Node<Expr> {
  expr(LitStrExpr {
    value: value.into(),
  })
}

pub fn bool_lit(value: bool) -> Node<Expr> {
  expr(LitBoolExpr { value })
}

pub fn null() -> Node<Expr> {
  expr(LitNullExpr {})
}

pub fn regex(pattern: impl Into<String>, flags: impl Into<String>) -> Node<Expr> {
  expr(LitRegexExpr {
    pattern: pattern.into(),
    flags: flags.into(),
  })
}

pub fn type_ref(handle: TypeHandle) -> Node<Expr> {
  expr(TypeRefExpr { handle })
}

pub fn array(elements: Vec<Node<Expr>>) -> Node<Expr> {
  expr(ArrExpr { elements })
}

pub fn object(members: Vec<(String, Node<Expr>)>) -> Node<Expr> {
  expr(ObjExpr {
    members: members
      .into_iter()
      .map(|(key, value)| Node::new(None, ObjMember { key, value }))
      .collect(),
  })
}

pub fn binary(operator: BinaryOperator, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  expr(BinaryExpr {
    operator,
    left,
    right,
  })
}

pub fn assign(target: Node<Expr>, value: Node<Expr>) -> Node<Expr> {
  binary(BinaryOperator::Assign, target, value)
}

pub fn index(object: Node<Expr>, key: Node<Expr>) -> Node<Expr> {
  binary(BinaryOperator::Index, object, key)
}

pub fn unary(operator: UnaryOperator, argument: Node<Expr>) -> Node<Expr> {
  expr(UnaryExpr { operator, argument })
}

pub fn cond(test: Node<Expr>, consequent: Node<Expr>, alternate: Node<Expr>) -> Node<Expr> {
  expr(CondExpr {
    test,
    consequent,
    alternate,
  })
}

pub fn comma(expressions: Vec<Node<Expr>>) -> IrResult<Node<Expr>> {
  Ok(expr(CommaExpr::new(expressions)?))
}

pub fn member(object: Node<Expr>, member: impl Into<String>) -> IrResult<Node<Expr>> {
  Ok(expr(MemberExpr::new(object, member.into())?))
}

pub fn call(callee: Node<Expr>, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  expr(CallExpr { callee, arguments })
}

pub fn new(constructor: Node<Expr>, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  expr(NewExpr {
    constructor,
    arguments,
  })
}

pub fn func(name: Option<Ident>, parameters: Vec<Ident>, body: Vec<Node<Stmt>>) -> Node<Expr> {
  expr(FuncExpr {
    name,
    parameters,
    body,
    scope: None,
  })
}

// Statements.

pub fn block(body: Vec<Node<Stmt>>) -> Node<Stmt> {
  stmt(BlockStmt {
    body,
    merge_with_parent: false,
  })
}

/// An empty block that disappears when its parent statement list is rewritten.
pub fn merging_block(body: Vec<Node<Stmt>>) -> Node<Stmt> {
  stmt(BlockStmt {
    body,
    merge_with_parent: true,
  })
}

pub fn expr_stmt(expr: Node<Expr>) -> Node<Stmt> {
  stmt(ExprStmt { expr })
}

pub fn var(name: Ident, initializer: Option<Node<Expr>>) -> Node<Stmt> {
  stmt(var_decl_single(name, initializer))
}

pub fn vars(declarators: Vec<(Ident, Option<Node<Expr>>)>) -> IrResult<Node<Stmt>> {
  Ok(stmt(var_decl(declarators)?))
}

fn var_decl_single(name: Ident, initializer: Option<Node<Expr>>) -> VarDecl {
  VarDecl {
    declarators: vec![Node::new(None, VarDeclarator { name, initializer })],
  }
}

fn var_decl(declarators: Vec<(Ident, Option<Node<Expr>>)>) -> IrResult<VarDecl> {
  VarDecl::new(
    declarators
      .into_iter()
      .map(|(name, initializer)| Node::new(None, VarDeclarator { name, initializer }))
      .collect(),
  )
}

pub fn for_init_decl(declarators: Vec<(Ident, Option<Node<Expr>>)>) -> IrResult<ForInit> {
  Ok(ForInit::Decl(Node::new(None, var_decl(declarators)?)))
}

pub fn if_(test: Node<Expr>, consequent: Node<Stmt>, alternate: Option<Node<Stmt>>) -> Node<Stmt> {
  stmt(IfStmt {
    test,
    consequent,
    alternate,
  })
}

pub fn while_(condition: Node<Expr>, body: Node<Stmt>) -> Node<Stmt> {
  stmt(WhileStmt { condition, body })
}

pub fn do_while(body: Node<Stmt>, condition: Node<Expr>) -> Node<Stmt> {
  stmt(DoWhileStmt { body, condition })
}

pub fn for_(
  init: ForInit,
  condition: Option<Node<Expr>>,
  update: Option<Node<Expr>>,
  body: Node<Stmt>,
) -> Node<Stmt> {
  stmt(ForStmt {
    init,
    condition,
    update,
    body,
  })
}

pub fn for_in(variable: Ident, declared: bool, object: Node<Expr>, body: Node<Stmt>) -> Node<Stmt> {
  stmt(ForInStmt {
    variable,
    declared,
    object,
    body,
  })
}

pub fn try_(
  wrapped: Vec<Node<Stmt>>,
  catch: Option<(Ident, Vec<Node<Stmt>>)>,
  finally: Option<Vec<Node<Stmt>>>,
) -> IrResult<Node<Stmt>> {
  let block = |body| {
    Node::new(None, BlockStmt {
      body,
      merge_with_parent: false,
    })
  };
  let catch = catch.map(|(parameter, body)| {
    Node::new(None, CatchBlock {
      parameter,
      body,
      scope: None,
    })
  });
  Ok(stmt(TryStmt::new(block(wrapped), catch, finally.map(block))?))
}

pub fn throw(value: Node<Expr>) -> Node<Stmt> {
  stmt(ThrowStmt { value })
}

pub fn ret(value: Option<Node<Expr>>) -> Node<Stmt> {
  stmt(ReturnStmt { value })
}

pub fn break_(label: Option<Ident>) -> Node<Stmt> {
  stmt(BreakStmt { label })
}

pub fn continue_(label: Option<Ident>) -> Node<Stmt> {
  stmt(ContinueStmt { label })
}

pub fn label(label: Ident, statement: Node<Stmt>) -> Node<Stmt> {
  stmt(LabelStmt { label, statement })
}

pub fn switch(test: Node<Expr>, branches: Vec<(Option<Node<Expr>>, Vec<Node<Stmt>>)>) -> Node<Stmt> {
  stmt(SwitchStmt {
    test,
    branches: branches
      .into_iter()
      .map(|(case, body)| Node::new(None, SwitchBranch { case, body }))
      .collect(),
  })
}

pub fn func_decl(name: Ident, parameters: Vec<Ident>, body: Vec<Node<Stmt>>) -> Node<Stmt> {
  stmt(FuncDecl {
    name,
    parameters,
    body,
    scope: None,
  })
}

pub fn comment(text: impl Into<String>) -> Node<Stmt> {
  stmt(CommentStmt { text: text.into() })
}
