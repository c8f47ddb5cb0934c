pub mod decl;

use decl::{FuncDecl, VarDecl};
use derive_more::derive::From;
use derive_visitor::{Drive, DriveMut};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{IrError, IrErrorType, IrResult};
use crate::ident::Ident;
use crate::scope::ScopeId;

use super::{expr::Expr, node::Node};

// We must wrap each variant with Node<T> as otherwise we won't be able to visit Node<T> instead of just T.
#[derive(Clone, Debug, Drive, DriveMut, From, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$t")]
pub enum Stmt {
  Block(Node<BlockStmt>),
  Break(Node<BreakStmt>),
  Comment(Node<CommentStmt>),
  Continue(Node<ContinueStmt>),
  DoWhile(Node<DoWhileStmt>),
  Expr(Node<ExprStmt>),
  For(Node<ForStmt>),
  ForIn(Node<ForInStmt>),
  If(Node<IfStmt>),
  Label(Node<LabelStmt>),
  Return(Node<ReturnStmt>),
  Switch(Node<SwitchStmt>),
  Throw(Node<ThrowStmt>),
  Try(Node<TryStmt>),
  While(Node<WhileStmt>),

  FunctionDecl(Node<FuncDecl>),
  VarDecl(Node<VarDecl>),
}

// A catch block is its own declaration scope, which starts at the parameter rather than at the
// braces, so it is not a BlockStmt.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct CatchBlock {
  #[drive(skip)]
  pub parameter: Ident,
  pub body: Vec<Node<Stmt>>,
  // Assigned by scope analysis.
  #[drive(skip)]
  #[serde(skip)]
  pub scope: Option<ScopeId>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct SwitchBranch {
  // If None, it's `default`.
  pub case: Option<Node<Expr>>,
  pub body: Vec<Node<Stmt>>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub enum ForInit {
  None,
  Expr(Node<Expr>),
  Decl(Node<VarDecl>),
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct BlockStmt {
  pub body: Vec<Node<Stmt>>,
  // Splice the statements into the enclosing statement list instead of opening a block.
  #[drive(skip)]
  #[serde(default)]
  pub merge_with_parent: bool,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct BreakStmt {
  #[drive(skip)]
  pub label: Option<Ident>,
}

/// Annotation carried through to the output; no runtime effect.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct CommentStmt {
  #[drive(skip)]
  pub text: String,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct ContinueStmt {
  #[drive(skip)]
  pub label: Option<Ident>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct DoWhileStmt {
  pub body: Node<Stmt>,
  pub condition: Node<Expr>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct ExprStmt {
  pub expr: Node<Expr>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
  pub init: ForInit,
  pub condition: Option<Node<Expr>>,
  pub update: Option<Node<Expr>>,
  pub body: Node<Stmt>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct ForInStmt {
  #[drive(skip)]
  pub variable: Ident,
  // `for (var x in o)` rather than `for (x in o)`.
  #[drive(skip)]
  pub declared: bool,
  pub object: Node<Expr>,
  pub body: Node<Stmt>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
  pub test: Node<Expr>,
  pub consequent: Node<Stmt>,
  pub alternate: Option<Node<Stmt>>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct LabelStmt {
  #[drive(skip)]
  pub label: Ident,
  pub statement: Node<Stmt>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
  pub value: Option<Node<Expr>>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct SwitchStmt {
  pub test: Node<Expr>,
  pub branches: Vec<Node<SwitchBranch>>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct ThrowStmt {
  pub value: Node<Expr>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct TryStmt {
  pub wrapped: Node<BlockStmt>,
  // One of these must be present.
  pub catch: Option<Node<CatchBlock>>,
  pub finally: Option<Node<BlockStmt>>,
}

impl TryStmt {
  pub fn new(
    wrapped: Node<BlockStmt>,
    catch: Option<Node<CatchBlock>>,
    finally: Option<Node<BlockStmt>>,
  ) -> IrResult<TryStmt> {
    if catch.is_none() && finally.is_none() {
      return Err(IrError::new(IrErrorType::MissingHandler, "try"));
    }
    Ok(TryStmt {
      wrapped,
      catch,
      finally,
    })
  }
}

#[derive(Deserialize)]
struct TryStmtRaw {
  wrapped: Node<BlockStmt>,
  #[serde(default)]
  catch: Option<Node<CatchBlock>>,
  #[serde(default)]
  finally: Option<Node<BlockStmt>>,
}

impl<'de> Deserialize<'de> for TryStmt {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = TryStmtRaw::deserialize(deserializer)?;
    TryStmt::new(raw.wrapped, raw.catch, raw.finally).map_err(D::Error::custom)
  }
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
  pub condition: Node<Expr>,
  pub body: Node<Stmt>,
}

#[cfg(test)]
mod tests {
  use super::Stmt;
  use crate::ast::node::Node;

  fn parse(json: &str) -> Result<Node<Stmt>, serde_json::Error> {
    serde_json::from_str::<Node<Stmt>>(json)
  }

  #[test]
  fn deserializing_applies_construction_checks() {
    let no_handler = r#"{"stx":{"$t":"Try","stx":{"wrapped":{"stx":{"body":[]}},"catch":null,"finally":null}}}"#;
    let err = parse(no_handler).unwrap_err();
    assert!(err.to_string().contains("catch or finally"), "{err}");

    let no_declarators = r#"{"stx":{"$t":"VarDecl","stx":{"declarators":[]}}}"#;
    assert!(parse(no_declarators).is_err());

    let empty_comma = r#"{"stx":{"$t":"Expr","stx":{"expr":{"stx":{"$t":"Comma","stx":{"expressions":[]}}}}}}"#;
    assert!(parse(empty_comma).is_err());

    let bad_member = r#"{"stx":{"$t":"Expr","stx":{"expr":{"stx":{"$t":"Member","stx":{"object":{"stx":{"$t":"Id","stx":{"name":"a"}}},"member":"b c"}}}}}}"#;
    let err = parse(bad_member).unwrap_err();
    assert!(err.to_string().contains("invalid identifier"), "{err}");

    let finally_only = r#"{"stx":{"$t":"Try","stx":{"wrapped":{"stx":{"body":[]}},"finally":{"stx":{"body":[]}}}}}"#;
    assert!(parse(finally_only).is_ok());
  }
}
