pub mod lit;

use derive_more::derive::From;
use derive_visitor::{Drive, DriveMut};
use lit::{LitBoolExpr, LitNullExpr, LitNumExpr, LitRegexExpr, LitStrExpr};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{IrError, IrErrorType, IrResult};
use crate::ident::{is_identifier_name, Ident};
use crate::operator::{BinaryOperator, UnaryOperator};
use crate::scope::ScopeId;

use super::{node::Node, stmt::Stmt};

// We must wrap each variant with Node<T> as otherwise we won't be able to visit Node<T> instead of just T.
#[derive(Clone, Debug, Drive, DriveMut, From, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$t")]
pub enum Expr {
  Arr(Node<ArrExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  Comma(Node<CommaExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  Member(Node<MemberExpr>),
  New(Node<NewExpr>),
  Obj(Node<ObjExpr>),
  This(Node<ThisExpr>),
  TypeRef(Node<TypeRefExpr>),
  Unary(Node<UnaryExpr>),

  // Literals.
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitRegex(Node<LitRegexExpr>),
  LitStr(Node<LitStrExpr>),
}

impl Expr {
  pub fn number_value(&self) -> IrResult<f64> {
    match self {
      Expr::LitNum(n) => Ok(n.stx.value.0),
      other => Err(IrError::new(IrErrorType::WrongLiteralKind("number"), other.kind_name())),
    }
  }

  pub fn string_value(&self) -> IrResult<&str> {
    match self {
      Expr::LitStr(s) => Ok(&s.stx.value),
      other => Err(IrError::new(IrErrorType::WrongLiteralKind("string"), other.kind_name())),
    }
  }

  pub fn bool_value(&self) -> IrResult<bool> {
    match self {
      Expr::LitBool(b) => Ok(b.stx.value),
      other => Err(IrError::new(IrErrorType::WrongLiteralKind("boolean"), other.kind_name())),
    }
  }

  pub fn kind_name(&self) -> &'static str {
    match self {
      Expr::Arr(_) => "array literal",
      Expr::Binary(_) => "binary expression",
      Expr::Call(_) => "call expression",
      Expr::Comma(_) => "comma expression",
      Expr::Cond(_) => "conditional expression",
      Expr::Func(_) => "function expression",
      Expr::Id(_) => "identifier",
      Expr::Member(_) => "member expression",
      Expr::New(_) => "new expression",
      Expr::Obj(_) => "object literal",
      Expr::This(_) => "this",
      Expr::TypeRef(_) => "type reference",
      Expr::Unary(_) => "unary expression",
      Expr::LitBool(_) => "boolean literal",
      Expr::LitNull(_) => "null literal",
      Expr::LitNum(_) => "number literal",
      Expr::LitRegex(_) => "regexp literal",
      Expr::LitStr(_) => "string literal",
    }
  }
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct ArrExpr {
  pub elements: Vec<Node<Expr>>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
  #[drive(skip)]
  pub operator: BinaryOperator,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<Expr>>,
}

// Never empty.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct CommaExpr {
  pub expressions: Vec<Node<Expr>>,
}

impl CommaExpr {
  pub fn new(expressions: Vec<Node<Expr>>) -> IrResult<CommaExpr> {
    if expressions.is_empty() {
      return Err(IrError::new(
        IrErrorType::EmptySequence("comma expression"),
        "no expressions",
      ));
    }
    Ok(CommaExpr { expressions })
  }
}

#[derive(Deserialize)]
struct CommaExprRaw {
  expressions: Vec<Node<Expr>>,
}

impl<'de> Deserialize<'de> for CommaExpr {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = CommaExprRaw::deserialize(deserializer)?;
    CommaExpr::new(raw.expressions).map_err(D::Error::custom)
  }
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

/// A function definition expression. Its name, when present, is bound inside the function.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct FuncExpr {
  #[drive(skip)]
  pub name: Option<Ident>,
  #[drive(skip)]
  pub parameters: Vec<Ident>,
  pub body: Vec<Node<Stmt>>,
  // Assigned by scope analysis.
  #[drive(skip)]
  #[serde(skip)]
  pub scope: Option<ScopeId>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub name: Ident,
}

// Dedicated type for `a.b`: the member is a property name, not a variable usage, so analyses
// and the minimizer must never treat it as an identifier reference.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct MemberExpr {
  pub object: Node<Expr>,
  #[drive(skip)]
  pub member: String,
}

impl MemberExpr {
  pub fn new(object: Node<Expr>, member: String) -> IrResult<MemberExpr> {
    if !is_identifier_name(&member) {
      return Err(IrError::new(IrErrorType::InvalidIdentifier, member));
    }
    Ok(MemberExpr { object, member })
  }
}

#[derive(Deserialize)]
struct MemberExprRaw {
  object: Node<Expr>,
  member: String,
}

impl<'de> Deserialize<'de> for MemberExpr {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = MemberExprRaw::deserialize(deserializer)?;
    MemberExpr::new(raw.object, raw.member).map_err(D::Error::custom)
  }
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct NewExpr {
  pub constructor: Node<Expr>,
  pub arguments: Vec<Node<Expr>>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct ObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct ObjMember {
  #[drive(skip)]
  pub key: String,
  pub value: Node<Expr>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct ThisExpr {}

/// Opaque handle into the front end's type system.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct TypeHandle(pub u64);

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct TypeRefExpr {
  #[drive(skip)]
  pub handle: TypeHandle,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
  #[drive(skip)]
  pub operator: UnaryOperator,
  pub argument: Node<Expr>,
}

#[cfg(test)]
mod tests {
  use crate::build;
  use crate::error::IrErrorType;

  #[test]
  fn typed_literal_accessors_reject_other_kinds() {
    assert_eq!(build::num(2.5).stx.number_value().unwrap(), 2.5);
    assert_eq!(build::str_lit("x").stx.string_value().unwrap(), "x");
    let err = build::str_lit("x").stx.number_value().unwrap_err();
    assert_eq!(err.typ, IrErrorType::WrongLiteralKind("number"));
    assert_eq!(err.detail, "string literal");
  }
}
