use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::error::{IrError, IrErrorType, IrResult};
use crate::ident::Ident;
use crate::scope::ScopeId;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A named function statement. The name is a binding of the enclosing scope; the parameters
/// and body belong to the function's own scope.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
  #[drive(skip)]
  pub name: Ident,
  #[drive(skip)]
  pub parameters: Vec<Ident>,
  pub body: Vec<Node<Stmt>>,
  // Assigned by scope analysis.
  #[drive(skip)]
  #[serde(skip)]
  pub scope: Option<ScopeId>,
}

// Never empty. `var a = 1, b;` is two declarators.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct VarDecl {
  pub declarators: Vec<Node<VarDeclarator>>,
}

impl VarDecl {
  pub fn new(declarators: Vec<Node<VarDeclarator>>) -> IrResult<VarDecl> {
    if declarators.is_empty() {
      return Err(IrError::new(
        IrErrorType::EmptySequence("variable declaration"),
        "no declarators",
      ));
    }
    Ok(VarDecl { declarators })
  }
}

#[derive(Deserialize)]
struct VarDeclRaw {
  declarators: Vec<Node<VarDeclarator>>,
}

impl<'de> Deserialize<'de> for VarDecl {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = VarDeclRaw::deserialize(deserializer)?;
    VarDecl::new(raw.declarators).map_err(D::Error::custom)
  }
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct VarDeclarator {
  #[drive(skip)]
  pub name: Ident,
  pub initializer: Option<Node<Expr>>,
}
