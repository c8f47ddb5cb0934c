use crate::loc::Loc;
use derive_visitor::{Drive, DriveMut};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Debug, Formatter};

/// A syntax node plus the original source position it was compiled from.
///
/// For expressions and statements, the location on the outer `Node<Expr>` / `Node<Stmt>` is
/// the one formatters record in source maps; the wrapped variant node usually has none.
#[derive(Clone, PartialEq, Drive, DriveMut, Serialize, Deserialize)]
pub struct Node<S: Drive + DriveMut> {
  // Nodes created by rewrites have no counterpart in the original source, so this is optional.
  #[drive(skip)]
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loc: Option<Loc>,
  pub stx: Box<S>,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(loc: Option<Loc>, stx: S) -> Node<S> {
    Node {
      loc,
      stx: Box::new(stx),
    }
  }

  /// Sets the source location, replacing any previous one.
  pub fn at(mut self, loc: Loc) -> Node<S> {
    self.loc = Some(loc);
    self
  }

  /// Maps the syntax, keeping the location.
  pub fn map_stx<T: Drive + DriveMut, F: FnOnce(S) -> T>(self, f: F) -> Node<T> {
    Node {
      loc: self.loc,
      stx: Box::new(f(*self.stx)),
    }
  }

  /// Wraps the node inside an enum node (e.g. `Node<IdExpr>` into `Node<Expr>`) with the same
  /// location.
  pub fn into_wrapped<T: From<Node<S>> + Drive + DriveMut>(self) -> Node<T> {
    let loc = self.loc.clone();
    Node::new(loc, T::from(self))
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.stx.fmt(f)
  }
}

#[cfg(test)]
mod tests {
  use crate::ast::expr::{Expr, ThisExpr};
  use crate::ast::node::Node;
  use crate::loc::Loc;

  #[test]
  fn into_wrapped_keeps_location() {
    let this = Node::new(None, ThisExpr {}).at(Loc::new("a.cs", 3, 4));
    let expr: Node<Expr> = this.into_wrapped();
    assert_eq!(expr.loc, Some(Loc::new("a.cs", 3, 4)));
    assert!(matches!(expr.stx.as_ref(), Expr::This(inner) if inner.loc == expr.loc));
  }
}
