use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a declaration scope (function expression, function statement or catch
/// block). Assigned by scope analysis and stored on the scope node, so it survives rewrites
/// that rebuild the tree.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
  /// The top-level program.
  pub const ROOT: ScopeId = ScopeId(0);

  pub fn index(self) -> usize {
    self.0 as usize
  }

  pub fn is_root(self) -> bool {
    self == ScopeId::ROOT
  }
}

impl fmt::Display for ScopeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "scope#{}", self.0)
  }
}
