use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A position in an original source file, as recorded in source maps.
///
/// Lines and columns are zero-based. The source URL is used verbatim; callers normalize path
/// separators before building locations.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Loc {
  pub source: Arc<str>,
  // Symbolic name of the original token, e.g. an identifier's pre-minification spelling.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<Arc<str>>,
  pub line: u32,
  pub column: u32,
}

impl Loc {
  pub fn new(source: impl Into<Arc<str>>, line: u32, column: u32) -> Loc {
    Loc {
      source: source.into(),
      name: None,
      line,
      column,
    }
  }

  pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Loc {
    self.name = Some(name.into());
    self
  }

  /// Whether both locations point at the same source position, ignoring the name.
  pub fn same_position(&self, other: &Loc) -> bool {
    self.source == other.source && self.line == other.line && self.column == other.column
  }
}
