use emit_js::EmitError;
use ir_js::scope::ScopeId;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug)]
pub enum MinifyError {
  /// A function or catch node has no scope id; `symbol_js::analyze` was not run on this tree.
  UnanalyzedScope,
  /// A scope id missing from the analysis tables, e.g. an analysis of a different tree.
  UnknownScope(ScopeId),
  Emit(EmitError),
}

impl Display for MinifyError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      MinifyError::UnanalyzedScope => write!(f, "tree has not been through scope analysis"),
      MinifyError::UnknownScope(scope) => write!(f, "{scope} is not in the scope analysis"),
      MinifyError::Emit(err) => write!(f, "emit failed: {err}"),
    }
  }
}

impl Error for MinifyError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      MinifyError::Emit(err) => Some(err),
      _ => None,
    }
  }
}

impl From<EmitError> for MinifyError {
  fn from(value: EmitError) -> Self {
    MinifyError::Emit(value)
  }
}
