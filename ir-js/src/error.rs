use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;

/// A stable classification of contract violations detected while constructing IR nodes.
///
/// Diagnostic codes (prefix `IR`) are assigned per variant and are stable:
/// - `IR0001`: [`IrErrorType::InvalidIdentifier`]
/// - `IR0002`: [`IrErrorType::ReservedWord`]
/// - `IR0003`: [`IrErrorType::EmptySequence`]
/// - `IR0004`: [`IrErrorType::MissingHandler`]
/// - `IR0005`: [`IrErrorType::WrongLiteralKind`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum IrErrorType {
  InvalidIdentifier,
  ReservedWord,
  EmptySequence(&'static str),
  MissingHandler,
  WrongLiteralKind(&'static str),
}

#[derive(Clone)]
pub struct IrError {
  pub typ: IrErrorType,
  // The offending spelling or a short description of the node involved.
  pub detail: String,
}

impl IrError {
  pub fn new(typ: IrErrorType, detail: impl Into<String>) -> IrError {
    IrError {
      typ,
      detail: detail.into(),
    }
  }
}

impl Debug for IrError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} [{}]", self, self.typ.code())
  }
}

impl Display for IrError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {:?}", self.typ.message(), self.detail)
  }
}

impl Error for IrError {}

impl PartialEq for IrError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for IrError {}

pub type IrResult<T> = Result<T, IrError>;

impl IrErrorType {
  /// Stable diagnostic code for this error variant.
  pub fn code(&self) -> &'static str {
    match self {
      IrErrorType::InvalidIdentifier => "IR0001",
      IrErrorType::ReservedWord => "IR0002",
      IrErrorType::EmptySequence(_) => "IR0003",
      IrErrorType::MissingHandler => "IR0004",
      IrErrorType::WrongLiteralKind(_) => "IR0005",
    }
  }

  pub fn message(&self) -> String {
    match self {
      IrErrorType::InvalidIdentifier => "invalid identifier".into(),
      IrErrorType::ReservedWord => "reserved word used as identifier".into(),
      IrErrorType::EmptySequence(what) => format!("{} requires at least one element", what),
      IrErrorType::MissingHandler => "try statement requires a catch or finally block".into(),
      IrErrorType::WrongLiteralKind(expected) => format!("expected {} literal", expected),
    }
  }
}
