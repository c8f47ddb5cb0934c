use derive_visitor::{Drive, DriveMut};
use serde::{Deserialize, Serialize};

use crate::num::JsNumber;

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct LitNullExpr {}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct LitNumExpr {
  #[drive(skip)]
  pub value: JsNumber,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct LitRegexExpr {
  // Without delimiter slashes.
  #[drive(skip)]
  pub pattern: String,
  #[drive(skip)]
  pub flags: String,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize, Deserialize)]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
}
