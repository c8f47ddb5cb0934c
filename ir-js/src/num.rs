use core::hash::Hash;
use core::hash::Hasher;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

// This provides Eq for f64. Equality is bitwise with every NaN collapsed into one, so `0` and
// `-0` differ, as their printed forms do.
#[derive(Copy, Clone, Debug)]
pub struct JsNumber(pub f64);

impl JsNumber {
  fn key(self) -> u64 {
    if self.0.is_nan() {
      f64::NAN.to_bits()
    } else {
      self.0.to_bits()
    }
  }
}

impl Display for JsNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let v = self.0;
    if v.is_nan() {
      f.write_str("NaN")
    } else if v.is_infinite() {
      f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" })
    } else if v == 0.0 && v.is_sign_negative() {
      f.write_str("-0")
    } else {
      write!(f, "{}", v)
    }
  }
}

impl PartialEq for JsNumber {
  fn eq(&self, other: &Self) -> bool {
    self.key() == other.key()
  }
}

impl Eq for JsNumber {}

impl Hash for JsNumber {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.key().hash(state);
  }
}

impl Serialize for JsNumber {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.0)
  }
}

impl<'de> Deserialize<'de> for JsNumber {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    f64::deserialize(deserializer).map(JsNumber)
  }
}
