use crate::error::IrError;
use crate::error::IrErrorType;
use crate::error::IrResult;
use ahash::HashSet;
use ahash::HashSetExt;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Words that can never be used as a binding or reference name: keywords, future reserved
/// words (including the strict-mode ones) and the literal keywords.
pub static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  let mut set = HashSet::new();
  for word in [
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
  ] {
    set.insert(word);
  }
  set
});

pub fn is_reserved_word(name: &str) -> bool {
  RESERVED_WORDS.contains(name)
}

#[inline]
pub fn is_id_start(c: char) -> bool {
  c == '$' || c == '_' || c.is_ascii_alphabetic() || (!c.is_ascii() && c.is_alphabetic())
}

#[inline]
pub fn is_id_continue(c: char) -> bool {
  is_id_start(c) || c.is_ascii_digit() || (!c.is_ascii() && c.is_alphanumeric())
}

/// Whether `name` is lexically an IdentifierName. Reserved words are IdentifierNames too,
/// which is what member access and object keys accept.
pub fn is_identifier_name(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(c) if is_id_start(c) => chars.all(is_id_continue),
    _ => false,
  }
}

/// A validated identifier usable as a binding or a reference.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ident(String);

impl Ident {
  pub fn new(name: impl Into<String>) -> IrResult<Ident> {
    let name = name.into();
    if !is_identifier_name(&name) {
      return Err(IrError::new(IrErrorType::InvalidIdentifier, name));
    }
    if is_reserved_word(&name) {
      return Err(IrError::new(IrErrorType::ReservedWord, name));
    }
    Ok(Ident(name))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Deref for Ident {
  type Target = str;

  fn deref(&self) -> &str {
    &self.0
  }
}

impl Borrow<str> for Ident {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Ident {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl fmt::Display for Ident {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl TryFrom<String> for Ident {
  type Error = IrError;

  fn try_from(value: String) -> IrResult<Ident> {
    Ident::new(value)
  }
}

impl TryFrom<&str> for Ident {
  type Error = IrError;

  fn try_from(value: &str) -> IrResult<Ident> {
    Ident::new(value)
  }
}

impl From<Ident> for String {
  fn from(value: Ident) -> String {
    value.0
  }
}

#[cfg(test)]
mod tests {
  use super::is_identifier_name;
  use super::Ident;
  use crate::error::IrErrorType;

  #[test]
  fn accepts_plain_identifiers() {
    for name in ["a", "$", "_private", "camelCase9", "é"] {
      assert_eq!(Ident::new(name).unwrap().as_str(), name);
    }
  }

  #[test]
  fn rejects_malformed_names() {
    for name in ["", "9lives", "a-b", "a b", "a.b"] {
      let err = Ident::new(name).unwrap_err();
      assert_eq!(err.typ, IrErrorType::InvalidIdentifier, "{name}");
    }
  }

  #[test]
  fn rejects_reserved_words_but_allows_them_as_identifier_names() {
    assert_eq!(Ident::new("do").unwrap_err().typ, IrErrorType::ReservedWord);
    assert_eq!(Ident::new("null").unwrap_err().typ, IrErrorType::ReservedWord);
    assert!(is_identifier_name("do"));
    // Not reserved, merely well-known globals.
    assert!(Ident::new("undefined").is_ok());
    assert!(Ident::new("arguments").is_ok());
  }

  #[test]
  fn deserializing_validates() {
    let ok: Ident = serde_json::from_str("\"foo\"").unwrap();
    assert_eq!(ok.as_str(), "foo");
    assert!(serde_json::from_str::<Ident>("\"if\"").is_err());
  }
}
