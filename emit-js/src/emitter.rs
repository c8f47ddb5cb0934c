//! Token-aware text buffer used by the formatter.
//!
//! Callers emit one token at a time through the typed helpers ([`Emitter::write_keyword`],
//! [`Emitter::write_identifier`], [`Emitter::write_number`], [`Emitter::write_punct`]); the
//! emitter inserts the single space needed when two tokens would otherwise lex as one
//! (`returnx`, `a+ +b`, `a- --b`, `a/ /re/`), and keeps `<!--` anywhere and `-->` at the start of
//! a line out of the output, since browsers read both as single-line HTML comments. It also tracks the generated line and column
//! (in UTF-16 code units, as source maps count them) and, when a source map is being built,
//! records mappings at the start of the next token.

use crate::source_map::SourceMapBuilder;
use ahash::HashMap;
use ir_js::ast::expr::TypeHandle;
use ir_js::loc::Loc;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// Controls how the emitter inserts whitespace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmitMode {
  /// Only the whitespace needed to keep tokens apart.
  #[default]
  Minified,
  /// One statement per line, two-space indentation and spaces around operators.
  Pretty,
}

/// Options for configuring output.
#[derive(Clone, Debug, Default)]
pub struct EmitOptions {
  pub mode: EmitMode,
  /// Text written in place of each type reference placeholder.
  pub type_names: HashMap<TypeHandle, String>,
}

impl EmitOptions {
  pub fn with_mode(mut self, mode: EmitMode) -> EmitOptions {
    self.mode = mode;
    self
  }

  pub fn with_type_name(mut self, handle: TypeHandle, name: impl Into<String>) -> EmitOptions {
    self.type_names.insert(handle, name.into());
    self
  }
}

#[derive(Debug)]
pub enum EmitErrorKind {
  /// A type reference placeholder with no entry in [`EmitOptions::type_names`].
  UnresolvedTypeRef(TypeHandle),
  Fmt(fmt::Error),
}

#[derive(Debug)]
pub struct EmitError {
  pub kind: EmitErrorKind,
  // Source location of the innermost located node being emitted.
  pub loc: Option<Loc>,
}

impl EmitError {
  pub(crate) fn unresolved_type_ref(handle: TypeHandle) -> Self {
    Self {
      kind: EmitErrorKind::UnresolvedTypeRef(handle),
      loc: None,
    }
  }

  pub(crate) fn with_loc(mut self, loc: Option<&Loc>) -> Self {
    if self.loc.is_none() {
      self.loc = loc.cloned();
    }
    self
  }
}

impl From<fmt::Error> for EmitError {
  fn from(value: fmt::Error) -> Self {
    Self {
      kind: EmitErrorKind::Fmt(value),
      loc: None,
    }
  }
}

impl Display for EmitError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.kind {
      EmitErrorKind::UnresolvedTypeRef(handle) => {
        write!(f, "unresolved type reference {}", handle.0)?
      }
      EmitErrorKind::Fmt(err) => write!(f, "formatting failed: {err}")?,
    };
    if let Some(loc) = &self.loc {
      write!(f, " at {}:{}:{}", loc.source, loc.line + 1, loc.column + 1)?;
    };
    Ok(())
  }
}

impl Error for EmitError {}

pub type EmitResult<T = ()> = Result<T, EmitError>;

pub(crate) fn with_node_context<T>(
  loc: Option<&Loc>,
  f: impl FnOnce() -> EmitResult<T>,
) -> EmitResult<T> {
  f().map_err(|err| err.with_loc(loc))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
  None,
  Word,
  Number,
  Plus,
  PlusPlus,
  Minus,
  MinusMinus,
  Slash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
  Word,
  Number,
  Plus,
  PlusPlus,
  Minus,
  MinusMinus,
  // Punctuation and literals; classified by their first and last bytes.
  Other,
}

/// How far the end of the output is into `<!--`, or into `-->` at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HtmlStart {
  // Only whitespace since the last line break.
  LineStart,
  Other,
  Lt,
  LtBang,
  LtBangDash,
  Dash,
  DashDash,
}

#[derive(Debug)]
pub struct Emitter {
  out: String,
  mode: EmitMode,
  trailing: Boundary,
  html_start: HtmlStart,
  line: u32,
  column: u32,
  indent: usize,
  map: Option<SourceMapBuilder>,
  // Mapping waiting for the next token, so it lands after any separating space. Of several
  // marks made before one token, the last (innermost node) wins.
  pending: Option<Option<Loc>>,
}

impl Emitter {
  pub fn new(mode: EmitMode) -> Self {
    Emitter {
      out: String::new(),
      mode,
      trailing: Boundary::None,
      html_start: HtmlStart::LineStart,
      line: 0,
      column: 0,
      indent: 0,
      map: None,
      pending: None,
    }
  }

  /// An emitter that records mappings into a fresh [`SourceMapBuilder`].
  pub fn with_source_map(mode: EmitMode) -> Self {
    let mut emitter = Emitter::new(mode);
    emitter.map = Some(SourceMapBuilder::new());
    emitter
  }

  pub fn mode(&self) -> EmitMode {
    self.mode
  }

  pub fn is_pretty(&self) -> bool {
    self.mode == EmitMode::Pretty
  }

  pub fn as_str(&self) -> &str {
    &self.out
  }

  /// Zero-based generated line and UTF-16 column of the end of the output.
  pub fn position(&self) -> (u32, u32) {
    (self.line, self.column)
  }

  pub fn finish(mut self) -> (String, Option<SourceMapBuilder>) {
    self.flush_pending();
    (self.out, self.map)
  }

  /// Records that the next token starts the code generated for `loc`. A `None` location marks
  /// generated code with no original counterpart. No-op unless a source map is being built.
  pub fn mark(&mut self, loc: Option<&Loc>) {
    if self.map.is_some() {
      self.pending = Some(loc.cloned());
    };
  }

  pub fn write_keyword(&mut self, keyword: &str) {
    self.write_token(keyword, TokenKind::Word);
  }

  pub fn write_identifier(&mut self, identifier: &str) {
    self.write_token(identifier, TokenKind::Word);
  }

  pub fn write_number(&mut self, number: &str) {
    self.write_token(number, TokenKind::Number);
  }

  /// Emits punctuation or operators.
  pub fn write_punct(&mut self, punct: &str) {
    let kind = match punct {
      "+" => TokenKind::Plus,
      "++" => TokenKind::PlusPlus,
      "-" => TokenKind::Minus,
      "--" => TokenKind::MinusMinus,
      // Word-like operators.
      "in" | "instanceof" | "typeof" | "void" | "delete" | "new" => TokenKind::Word,
      _ => TokenKind::Other,
    };
    self.write_token(punct, kind);
  }

  /// Emits a complete literal (string, regular expression or comment) as one token.
  pub fn write_literal(&mut self, literal: &str) {
    self.write_token(literal, TokenKind::Other);
  }

  /// A space in pretty mode, nothing when minifying.
  pub fn write_optional_space(&mut self) {
    if self.is_pretty() {
      self.push(" ");
      self.trailing = Boundary::None;
    };
  }

  /// A line break followed by the current indentation in pretty mode, nothing when minifying.
  pub fn write_line_break(&mut self) {
    if self.is_pretty() {
      self.push("\n");
      for _ in 0..self.indent {
        self.push("  ");
      }
      self.trailing = Boundary::None;
    };
  }

  pub fn indent(&mut self) {
    self.indent += 1;
  }

  pub fn dedent(&mut self) {
    self.indent = self.indent.saturating_sub(1);
  }

  fn write_token(&mut self, text: &str, kind: TokenKind) {
    let bytes = text.as_bytes();
    let (Some(&first), Some(&last)) = (bytes.first(), bytes.last()) else {
      return;
    };
    if needs_space(self.trailing, kind, first)
      || would_complete_html_comment(self.html_start, bytes)
    {
      self.push(" ");
    };
    self.flush_pending();
    self.push(text);
    self.trailing = match kind {
      TokenKind::Word => Boundary::Word,
      TokenKind::Number => Boundary::Number,
      TokenKind::Plus => Boundary::Plus,
      TokenKind::PlusPlus => Boundary::PlusPlus,
      TokenKind::Minus => Boundary::Minus,
      TokenKind::MinusMinus => Boundary::MinusMinus,
      TokenKind::Other => match last {
        b'/' => Boundary::Slash,
        // Regular expression flags.
        b'a'..=b'z' | b'A'..=b'Z' => Boundary::Word,
        _ => Boundary::None,
      },
    };
  }

  fn flush_pending(&mut self) {
    let Some(map) = self.map.as_mut() else {
      return;
    };
    if let Some(loc) = self.pending.take() {
      map.add_mapping(self.line, self.column, loc.as_ref());
    };
  }

  fn push(&mut self, text: &str) {
    self.html_start = text
      .bytes()
      .fold(self.html_start, |state, byte| next_html_start(state, byte).0);
    for ch in text.chars() {
      if ch == '\n' {
        self.line += 1;
        self.column = 0;
      } else {
        self.column += ch.len_utf16() as u32;
      };
    }
    self.out.push_str(text);
  }
}

fn needs_space(prev: Boundary, next: TokenKind, first: u8) -> bool {
  match (prev, next) {
    (Boundary::Word | Boundary::Number, TokenKind::Word | TokenKind::Number) => true,
    // `1 .x` would otherwise continue the number.
    (Boundary::Number, TokenKind::Other) => first == b'.',
    (Boundary::Plus | Boundary::PlusPlus, TokenKind::Plus | TokenKind::PlusPlus) => true,
    (Boundary::Minus | Boundary::MinusMinus, TokenKind::Minus | TokenKind::MinusMinus) => true,
    (Boundary::Slash, TokenKind::Other) => first == b'/' || first == b'*',
    _ => false,
  }
}

/// Whether writing `bytes` right after the current output would finish an HTML comment opener
/// that began in the output. A space before `bytes` breaks it.
fn would_complete_html_comment(mut state: HtmlStart, bytes: &[u8]) -> bool {
  for &byte in bytes {
    let (next, completed) = next_html_start(state, byte);
    if completed {
      return true;
    };
    if next == HtmlStart::Other {
      return false;
    };
    state = next;
  }
  false
}

/// Advances over one output byte; the flag is set when the byte completes `<!--` or a
/// line-leading `-->`.
fn next_html_start(state: HtmlStart, byte: u8) -> (HtmlStart, bool) {
  if matches!(byte, b'\n' | b'\r') {
    return (HtmlStart::LineStart, false);
  };
  if byte.is_ascii_whitespace() {
    return match state {
      HtmlStart::LineStart => (HtmlStart::LineStart, false),
      _ => (HtmlStart::Other, false),
    };
  };
  match (state, byte) {
    (_, b'<') => (HtmlStart::Lt, false),
    (HtmlStart::Lt, b'!') => (HtmlStart::LtBang, false),
    (HtmlStart::LtBang, b'-') => (HtmlStart::LtBangDash, false),
    (HtmlStart::LtBangDash, b'-') => (HtmlStart::Other, true),
    (HtmlStart::LineStart, b'-') => (HtmlStart::Dash, false),
    (HtmlStart::Dash, b'-') => (HtmlStart::DashDash, false),
    (HtmlStart::DashDash, b'>') => (HtmlStart::Other, true),
    _ => (HtmlStart::Other, false),
  }
}
