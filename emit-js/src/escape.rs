use std::fmt::Write;

/// Renders a double-quoted JavaScript string literal. Non-ASCII characters are kept as they are,
/// except the line separators U+2028 and U+2029, which older engines reject inside literals.
pub fn string_literal_double_quoted(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('"');

  let mut chars = value.chars().peekable();
  while let Some(ch) = chars.next() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '"' => out.push_str("\\\""),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\0' => {
        // `\01` would be an octal escape.
        let next_is_digit = chars.peek().is_some_and(|c| c.is_ascii_digit());
        out.push_str(if next_is_digit { "\\x00" } else { "\\0" });
      }
      '\u{2028}' => out.push_str("\\u2028"),
      '\u{2029}' => out.push_str("\\u2029"),
      ch if ch < '\u{20}' => {
        let _ = write!(out, "\\x{:02X}", ch as u32);
      }
      ch => out.push(ch),
    }
  }

  out.push('"');
  out
}

/// Renders a block comment. A `*/` inside the text would end the comment early, so it is broken
/// up.
pub fn block_comment(text: &str) -> String {
  format!("/*{}*/", text.replace("*/", "* /"))
}
