use ir_js::build;
use ir_js::ident::Ident;
use ir_js::loc::Loc;
use similar::ChangeTag;
use similar::TextDiff;

pub fn ident(name: &str) -> Ident {
  Ident::new(name).unwrap()
}

pub fn id(name: &str) -> ir_js::ast::node::Node<ir_js::ast::expr::Expr> {
  build::id(ident(name))
}

pub fn loc(line: u32, column: u32) -> Loc {
  Loc::new("a.src", line, column)
}

/// Panics with a line diff when `actual` differs from `expected`.
pub fn assert_text_eq(expected: &str, actual: &str) {
  if expected == actual {
    return;
  };
  let mut msg = String::from("output differs:\n");
  let diff = TextDiff::from_lines(expected, actual);
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    msg.push_str(sign);
    msg.push_str(&change.to_string());
    if change.missing_newline() {
      msg.push('\n');
    };
  }
  panic!("{}", msg);
}
