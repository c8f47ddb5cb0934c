mod util;

use emit_js::emit;
use emit_js::EmitErrorKind;
use emit_js::EmitMode;
use emit_js::EmitOptions;
use ir_js::ast::expr::TypeHandle;
use ir_js::ast::node::Node;
use ir_js::ast::stmt::ForInit;
use ir_js::ast::stmt::Stmt;
use ir_js::build;
use ir_js::operator::BinaryOperator;
use ir_js::operator::UnaryOperator;
use util::assert_text_eq;
use util::id;
use util::ident;
use util::loc;

fn minified(body: Vec<Node<Stmt>>) -> String {
  emit(&build::top_level(body), &EmitOptions::default()).unwrap()
}

fn call(name: &str) -> Node<Stmt> {
  build::expr_stmt(build::call(id(name), vec![]))
}

#[test]
fn function_declaration() {
  let body = vec![
    build::var(
      ident("c"),
      Some(build::binary(BinaryOperator::Addition, id("a"), id("b"))),
    ),
    build::ret(Some(id("c"))),
  ];
  let out = minified(vec![build::func_decl(
    ident("f"),
    vec![ident("a"), ident("b")],
    body,
  )]);
  assert_text_eq("function f(a,b){var c=a+b;return c;}", &out);
}

#[test]
fn parenthesizes_by_precedence_and_associativity() {
  let sum = build::binary(BinaryOperator::Addition, id("a"), id("b"));
  let product = build::binary(BinaryOperator::Multiplication, sum, id("c"));
  let nested_sub = build::binary(
    BinaryOperator::Subtraction,
    id("a"),
    build::binary(BinaryOperator::Subtraction, id("b"), id("c")),
  );
  let chained = build::assign(id("a"), build::assign(id("b"), id("c")));
  let out = minified(vec![
    build::expr_stmt(product),
    build::expr_stmt(nested_sub),
    build::expr_stmt(chained),
  ]);
  assert_text_eq("(a+b)*c;a-(b-c);a=b=c;", &out);
}

#[test]
fn separates_operator_tokens() {
  let minus = build::binary(
    BinaryOperator::Subtraction,
    id("a"),
    build::unary(UnaryOperator::Negation, id("b")),
  );
  let plus = build::binary(
    BinaryOperator::Addition,
    id("a"),
    build::unary(UnaryOperator::Plus, id("b")),
  );
  let negative = build::binary(BinaryOperator::Subtraction, id("a"), build::num(-1.0));
  let words = build::unary(UnaryOperator::Typeof, id("x"));
  let out = minified(vec![
    build::expr_stmt(minus),
    build::expr_stmt(plus),
    build::expr_stmt(negative),
    build::expr_stmt(words),
  ]);
  assert_text_eq("a- -b;a+ +b;a- -1;typeof x;", &out);
}

#[test]
fn guards_statement_starts() {
  let iife = build::call(build::func(None, vec![], vec![]), vec![]);
  let out = minified(vec![
    build::expr_stmt(iife),
    build::expr_stmt(build::object(vec![])),
  ]);
  assert_text_eq("(function(){}());({});", &out);
}

#[test]
fn new_and_member_receivers() {
  let new_call = build::new(build::call(id("f"), vec![]), vec![]);
  let new_member = build::new(build::member(id("a"), "b").unwrap(), vec![id("x")]);
  let number_member = build::member(build::num(1.0), "toString").unwrap();
  let out = minified(vec![
    build::expr_stmt(new_call),
    build::expr_stmt(new_member),
    build::expr_stmt(build::call(number_member, vec![])),
  ]);
  assert_text_eq("new(f())();new a.b(x);(1).toString();", &out);
}

#[test]
fn for_headers() {
  let bare_in = build::binary(BinaryOperator::In, id("a"), id("b"));
  let counting = build::for_(
    build::for_init_decl(vec![(ident("i"), Some(build::num(0.0)))]).unwrap(),
    Some(build::binary(BinaryOperator::LessThan, id("i"), id("n"))),
    Some(build::unary(UnaryOperator::PostfixIncrement, id("i"))),
    build::block(vec![]),
  );
  let out = minified(vec![
    build::for_(ForInit::Expr(bare_in), None, None, build::block(vec![])),
    counting,
    build::for_in(ident("k"), true, id("o"), call("f")),
  ]);
  assert_text_eq("for((a in b);;){}for(var i=0;i<n;i++){}for(var k in o)f();", &out);
}

#[test]
fn dangling_else_gets_a_block() {
  let inner = build::if_(id("b"), call("f"), None);
  let out = minified(vec![build::if_(id("a"), inner, Some(call("g")))]);
  assert_text_eq("if(a){if(b)f();}else g();", &out);
}

#[test]
fn literals_and_object_keys() {
  let obj = build::object(vec![
    ("a".to_string(), build::num(1.0)),
    ("b-c".to_string(), build::str_lit("x\"y")),
  ]);
  let test = build::member(build::regex("a+", "g"), "test").unwrap();
  let out = minified(vec![
    build::var(ident("o"), Some(obj)),
    build::expr_stmt(build::call(test, vec![id("s")])),
    build::expr_stmt(build::num(f64::NEG_INFINITY)),
    build::expr_stmt(build::num(1e21)),
    build::expr_stmt(build::unary(UnaryOperator::Void, build::num(0.0))),
  ]);
  assert_text_eq(
    r#"var o={a:1,"b-c":"x\"y"};/a+/g.test(s);-Infinity;1e21;void 0;"#,
    &out,
  );
}

#[test]
fn comments_and_merge_blocks() {
  let out = minified(vec![
    build::comment(" hi "),
    build::merging_block(vec![build::expr_stmt(id("a"))]),
    build::expr_stmt(id("b")),
  ]);
  assert_text_eq("/* hi */a;b;", &out);
}

#[test]
fn control_flow_statements() {
  let switch = build::switch(
    id("x"),
    vec![
      (Some(build::num(1.0)), vec![build::break_(None)]),
      (None, vec![build::ret(None)]),
    ],
  );
  let try_stmt = build::try_(
    vec![call("f")],
    Some((ident("e"), vec![build::throw(id("e"))])),
    Some(vec![]),
  )
  .unwrap();
  let labelled = build::label(
    ident("outer"),
    build::while_(
      build::bool_lit(true),
      build::block(vec![build::continue_(Some(ident("outer")))]),
    ),
  );
  let out = minified(vec![
    switch,
    try_stmt,
    build::do_while(call("f"), id("x")),
    labelled,
  ]);
  assert_text_eq(
    "switch(x){case 1:break;default:return;}try{f();}catch(e){throw e;}finally{}do f();while(x);outer:while(true){continue outer;}",
    &out,
  );
}

#[test]
fn pretty_mode() {
  let func = build::func_decl(
    ident("f"),
    vec![ident("a")],
    vec![build::if_(id("a"), build::ret(Some(id("a"))), None)],
  );
  let sum = build::binary(BinaryOperator::Addition, build::num(1.0), id("b"));
  let top = build::top_level(vec![
    func,
    build::expr_stmt(build::call(id("f"), vec![sum, id("c")])),
  ]);
  let opts = EmitOptions::default().with_mode(EmitMode::Pretty);
  let out = emit(&top, &opts).unwrap();
  assert_text_eq("function f(a) {\n  if (a) return a;\n}\nf(1 + b, c);\n", &out);
}

#[test]
fn type_references_resolve_through_options() {
  let top = build::top_level(vec![build::expr_stmt(
    build::type_ref(TypeHandle(7)).at(loc(1, 2)),
  )]);
  let opts = EmitOptions::default().with_type_name(TypeHandle(7), "Foo");
  assert_text_eq("Foo;", &emit(&top, &opts).unwrap());

  let err = emit(&top, &EmitOptions::default()).unwrap_err();
  assert!(matches!(err.kind, EmitErrorKind::UnresolvedTypeRef(TypeHandle(7))));
  assert_eq!(err.loc, Some(loc(1, 2)));
  assert_eq!(err.to_string(), "unresolved type reference 7 at a.src:2:3");
}

#[test]
fn html_comment_openers_are_broken_up() {
  let not_decrement = build::unary(
    UnaryOperator::LogicalNot,
    build::unary(UnaryOperator::PrefixDecrement, id("y")),
  );
  let out = minified(vec![
    build::expr_stmt(build::binary(BinaryOperator::LessThan, id("x"), not_decrement)),
    call("f"),
  ]);
  assert_text_eq("x<! --y;f();", &out);
}
