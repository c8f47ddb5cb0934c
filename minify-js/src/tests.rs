use crate::minify;
use crate::minify_program;
use crate::rename;
use crate::strip_comments;
use crate::MinifyError;
use crate::MinifyOptions;
use ahash::HashSet;
use emit_js::emit;
use emit_js::source_map::SourceMapOptions;
use emit_js::EmitOptions;
use ir_js::ast::expr::Expr;
use ir_js::ast::node::Node;
use ir_js::ast::stmt::Stmt;
use ir_js::ast::stx::TopLevel;
use ir_js::build;
use ir_js::ident::is_reserved_word;
use ir_js::ident::Ident;
use ir_js::loc::Loc;
use ir_js::operator::BinaryOperator;
use ir_js::scope::ScopeId;
use symbol_js::analyze;

fn ident(name: &str) -> Ident {
  Ident::new(name).unwrap()
}

fn id(name: &str) -> Node<Expr> {
  build::id(ident(name))
}

fn add(left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  build::binary(BinaryOperator::Addition, left, right)
}

fn minified(body: Vec<Node<Stmt>>) -> String {
  minify(build::top_level(body), &MinifyOptions::default())
    .unwrap()
    .code
}

fn renamed_to(map: &crate::RenameMap, from: &str) -> String {
  map.get(from).map(|i| i.to_string()).unwrap_or_default()
}

#[test]
fn root_function_locals_take_the_first_names() {
  let body = vec![
    build::var(ident("c"), Some(add(id("a"), id("b")))),
    build::ret(Some(id("c"))),
  ];
  let mut top = build::top_level(vec![build::func_decl(
    ident("f"),
    vec![ident("a"), ident("b")],
    body,
  )]);
  let analysis = analyze(&mut top);
  let renamed = rename(top, &analysis).unwrap();
  let f_map = renamed.map(ScopeId(1)).unwrap();
  assert_eq!(renamed_to(f_map, "a"), "a");
  assert_eq!(renamed_to(f_map, "b"), "b");
  assert_eq!(renamed_to(f_map, "c"), "c");
  assert!(!f_map.contains_key("f"));
  assert_eq!(
    emit(&renamed.top_level, &EmitOptions::default()).unwrap(),
    "function f(a,b){var c=a+b;return c;}"
  );
}

#[test]
fn sibling_scopes_may_share_names_but_not_with_free_names() {
  let sibling = |name: &str, global: &str| {
    build::func_decl(
      ident(name),
      vec![],
      vec![
        build::var(ident("x"), Some(id(global))),
        build::ret(Some(id("x"))),
      ],
    )
  };
  let out = minified(vec![sibling("p", "g1"), sibling("q", "g2")]);
  assert_eq!(
    out,
    "function p(){var b=g1;return b;}function q(){var b=g2;return b;}"
  );
}

#[test]
fn free_names_are_never_shadowed() {
  let out = minified(vec![build::func_decl(
    ident("f"),
    vec![],
    vec![
      build::var(ident("x"), Some(id("a"))),
      build::ret(Some(id("x"))),
    ],
  )]);
  assert_eq!(out, "function f(){var b=a;return b;}");
}

#[test]
fn nested_scopes_extend_the_inherited_map() {
  let inner = build::func(
    Some(ident("inner")),
    vec![ident("q")],
    vec![build::ret(Some(add(add(id("p"), id("q")), id("v"))))],
  );
  let outer = build::func_decl(
    ident("outer"),
    vec![ident("p")],
    vec![build::var(ident("v"), None), build::ret(Some(inner))],
  );
  let mut top = build::top_level(vec![outer]);
  let analysis = analyze(&mut top);
  let renamed = rename(top, &analysis).unwrap();

  let inner_map = renamed.map(ScopeId(2)).unwrap();
  assert_eq!(renamed_to(inner_map, "p"), "a");
  assert_eq!(renamed_to(inner_map, "v"), "b");
  assert_eq!(renamed_to(inner_map, "q"), "c");
  assert_eq!(renamed_to(inner_map, "inner"), "d");
  assert_eq!(
    emit(&renamed.top_level, &EmitOptions::default()).unwrap(),
    "function outer(a){var b;return function d(c){return a+c+b;};}"
  );

  // Within each scope, the visible locals get distinct names that avoid the free names.
  for (scope, map) in renamed.scopes.iter() {
    let replacements: HashSet<&Ident> = map.values().collect();
    assert_eq!(replacements.len(), map.len());
    for free in analysis.globals.names(*scope) {
      assert!(!replacements.contains(free));
    }
  }
}

#[test]
fn function_declaration_names_use_the_enclosing_map() {
  let helper = build::func_decl(ident("helper"), vec![], vec![]);
  let call = build::expr_stmt(build::call(id("helper"), vec![]));
  let out = minified(vec![build::func_decl(
    ident("outer"),
    vec![],
    vec![helper, call],
  )]);
  assert_eq!(out, "function outer(){function a(){}a();}");
}

#[test]
fn catch_parameters_are_renamed() {
  let try_stmt = build::try_(
    vec![build::expr_stmt(build::call(id("g"), vec![]))],
    Some((ident("err"), vec![build::ret(Some(id("err")))])),
    None,
  )
  .unwrap();
  let out = minified(vec![build::func_decl(ident("f"), vec![], vec![try_stmt])]);
  assert_eq!(out, "function f(){try{g();}catch(a){return a;}}");
}

#[test]
fn vars_inside_catch_belong_to_the_catch_scope() {
  // `y` is a local of the catch scope, so the reference after the catch is a free name and
  // keeps its spelling.
  let try_stmt = build::try_(
    vec![],
    Some((ident("e"), vec![build::var(ident("y"), Some(build::num(1.0)))])),
    None,
  )
  .unwrap();
  let mut top = build::top_level(vec![build::func_decl(
    ident("f"),
    vec![],
    vec![try_stmt, build::ret(Some(id("y")))],
  )]);
  let analysis = analyze(&mut top);
  let catch = ScopeId(2);
  assert!(analysis.locals.contains(catch, "y"));
  assert!(analysis.globals.contains(ScopeId(1), "y"));
  let renamed = rename(top, &analysis).unwrap();
  let out = emit(&renamed.top_level, &EmitOptions::default()).unwrap();
  assert_eq!(out, "function f(){try{}catch(a){var b=1;}return y;}");
}

#[test]
fn generated_names_skip_reserved_words() {
  let params: Vec<Ident> = (0..600).map(|i| ident(&format!("p{i}"))).collect();
  let mut top = build::top_level(vec![build::func_decl(ident("f"), params, vec![])]);
  let analysis = analyze(&mut top);
  let renamed = rename(top, &analysis).unwrap();
  let map = renamed.map(ScopeId(1)).unwrap();
  let replacements: HashSet<&Ident> = map.values().collect();
  assert_eq!(replacements.len(), 600);
  for name in replacements {
    assert!(!is_reserved_word(name), "{name} is reserved");
  }
  // Index 222 would be `do`.
  assert_eq!(renamed_to(map, "p222"), "dp");
}

#[test]
fn tree_without_locals_is_unchanged() {
  let mut expected = build::top_level(vec![
    build::func_decl(
      ident("f"),
      vec![],
      vec![build::expr_stmt(build::call(id("g"), vec![]))],
    ),
    build::expr_stmt(build::call(id("f"), vec![])),
  ]);
  let analysis = analyze(&mut expected);
  let renamed = rename(expected.clone(), &analysis).unwrap();
  assert_eq!(renamed.top_level, expected);
  assert_eq!(renamed.renamed_count(), 0);
}

#[test]
fn renamed_references_remember_their_original_name() {
  let reference = id("count").at(Loc::new("a.src", 1, 9));
  let mut top = build::top_level(vec![build::func_decl(
    ident("f"),
    vec![ident("count")],
    vec![build::ret(Some(reference))],
  )]);
  let analysis = analyze(&mut top);
  let renamed = rename(top, &analysis).unwrap();
  let Stmt::FunctionDecl(func) = renamed.top_level.stx.body[0].stx.as_ref() else {
    panic!("expected function declaration");
  };
  let Stmt::Return(ret) = func.stx.body[0].stx.as_ref() else {
    panic!("expected return");
  };
  let value = ret.stx.value.as_ref().unwrap();
  assert!(matches!(value.stx.as_ref(), Expr::Id(id) if id.stx.name.as_str() == "a"));
  assert_eq!(value.loc.as_ref().and_then(|l| l.name.as_deref()), Some("count"));
}

#[test]
fn unanalyzed_or_mismatched_trees_are_rejected() {
  let func = || build::func_decl(ident("f"), vec![], vec![]);
  let mut analyzed = build::top_level(vec![]);
  let analysis = analyze(&mut analyzed);

  let unanalyzed = build::top_level(vec![func()]);
  assert!(matches!(
    rename(unanalyzed, &analysis),
    Err(MinifyError::UnanalyzedScope)
  ));

  let mut other = build::top_level(vec![func()]);
  analyze(&mut other);
  assert!(matches!(
    rename(other, &analysis),
    Err(MinifyError::UnknownScope(ScopeId(1)))
  ));
}

#[test]
fn stripping_comments_splices_statement_lists() {
  let top = build::top_level(vec![
    build::comment("a"),
    build::expr_stmt(id("x")),
    build::comment("b"),
  ]);
  let stripped = strip_comments(top);
  assert_eq!(stripped.stx.body.len(), 1);
  assert!(matches!(stripped.stx.body[0].stx.as_ref(), Stmt::Expr(_)));
}

#[test]
fn options_disable_passes() {
  let body = || {
    vec![
      build::comment(" keep "),
      build::func_decl(ident("f"), vec![ident("value")], vec![]),
    ]
  };
  let opts = MinifyOptions::default()
    .with_rename_identifiers(false)
    .with_strip_comments(false);
  let out = minify(build::top_level(body()), &opts).unwrap();
  assert_eq!(out.code, "/* keep */function f(value){}");
  assert!(out.source_map.is_none());

  let program = minify_program(build::top_level(body()), &MinifyOptions::default()).unwrap();
  assert_eq!(program.stx.body.len(), 1);
}

#[test]
fn source_map_lists_original_names() {
  let loc = |line, column| Loc::new("a.src", line, column);
  let top: Node<TopLevel> = build::top_level(vec![build::func_decl(
    ident("f"),
    vec![ident("count")],
    vec![build::ret(Some(id("count").at(loc(1, 9)))).at(loc(1, 2))],
  )
  .at(loc(0, 0))]);
  let opts = MinifyOptions::default().with_source_map(SourceMapOptions::new("out.js"));
  let out = minify(top, &opts).unwrap();
  assert_eq!(out.code, "function f(a){return a;}");
  let map = out.source_map.unwrap();
  assert_eq!(map.sources, vec!["a.src".to_string()]);
  assert_eq!(map.names, vec!["count".to_string()]);
  assert_eq!(map.mappings, "AAAA,cACE,OAAOA");
}
