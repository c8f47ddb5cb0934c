use assert_cmd::Command;
use ir_js::build;
use ir_js::ident::Ident;
use ir_js::loc::Loc;
use serde_json::Value;
use std::fs;
use std::time::Duration;

fn minify_js_cli() -> Command {
  assert_cmd::cargo::cargo_bin_cmd!("minify-js-cli")
}

fn ident(name: &str) -> Ident {
  Ident::new(name).unwrap()
}

fn sample_ir() -> String {
  let body = vec![
    build::comment(" adds "),
    build::ret(Some(build::id(ident("first")).at(Loc::new("sum.src", 1, 9)))),
  ];
  let top = build::top_level(vec![build::func_decl(
    ident("sum"),
    vec![ident("first")],
    body,
  )
  .at(Loc::new("sum.src", 0, 0))]);
  serde_json::to_string(&top).unwrap()
}

#[test]
fn minifies_stdin_to_stdout() {
  minify_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin(sample_ir())
    .assert()
    .success()
    .stdout("function sum(a){return a;}");
}

#[test]
fn flags_keep_names_and_comments() {
  minify_js_cli()
    .timeout(Duration::from_secs(5))
    .args(["--keep-names", "--keep-comments", "--pretty"])
    .write_stdin(sample_ir())
    .assert()
    .success()
    .stdout("function sum(first) {\n  /* adds */\n  return first;\n}\n");
}

#[test]
fn writes_source_map_next_to_output() {
  let dir = tempfile::tempdir().unwrap();
  let input = dir.path().join("sum.json");
  let output = dir.path().join("sum.js");
  let map = dir.path().join("sum.js.map");
  fs::write(&input, sample_ir()).unwrap();

  minify_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--input")
    .arg(&input)
    .arg("--output")
    .arg(&output)
    .arg("--source-map")
    .arg(&map)
    .args(["--source-root", "src"])
    .assert()
    .success();

  assert_eq!(
    fs::read_to_string(&output).unwrap(),
    "function sum(a){return a;}\n//# sourceMappingURL=sum.js.map\n"
  );
  let map: Value = serde_json::from_str(&fs::read_to_string(&map).unwrap()).unwrap();
  assert_eq!(map["version"], 3);
  assert_eq!(map["file"], "sum.js");
  assert_eq!(map["sourceRoot"], "src");
  assert_eq!(map["sources"][0], "sum.src");
  assert_eq!(map["names"][0], "first");
}

#[test]
fn rejects_invalid_identifiers_in_input() {
  let ir = sample_ir().replace("\"first\"", "\"for\"");
  let assert = minify_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin(ir)
    .assert()
    .failure()
    .code(1);
  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(stderr.contains("reserved word"), "unexpected stderr: {stderr}");
}

#[test]
fn rejects_structurally_invalid_input() {
  let ir = r#"{"stx":{"body":[{"stx":{"$t":"Try","stx":{"wrapped":{"stx":{"body":[]}},"catch":null,"finally":null}}}]}}"#;
  let assert = minify_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin(ir)
    .assert()
    .failure()
    .code(1);
  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(stderr.contains("catch or finally"), "unexpected stderr: {stderr}");
}
