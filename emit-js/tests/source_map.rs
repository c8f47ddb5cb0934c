mod util;

use emit_js::emit_with_source_map;
use emit_js::source_map::vlq;
use emit_js::source_map::SourceMapBuilder;
use emit_js::source_map::SourceMapOptions;
use emit_js::EmitOptions;
use ir_js::build;
use util::id;
use util::ident;
use util::loc;

#[test]
fn same_position_on_one_line_is_recorded_once() {
  let mut builder = SourceMapBuilder::new();
  builder.add_mapping(0, 0, Some(&loc(0, 0)));
  builder.add_mapping(0, 5, Some(&loc(0, 0)));
  assert_eq!(builder.len(), 1);
  assert_eq!(builder.build_mappings(), "AAAA");
}

#[test]
fn first_mapping_on_a_line_is_always_kept() {
  let mut builder = SourceMapBuilder::new();
  builder.add_mapping(0, 0, Some(&loc(0, 0)));
  builder.add_mapping(1, 0, Some(&loc(0, 0)));
  assert_eq!(builder.build_mappings(), "AAAA;AAAA");
}

#[test]
fn unmapped_and_named_segments() {
  let mut builder = SourceMapBuilder::new();
  builder.add_mapping(0, 0, None);
  builder.add_mapping(0, 3, Some(&loc(1, 2)));
  builder.add_mapping(2, 4, Some(&loc(3, 0).with_name("count")));
  assert_eq!(builder.build_mappings(), "A,GACE;;IAEFA");

  let map = builder.build(&SourceMapOptions::new("out.js"));
  assert_eq!(map.names, vec!["count".to_string()]);
}

#[test]
fn document_field_order() {
  let mut builder = SourceMapBuilder::new();
  builder.add_mapping(0, 0, Some(&loc(0, 0)));
  let map = builder.build(&SourceMapOptions::new("out.js").with_source_root("src"));
  assert_eq!(
    map.to_json().unwrap(),
    r#"{"version":3,"file":"out.js","sourceRoot":"src","sources":["a.src"],"names":[],"mappings":"AAAA"}"#
  );
}

#[test]
fn emitter_maps_statements_and_located_expressions() {
  let top = build::top_level(vec![
    build::expr_stmt(id("a").at(loc(0, 0))).at(loc(0, 0)),
    build::var(ident("b"), Some(id("a").at(loc(1, 8)))).at(loc(1, 0)),
  ]);
  let (code, map) = emit_with_source_map(
    &top,
    &EmitOptions::default(),
    &SourceMapOptions::new("out.js"),
  )
  .unwrap();
  assert_eq!(code, "a;var b=a;");
  assert_eq!(map.sources, vec!["a.src".to_string()]);
  assert_eq!(map.mappings, "AAAA,EACA,MAAQ");

  let deltas: Vec<Vec<i64>> = map
    .mappings
    .split(',')
    .map(|segment| vlq::decode_all(segment).unwrap())
    .collect();
  assert_eq!(deltas, vec![vec![0, 0, 0, 0], vec![2, 0, 1, 0], vec![6, 0, 0, 8]]);
}

#[test]
fn one_segment_per_generated_position() {
  let top = build::top_level(vec![
    build::expr_stmt(id("a").at(loc(0, 0))),
    build::expr_stmt(build::call(id("f").at(loc(1, 4)), vec![])).at(loc(1, 0)),
  ]);
  let (code, map) = emit_with_source_map(
    &top,
    &EmitOptions::default(),
    &SourceMapOptions::new("out.js"),
  )
  .unwrap();
  assert_eq!(code, "a;f();");
  assert_eq!(map.mappings, "AAAA,EACI");
}

#[test]
fn vlq_round_trips_deltas() {
  for value in [0, 1, -1, 15, 16, -16, 1000, -123456, i32::MAX as i64] {
    let encoded = vlq::encode(value);
    assert_eq!(vlq::decode(&encoded), Some((value, encoded.len())));
  }
}
