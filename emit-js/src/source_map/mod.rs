//! Source map v3 generation.
//!
//! The formatter reports the start of each mapped piece of output through
//! [`SourceMapBuilder::add_mapping`]; [`SourceMapBuilder::build`] then produces the document,
//! with the `mappings` field delta and VLQ encoded.

pub mod vlq;

use ahash::RandomState;
use indexmap::IndexSet;
use ir_js::loc::Loc;
use serde::Deserialize;
use serde::Serialize;
use std::sync::Arc;

/// Values for the document fields that do not come from mappings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceMapOptions {
  /// Name of the generated file.
  pub file: String,
  /// Prefix consumers prepend to every entry of `sources`.
  pub source_root: String,
}

impl SourceMapOptions {
  pub fn new(file: impl Into<String>) -> SourceMapOptions {
    SourceMapOptions {
      file: file.into(),
      source_root: String::new(),
    }
  }

  pub fn with_source_root(mut self, source_root: impl Into<String>) -> SourceMapOptions {
    self.source_root = source_root.into();
    self
  }
}

/// A source map v3 document. Fields serialize in the order consumers conventionally expect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMap {
  pub version: u8,
  pub file: String,
  #[serde(rename = "sourceRoot")]
  pub source_root: String,
  pub sources: Vec<String>,
  pub names: Vec<String>,
  pub mappings: String,
}

impl SourceMap {
  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string(self)
  }
}

// Interned source position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Original {
  source: u32,
  line: u32,
  column: u32,
}

#[derive(Clone, Copy, Debug)]
struct Mapping {
  generated_line: u32,
  generated_column: u32,
  original: Option<Original>,
  name: Option<u32>,
}

#[derive(Debug, Default)]
pub struct SourceMapBuilder {
  mappings: Vec<Mapping>,
  sources: IndexSet<Arc<str>, RandomState>,
  names: IndexSet<Arc<str>, RandomState>,
}

fn intern(table: &mut IndexSet<Arc<str>, RandomState>, value: &Arc<str>) -> u32 {
  let (index, _) = table.insert_full(value.clone());
  index as u32
}

impl SourceMapBuilder {
  pub fn new() -> SourceMapBuilder {
    SourceMapBuilder::default()
  }

  /// Number of recorded mappings.
  pub fn len(&self) -> usize {
    self.mappings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.mappings.is_empty()
  }

  /// Records that generated position (`line`, `column`) starts code from `source`, or code
  /// with no original counterpart when `source` is None. Calls must come in non-decreasing
  /// generated order.
  ///
  /// A mapping that is not the first on its generated line and resolves to the same original
  /// position as the previous mapping is dropped, since it adds no information.
  pub fn add_mapping(&mut self, line: u32, column: u32, source: Option<&Loc>) {
    let original = source.map(|loc| Original {
      source: intern(&mut self.sources, &loc.source),
      line: loc.line,
      column: loc.column,
    });
    if let Some(prev) = self.mappings.last() {
      if prev.generated_line == line && prev.original == original {
        return;
      };
    };
    let name = source
      .and_then(|loc| loc.name.as_ref())
      .map(|name| intern(&mut self.names, name));
    self.mappings.push(Mapping {
      generated_line: line,
      generated_column: column,
      original,
      name,
    });
  }

  /// The encoded `mappings` field.
  pub fn build_mappings(&self) -> String {
    let mut out = String::new();
    let mut prev_line = 0u32;
    let mut prev_column = 0i64;
    let mut prev_source = 0i64;
    let mut prev_original_line = 0i64;
    let mut prev_original_column = 0i64;
    let mut prev_name = 0i64;
    let mut first_on_line = true;

    for mapping in self.mappings.iter() {
      while prev_line < mapping.generated_line {
        out.push(';');
        prev_line += 1;
        prev_column = 0;
        first_on_line = true;
      }
      if !first_on_line {
        out.push(',');
      };
      first_on_line = false;

      let column = mapping.generated_column as i64;
      vlq::encode_into(&mut out, column - prev_column);
      prev_column = column;

      let Some(original) = mapping.original else {
        continue;
      };
      let source = original.source as i64;
      let original_line = original.line as i64;
      let original_column = original.column as i64;
      vlq::encode_into(&mut out, source - prev_source);
      vlq::encode_into(&mut out, original_line - prev_original_line);
      vlq::encode_into(&mut out, original_column - prev_original_column);
      prev_source = source;
      prev_original_line = original_line;
      prev_original_column = original_column;
      if let Some(name) = mapping.name {
        let name = name as i64;
        vlq::encode_into(&mut out, name - prev_name);
        prev_name = name;
      };
    }
    out
  }

  pub fn build(&self, options: &SourceMapOptions) -> SourceMap {
    SourceMap {
      version: 3,
      file: options.file.clone(),
      source_root: options.source_root.clone(),
      sources: self.sources.iter().map(|s| s.to_string()).collect(),
      names: self.names.iter().map(|s| s.to_string()).collect(),
      mappings: self.build_mappings(),
    }
  }
}
