//! Minifies JavaScript IR: shortens local names, drops comments and prints compact code with
//! an optional source map.
//!
//! # Examples
//!
//! ```
//! use ir_js::build;
//! use ir_js::ident::Ident;
//! use minify_js::{minify, MinifyOptions};
//!
//! let ident = |name: &str| Ident::new(name).unwrap();
//! let body = vec![
//!   build::var(ident("total"), Some(build::id(ident("first")))),
//!   build::ret(Some(build::id(ident("total")))),
//! ];
//! let top = build::top_level(vec![build::func_decl(ident("sum"), vec![ident("first")], body)]);
//! let minified = minify(top, &MinifyOptions::default()).unwrap();
//! assert_eq!(minified.code, "function sum(a){var b=a;return b;}");
//! ```

use emit_js::emit;
use emit_js::emit_with_source_map;
use emit_js::source_map::SourceMap;
use emit_js::source_map::SourceMapOptions;
use emit_js::EmitOptions;
use ir_js::ast::node::Node;
use ir_js::ast::stx::TopLevel;
use symbol_js::analyze;
use tracing::debug;

mod err;
pub mod rename;
mod strip;
#[cfg(test)]
mod tests;

pub use err::MinifyError;
pub use rename::rename;
pub use rename::RenameMap;
pub use rename::Renamed;
pub use strip::strip_comments;

#[derive(Clone, Debug)]
pub struct MinifyOptions {
  pub rename_identifiers: bool,
  pub strip_comments: bool,
  pub emit: EmitOptions,
  /// Also build a source map, with these document fields.
  pub source_map: Option<SourceMapOptions>,
}

impl Default for MinifyOptions {
  fn default() -> Self {
    MinifyOptions {
      rename_identifiers: true,
      strip_comments: true,
      emit: EmitOptions::default(),
      source_map: None,
    }
  }
}

impl MinifyOptions {
  pub fn with_rename_identifiers(mut self, rename_identifiers: bool) -> Self {
    self.rename_identifiers = rename_identifiers;
    self
  }

  pub fn with_strip_comments(mut self, strip_comments: bool) -> Self {
    self.strip_comments = strip_comments;
    self
  }

  pub fn with_emit(mut self, emit: EmitOptions) -> Self {
    self.emit = emit;
    self
  }

  pub fn with_source_map(mut self, source_map: SourceMapOptions) -> Self {
    self.source_map = Some(source_map);
    self
  }
}

#[derive(Debug)]
pub struct Minified {
  pub code: String,
  pub source_map: Option<SourceMap>,
}

/// Runs scope analysis and the enabled rewrites, returning the tree that [`minify`] would print.
pub fn minify_program(
  mut top_level_node: Node<TopLevel>,
  opts: &MinifyOptions,
) -> Result<Node<TopLevel>, MinifyError> {
  let analysis = analyze(&mut top_level_node);
  debug!(scopes = analysis.tree.len(), "analyzed scopes");
  if opts.rename_identifiers {
    top_level_node = rename(top_level_node, &analysis)?.top_level;
  };
  if opts.strip_comments {
    top_level_node = strip_comments(top_level_node);
  };
  Ok(top_level_node)
}

/// Minifies `top_level_node` into code, plus a source map when [`MinifyOptions::source_map`] is
/// set.
pub fn minify(
  top_level_node: Node<TopLevel>,
  opts: &MinifyOptions,
) -> Result<Minified, MinifyError> {
  let top_level_node = minify_program(top_level_node, opts)?;
  Ok(match &opts.source_map {
    Some(map_opts) => {
      let (code, map) = emit_with_source_map(&top_level_node, &opts.emit, map_opts)?;
      Minified {
        code,
        source_map: Some(map),
      }
    }
    None => Minified {
      code: emit(&top_level_node, &opts.emit)?,
      source_map: None,
    },
  })
}
