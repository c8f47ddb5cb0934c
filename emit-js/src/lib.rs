//! Formats the JavaScript IR as source text, optionally with a source map.
//!
//! [`emit`] produces just the code; [`emit_with_source_map`] also records where every statement,
//! declarator and located expression starts in the output.

mod emitter;
pub mod escape;
mod expr;
pub mod precedence;
pub mod source_map;
mod stmt;

pub use emitter::EmitError;
pub use emitter::EmitErrorKind;
pub use emitter::EmitMode;
pub use emitter::EmitOptions;
pub use emitter::EmitResult;
pub use emitter::Emitter;
pub use expr::JsEmitter;
use ir_js::ast::node::Node;
use ir_js::ast::stx::TopLevel;
use source_map::SourceMap;
use source_map::SourceMapOptions;
use tracing::debug;
use tracing::debug_span;

pub fn emit(top_level_node: &Node<TopLevel>, opts: &EmitOptions) -> EmitResult<String> {
  let _span = debug_span!("emit_js.emit", mode = ?opts.mode).entered();
  let mut js = JsEmitter::new(Emitter::new(opts.mode), opts);
  js.emit_top_level(top_level_node)?;
  let (code, _) = js.into_inner().finish();
  debug!(bytes = code.len(), "emitted");
  Ok(code)
}

pub fn emit_with_source_map(
  top_level_node: &Node<TopLevel>,
  opts: &EmitOptions,
  map_opts: &SourceMapOptions,
) -> EmitResult<(String, SourceMap)> {
  let _span = debug_span!("emit_js.emit", mode = ?opts.mode, file = %map_opts.file).entered();
  let mut js = JsEmitter::new(Emitter::with_source_map(opts.mode), opts);
  js.emit_top_level(top_level_node)?;
  let (code, builder) = js.into_inner().finish();
  let builder = builder.unwrap_or_default();
  debug!(bytes = code.len(), mappings = builder.len(), "emitted");
  Ok((code, builder.build(map_opts)))
}
