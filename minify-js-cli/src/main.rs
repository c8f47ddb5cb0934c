use clap::Parser;
use emit_js::source_map::SourceMapOptions;
use emit_js::EmitMode;
use emit_js::EmitOptions;
use ir_js::ast::node::Node;
use ir_js::ast::stx::TopLevel;
use minify_js::minify;
use minify_js::MinifyOptions;
use std::fmt::Display;
use std::fs;
use std::fs::File;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "minify-js", about = "Minifies JavaScript IR into compact code")]
struct Cli {
  /// IR to minify, as the JSON form of a top-level node; omit for stdin.
  #[arg(short, long)]
  input: Option<PathBuf>,

  /// Output destination; omit for stdout.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Also write a source map to this file.
  #[arg(long)]
  source_map: Option<PathBuf>,

  /// Value of the source map's `sourceRoot` field.
  #[arg(long, default_value = "")]
  source_root: String,

  /// Don't shorten local variable names.
  #[arg(long)]
  keep_names: bool,

  /// Don't remove comments.
  #[arg(long)]
  keep_comments: bool,

  /// One statement per line with indentation.
  #[arg(long)]
  pretty: bool,

  /// Log pass timings to stderr.
  #[arg(long)]
  trace: bool,
}

fn exit_with_error(message: impl Display) -> ! {
  eprintln!("error: {message}");
  process::exit(1);
}

fn file_name(path: &Path) -> String {
  path
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_default()
}

fn main() {
  let args = Cli::parse();
  if args.trace {
    tracing_subscriber::fmt()
      .with_writer(std::io::stderr)
      .with_max_level(Level::DEBUG)
      .with_span_events(FmtSpan::CLOSE)
      .init();
  };

  let mut input = Vec::new();
  let read = match args.input.as_ref() {
    Some(p) => File::open(p).and_then(|mut f| f.read_to_end(&mut input)),
    None => stdin().read_to_end(&mut input),
  };
  if let Err(err) = read {
    exit_with_error(format!("failed to read input: {err}"));
  };
  let top_level_node: Node<TopLevel> = match serde_json::from_slice(&input) {
    Ok(node) => node,
    Err(err) => exit_with_error(format!("invalid IR: {err}")),
  };
  debug!(bytes = input.len(), "read IR");

  let mode = if args.pretty {
    EmitMode::Pretty
  } else {
    EmitMode::Minified
  };
  let mut options = MinifyOptions::default()
    .with_rename_identifiers(!args.keep_names)
    .with_strip_comments(!args.keep_comments)
    .with_emit(EmitOptions::default().with_mode(mode));
  if args.source_map.is_some() {
    let file = args.output.as_deref().map(file_name).unwrap_or_default();
    options =
      options.with_source_map(SourceMapOptions::new(file).with_source_root(&args.source_root));
  };

  let minified = match minify(top_level_node, &options) {
    Ok(minified) => minified,
    Err(err) => exit_with_error(err),
  };
  let mut code = minified.code;
  if let (Some(path), Some(map)) = (args.source_map.as_ref(), minified.source_map.as_ref()) {
    let json = match map.to_json() {
      Ok(json) => json,
      Err(err) => exit_with_error(format!("failed to serialize source map: {err}")),
    };
    if let Err(err) = fs::write(path, json) {
      exit_with_error(format!("failed to write {}: {err}", path.display()));
    };
    if !code.is_empty() && !code.ends_with('\n') {
      code.push('\n');
    };
    code.push_str("//# sourceMappingURL=");
    code.push_str(&file_name(path));
    code.push('\n');
  };

  let write_result = match args.output.as_ref() {
    Some(p) => fs::write(p, code.as_bytes()),
    None => stdout().write_all(code.as_bytes()),
  };
  if let Err(err) = write_result {
    exit_with_error(format!("failed to write output: {err}"));
  };
}
