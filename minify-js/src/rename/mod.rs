//! Shortens the names of function and catch locals.
//!
//! Replacement maps are threaded through a [`Rewriter`]: every function or catch scope extends
//! the map of its enclosing scope with fresh names for its own locals, and that extended map
//! renames every binding and reference in the scope's subtree. Names bound at the root stay as
//! they are, since other scripts can see them.

use crate::err::MinifyError;
use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use derive_visitor::Drive;
use derive_visitor::Visitor;
use ir_js::ast::expr::Expr;
use ir_js::ast::expr::FuncExpr;
use ir_js::ast::expr::IdExpr;
use ir_js::ast::node::Node;
use ir_js::ast::stmt::decl::FuncDecl;
use ir_js::ast::stmt::decl::VarDeclarator;
use ir_js::ast::stmt::CatchBlock;
use ir_js::ast::stmt::ForInStmt;
use ir_js::ast::stmt::Stmt;
use ir_js::ast::stx::TopLevel;
use ir_js::ident::Ident;
use ir_js::loc::Loc;
use ir_js::rewrite::walk_expr;
use ir_js::rewrite::walk_stmts;
use ir_js::rewrite::walk_top_level;
use ir_js::rewrite::Rewriter;
use ir_js::scope::ScopeId;
use symbol_js::scope::ScopeKind;
use symbol_js::ScopeAnalysis;
use tracing::debug;
use tracing::debug_span;

/// Original name to replacement name.
pub type RenameMap = HashMap<Ident, Ident>;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The `n`th name of the bijective base-52 enumeration `a`, ..., `Z`, `aa`, `ab`, ...
pub fn short_name(mut n: usize) -> String {
  let base = ALPHABET.len();
  let mut out = Vec::new();
  loop {
    out.push(ALPHABET[n % base]);
    if n < base {
      break;
    };
    n = n / base - 1;
  }
  out.reverse();
  out.into_iter().map(char::from).collect()
}

/// Names that must never be generated even though they are valid identifiers.
const RESTRICTED: &[&str] = &["eval", "arguments"];

struct NameGenerator<'a> {
  used: &'a HashSet<Ident>,
  pinned: &'a HashSet<Ident>,
}

impl<'a> NameGenerator<'a> {
  fn allowed(&self, candidate: &Ident) -> bool {
    !RESTRICTED.contains(&candidate.as_str())
      && !self.used.contains(candidate)
      && !self.pinned.contains(candidate)
  }

  /// The first acceptable name at or after index `used.len()`.
  fn next_name(&self) -> Ident {
    let mut counter = self.used.len();
    loop {
      // Ident rejects reserved words such as `do` and `in`.
      if let Ok(candidate) = Ident::new(short_name(counter)) {
        if self.allowed(&candidate) {
          return candidate;
        };
      };
      counter += 1;
    }
  }
}

/// A minimized tree together with the rename map in force in each scope.
#[derive(Debug)]
pub struct Renamed {
  pub top_level: Node<TopLevel>,
  pub scopes: HashMap<ScopeId, RenameMap>,
}

impl Renamed {
  pub fn map(&self, scope: ScopeId) -> Option<&RenameMap> {
    self.scopes.get(&scope)
  }

  /// Number of bindings given a new name, over all scopes.
  pub fn renamed_count(&self) -> usize {
    self
      .scopes
      .values()
      .flat_map(|map| map.iter())
      .filter(|(from, to)| from != to)
      .count()
  }
}

type FuncExprNode = Node<FuncExpr>;
type FuncDeclNode = Node<FuncDecl>;
type CatchBlockNode = Node<CatchBlock>;

#[derive(Visitor)]
#[visitor(FuncExprNode(enter), FuncDeclNode(enter), CatchBlockNode(enter))]
struct ScopeCheckVisitor<'a> {
  analysis: &'a ScopeAnalysis,
  error: Option<MinifyError>,
}

impl<'a> ScopeCheckVisitor<'a> {
  fn check(&mut self, scope: Option<ScopeId>) {
    if self.error.is_some() {
      return;
    };
    self.error = match scope {
      None => Some(MinifyError::UnanalyzedScope),
      Some(scope)
        if !self.analysis.tree.contains(scope)
          || !self.analysis.locals.has_scope(scope)
          || !self.analysis.globals.has_scope(scope) =>
      {
        Some(MinifyError::UnknownScope(scope))
      }
      Some(_) => None,
    };
  }

  fn enter_func_expr_node(&mut self, node: &FuncExprNode) {
    self.check(node.stx.scope);
  }

  fn enter_func_decl_node(&mut self, node: &FuncDeclNode) {
    self.check(node.stx.scope);
  }

  fn enter_catch_block_node(&mut self, node: &CatchBlockNode) {
    self.check(node.stx.scope);
  }
}

fn check_scopes(
  top_level_node: &Node<TopLevel>,
  analysis: &ScopeAnalysis,
) -> Result<(), MinifyError> {
  let mut visitor = ScopeCheckVisitor {
    analysis,
    error: None,
  };
  top_level_node.drive(&mut visitor);
  match visitor.error {
    Some(err) => Err(err),
    None => Ok(()),
  }
}

fn replace(map: &RenameMap, name: Ident) -> Ident {
  match map.get(&name) {
    Some(replacement) => replacement.clone(),
    None => name,
  }
}

// Keeps the pre-minification spelling for source maps.
fn name_loc(loc: &mut Option<Loc>, original: &Ident) {
  if let Some(loc) = loc {
    if loc.name.is_none() {
      loc.name = Some(original.as_str().into());
    };
  };
}

struct Renamer<'a> {
  analysis: &'a ScopeAnalysis,
  // Root locals, which keep their names and are never handed out.
  pinned: HashSet<Ident>,
  scopes: HashMap<ScopeId, RenameMap>,
}

impl<'a> Renamer<'a> {
  // A `var` hoisted into a catch scope is renamed there, so references to it after the catch
  // keep the old spelling.
  fn escapes_catch(&self, scope: ScopeId, local: &Ident) -> bool {
    let Some(data) = self.analysis.tree.get(scope) else {
      return false;
    };
    data.kind == ScopeKind::Catch
      && data
        .parent
        .is_some_and(|parent| self.analysis.globals.contains(parent, local))
  }

  /// The map for `scope`, extending `inherited` with replacements for the scope's locals.
  fn enter_scope(&mut self, scope: ScopeId, inherited: &RenameMap) -> RenameMap {
    let locals = self.analysis.locals.get(scope);
    let map = match locals {
      Some(locals) if !scope.is_root() && !locals.is_empty() => {
        let mut used: HashSet<Ident> = inherited.values().cloned().collect();
        used.extend(self.analysis.globals.names(scope).cloned());
        let mut map = inherited.clone();
        for local in locals.iter() {
          if map.contains_key(local) {
            continue;
          };
          if self.escapes_catch(scope, local) {
            debug!(
              %scope,
              name = %local,
              "catch-scoped var is also referenced outside the catch"
            );
          };
          let replacement = NameGenerator {
            used: &used,
            pinned: &self.pinned,
          }
          .next_name();
          used.insert(replacement.clone());
          map.insert(local.clone(), replacement);
        }
        map
      }
      _ => inherited.clone(),
    };
    self.scopes.insert(scope, map.clone());
    map
  }
}

impl<'a> Rewriter<RenameMap> for Renamer<'a> {
  fn rewrite_top_level(&mut self, node: Node<TopLevel>, data: &RenameMap) -> Node<TopLevel> {
    let root = self.enter_scope(ScopeId::ROOT, data);
    walk_top_level(self, node, &root)
  }

  fn rewrite_expr(&mut self, mut node: Node<Expr>, data: &RenameMap) -> Node<Expr> {
    let original = match node.stx.as_ref() {
      Expr::Id(id) if data.contains_key(&id.stx.name) => Some(id.stx.name.clone()),
      _ => None,
    };
    if let Some(original) = original {
      name_loc(&mut node.loc, &original);
    };
    walk_expr(self, node, data)
  }

  fn rewrite_id_expr(&mut self, mut node: Node<IdExpr>, data: &RenameMap) -> Expr {
    if data.contains_key(&node.stx.name) {
      name_loc(&mut node.loc, &node.stx.name);
    };
    Expr::Id(node.map_stx(|s| IdExpr {
      name: replace(data, s.name),
    }))
  }

  fn rewrite_func_expr(&mut self, node: Node<FuncExpr>, data: &RenameMap) -> Expr {
    let scope = node.stx.scope.unwrap_or(ScopeId::ROOT);
    let inner = self.enter_scope(scope, data);
    Expr::Func(node.map_stx(|s| FuncExpr {
      name: s.name.map(|name| replace(&inner, name)),
      parameters: s
        .parameters
        .into_iter()
        .map(|p| replace(&inner, p))
        .collect(),
      body: walk_stmts(self, s.body, &inner),
      scope: s.scope,
    }))
  }

  fn rewrite_func_decl(&mut self, node: Node<FuncDecl>, data: &RenameMap) -> Stmt {
    let scope = node.stx.scope.unwrap_or(ScopeId::ROOT);
    let inner = self.enter_scope(scope, data);
    Stmt::FunctionDecl(node.map_stx(|s| FuncDecl {
      // Bound in the enclosing scope.
      name: replace(data, s.name),
      parameters: s
        .parameters
        .into_iter()
        .map(|p| replace(&inner, p))
        .collect(),
      body: walk_stmts(self, s.body, &inner),
      scope: s.scope,
    }))
  }

  fn rewrite_catch_block(&mut self, node: Node<CatchBlock>, data: &RenameMap) -> Node<CatchBlock> {
    let scope = node.stx.scope.unwrap_or(ScopeId::ROOT);
    let inner = self.enter_scope(scope, data);
    node.map_stx(|s| CatchBlock {
      parameter: replace(&inner, s.parameter),
      body: walk_stmts(self, s.body, &inner),
      scope: s.scope,
    })
  }

  fn rewrite_var_declarator(
    &mut self,
    node: Node<VarDeclarator>,
    data: &RenameMap,
  ) -> Node<VarDeclarator> {
    node.map_stx(|s| VarDeclarator {
      name: replace(data, s.name),
      initializer: s.initializer.map(|i| self.rewrite_expr(i, data)),
    })
  }

  fn rewrite_for_in_stmt(&mut self, node: Node<ForInStmt>, data: &RenameMap) -> Stmt {
    Stmt::ForIn(node.map_stx(|s| ForInStmt {
      variable: replace(data, s.variable),
      declared: s.declared,
      object: self.rewrite_expr(s.object, data),
      body: self.rewrite_stmt(s.body, data),
    }))
  }
}

/// Renames the locals of every non-root scope of `top_level_node` to short names. `analysis`
/// must come from [`symbol_js::analyze`] on this same tree.
pub fn rename(
  top_level_node: Node<TopLevel>,
  analysis: &ScopeAnalysis,
) -> Result<Renamed, MinifyError> {
  let _span = debug_span!("minify_js.rename").entered();
  check_scopes(&top_level_node, analysis)?;
  let mut renamer = Renamer {
    analysis,
    pinned: analysis.locals.names(ScopeId::ROOT).cloned().collect(),
    scopes: HashMap::new(),
  };
  let top_level = renamer.rewrite_top_level(top_level_node, &RenameMap::new());
  let renamed = Renamed {
    top_level,
    scopes: renamer.scopes,
  };
  debug!(
    scopes = renamed.scopes.len(),
    renamed = renamed.renamed_count(),
    "renamed locals"
  );
  Ok(renamed)
}

#[cfg(test)]
mod tests {
  use super::short_name;

  #[test]
  fn short_names_are_bijective_base_52() {
    assert_eq!(short_name(0), "a");
    assert_eq!(short_name(25), "z");
    assert_eq!(short_name(26), "A");
    assert_eq!(short_name(51), "Z");
    assert_eq!(short_name(52), "aa");
    assert_eq!(short_name(53), "ab");
    assert_eq!(short_name(52 + 52 * 52 - 1), "ZZ");
    assert_eq!(short_name(52 + 52 * 52), "aaa");
  }
}
