use ahash::HashMap;
use ahash::HashMapExt;
use ahash::RandomState;
use indexmap::IndexSet;
use ir_js::ast::node::Node;
use ir_js::ast::stx::TopLevel;
use ir_js::ident::Ident;
use ir_js::scope::ScopeId;

pub mod globals;
pub mod locals;
pub mod scope;

pub use globals::compute_implicit_globals;
pub use globals::GlobalsReport;
pub use globals::ImplicitGlobals;
pub use locals::compute_locals;
pub use locals::Locals;
pub use scope::compute_scope_tree;
pub use scope::ScopeTree;

/// Names in first-seen order, so that everything derived from them is deterministic.
pub type NameSet = IndexSet<Ident, RandomState>;

/// A [`NameSet`] for every scope of a tree.
#[derive(Clone, Debug, Default)]
pub struct ScopeNames {
  sets: HashMap<ScopeId, NameSet>,
}

impl ScopeNames {
  pub(crate) fn new() -> ScopeNames {
    ScopeNames {
      sets: HashMap::new(),
    }
  }

  pub(crate) fn open(&mut self, scope: ScopeId) -> &mut NameSet {
    self.sets.entry(scope).or_default()
  }

  pub(crate) fn insert(&mut self, scope: ScopeId, name: Ident) -> bool {
    self.open(scope).insert(name)
  }

  pub fn get(&self, scope: ScopeId) -> Option<&NameSet> {
    self.sets.get(&scope)
  }

  pub fn has_scope(&self, scope: ScopeId) -> bool {
    self.sets.contains_key(&scope)
  }

  /// Names of `scope` in first-seen order; empty for an unknown scope.
  pub fn names(&self, scope: ScopeId) -> impl Iterator<Item = &Ident> {
    self.sets.get(&scope).into_iter().flatten()
  }

  pub fn contains(&self, scope: ScopeId, name: &str) -> bool {
    self.sets.get(&scope).is_some_and(|s| s.contains(name))
  }

  pub fn scope_count(&self) -> usize {
    self.sets.len()
  }

  /// Sum of the set sizes.
  pub fn name_count(&self) -> usize {
    self.sets.values().map(|s| s.len()).sum()
  }
}

/// All scope tables for one tree.
#[derive(Clone, Debug)]
pub struct ScopeAnalysis {
  pub tree: ScopeTree,
  pub locals: Locals,
  pub globals: ImplicitGlobals,
}

/// Assigns scope ids to `top_level_node` and computes its locals and implicit globals, with
/// free names reported to every enclosing scope.
pub fn analyze(top_level_node: &mut Node<TopLevel>) -> ScopeAnalysis {
  let tree = compute_scope_tree(top_level_node);
  let locals = compute_locals(top_level_node);
  let globals = compute_implicit_globals(top_level_node, &locals, GlobalsReport::AllEnclosing);
  ScopeAnalysis {
    tree,
    locals,
    globals,
  }
}
