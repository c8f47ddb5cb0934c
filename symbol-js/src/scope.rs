use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use ir_js::ast::expr::FuncExpr;
use ir_js::ast::node::Node;
use ir_js::ast::stmt::decl::FuncDecl;
use ir_js::ast::stmt::CatchBlock;
use ir_js::ast::stx::TopLevel;
use ir_js::scope::ScopeId;
use tracing::debug;
use tracing::debug_span;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScopeKind {
  Root,
  // Function expressions and function statements.
  Function,
  Catch,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ScopeData {
  pub kind: ScopeKind,
  // None only for the root.
  pub parent: Option<ScopeId>,
  // In discovery order.
  pub children: Vec<ScopeId>,
}

/// Nesting of declaration scopes, indexed by [`ScopeId`]. The root is always present.
#[derive(Clone, Debug)]
pub struct ScopeTree {
  scopes: Vec<ScopeData>,
}

impl ScopeTree {
  fn new() -> ScopeTree {
    ScopeTree {
      scopes: vec![ScopeData {
        kind: ScopeKind::Root,
        parent: None,
        children: Vec::new(),
      }],
    }
  }

  fn create_child_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
    let id = ScopeId(self.scopes.len() as u32);
    self.scopes.push(ScopeData {
      kind,
      parent: Some(parent),
      children: Vec::new(),
    });
    self.scopes[parent.index()].children.push(id);
    id
  }

  pub fn get(&self, id: ScopeId) -> Option<&ScopeData> {
    self.scopes.get(id.index())
  }

  pub fn contains(&self, id: ScopeId) -> bool {
    id.index() < self.scopes.len()
  }

  pub fn len(&self) -> usize {
    self.scopes.len()
  }

  pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
    self.get(id).and_then(|s| s.parent)
  }

  pub fn children(&self, id: ScopeId) -> &[ScopeId] {
    self.get(id).map(|s| s.children.as_slice()).unwrap_or(&[])
  }

  /// All scopes in discovery (pre-)order, root first.
  pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &ScopeData)> {
    self
      .scopes
      .iter()
      .enumerate()
      .map(|(i, s)| (ScopeId(i as u32), s))
  }

  /// `id` followed by each enclosing scope up to and including the root.
  pub fn self_and_ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
    std::iter::successors(self.contains(id).then_some(id), |&s| self.parent(s))
  }
}

type FuncExprNode = Node<FuncExpr>;
type FuncDeclNode = Node<FuncDecl>;
type CatchBlockNode = Node<CatchBlock>;

#[derive(VisitorMut)]
#[visitor(
  FuncExprNode(enter, exit),
  FuncDeclNode(enter, exit),
  CatchBlockNode(enter, exit)
)]
struct ScopeTreeVisitor {
  tree: ScopeTree,
  stack: Vec<ScopeId>,
}

impl ScopeTreeVisitor {
  fn current(&self) -> ScopeId {
    *self.stack.last().unwrap_or(&ScopeId::ROOT)
  }

  fn open(&mut self, kind: ScopeKind) -> ScopeId {
    let id = self.tree.create_child_scope(self.current(), kind);
    self.stack.push(id);
    id
  }

  fn close(&mut self) {
    self.stack.pop();
  }

  fn enter_func_expr_node(&mut self, node: &mut FuncExprNode) {
    node.stx.scope = Some(self.open(ScopeKind::Function));
  }

  fn exit_func_expr_node(&mut self, _node: &mut FuncExprNode) {
    self.close();
  }

  fn enter_func_decl_node(&mut self, node: &mut FuncDeclNode) {
    node.stx.scope = Some(self.open(ScopeKind::Function));
  }

  fn exit_func_decl_node(&mut self, _node: &mut FuncDeclNode) {
    self.close();
  }

  fn enter_catch_block_node(&mut self, node: &mut CatchBlockNode) {
    node.stx.scope = Some(self.open(ScopeKind::Catch));
  }

  fn exit_catch_block_node(&mut self, _node: &mut CatchBlockNode) {
    self.close();
  }
}

/// Discovers every declaration scope in `top_level_node`, numbering them in pre-order (the
/// root is [`ScopeId::ROOT`]), and stores each id on its scope node. Ids from an earlier run
/// are overwritten.
pub fn compute_scope_tree(top_level_node: &mut Node<TopLevel>) -> ScopeTree {
  let _span = debug_span!("symbol_js.scope_tree").entered();
  let mut visitor = ScopeTreeVisitor {
    tree: ScopeTree::new(),
    stack: Vec::new(),
  };
  top_level_node.drive_mut(&mut visitor);
  debug!(scopes = visitor.tree.len(), "computed scope tree");
  visitor.tree
}
