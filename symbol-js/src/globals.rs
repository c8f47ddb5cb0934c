use crate::locals::scope_of;
use crate::Locals;
use crate::ScopeNames;
use ahash::HashSet;
use ahash::HashSetExt;
use derive_visitor::Drive;
use derive_visitor::Visitor;
use ir_js::ast::expr::FuncExpr;
use ir_js::ast::expr::IdExpr;
use ir_js::ast::node::Node;
use ir_js::ast::stmt::decl::FuncDecl;
use ir_js::ast::stmt::CatchBlock;
use ir_js::ast::stmt::ForInStmt;
use ir_js::ast::stx::TopLevel;
use ir_js::ident::Ident;
use ir_js::scope::ScopeId;
use tracing::debug;
use tracing::debug_span;

/// Free names referenced in each scope: not bound in the scope or any enclosing scope.
pub type ImplicitGlobals = ScopeNames;

/// Where a free name is recorded.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GlobalsReport {
  /// In every scope from the referencing one up to the root. A scope's set then holds every
  /// free name used anywhere inside it, which is what a renamer must avoid.
  AllEnclosing,
  /// Only in the scope containing the reference.
  Innermost,
}

type FuncExprNode = Node<FuncExpr>;
type FuncDeclNode = Node<FuncDecl>;
type CatchBlockNode = Node<CatchBlock>;
type IdExprNode = Node<IdExpr>;
type ForInStmtNode = Node<ForInStmt>;

struct Frame {
  scope: ScopeId,
  // Locals of this scope and all enclosing ones.
  visible: HashSet<Ident>,
}

#[derive(Visitor)]
#[visitor(
  FuncExprNode(enter, exit),
  FuncDeclNode(enter, exit),
  CatchBlockNode(enter, exit),
  IdExprNode(enter),
  ForInStmtNode(enter)
)]
struct GlobalsVisitor<'a> {
  locals: &'a Locals,
  report: GlobalsReport,
  globals: ImplicitGlobals,
  stack: Vec<Frame>,
}

impl<'a> GlobalsVisitor<'a> {
  fn push(&mut self, scope: ScopeId) {
    let Some(own) = self.locals.get(scope) else {
      panic!("{scope} has no locals; compute_locals must run before compute_implicit_globals");
    };
    let mut visible = self
      .stack
      .last()
      .map(|f| f.visible.clone())
      .unwrap_or_else(HashSet::new);
    visible.extend(own.iter().cloned());
    self.globals.open(scope);
    self.stack.push(Frame { scope, visible });
  }

  fn pop(&mut self) {
    self.stack.pop();
  }

  fn reference(&mut self, name: &Ident) {
    let Some(innermost) = self.stack.last() else {
      return;
    };
    if innermost.visible.contains(name) {
      return;
    };
    match self.report {
      GlobalsReport::AllEnclosing => {
        for frame in self.stack.iter().rev() {
          self.globals.insert(frame.scope, name.clone());
        }
      }
      GlobalsReport::Innermost => {
        self.globals.insert(innermost.scope, name.clone());
      }
    };
  }

  fn enter_func_expr_node(&mut self, node: &FuncExprNode) {
    self.push(scope_of(node.stx.scope));
  }

  fn exit_func_expr_node(&mut self, _node: &FuncExprNode) {
    self.pop();
  }

  fn enter_func_decl_node(&mut self, node: &FuncDeclNode) {
    self.push(scope_of(node.stx.scope));
  }

  fn exit_func_decl_node(&mut self, _node: &FuncDeclNode) {
    self.pop();
  }

  // The catch parameter is one of the catch scope's locals, so it becomes visible here.
  fn enter_catch_block_node(&mut self, node: &CatchBlockNode) {
    self.push(scope_of(node.stx.scope));
  }

  fn exit_catch_block_node(&mut self, _node: &CatchBlockNode) {
    self.pop();
  }

  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    self.reference(&node.stx.name);
  }

  fn enter_for_in_stmt_node(&mut self, node: &ForInStmtNode) {
    if !node.stx.declared {
      self.reference(&node.stx.variable);
    };
  }
}

/// Finds the free names of every scope. `locals` must come from [`compute_locals`] on the same
/// tree. Every scope gets an entry, possibly empty.
///
/// [`compute_locals`]: crate::compute_locals
pub fn compute_implicit_globals(
  top_level_node: &Node<TopLevel>,
  locals: &Locals,
  report: GlobalsReport,
) -> ImplicitGlobals {
  let _span = debug_span!("symbol_js.globals", ?report).entered();
  let mut visitor = GlobalsVisitor {
    locals,
    report,
    globals: ImplicitGlobals::new(),
    stack: Vec::new(),
  };
  visitor.push(ScopeId::ROOT);
  top_level_node.drive(&mut visitor);
  debug!(
    globals = visitor.globals.name_count(),
    "gathered implicit globals"
  );
  visitor.globals
}
