use ir_js::ast::node::Node;
use ir_js::ast::stmt::BlockStmt;
use ir_js::ast::stmt::CommentStmt;
use ir_js::ast::stmt::Stmt;
use ir_js::ast::stx::TopLevel;
use ir_js::rewrite::Rewriter;
use tracing::debug;
use tracing::debug_span;

#[derive(Default)]
struct CommentStripper {
  stripped: usize,
}

impl Rewriter<()> for CommentStripper {
  // Statement lists drop the empty merge block; elsewhere it prints as `{}`.
  fn rewrite_comment_stmt(&mut self, node: Node<CommentStmt>, _data: &()) -> Stmt {
    self.stripped += 1;
    Stmt::Block(Node::new(node.loc, BlockStmt {
      body: Vec::new(),
      merge_with_parent: true,
    }))
  }
}

/// Removes every comment statement.
pub fn strip_comments(top_level_node: Node<TopLevel>) -> Node<TopLevel> {
  let _span = debug_span!("minify_js.strip_comments").entered();
  let mut stripper = CommentStripper::default();
  let top_level_node = stripper.rewrite_top_level(top_level_node, &());
  debug!(stripped = stripper.stripped, "stripped comments");
  top_level_node
}
