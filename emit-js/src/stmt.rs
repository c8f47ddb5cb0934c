use crate::emitter::EmitResult;
use crate::escape::block_comment;
use crate::expr::JsEmitter;
use crate::precedence::contains_bare_in;
use crate::precedence::starts_with_function_or_brace;
use crate::precedence::Prec;
use ir_js::ast::expr::Expr;
use ir_js::ast::node::Node;
use ir_js::ast::stmt::decl::FuncDecl;
use ir_js::ast::stmt::decl::VarDecl;
use ir_js::ast::stmt::BlockStmt;
use ir_js::ast::stmt::DoWhileStmt;
use ir_js::ast::stmt::ForInStmt;
use ir_js::ast::stmt::ForInit;
use ir_js::ast::stmt::ForStmt;
use ir_js::ast::stmt::IfStmt;
use ir_js::ast::stmt::Stmt;
use ir_js::ast::stmt::SwitchStmt;
use ir_js::ast::stmt::TryStmt;
use ir_js::ast::stx::TopLevel;
use ir_js::ident::Ident;

/// Statements of `stmts` with every merge block replaced by its contents.
fn flatten<'s>(stmts: &'s [Node<Stmt>], out: &mut Vec<&'s Node<Stmt>>) {
  for stmt in stmts {
    match stmt.stx.as_ref() {
      Stmt::Block(block) if block.stx.merge_with_parent => flatten(&block.stx.body, out),
      _ => out.push(stmt),
    }
  }
}

/// Whether `stmt` ends with an `if` lacking an `else`, which would capture a following `else`.
fn ends_with_dangling_if(stmt: &Node<Stmt>) -> bool {
  match stmt.stx.as_ref() {
    Stmt::If(if_stmt) => match &if_stmt.stx.alternate {
      None => true,
      Some(alternate) => ends_with_dangling_if(alternate),
    },
    Stmt::Label(label) => ends_with_dangling_if(&label.stx.statement),
    Stmt::While(while_stmt) => ends_with_dangling_if(&while_stmt.stx.body),
    Stmt::For(for_stmt) => ends_with_dangling_if(&for_stmt.stx.body),
    Stmt::ForIn(for_in) => ends_with_dangling_if(&for_in.stx.body),
    _ => false,
  }
}

impl<'a> JsEmitter<'a> {
  pub fn emit_top_level(&mut self, top: &Node<TopLevel>) -> EmitResult {
    let mut stmts = Vec::new();
    flatten(&top.stx.body, &mut stmts);
    for (i, stmt) in stmts.iter().enumerate() {
      if i > 0 {
        self.out.write_line_break();
      };
      self.emit_stmt(stmt)?;
    }
    if !stmts.is_empty() {
      self.out.write_line_break();
    };
    Ok(())
  }

  /// `{`, the statements one per line, `}`.
  pub(crate) fn emit_block_body(&mut self, body: &[Node<Stmt>]) -> EmitResult {
    let mut stmts = Vec::new();
    flatten(body, &mut stmts);
    self.out.write_punct("{");
    self.out.indent();
    for stmt in stmts.iter() {
      self.out.write_line_break();
      self.emit_stmt(stmt)?;
    }
    self.out.dedent();
    if !stmts.is_empty() {
      self.out.write_line_break();
    };
    self.out.write_punct("}");
    Ok(())
  }

  fn emit_block(&mut self, block: &Node<BlockStmt>) -> EmitResult {
    self.mark_located(block.loc.as_ref());
    self.emit_block_body(&block.stx.body)
  }

  /// A statement nested in a control structure, after its header.
  fn emit_body(&mut self, body: &Node<Stmt>) -> EmitResult {
    self.out.write_optional_space();
    self.emit_stmt(body)
  }

  fn emit_label_ref(&mut self, keyword: &str, label: Option<&Ident>) {
    self.out.write_keyword(keyword);
    if let Some(label) = label {
      self.out.write_identifier(label);
    };
    self.out.write_punct(";");
  }

  pub fn emit_stmt(&mut self, stmt: &Node<Stmt>) -> EmitResult {
    self.out.mark(stmt.loc.as_ref());
    match stmt.stx.as_ref() {
      Stmt::Block(block) => self.emit_block_body(&block.stx.body),
      Stmt::Break(brk) => {
        self.emit_label_ref("break", brk.stx.label.as_ref());
        Ok(())
      }
      Stmt::Comment(comment) => {
        self.out.write_literal(&block_comment(&comment.stx.text));
        Ok(())
      }
      Stmt::Continue(cont) => {
        self.emit_label_ref("continue", cont.stx.label.as_ref());
        Ok(())
      }
      Stmt::DoWhile(do_while) => self.emit_do_while(&do_while.stx),
      Stmt::Expr(expr_stmt) => {
        let expr = &expr_stmt.stx.expr;
        if starts_with_function_or_brace(expr) {
          self.out.write_punct("(");
          self.emit_expr(expr, Prec::LOWEST)?;
          self.out.write_punct(")");
        } else {
          self.emit_expr(expr, Prec::LOWEST)?;
        };
        self.out.write_punct(";");
        Ok(())
      }
      Stmt::For(for_stmt) => self.emit_for(&for_stmt.stx),
      Stmt::ForIn(for_in) => self.emit_for_in(&for_in.stx),
      Stmt::If(if_stmt) => self.emit_if(&if_stmt.stx),
      Stmt::Label(label) => {
        self.out.write_identifier(&label.stx.label);
        self.out.write_punct(":");
        self.emit_body(&label.stx.statement)
      }
      Stmt::Return(ret) => {
        self.out.write_keyword("return");
        if let Some(value) = &ret.stx.value {
          self.out.write_optional_space();
          self.emit_expr(value, Prec::LOWEST)?;
        };
        self.out.write_punct(";");
        Ok(())
      }
      Stmt::Switch(switch) => self.emit_switch(&switch.stx),
      Stmt::Throw(throw) => {
        self.out.write_keyword("throw");
        self.out.write_optional_space();
        self.emit_expr(&throw.stx.value, Prec::LOWEST)?;
        self.out.write_punct(";");
        Ok(())
      }
      Stmt::Try(try_stmt) => self.emit_try(&try_stmt.stx),
      Stmt::While(while_stmt) => {
        self.out.write_keyword("while");
        self.emit_condition(&while_stmt.stx.condition)?;
        self.emit_body(&while_stmt.stx.body)
      }
      Stmt::FunctionDecl(func) => self.emit_func_decl(&func.stx),
      Stmt::VarDecl(decl) => {
        self.emit_var_decl(&decl.stx, false)?;
        self.out.write_punct(";");
        Ok(())
      }
    }
  }

  /// A parenthesized loop or `if` condition.
  fn emit_condition(&mut self, condition: &Node<Expr>) -> EmitResult {
    self.out.write_optional_space();
    self.out.write_punct("(");
    self.emit_expr(condition, Prec::LOWEST)?;
    self.out.write_punct(")");
    Ok(())
  }

  fn emit_do_while(&mut self, do_while: &DoWhileStmt) -> EmitResult {
    self.out.write_keyword("do");
    self.emit_body(&do_while.body)?;
    self.out.write_optional_space();
    self.out.write_keyword("while");
    self.emit_condition(&do_while.condition)?;
    self.out.write_punct(";");
    Ok(())
  }

  fn emit_for(&mut self, for_stmt: &ForStmt) -> EmitResult {
    self.out.write_keyword("for");
    self.out.write_optional_space();
    self.out.write_punct("(");
    match &for_stmt.init {
      ForInit::None => {}
      ForInit::Expr(init) => {
        let min_prec = if contains_bare_in(init) {
          Prec::PRIMARY.tighter()
        } else {
          Prec::LOWEST
        };
        self.emit_expr(init, min_prec)?;
      }
      ForInit::Decl(decl) => {
        self.mark_located(decl.loc.as_ref());
        self.emit_var_decl(&decl.stx, true)?;
      }
    };
    self.out.write_punct(";");
    if let Some(condition) = &for_stmt.condition {
      self.out.write_optional_space();
      self.emit_expr(condition, Prec::LOWEST)?;
    };
    self.out.write_punct(";");
    if let Some(update) = &for_stmt.update {
      self.out.write_optional_space();
      self.emit_expr(update, Prec::LOWEST)?;
    };
    self.out.write_punct(")");
    self.emit_body(&for_stmt.body)
  }

  fn emit_for_in(&mut self, for_in: &ForInStmt) -> EmitResult {
    self.out.write_keyword("for");
    self.out.write_optional_space();
    self.out.write_punct("(");
    if for_in.declared {
      self.out.write_keyword("var");
    };
    self.out.write_identifier(&for_in.variable);
    self.out.write_punct("in");
    self.emit_expr(&for_in.object, Prec::LOWEST)?;
    self.out.write_punct(")");
    self.emit_body(&for_in.body)
  }

  fn emit_if(&mut self, if_stmt: &IfStmt) -> EmitResult {
    self.out.write_keyword("if");
    self.emit_condition(&if_stmt.test)?;
    let Some(alternate) = &if_stmt.alternate else {
      return self.emit_body(&if_stmt.consequent);
    };
    if ends_with_dangling_if(&if_stmt.consequent) {
      self.out.write_optional_space();
      self.emit_block_body(std::slice::from_ref(&if_stmt.consequent))?;
    } else {
      self.emit_body(&if_stmt.consequent)?;
    };
    self.out.write_optional_space();
    self.out.write_keyword("else");
    self.emit_body(alternate)
  }

  fn emit_switch(&mut self, switch: &SwitchStmt) -> EmitResult {
    self.out.write_keyword("switch");
    self.emit_condition(&switch.test)?;
    self.out.write_optional_space();
    self.out.write_punct("{");
    self.out.indent();
    for branch in switch.branches.iter() {
      self.out.write_line_break();
      self.mark_located(branch.loc.as_ref());
      match &branch.stx.case {
        Some(case) => {
          self.out.write_keyword("case");
          self.out.write_optional_space();
          self.emit_expr(case, Prec::LOWEST)?;
        }
        None => self.out.write_keyword("default"),
      };
      self.out.write_punct(":");
      let mut stmts = Vec::new();
      flatten(&branch.stx.body, &mut stmts);
      self.out.indent();
      for stmt in stmts {
        self.out.write_line_break();
        self.emit_stmt(stmt)?;
      }
      self.out.dedent();
    }
    self.out.dedent();
    if !switch.branches.is_empty() {
      self.out.write_line_break();
    };
    self.out.write_punct("}");
    Ok(())
  }

  fn emit_try(&mut self, try_stmt: &TryStmt) -> EmitResult {
    self.out.write_keyword("try");
    self.out.write_optional_space();
    self.emit_block(&try_stmt.wrapped)?;
    if let Some(catch) = &try_stmt.catch {
      self.out.write_optional_space();
      self.mark_located(catch.loc.as_ref());
      self.out.write_keyword("catch");
      self.out.write_optional_space();
      self.out.write_punct("(");
      self.out.write_identifier(&catch.stx.parameter);
      self.out.write_punct(")");
      self.out.write_optional_space();
      self.emit_block_body(&catch.stx.body)?;
    };
    if let Some(finally) = &try_stmt.finally {
      self.out.write_optional_space();
      self.out.write_keyword("finally");
      self.out.write_optional_space();
      self.emit_block(finally)?;
    };
    Ok(())
  }

  fn emit_func_decl(&mut self, func: &FuncDecl) -> EmitResult {
    self.out.write_keyword("function");
    self.out.write_identifier(&func.name);
    self.emit_params(&func.parameters);
    self.out.write_optional_space();
    self.emit_block_body(&func.body)
  }

  /// `var` and its declarators, without the terminating semicolon. In a `for` header an
  /// initializer containing `in` is parenthesized.
  fn emit_var_decl(&mut self, decl: &VarDecl, for_init: bool) -> EmitResult {
    self.out.write_keyword("var");
    for (i, declarator) in decl.declarators.iter().enumerate() {
      if i > 0 {
        self.out.write_punct(",");
        self.out.write_optional_space();
      };
      self.mark_located(declarator.loc.as_ref());
      self.out.write_identifier(&declarator.stx.name);
      if let Some(initializer) = &declarator.stx.initializer {
        self.out.write_optional_space();
        self.out.write_punct("=");
        self.out.write_optional_space();
        let min_prec = if for_init && contains_bare_in(initializer) {
          Prec::PRIMARY.tighter()
        } else {
          Prec::ASSIGNMENT
        };
        self.emit_expr(initializer, min_prec)?;
      };
    }
    Ok(())
  }
}
