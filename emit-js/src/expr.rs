use crate::emitter::with_node_context;
use crate::emitter::EmitError;
use crate::emitter::EmitOptions;
use crate::emitter::EmitResult;
use crate::emitter::Emitter;
use crate::escape::string_literal_double_quoted;
use crate::precedence::child_min_prec_for_binary;
use crate::precedence::contains_unparenthesized_call;
use crate::precedence::expr_prec;
use crate::precedence::needs_parens;
use crate::precedence::Prec;
use crate::precedence::Side;
use ir_js::ast::expr::lit::LitRegexExpr;
use ir_js::ast::expr::ArrExpr;
use ir_js::ast::expr::BinaryExpr;
use ir_js::ast::expr::CallExpr;
use ir_js::ast::expr::CondExpr;
use ir_js::ast::expr::Expr;
use ir_js::ast::expr::FuncExpr;
use ir_js::ast::expr::MemberExpr;
use ir_js::ast::expr::NewExpr;
use ir_js::ast::expr::ObjExpr;
use ir_js::ast::expr::TypeHandle;
use ir_js::ast::expr::UnaryExpr;
use ir_js::ast::node::Node;
use ir_js::ident::is_identifier_name;
use ir_js::ident::Ident;
use ir_js::loc::Loc;
use ir_js::operator::BinaryOperator;
use std::fmt::Write;

/// Shortest decimal or exponent rendering of a finite non-negative number.
pub(crate) fn format_number(value: f64) -> EmitResult<String> {
  let mut plain = String::new();
  write!(plain, "{}", value)?;
  let mut exponent = String::new();
  write!(exponent, "{:e}", value)?;
  Ok(if exponent.len() < plain.len() {
    exponent
  } else {
    plain
  })
}

/// Formats IR into an [`Emitter`]. Statements live in `stmt.rs`.
pub struct JsEmitter<'a> {
  pub(crate) out: Emitter,
  pub(crate) opts: &'a EmitOptions,
}

impl<'a> JsEmitter<'a> {
  pub fn new(out: Emitter, opts: &'a EmitOptions) -> Self {
    JsEmitter { out, opts }
  }

  pub fn into_inner(self) -> Emitter {
    self.out
  }

  /// Maps the next token to `loc` if there is one. Unlike statements, nodes without a location
  /// leave the enclosing mapping in effect.
  pub(crate) fn mark_located(&mut self, loc: Option<&Loc>) {
    if loc.is_some() {
      self.out.mark(loc);
    };
  }

  pub fn emit_expr(&mut self, expr: &Node<Expr>, min_prec: Prec) -> EmitResult {
    with_node_context(expr.loc.as_ref(), || {
      self.mark_located(expr.loc.as_ref());
      let parens = needs_parens(expr_prec(expr), min_prec);
      if parens {
        self.out.write_punct("(");
      };
      self.emit_expr_no_parens(expr)?;
      if parens {
        self.out.write_punct(")");
      };
      Ok(())
    })
  }

  fn emit_expr_no_parens(&mut self, expr: &Node<Expr>) -> EmitResult {
    match expr.stx.as_ref() {
      Expr::Arr(arr) => self.emit_arr(&arr.stx),
      Expr::Binary(binary) => self.emit_binary(&binary.stx),
      Expr::Call(call) => self.emit_call(&call.stx),
      Expr::Comma(comma) => self.emit_list(&comma.stx.expressions),
      Expr::Cond(cond) => self.emit_cond(&cond.stx),
      Expr::Func(func) => self.emit_func_expr(&func.stx),
      Expr::Id(id) => {
        self.out.write_identifier(&id.stx.name);
        Ok(())
      }
      Expr::Member(member) => self.emit_member(&member.stx),
      Expr::New(new) => self.emit_new(&new.stx),
      Expr::Obj(obj) => self.emit_obj(&obj.stx),
      Expr::This(_) => {
        self.out.write_keyword("this");
        Ok(())
      }
      Expr::TypeRef(type_ref) => self.emit_type_ref(type_ref.stx.handle),
      Expr::Unary(unary) => self.emit_unary(&unary.stx),
      Expr::LitBool(lit) => {
        self
          .out
          .write_keyword(if lit.stx.value { "true" } else { "false" });
        Ok(())
      }
      Expr::LitNull(_) => {
        self.out.write_keyword("null");
        Ok(())
      }
      Expr::LitNum(lit) => self.emit_number(lit.stx.value.0),
      Expr::LitRegex(lit) => self.emit_regex(&lit.stx),
      Expr::LitStr(lit) => {
        self
          .out
          .write_literal(&string_literal_double_quoted(&lit.stx.value));
        Ok(())
      }
    }
  }

  fn write_comma(&mut self) {
    self.out.write_punct(",");
    self.out.write_optional_space();
  }

  fn write_spaced_punct(&mut self, punct: &str) {
    self.out.write_optional_space();
    self.out.write_punct(punct);
    self.out.write_optional_space();
  }

  /// Comma separated expressions, each of which must not itself be a comma expression.
  fn emit_list(&mut self, exprs: &[Node<Expr>]) -> EmitResult {
    for (i, expr) in exprs.iter().enumerate() {
      if i > 0 {
        self.write_comma();
      };
      self.emit_expr(expr, Prec::ASSIGNMENT)?;
    }
    Ok(())
  }

  fn emit_arr(&mut self, arr: &ArrExpr) -> EmitResult {
    self.out.write_punct("[");
    self.emit_list(&arr.elements)?;
    self.out.write_punct("]");
    Ok(())
  }

  fn emit_binary(&mut self, binary: &BinaryExpr) -> EmitResult {
    if binary.operator == BinaryOperator::Index {
      self.emit_expr(&binary.left, Prec::CALL_MEMBER)?;
      self.out.write_punct("[");
      self.emit_expr(&binary.right, Prec::LOWEST)?;
      self.out.write_punct("]");
      return Ok(());
    };
    self.emit_expr(
      &binary.left,
      child_min_prec_for_binary(binary.operator, Side::Left),
    )?;
    self.write_spaced_punct(binary.operator.as_str());
    self.emit_expr(
      &binary.right,
      child_min_prec_for_binary(binary.operator, Side::Right),
    )
  }

  fn emit_call(&mut self, call: &CallExpr) -> EmitResult {
    self.emit_expr(&call.callee, Prec::CALL_MEMBER)?;
    self.out.write_punct("(");
    self.emit_list(&call.arguments)?;
    self.out.write_punct(")");
    Ok(())
  }

  fn emit_cond(&mut self, cond: &CondExpr) -> EmitResult {
    self.emit_expr(&cond.test, Prec::CONDITIONAL.tighter())?;
    self.write_spaced_punct("?");
    self.emit_expr(&cond.consequent, Prec::ASSIGNMENT)?;
    self.write_spaced_punct(":");
    self.emit_expr(&cond.alternate, Prec::ASSIGNMENT)
  }

  fn emit_func_expr(&mut self, func: &FuncExpr) -> EmitResult {
    self.out.write_keyword("function");
    if let Some(name) = &func.name {
      self.out.write_identifier(name);
    };
    self.emit_params(&func.parameters);
    self.out.write_optional_space();
    self.emit_block_body(&func.body)
  }

  pub(crate) fn emit_params(&mut self, params: &[Ident]) {
    self.out.write_punct("(");
    for (i, param) in params.iter().enumerate() {
      if i > 0 {
        self.write_comma();
      };
      self.out.write_identifier(param);
    }
    self.out.write_punct(")");
  }

  fn emit_member(&mut self, member: &MemberExpr) -> EmitResult {
    // `1.x` would lex as a malformed number.
    let min_prec = match member.object.stx.as_ref() {
      Expr::LitNum(_) => Prec::PRIMARY.tighter(),
      _ => Prec::CALL_MEMBER,
    };
    self.emit_expr(&member.object, min_prec)?;
    self.out.write_punct(".");
    self.out.write_identifier(&member.member);
    Ok(())
  }

  fn emit_new(&mut self, new: &NewExpr) -> EmitResult {
    self.out.write_punct("new");
    let min_prec = if contains_unparenthesized_call(&new.constructor) {
      Prec::PRIMARY
    } else {
      Prec::CALL_MEMBER
    };
    self.emit_expr(&new.constructor, min_prec)?;
    self.out.write_punct("(");
    self.emit_list(&new.arguments)?;
    self.out.write_punct(")");
    Ok(())
  }

  fn emit_obj(&mut self, obj: &ObjExpr) -> EmitResult {
    self.out.write_punct("{");
    for (i, member) in obj.members.iter().enumerate() {
      if i > 0 {
        self.write_comma();
      };
      if is_identifier_name(&member.stx.key) {
        self.out.write_identifier(&member.stx.key);
      } else {
        self
          .out
          .write_literal(&string_literal_double_quoted(&member.stx.key));
      };
      self.out.write_punct(":");
      self.out.write_optional_space();
      self.emit_expr(&member.stx.value, Prec::ASSIGNMENT)?;
    }
    self.out.write_punct("}");
    Ok(())
  }

  fn emit_type_ref(&mut self, handle: TypeHandle) -> EmitResult {
    let Some(name) = self.opts.type_names.get(&handle) else {
      return Err(EmitError::unresolved_type_ref(handle));
    };
    self.out.write_identifier(name);
    Ok(())
  }

  fn emit_unary(&mut self, unary: &UnaryExpr) -> EmitResult {
    if unary.operator.is_postfix() {
      self.emit_expr(&unary.argument, Prec::CALL_MEMBER)?;
      self.out.write_punct(unary.operator.as_str());
    } else {
      self.out.write_punct(unary.operator.as_str());
      self.emit_expr(&unary.argument, Prec::PREFIX)?;
    };
    Ok(())
  }

  fn emit_number(&mut self, value: f64) -> EmitResult {
    if value.is_nan() {
      self.out.write_identifier("NaN");
      return Ok(());
    };
    if value.is_sign_negative() {
      self.out.write_punct("-");
    };
    let magnitude = value.abs();
    if magnitude.is_infinite() {
      self.out.write_identifier("Infinity");
    } else {
      self.out.write_number(&format_number(magnitude)?);
    };
    Ok(())
  }

  fn emit_regex(&mut self, regex: &LitRegexExpr) -> EmitResult {
    let mut literal = String::with_capacity(regex.pattern.len() + regex.flags.len() + 2);
    write!(literal, "/{}/{}", regex.pattern, regex.flags)?;
    self.out.write_literal(&literal);
    Ok(())
  }
}
