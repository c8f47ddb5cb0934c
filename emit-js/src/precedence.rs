use ir_js::ast::expr::Expr;
use ir_js::ast::node::Node;
use ir_js::operator::Associativity;
use ir_js::operator::BinaryOperator;
use ir_js::operator::CALL_MEMBER_PRECEDENCE;
use ir_js::operator::COMMA_PRECEDENCE;
use ir_js::operator::CONDITIONAL_PRECEDENCE;
use ir_js::operator::PREFIX_PRECEDENCE;
use ir_js::operator::PRIMARY_PRECEDENCE;

/// Wrapper around a precedence value with total ordering.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Prec(u8);

impl Prec {
  pub const LOWEST: Prec = Prec(0);
  // Anything but a comma expression, e.g. call arguments and array elements.
  pub const ASSIGNMENT: Prec = Prec(COMMA_PRECEDENCE + 1);
  pub const CONDITIONAL: Prec = Prec(CONDITIONAL_PRECEDENCE);
  pub const PREFIX: Prec = Prec(PREFIX_PRECEDENCE);
  pub const CALL_MEMBER: Prec = Prec(CALL_MEMBER_PRECEDENCE);
  pub const PRIMARY: Prec = Prec(PRIMARY_PRECEDENCE);

  pub const fn new(value: u8) -> Self {
    Prec(value)
  }

  pub const fn tighter(self) -> Self {
    Prec(self.0 + 1)
  }
}

#[derive(Clone, Copy, Debug)]
pub enum Side {
  Left,
  Right,
}

pub fn needs_parens(child_prec: Prec, min_prec: Prec) -> bool {
  child_prec < min_prec
}

pub fn child_min_prec_for_binary(op: BinaryOperator, side: Side) -> Prec {
  let prec = Prec::new(op.precedence());
  match (op.associativity(), side) {
    (Associativity::Left, Side::Left) | (Associativity::Right, Side::Right) => prec,
    (Associativity::Left, Side::Right) | (Associativity::Right, Side::Left) => prec.tighter(),
  }
}

pub fn expr_prec(expr: &Node<Expr>) -> Prec {
  match expr.stx.as_ref() {
    Expr::Binary(binary) => Prec::new(binary.stx.operator.precedence()),
    Expr::Comma(_) => Prec::new(COMMA_PRECEDENCE),
    Expr::Cond(_) => Prec::CONDITIONAL,
    Expr::Unary(unary) => Prec::new(unary.stx.operator.precedence()),
    Expr::Call(_) | Expr::Member(_) | Expr::New(_) => Prec::CALL_MEMBER,
    // Printed with a leading minus sign.
    Expr::LitNum(num) if num.stx.value.0.is_sign_negative() && !num.stx.value.0.is_nan() => {
      Prec::PREFIX
    }
    Expr::Arr(_)
    | Expr::Func(_)
    | Expr::Id(_)
    | Expr::Obj(_)
    | Expr::This(_)
    | Expr::TypeRef(_)
    | Expr::LitBool(_)
    | Expr::LitNull(_)
    | Expr::LitNum(_)
    | Expr::LitRegex(_)
    | Expr::LitStr(_) => Prec::PRIMARY,
  }
}

/// Whether the printed expression begins with `function` or `{`, which at the start of a
/// statement would be read as a declaration or a block.
pub fn starts_with_function_or_brace(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Func(_) | Expr::Obj(_) => true,
    Expr::Binary(binary) => {
      let parenthesized = needs_parens(
        expr_prec(&binary.stx.left),
        child_min_prec_for_binary(binary.stx.operator, Side::Left),
      );
      !parenthesized && starts_with_function_or_brace(&binary.stx.left)
    }
    Expr::Call(call) => {
      !needs_parens(expr_prec(&call.stx.callee), Prec::CALL_MEMBER)
        && starts_with_function_or_brace(&call.stx.callee)
    }
    Expr::Member(member) => {
      !needs_parens(expr_prec(&member.stx.object), Prec::CALL_MEMBER)
        && starts_with_function_or_brace(&member.stx.object)
    }
    Expr::Comma(comma) => comma.stx.expressions.first().is_some_and(|first| {
      !needs_parens(expr_prec(first), Prec::ASSIGNMENT) && starts_with_function_or_brace(first)
    }),
    Expr::Cond(cond) => {
      !needs_parens(expr_prec(&cond.stx.test), Prec::CONDITIONAL.tighter())
        && starts_with_function_or_brace(&cond.stx.test)
    }
    Expr::Unary(unary) if unary.stx.operator.is_postfix() => {
      starts_with_function_or_brace(&unary.stx.argument)
    }
    _ => false,
  }
}

/// Whether a call appears in `expr` outside parentheses, so that `new expr()` would attach the
/// argument list to the wrong call.
pub fn contains_unparenthesized_call(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Call(_) => true,
    Expr::Member(member) => contains_unparenthesized_call(&member.stx.object),
    Expr::Binary(binary) if binary.stx.operator == BinaryOperator::Index => {
      contains_unparenthesized_call(&binary.stx.left)
    }
    _ => false,
  }
}

/// Whether an `in` operator appears in `expr` outside brackets, where a `for` initializer would
/// read it as the start of a `for-in` loop.
pub fn contains_bare_in(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Binary(binary) => match binary.stx.operator {
      BinaryOperator::In => true,
      BinaryOperator::Index => contains_bare_in(&binary.stx.left),
      _ => contains_bare_in(&binary.stx.left) || contains_bare_in(&binary.stx.right),
    },
    Expr::Comma(comma) => comma.stx.expressions.iter().any(contains_bare_in),
    Expr::Cond(cond) => {
      contains_bare_in(&cond.stx.test)
        || contains_bare_in(&cond.stx.consequent)
        || contains_bare_in(&cond.stx.alternate)
    }
    Expr::Unary(unary) => contains_bare_in(&unary.stx.argument),
    Expr::Call(call) => contains_bare_in(&call.stx.callee),
    Expr::Member(member) => contains_bare_in(&member.stx.object),
    Expr::New(new) => contains_bare_in(&new.stx.constructor),
    _ => false,
  }
}
