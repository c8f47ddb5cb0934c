use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Associativity {
  Left,
  Right,
}

/// Precedence of the comma operator, the loosest binding.
pub const COMMA_PRECEDENCE: u8 = 1;
pub const ASSIGNMENT_PRECEDENCE: u8 = 3;
pub const CONDITIONAL_PRECEDENCE: u8 = 4;
pub const PREFIX_PRECEDENCE: u8 = 16;
pub const POSTFIX_PRECEDENCE: u8 = 17;
/// Member access, indexing, calls and `new` with arguments.
pub const CALL_MEMBER_PRECEDENCE: u8 = 18;
pub const PRIMARY_PRECEDENCE: u8 = 19;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum BinaryOperator {
  Assign,
  AssignAdd,
  AssignBitwiseAnd,
  AssignBitwiseOr,
  AssignBitwiseXor,
  AssignDivide,
  AssignLeftShift,
  AssignMultiply,
  AssignRemainder,
  AssignRightShift,
  AssignSubtract,
  AssignUnsignedRightShift,
  Addition,
  BitwiseAnd,
  BitwiseOr,
  BitwiseXor,
  Division,
  Equality,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  // Computed member access `a[b]`.
  Index,
  Inequality,
  Instanceof,
  LeftShift,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalOr,
  Multiplication,
  Remainder,
  RightShift,
  StrictEquality,
  StrictInequality,
  Subtraction,
  UnsignedRightShift,
}

impl BinaryOperator {
  pub fn precedence(self) -> u8 {
    use BinaryOperator::*;
    match self {
      Assign | AssignAdd | AssignBitwiseAnd | AssignBitwiseOr | AssignBitwiseXor | AssignDivide
      | AssignLeftShift | AssignMultiply | AssignRemainder | AssignRightShift | AssignSubtract
      | AssignUnsignedRightShift => ASSIGNMENT_PRECEDENCE,
      LogicalOr => 5,
      LogicalAnd => 6,
      BitwiseOr => 7,
      BitwiseXor => 8,
      BitwiseAnd => 9,
      Equality | Inequality | StrictEquality | StrictInequality => 10,
      LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual | In | Instanceof => 11,
      LeftShift | RightShift | UnsignedRightShift => 12,
      Addition | Subtraction => 13,
      Multiplication | Division | Remainder => 14,
      Index => CALL_MEMBER_PRECEDENCE,
    }
  }

  pub fn associativity(self) -> Associativity {
    if self.is_assignment() {
      Associativity::Right
    } else {
      Associativity::Left
    }
  }

  pub fn is_assignment(self) -> bool {
    self.precedence() == ASSIGNMENT_PRECEDENCE
  }

  /// Source spelling. `Index` has no infix spelling and yields `[`.
  pub fn as_str(self) -> &'static str {
    use BinaryOperator::*;
    match self {
      Assign => "=",
      AssignAdd => "+=",
      AssignBitwiseAnd => "&=",
      AssignBitwiseOr => "|=",
      AssignBitwiseXor => "^=",
      AssignDivide => "/=",
      AssignLeftShift => "<<=",
      AssignMultiply => "*=",
      AssignRemainder => "%=",
      AssignRightShift => ">>=",
      AssignSubtract => "-=",
      AssignUnsignedRightShift => ">>>=",
      Addition => "+",
      BitwiseAnd => "&",
      BitwiseOr => "|",
      BitwiseXor => "^",
      Division => "/",
      Equality => "==",
      GreaterThan => ">",
      GreaterThanOrEqual => ">=",
      In => "in",
      Index => "[",
      Inequality => "!=",
      Instanceof => "instanceof",
      LeftShift => "<<",
      LessThan => "<",
      LessThanOrEqual => "<=",
      LogicalAnd => "&&",
      LogicalOr => "||",
      Multiplication => "*",
      Remainder => "%",
      RightShift => ">>",
      StrictEquality => "===",
      StrictInequality => "!==",
      Subtraction => "-",
      UnsignedRightShift => ">>>",
    }
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum UnaryOperator {
  BitwiseNot,
  Delete,
  LogicalNot,
  Negation,
  Plus,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Typeof,
  Void,
}

impl UnaryOperator {
  pub fn is_postfix(self) -> bool {
    matches!(
      self,
      UnaryOperator::PostfixDecrement | UnaryOperator::PostfixIncrement
    )
  }

  pub fn precedence(self) -> u8 {
    if self.is_postfix() {
      POSTFIX_PRECEDENCE
    } else {
      PREFIX_PRECEDENCE
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      UnaryOperator::BitwiseNot => "~",
      UnaryOperator::Delete => "delete",
      UnaryOperator::LogicalNot => "!",
      UnaryOperator::Negation => "-",
      UnaryOperator::Plus => "+",
      UnaryOperator::PostfixDecrement | UnaryOperator::PrefixDecrement => "--",
      UnaryOperator::PostfixIncrement | UnaryOperator::PrefixIncrement => "++",
      UnaryOperator::Typeof => "typeof",
      UnaryOperator::Void => "void",
    }
  }
}
