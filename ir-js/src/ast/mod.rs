pub mod expr;
pub mod node;
pub mod stmt;
pub mod stx;
