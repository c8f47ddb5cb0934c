//! Immutable JavaScript IR shared by the analysis, minification and emission crates.
//!
//! Trees are produced by an external front end, usually through the validating
//! helpers in [`build`], and consumed by [`rewrite::Rewriter`] passes.

pub mod ast;
pub mod build;
pub mod error;
pub mod ident;
pub mod loc;
pub mod num;
pub mod operator;
pub mod rewrite;
pub mod scope;
