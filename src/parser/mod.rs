//! Parser module for reading S-expression trees.
//!
//! This module turns the token stream produced by the lexer into the
//! [`Exp`](crate::ast::ast::Exp) tree consumed by the compiler. It handles:
//!
//! - Numbers, raw strings, symbols and nested lists
//! - Wrapping a whole program in a top-level `(begin ...)`
//! - Reporting unbalanced parentheses and trailing input

pub mod parser;
