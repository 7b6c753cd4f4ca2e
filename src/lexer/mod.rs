//! Lexical analysis module for the reader.
//!
//! This module contains the lexer (tokenizer) that converts program text
//! into a stream of tokens for the S-expression reader. It handles:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Parentheses, integer literals, raw string literals and symbols
//! - Token position tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
