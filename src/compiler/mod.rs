//! Code generation module for the compiler.
//!
//! This module lowers a program tree into a single LLVM module holding one
//! entry function. It handles:
//!
//! - Lexical scopes and binding storage
//! - Type annotations and their IR types
//! - Expression generation into the entry function
//! - Module assembly, verification and serialization

pub mod compiler;
pub mod environment;
pub mod expr;
pub mod storage;
pub mod strings;
pub mod types;
