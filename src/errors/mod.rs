//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with optional source position information
//! - Specific error variants for reading, generation and module assembly
//! - Error names and suggestions used when rendering diagnostics

pub mod errors;
