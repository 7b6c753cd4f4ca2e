/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the S-expression tree
///
/// Submodules:
/// - ast: The tagged node type produced by the reader
/// - forms: Classification of lists into special forms and calls
pub mod ast;
pub mod forms;

#[cfg(test)]
mod tests;
