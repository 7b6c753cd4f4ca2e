use std::fmt::{Display, Formatter};

/// A node of the S-expression tree handed to the compiler.
///
/// String literals hold the raw text between the quotes; escape sequences
/// are resolved during code generation, not by the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exp {
    Number(i32),
    String(String),
    Symbol(String),
    List(Vec<Exp>),
}

impl Exp {
    pub fn symbol(name: &str) -> Self {
        Exp::Symbol(String::from(name))
    }

    pub fn string(raw: &str) -> Self {
        Exp::String(String::from(raw))
    }

    pub fn list(items: Vec<Exp>) -> Self {
        Exp::List(items)
    }

    /// Returns the name if this node is a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Exp::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Exp]> {
        match self {
            Exp::List(items) => Some(items),
            _ => None,
        }
    }
}

impl Display for Exp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Exp::Number(value) => write!(f, "{}", value),
            Exp::String(raw) => write!(f, "\"{}\"", raw),
            Exp::Symbol(name) => write!(f, "{}", name),
            Exp::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}
