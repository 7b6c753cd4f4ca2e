//! Classification of list expressions into the special forms the
//! compiler understands.
//!
//! A list is matched against the keyword table exactly once; everything
//! downstream dispatches on the resulting [`Form`] variant.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::errors::errors::{Error, ErrorImpl};

use super::ast::Exp;

lazy_static! {
    pub static ref KEYWORD_LOOKUP: HashMap<&'static str, Keyword> = {
        let mut map = HashMap::new();
        map.insert("+", Keyword::Arithmetic(ArithmeticOp::Add));
        map.insert("-", Keyword::Arithmetic(ArithmeticOp::Sub));
        map.insert("*", Keyword::Arithmetic(ArithmeticOp::Mul));
        map.insert("/", Keyword::Arithmetic(ArithmeticOp::Div));
        map.insert(">", Keyword::Comparison(ComparisonOp::Greater));
        map.insert("<", Keyword::Comparison(ComparisonOp::Less));
        map.insert("==", Keyword::Comparison(ComparisonOp::Equal));
        map.insert("!=", Keyword::Comparison(ComparisonOp::NotEqual));
        map.insert(">=", Keyword::Comparison(ComparisonOp::GreaterEquals));
        map.insert("<=", Keyword::Comparison(ComparisonOp::LessEquals));
        map.insert("var", Keyword::Var);
        map.insert("set", Keyword::Set);
        map.insert("begin", Keyword::Begin);
        map
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Greater,
    Less,
    Equal,
    NotEqual,
    GreaterEquals,
    LessEquals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Arithmetic(ArithmeticOp),
    Comparison(ComparisonOp),
    Var,
    Set,
    Begin,
}

/// The boolean literal spelled by `name`, if any.
pub fn boolean_literal(name: &str) -> Option<bool> {
    match name {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Reserved names cannot be bound by `var`.
pub fn is_reserved(name: &str) -> bool {
    boolean_literal(name).is_some() || KEYWORD_LOOKUP.contains_key(name)
}

/// A list expression after its operator position has been resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Form<'e> {
    Arithmetic {
        op: ArithmeticOp,
        left: &'e Exp,
        right: &'e Exp,
    },
    Comparison {
        op: ComparisonOp,
        left: &'e Exp,
        right: &'e Exp,
    },
    Var {
        target: &'e Exp,
        init: &'e Exp,
    },
    Set {
        name: &'e str,
        value: &'e Exp,
    },
    Begin {
        body: &'e [Exp],
    },
    Call {
        callee: &'e str,
        args: &'e [Exp],
    },
}

impl<'e> Form<'e> {
    /// Classifies the items of a list expression.
    ///
    /// Any symbol that is not a keyword is treated as a call; whether the
    /// callee exists is decided later against the module.
    pub fn classify(items: &'e [Exp]) -> Result<Form<'e>, Error> {
        let (head, operands) = match items.split_first() {
            Some(split) => split,
            None => return Err(malformed(items, "empty list")),
        };

        let op = match head {
            Exp::Symbol(op) => op.as_str(),
            _ => {
                return Err(Error::unpositioned(ErrorImpl::UnsupportedConstruct {
                    form: render(items),
                }))
            }
        };

        let keyword = match KEYWORD_LOOKUP.get(op) {
            Some(keyword) => *keyword,
            None => {
                if boolean_literal(op).is_some() {
                    return Err(Error::unpositioned(ErrorImpl::UnsupportedConstruct {
                        form: render(items),
                    }));
                }
                return Ok(Form::Call {
                    callee: op,
                    args: operands,
                });
            }
        };

        match keyword {
            Keyword::Arithmetic(op) => {
                expect_operands(items, operands, 2)?;
                Ok(Form::Arithmetic {
                    op,
                    left: &operands[0],
                    right: &operands[1],
                })
            }
            Keyword::Comparison(op) => {
                expect_operands(items, operands, 2)?;
                Ok(Form::Comparison {
                    op,
                    left: &operands[0],
                    right: &operands[1],
                })
            }
            Keyword::Var => {
                expect_operands(items, operands, 2)?;
                Ok(Form::Var {
                    target: &operands[0],
                    init: &operands[1],
                })
            }
            Keyword::Set => {
                expect_operands(items, operands, 2)?;
                match operands[0].as_symbol() {
                    Some(name) => Ok(Form::Set {
                        name,
                        value: &operands[1],
                    }),
                    None => Err(malformed(items, "the target of `set` must be a symbol")),
                }
            }
            Keyword::Begin => Ok(Form::Begin { body: operands }),
        }
    }
}

fn expect_operands(items: &[Exp], operands: &[Exp], expected: usize) -> Result<(), Error> {
    if operands.len() == expected {
        Ok(())
    } else {
        Err(malformed(
            items,
            &format!(
                "expected {} operands, received {}",
                expected,
                operands.len()
            ),
        ))
    }
}

fn render(items: &[Exp]) -> String {
    Exp::List(items.to_vec()).to_string()
}

fn malformed(items: &[Exp], message: &str) -> Error {
    Error::unpositioned(ErrorImpl::MalformedForm {
        form: render(items),
        message: String::from(message),
    })
}
