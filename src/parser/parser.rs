//! Reader that builds an [`Exp`] tree from the token stream.
//!
//! The grammar is a single datum: a number, a string, a symbol, or a
//! parenthesised list of data.

use std::rc::Rc;

use crate::{
    ast::ast::Exp,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenKind},
    },
    Position, Span, MK_TOKEN,
};

/// Maintains the position in the token stream while reading.
pub struct Parser {
    /// The list of tokens to read, always terminated by EOF
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
}

impl Parser {
    /// Creates a parser, appending an EOF token if the stream lacks one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = match tokens.last() {
                Some(token) => token.span.end.clone(),
                None => Position(0, Rc::new(String::from("shell"))),
            };
            let span = Span {
                start: end.clone(),
                end,
            };
            tokens.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
        }

        Parser { tokens, pos: 0 }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, token: &Token) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            },
            Some(token.span.start.clone()),
        )
    }

    /// Reads one datum starting at the current token.
    pub fn parse_datum(&mut self) -> Result<Exp, Error> {
        let token = self.advance();

        match token.kind {
            TokenKind::Number => token.value.parse::<i32>().map(Exp::Number).map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    Some(token.span.start.clone()),
                )
            }),
            TokenKind::String => Ok(Exp::String(token.value)),
            TokenKind::Symbol => Ok(Exp::Symbol(token.value)),
            TokenKind::OpenParen => {
                let mut items = vec![];
                loop {
                    match self.current_token_kind() {
                        TokenKind::CloseParen => {
                            self.advance();
                            return Ok(Exp::List(items));
                        }
                        TokenKind::EOF => {
                            return Err(Error::new(
                                ErrorImpl::UnterminatedList,
                                Some(token.span.start.clone()),
                            ))
                        }
                        _ => items.push(self.parse_datum()?),
                    }
                }
            }
            TokenKind::CloseParen | TokenKind::EOF => Err(self.unexpected(&token)),
        }
    }
}

/// Reads exactly one datum; anything after it is an error.
pub fn parse(tokens: Vec<Token>) -> Result<Exp, Error> {
    let mut parser = Parser::new(tokens);
    let datum = parser.parse_datum()?;

    if parser.current_token_kind() != TokenKind::EOF {
        return Err(parser.unexpected(parser.current_token()));
    }

    Ok(datum)
}

/// Reads a whole program as one top-level `(begin ...)` sequence.
pub fn parse_program(source: &str, file: Option<String>) -> Result<Exp, Error> {
    let tokens = tokenize(String::from(source), file)?;

    let mut parser = Parser::new(tokens);
    let mut body = vec![Exp::symbol("begin")];
    while parser.current_token_kind() != TokenKind::EOF {
        body.push(parser.parse_datum()?);
    }

    Ok(Exp::List(body))
}
