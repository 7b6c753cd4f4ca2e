use std::fmt::Display;

use inkwell::builder::BuilderError;
use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Option<Position>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Option<Position>) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// Shorthand for errors raised during generation, where nodes carry no position.
    pub fn unpositioned(error_impl: ErrorImpl) -> Self {
        Error::new(error_impl, None)
    }

    pub fn get_position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn get_internal(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnterminatedList => "UnterminatedList",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UndefinedIdentifier { .. } => "UndefinedIdentifier",
            ErrorImpl::MalformedForm { .. } => "MalformedForm",
            ErrorImpl::UnsupportedConstruct { .. } => "UnsupportedConstruct",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::UnknownFunction { .. } => "UnknownFunction",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::NoEntryPoint => "NoEntryPoint",
            ErrorImpl::SymbolConflict { .. } => "SymbolConflict",
            ErrorImpl::AlreadyFinalized => "AlreadyFinalized",
            ErrorImpl::NotFinalized => "NotFinalized",
            ErrorImpl::VerificationFailed { .. } => "VerificationFailed",
            ErrorImpl::Builder { .. } => "Builder",
            ErrorImpl::Target { .. } => "Target",
            ErrorImpl::Output { .. } => "Output",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, is there an unbalanced parenthesis?",
                token
            )),
            ErrorImpl::UnterminatedList => {
                ErrorTip::Suggestion(String::from("A list is missing its closing `)`"))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it outside the 32-bit integer range?",
                token
            )),
            ErrorImpl::UndefinedIdentifier { name } => ErrorTip::Suggestion(format!(
                "`{}` is not declared in this scope, declare it with `(var {} ...)`",
                name, name
            )),
            ErrorImpl::MalformedForm { form, message } => {
                ErrorTip::Suggestion(format!("In `{}`: {}", form, message))
            }
            ErrorImpl::UnsupportedConstruct { form } => {
                ErrorTip::Suggestion(format!("`{}` is not a recognised construct", form))
            }
            ErrorImpl::TypeMatchError {
                expected,
                received,
                form,
            } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}` in `{}`",
                expected, received, form
            )),
            ErrorImpl::UnknownFunction { name } => ErrorTip::Suggestion(format!(
                "`{}` is not a declared external function",
                name
            )),
            ErrorImpl::ArgumentCountMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::NoEntryPoint => ErrorTip::Suggestion(String::from(
                "The entry function must be created before generating code",
            )),
            ErrorImpl::SymbolConflict { name } => ErrorTip::Suggestion(format!(
                "`{}` already names a symbol in the module, choose another entry symbol",
                name
            )),
            ErrorImpl::AlreadyFinalized => ErrorTip::Suggestion(String::from(
                "The module has already been finalized",
            )),
            ErrorImpl::NotFinalized => ErrorTip::Suggestion(String::from(
                "The module must be finalized before it can be written",
            )),
            ErrorImpl::VerificationFailed { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::Builder { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::Target { message } => ErrorTip::Suggestion(format!(
                "The host target could not be configured: {}",
                message
            )),
            ErrorImpl::Output { path, message } => {
                ErrorTip::Suggestion(format!("Could not write `{}`: {}", path, message))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

impl From<BuilderError> for Error {
    fn from(error: BuilderError) -> Self {
        Error::unpositioned(ErrorImpl::Builder {
            message: error.to_string(),
        })
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unterminated list")]
    UnterminatedList,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("undefined identifier {name:?}")]
    UndefinedIdentifier { name: String },
    #[error("malformed form {form}: {message}")]
    MalformedForm { form: String, message: String },
    #[error("unsupported construct {form}")]
    UnsupportedConstruct { form: String },
    #[error("types do not match in {form}: expected {expected}, received {received}")]
    TypeMatchError {
        expected: String,
        received: String,
        form: String,
    },
    #[error("unknown function {name:?}")]
    UnknownFunction { name: String },
    #[error("wrong number of arguments to {function:?}: expected {expected}, received {received}")]
    ArgumentCountMismatch {
        function: String,
        expected: String,
        received: usize,
    },
    #[error("no entry function has been created")]
    NoEntryPoint,
    #[error("symbol {name:?} is already defined in the module")]
    SymbolConflict { name: String },
    #[error("module already finalized")]
    AlreadyFinalized,
    #[error("module has not been finalized")]
    NotFinalized,
    #[error("module verification failed: {message}")]
    VerificationFailed { message: String },
    #[error("IR builder error: {message}")]
    Builder { message: String },
    #[error("target setup failed: {message}")]
    Target { message: String },
    #[error("failed to write {path}: {message}")]
    Output { path: String, message: String },
}
