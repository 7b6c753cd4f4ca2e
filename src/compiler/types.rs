//! Mapping from surface type annotations to IR types.

use std::fmt::Display;

use inkwell::{context::Context, types::BasicTypeEnum, AddressSpace};

use crate::{
    ast::{ast::Exp, forms::is_reserved},
    errors::errors::{Error, ErrorImpl},
};

/// The primitive types values and storage can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrType {
    Int32,
    Bool,
    BytePtr,
}

impl IrType {
    /// `number` and `string` are recognised; anything else falls back to i32.
    pub fn from_annotation(annotation: &str) -> IrType {
        match annotation {
            "number" => IrType::Int32,
            "string" => IrType::BytePtr,
            _ => IrType::Int32,
        }
    }

    pub fn to_basic_type<'a>(self, context: &'a Context) -> BasicTypeEnum<'a> {
        match self {
            IrType::Int32 => context.i32_type().into(),
            IrType::Bool => context.bool_type().into(),
            IrType::BytePtr => context.i8_type().ptr_type(AddressSpace::default()).into(),
        }
    }

    /// The modelled type of an emitted value's type, if it is one.
    pub fn of_basic_type(ty: BasicTypeEnum) -> Option<IrType> {
        match ty {
            BasicTypeEnum::IntType(int) if int.get_bit_width() == 32 => Some(IrType::Int32),
            BasicTypeEnum::IntType(int) if int.get_bit_width() == 1 => Some(IrType::Bool),
            BasicTypeEnum::PointerType(_) => Some(IrType::BytePtr),
            _ => None,
        }
    }
}

impl Display for IrType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrType::Int32 => write!(f, "i32"),
            IrType::Bool => write!(f, "i1"),
            IrType::BytePtr => write!(f, "i8*"),
        }
    }
}

/// Renders a type for diagnostics.
pub fn describe(ty: BasicTypeEnum) -> String {
    match IrType::of_basic_type(ty) {
        Some(ir_type) => ir_type.to_string(),
        None => format!("{:?}", ty),
    }
}

/// A `var` target after resolution: `x` or `(x type)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub ty: IrType,
}

impl Declaration {
    pub fn resolve(target: &Exp) -> Result<Declaration, Error> {
        let (name, ty) = match target {
            Exp::Symbol(name) => (name.as_str(), IrType::Int32),
            Exp::List(items) => match items.as_slice() {
                [Exp::Symbol(name), Exp::Symbol(annotation)] => {
                    (name.as_str(), IrType::from_annotation(annotation))
                }
                _ => {
                    return Err(malformed(
                        target,
                        "a typed declaration must be `(name type)`",
                    ))
                }
            },
            _ => return Err(malformed(target, "expected a name or `(name type)`")),
        };

        if is_reserved(name) {
            return Err(malformed(
                target,
                &format!("`{}` is reserved and cannot be declared", name),
            ));
        }

        Ok(Declaration {
            name: String::from(name),
            ty,
        })
    }
}

fn malformed(target: &Exp, message: &str) -> Error {
    Error::unpositioned(ErrorImpl::MalformedForm {
        form: target.to_string(),
        message: String::from(message),
    })
}
