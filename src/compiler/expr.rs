use inkwell::{
    values::{BasicMetadataValueEnum, BasicValueEnum, IntValue},
    IntPredicate,
};
use tracing::trace;

use crate::{
    ast::{
        ast::Exp,
        forms::{boolean_literal, ArithmeticOp, ComparisonOp, Form},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    compiler::Compiler,
    environment::{Environment, Storage},
    storage::allocate_local,
    strings::gen_string_constant,
    types::{describe, Declaration, IrType},
};

/// Generates LLVM IR for the given expression and returns its value.
pub fn gen_expression<'a>(
    compiler: &mut Compiler<'a>,
    expression: &Exp,
    environment: &mut Environment<'_, 'a>,
) -> Result<BasicValueEnum<'a>, Error> {
    match expression {
        Exp::Number(value) => Ok(compiler
            .context
            .i32_type()
            .const_int(*value as u64, true)
            .into()),
        Exp::String(raw) => Ok(gen_string_constant(compiler, raw)?.into()),
        Exp::Symbol(name) => gen_symbol(compiler, name, environment),
        Exp::List(items) => match Form::classify(items)? {
            Form::Arithmetic { op, left, right } => {
                let (left, right) =
                    gen_operands(compiler, expression, left, right, Some(IrType::Int32), environment)?;
                let value = match op {
                    ArithmeticOp::Add => compiler.builder.build_int_add(left, right, "add")?,
                    ArithmeticOp::Sub => compiler.builder.build_int_sub(left, right, "sub")?,
                    ArithmeticOp::Mul => compiler.builder.build_int_mul(left, right, "mul")?,
                    ArithmeticOp::Div => {
                        compiler.builder.build_int_signed_div(left, right, "div")?
                    }
                };
                Ok(value.into())
            }
            Form::Comparison { op, left, right } => {
                let (left, right) =
                    gen_operands(compiler, expression, left, right, None, environment)?;
                // Ordering uses unsigned predicates
                let predicate = match op {
                    ComparisonOp::Greater => IntPredicate::UGT,
                    ComparisonOp::Less => IntPredicate::ULT,
                    ComparisonOp::Equal => IntPredicate::EQ,
                    ComparisonOp::NotEqual => IntPredicate::NE,
                    ComparisonOp::GreaterEquals => IntPredicate::UGE,
                    ComparisonOp::LessEquals => IntPredicate::ULE,
                };
                Ok(compiler
                    .builder
                    .build_int_compare(predicate, left, right, "cmp")?
                    .into())
            }
            Form::Var { target, init } => {
                let declaration = Declaration::resolve(target)?;

                // The initializer cannot see the binding it initializes.
                let value = gen_expression(compiler, init, environment)?;
                let expected = declaration.ty.to_basic_type(compiler.context);
                if value.get_type() != expected {
                    return Err(type_mismatch(
                        declaration.ty.to_string(),
                        describe(value.get_type()),
                        expression,
                    ));
                }

                let storage =
                    allocate_local(compiler, &declaration.name, declaration.ty, environment)?;
                trace!(variable = %declaration.name, ty = %declaration.ty, "declared variable");

                compiler.builder.build_store(storage.pointer(), value)?;
                Ok(value)
            }
            Form::Set { name, value } => {
                let storage = environment.lookup(name)?;

                let value = gen_expression(compiler, value, environment)?;
                if value.get_type() != storage.value_type() {
                    return Err(type_mismatch(
                        describe(storage.value_type()),
                        describe(value.get_type()),
                        expression,
                    ));
                }

                compiler.builder.build_store(storage.pointer(), value)?;
                Ok(value)
            }
            Form::Begin { body } => {
                let mut block = Environment::child(&*environment);

                let mut result = None;
                for exp in body {
                    result = Some(gen_expression(compiler, exp, &mut block)?);
                }

                // An empty block evaluates to i32 0.
                Ok(result.unwrap_or_else(|| compiler.context.i32_type().const_zero().into()))
            }
            Form::Call { callee, args } => gen_call(compiler, callee, args, environment),
        },
    }
}

fn gen_symbol<'a>(
    compiler: &Compiler<'a>,
    name: &str,
    environment: &Environment<'_, 'a>,
) -> Result<BasicValueEnum<'a>, Error> {
    if let Some(value) = boolean_literal(name) {
        return Ok(compiler
            .context
            .bool_type()
            .const_int(value as u64, false)
            .into());
    }

    let value = match environment.lookup(name)? {
        Storage::Local { slot, .. } => compiler.builder.build_load(slot, name)?,
        Storage::Global { cell, .. } => compiler.builder.build_load(cell.as_pointer_value(), name)?,
    };

    Ok(value)
}

/// Generates both operands left to right and checks they share an integer
/// type, which must be `required` when given.
fn gen_operands<'a>(
    compiler: &mut Compiler<'a>,
    expression: &Exp,
    left: &Exp,
    right: &Exp,
    required: Option<IrType>,
    environment: &mut Environment<'_, 'a>,
) -> Result<(IntValue<'a>, IntValue<'a>), Error> {
    let left = gen_expression(compiler, left, environment)?;
    let right = gen_expression(compiler, right, environment)?;

    let expected = match required {
        Some(ty) => ty.to_basic_type(compiler.context),
        None if left.is_int_value() => left.get_type(),
        None => IrType::Int32.to_basic_type(compiler.context),
    };

    for operand in [left, right] {
        if operand.get_type() != expected {
            return Err(type_mismatch(
                describe(expected),
                describe(operand.get_type()),
                expression,
            ));
        }
    }

    Ok((left.into_int_value(), right.into_int_value()))
}

fn gen_call<'a>(
    compiler: &mut Compiler<'a>,
    callee: &str,
    args: &[Exp],
    environment: &mut Environment<'_, 'a>,
) -> Result<BasicValueEnum<'a>, Error> {
    let function = compiler
        .module
        .get_function(callee)
        .filter(|function| function.as_global_value().is_declaration())
        .ok_or_else(|| {
            Error::unpositioned(ErrorImpl::UnknownFunction {
                name: String::from(callee),
            })
        })?;

    let params = function.get_params();
    let is_variadic = function.get_type().is_var_arg();

    if args.len() < params.len() || (!is_variadic && args.len() > params.len()) {
        let expected = if is_variadic {
            format!("at least {}", params.len())
        } else {
            params.len().to_string()
        };
        return Err(Error::unpositioned(ErrorImpl::ArgumentCountMismatch {
            function: String::from(callee),
            expected,
            received: args.len(),
        }));
    }

    let mut values: Vec<BasicMetadataValueEnum<'a>> = Vec::with_capacity(args.len());
    for (i, arg) in args.iter().enumerate() {
        let value = gen_expression(compiler, arg, environment)?;

        if let Some(param) = params.get(i) {
            if value.get_type() != param.get_type() {
                return Err(type_mismatch(
                    describe(param.get_type()),
                    describe(value.get_type()),
                    arg,
                ));
            }
        }

        values.push(value.into());
    }

    let name = if function.get_type().get_return_type().is_some() {
        "call"
    } else {
        ""
    };
    trace!(function = callee, arguments = values.len(), "call");

    let call = compiler.builder.build_call(function, &values, name)?;

    // Calls to functions returning nothing evaluate to i32 0.
    Ok(call
        .try_as_basic_value()
        .left()
        .unwrap_or_else(|| compiler.context.i32_type().const_zero().into()))
}

fn type_mismatch(expected: String, received: String, expression: &Exp) -> Error {
    Error::unpositioned(ErrorImpl::TypeMatchError {
        expected,
        received,
        form: expression.to_string(),
    })
}
