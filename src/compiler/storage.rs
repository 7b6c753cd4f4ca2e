//! Storage allocation for bindings.
//!
//! Locals become `alloca`s hoisted to the head of the entry block; globals
//! become mutable module-level cells. Both record the new handle in the
//! given environment, which is the only way a binding enters scope.

use inkwell::values::{BasicValueEnum, InstructionOpcode};
use tracing::trace;

use crate::errors::errors::{Error, ErrorImpl};

use super::{
    compiler::Compiler,
    environment::{Environment, Storage},
    types::IrType,
};

/// Creates a stack slot for `name` in the entry block of the entry function.
///
/// Slots are placed after any existing allocas and before the first other
/// instruction, so they stay in declaration order ahead of all code.
pub fn allocate_local<'a>(
    compiler: &Compiler<'a>,
    name: &str,
    ty: IrType,
    environment: &mut Environment<'_, 'a>,
) -> Result<Storage<'a>, Error> {
    let function = compiler
        .entry_function
        .ok_or_else(|| Error::unpositioned(ErrorImpl::NoEntryPoint))?;
    let entry = function
        .get_first_basic_block()
        .ok_or_else(|| Error::unpositioned(ErrorImpl::NoEntryPoint))?;

    let mut instruction = entry.get_first_instruction();
    while let Some(current) = instruction {
        if current.get_opcode() != InstructionOpcode::Alloca {
            break;
        }
        instruction = current.get_next_instruction();
    }

    match instruction {
        Some(first_non_alloca) => compiler.vars_builder.position_before(&first_non_alloca),
        None => compiler.vars_builder.position_at_end(entry),
    }

    let basic_type = ty.to_basic_type(compiler.context);
    let slot = compiler.vars_builder.build_alloca(basic_type, name)?;
    trace!(variable = name, ty = %ty, "allocated local");

    let storage = Storage::Local {
        slot,
        ty: basic_type,
    };
    environment.define(name, storage);

    Ok(storage)
}

/// Creates a mutable module-level cell for `name` initialised with `init`.
///
/// The cell's type is taken from the initializer.
pub fn allocate_global<'a>(
    compiler: &Compiler<'a>,
    name: &str,
    init: BasicValueEnum<'a>,
    environment: &mut Environment<'_, 'a>,
) -> Result<Storage<'a>, Error> {
    let ty = init.get_type();

    let cell = compiler.module.add_global(ty, None, name);
    cell.set_initializer(&init);
    cell.set_constant(false);
    cell.set_alignment(4);
    trace!(variable = name, "allocated global");

    let storage = Storage::Global { cell, ty };
    environment.define(name, storage);

    Ok(storage)
}
