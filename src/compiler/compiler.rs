//! Compilation session and module assembly.
//!
//! This module contains the [`Compiler`] structure, which owns everything a
//! single compilation mutates: the LLVM module, the two instruction
//! builders, the entry function and the interned string constants. It also
//! declares external functions, creates the predefined globals, and
//! finalizes and serializes the module.

use std::{collections::HashMap, path::Path};

use inkwell::{
    attributes::{Attribute, AttributeLoc},
    builder::Builder,
    context::Context,
    module::{Linkage, Module},
    targets::{CodeModel, InitializationConfig, RelocMode, Target, TargetMachine},
    types::{BasicMetadataTypeEnum, BasicType},
    values::{BasicValueEnum, FunctionValue, PointerValue},
    OptimizationLevel,
};
use tracing::debug;

use crate::{
    ast::ast::Exp,
    errors::errors::{Error, ErrorImpl},
};

use super::{
    environment::Environment,
    expr::gen_expression,
    storage::allocate_global,
    types::IrType,
};

/// Settings for one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Name recorded as the module identifier
    pub module_name: String,
    /// Symbol of the program entry function
    pub entry_symbol: String,
    /// Set the module triple and data layout from the host machine
    pub host_target: bool,
    /// Initial value of the predefined `VERSION` global
    pub version: i32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            module_name: String::from("sprig"),
            entry_symbol: String::from("main"),
            host_target: false,
            version: 42,
        }
    }
}

/// One compilation session.
///
/// Nothing here is shared between sessions, so any number of them can
/// coexist on separate contexts or on the same context.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the LLVM context
pub struct Compiler<'a> {
    /// The options this session was created with
    pub options: CompileOptions,

    /// Reference to the LLVM context
    pub context: &'a Context,
    /// The LLVM module being built
    pub module: Module<'a>,
    /// Builder positioned where the next instruction of the program goes
    pub builder: Builder<'a>,
    /// Builder used only to place allocas at the head of the entry block
    pub vars_builder: Builder<'a>,

    /// The entry function, once created
    pub entry_function: Option<FunctionValue<'a>>,
    /// String constants by unescaped text
    pub interned_strings: HashMap<String, PointerValue<'a>>,

    finalized: bool,
}

impl<'a> Compiler<'a> {
    /// Creates a new session and declares the external functions every
    /// program may call.
    pub fn new(context: &'a Context, options: CompileOptions) -> Self {
        let compiler = Compiler {
            module: context.create_module(&options.module_name),
            builder: context.create_builder(),
            vars_builder: context.create_builder(),
            context,
            options,
            entry_function: None,
            interned_strings: HashMap::new(),
            finalized: false,
        };

        compiler.create_external_functions();

        compiler
    }

    /// Sets the module triple and data layout for the host machine.
    pub fn set_host_target(&self) -> Result<(), Error> {
        Target::initialize_native(&InitializationConfig::default())
            .map_err(|message| Error::unpositioned(ErrorImpl::Target { message }))?;

        let target_triple = TargetMachine::get_default_triple();
        let target = Target::from_triple(&target_triple).map_err(|message| {
            Error::unpositioned(ErrorImpl::Target {
                message: message.to_string(),
            })
        })?;
        let target_machine = target
            .create_target_machine(
                &target_triple,
                "generic",
                "",
                OptimizationLevel::Default,
                RelocMode::PIC,
                CodeModel::Default,
            )
            .ok_or_else(|| {
                Error::unpositioned(ErrorImpl::Target {
                    message: String::from("could not create a target machine"),
                })
            })?;

        self.module.set_triple(&target_triple);
        self.module
            .set_data_layout(&target_machine.get_target_data().get_data_layout());
        debug!(triple = ?target_triple, "configured host target");

        Ok(())
    }

    /// Declares the external functions available to every program.
    ///
    /// - printf: `i32 (i8*, ...)`, formatted output
    fn create_external_functions(&self) {
        self.declare_external("printf", IrType::Int32, &[IrType::BytePtr], true);
    }

    /// Declares a function implemented outside the program.
    ///
    /// Declaring a name that already exists returns the existing function.
    pub fn declare_external(
        &self,
        name: &str,
        return_type: IrType,
        params: &[IrType],
        is_variadic: bool,
    ) -> FunctionValue<'a> {
        if let Some(function) = self.module.get_function(name) {
            return function;
        }

        let params: Vec<BasicMetadataTypeEnum<'a>> = params
            .iter()
            .map(|param| param.to_basic_type(self.context).into())
            .collect();
        let function_type = return_type
            .to_basic_type(self.context)
            .fn_type(&params, is_variadic);

        debug!(function = name, variadic = is_variadic, "declared external function");
        self.module
            .add_function(name, function_type, Some(Linkage::External))
    }

    /// Creates the entry function, `i32 ()`, and positions the builder at
    /// the end of its single entry block.
    ///
    /// The entry symbol must not already name a function or global.
    pub fn create_entry_point(&mut self) -> Result<FunctionValue<'a>, Error> {
        if let Some(function) = self.entry_function {
            return Ok(function);
        }

        let symbol = &self.options.entry_symbol;
        if self.module.get_function(symbol).is_some() || self.module.get_global(symbol).is_some() {
            return Err(Error::unpositioned(ErrorImpl::SymbolConflict {
                name: symbol.clone(),
            }));
        }

        let function_type = self.context.i32_type().fn_type(&[], false);
        let function = self.module.add_function(
            &self.options.entry_symbol,
            function_type,
            Some(Linkage::External),
        );

        let attributes = [
            self.context
                .create_enum_attribute(Attribute::get_named_enum_kind_id("uwtable"), 0),
            self.context
                .create_enum_attribute(Attribute::get_named_enum_kind_id("nounwind"), 0),
        ];
        for attribute in attributes.iter() {
            function.add_attribute(AttributeLoc::Function, *attribute);
        }

        let entry = self.context.append_basic_block(function, "entry");
        self.builder.position_at_end(entry);

        self.entry_function = Some(function);
        debug!(symbol = %self.options.entry_symbol, "created entry function");

        Ok(function)
    }

    /// Creates the predefined module-level cells and binds them in the
    /// root environment.
    pub fn setup_global_environment(
        &self,
        environment: &mut Environment<'_, 'a>,
    ) -> Result<(), Error> {
        let version = self
            .context
            .i32_type()
            .const_int(self.options.version as u64, true);
        allocate_global(self, "VERSION", version.into(), environment)?;

        debug!("created global environment");
        Ok(())
    }

    /// Generates the whole program into the entry function and finalizes
    /// the module.
    ///
    /// The program is normally a top-level `(begin ...)`.
    pub fn compile_program(&mut self, program: &Exp) -> Result<BasicValueEnum<'a>, Error> {
        if self.options.host_target {
            self.set_host_target()?;
        }

        self.create_entry_point()?;

        let mut globals = Environment::global();
        self.setup_global_environment(&mut globals)?;

        let result = gen_expression(self, program, &mut globals)?;

        self.finalize()?;

        Ok(result)
    }

    /// Returns the fixed success value from the entry function and verifies
    /// the module.
    ///
    /// A module that fails verification stays unfinalized and can never be
    /// serialized.
    pub fn finalize(&mut self) -> Result<(), Error> {
        if self.finalized {
            return Err(Error::unpositioned(ErrorImpl::AlreadyFinalized));
        }
        if self.entry_function.is_none() {
            return Err(Error::unpositioned(ErrorImpl::NoEntryPoint));
        }

        self.builder
            .build_return(Some(&self.context.i32_type().const_zero()))?;

        self.module.verify().map_err(|message| {
            Error::unpositioned(ErrorImpl::VerificationFailed {
                message: message.to_string(),
            })
        })?;

        self.finalized = true;
        debug!(module = %self.options.module_name, "finalized module");

        Ok(())
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Renders the module as textual IR.
    pub fn print_to_string(&self) -> String {
        self.module.print_to_string().to_string()
    }

    /// Writes the finalized module as textual IR to `destination`.
    pub fn serialize(&self, destination: &Path) -> Result<(), Error> {
        if !self.finalized {
            return Err(Error::unpositioned(ErrorImpl::NotFinalized));
        }

        self.module.print_to_file(destination).map_err(|message| {
            Error::unpositioned(ErrorImpl::Output {
                path: destination.display().to_string(),
                message: message.to_string(),
            })
        })?;
        debug!(path = %destination.display(), "wrote module");

        Ok(())
    }
}

/// Compiles a program tree into a finalized module.
///
/// # Arguments
///
/// * `program` - The root node, normally a top-level `(begin ...)`
/// * `context` - Reference to the LLVM context
/// * `options` - Settings for this compilation
///
/// # Returns
///
/// The finished session, ready to be serialized or printed.
pub fn compile<'a>(
    program: &Exp,
    context: &'a Context,
    options: CompileOptions,
) -> Result<Compiler<'a>, Error> {
    let mut compiler = Compiler::new(context, options);

    compiler.compile_program(program)?;

    Ok(compiler)
}
