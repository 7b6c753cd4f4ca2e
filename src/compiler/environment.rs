//! Lexical scopes mapping identifiers to storage.
//!
//! Each `begin` body gets its own [`Environment`] borrowing its parent, so a
//! child scope can shadow names without ever touching the parent's record.

use std::collections::HashMap;

use inkwell::{
    types::BasicTypeEnum,
    values::{GlobalValue, PointerValue},
};

use crate::errors::errors::{Error, ErrorImpl};

/// Where a binding lives.
///
/// Produced only by the storage allocator; the generator matches on the
/// variant instead of probing the underlying value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage<'ctx> {
    /// An entry-block stack slot of the entry function.
    Local {
        slot: PointerValue<'ctx>,
        ty: BasicTypeEnum<'ctx>,
    },
    /// A module-level mutable cell; `ty` is the type of its initializer.
    Global {
        cell: GlobalValue<'ctx>,
        ty: BasicTypeEnum<'ctx>,
    },
}

impl<'ctx> Storage<'ctx> {
    pub fn pointer(&self) -> PointerValue<'ctx> {
        match self {
            Storage::Local { slot, .. } => *slot,
            Storage::Global { cell, .. } => cell.as_pointer_value(),
        }
    }

    pub fn value_type(&self) -> BasicTypeEnum<'ctx> {
        match self {
            Storage::Local { ty, .. } | Storage::Global { ty, .. } => *ty,
        }
    }
}

#[derive(Debug)]
pub struct Environment<'p, 'ctx> {
    record: HashMap<String, Storage<'ctx>>,
    parent: Option<&'p Environment<'p, 'ctx>>,
}

impl<'p, 'ctx> Environment<'p, 'ctx> {
    /// The root scope of a compilation.
    pub fn global() -> Self {
        Environment {
            record: HashMap::new(),
            parent: None,
        }
    }

    pub fn child(parent: &'p Environment<'p, 'ctx>) -> Self {
        Environment {
            record: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Installs or overwrites a binding in this scope only.
    pub fn define(&mut self, name: &str, storage: Storage<'ctx>) {
        self.record.insert(String::from(name), storage);
    }

    /// Resolves `name` in this scope, then each ancestor in turn.
    pub fn lookup(&self, name: &str) -> Result<Storage<'ctx>, Error> {
        let mut scope = Some(self);
        while let Some(environment) = scope {
            if let Some(storage) = environment.record.get(name) {
                return Ok(*storage);
            }
            scope = environment.parent;
        }

        Err(Error::unpositioned(ErrorImpl::UndefinedIdentifier {
            name: String::from(name),
        }))
    }

    pub fn is_global(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether `name` is bound in this scope, ignoring ancestors.
    pub fn defines(&self, name: &str) -> bool {
        self.record.contains_key(name)
    }
}
