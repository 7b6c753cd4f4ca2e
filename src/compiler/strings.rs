//! String literal handling: escape processing and constant interning.

use inkwell::values::PointerValue;
use tracing::trace;

use crate::{
    ast::ast::Exp,
    errors::errors::{Error, ErrorImpl},
};

use super::compiler::Compiler;

/// Resolves the recognised escape sequences in raw literal text.
///
/// `\n`, `\t`, `\r`, `\\` and `\"` are recognised. Any other backslash is
/// kept as written, together with the character after it.
pub fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let replacement = match chars.peek() {
            Some('n') => Some('\n'),
            Some('t') => Some('\t'),
            Some('r') => Some('\r'),
            Some('\\') => Some('\\'),
            Some('"') => Some('"'),
            _ => None,
        };

        match replacement {
            Some(replacement) => {
                result.push(replacement);
                chars.next();
            }
            None => result.push(ch), // Keep the backslash
        }
    }

    result
}

/// Returns a byte pointer to the module constant holding `raw` unescaped.
///
/// Identical text shares one module global for the whole session. Text
/// containing a NUL byte is rejected, since the constant is NUL-terminated.
pub fn gen_string_constant<'a>(
    compiler: &mut Compiler<'a>,
    raw: &str,
) -> Result<PointerValue<'a>, Error> {
    let text = unescape(raw);

    if text.contains('\0') {
        return Err(Error::unpositioned(ErrorImpl::MalformedForm {
            form: Exp::string(raw).to_string(),
            message: String::from("string literals cannot contain NUL bytes"),
        }));
    }

    if let Some(pointer) = compiler.interned_strings.get(&text) {
        return Ok(*pointer);
    }

    let name = format!("str.{}", compiler.interned_strings.len());
    let pointer = compiler
        .builder
        .build_global_string_ptr(&text, &name)?
        .as_pointer_value();
    trace!(global = %name, len = text.len(), "interned string constant");

    compiler.interned_strings.insert(text, pointer);
    Ok(pointer)
}
