#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A byte offset into a source file, with the file's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line text and the offset within
/// the line, or `None` when `position` is past the end of `source`.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    let mut start = 0;
    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        start = end;
    }

    None
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        Position,
    };

    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\n\n(+ 1\n   (set x 2))\n";

        let (line_number, line, line_pos) = super::get_line_at_position(source, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(source, 24).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "   (set x 2))\n");
        assert_eq!(line_pos, 4);

        assert!(super::get_line_at_position(source, 400).is_none());
    }

    #[test]
    fn test_remove_starting_whitespace() {
        assert_eq!(
            super::remove_starting_whitespace("   (begin)"),
            (String::from("(begin)"), 3)
        );
        assert_eq!(super::remove_starting_whitespace("x"), (String::from("x"), 0));
    }

    #[test]
    fn test_display_error_without_source_line() {
        // Neither call may panic, whatever the position.
        let error = Error::new(
            ErrorImpl::UnterminatedList,
            Some(Position(99, Rc::new(String::from("test.sp")))),
        );
        super::display_error(&error, "(begin", "test.sp");

        let error = Error::unpositioned(ErrorImpl::NoEntryPoint);
        super::display_error(&error, "", "test.sp");
    }
}

/// Prints an error with the offending source line and a caret under the
/// reported position. Errors without a position print only their name and tip.
pub fn display_error(error: &Error, source: &str, file: &str) {
    /*
        error: message
        -> file.sp
           |
        20 | (set x #)
           | -------^
    */

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", file);

    let located = error
        .get_position()
        .and_then(|position| get_line_at_position(source, position.0));
    let (line, line_text, line_pos) = match located {
        Some(located) => located,
        None => {
            println!("   {}", error);
            return;
        }
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
