//! Unit tests for the AST and special form classification.

use super::{
    ast::Exp,
    forms::{is_reserved, ArithmeticOp, ComparisonOp, Form},
};
use crate::errors::errors::ErrorImpl;

fn list(items: Vec<Exp>) -> Vec<Exp> {
    items
}

#[test]
fn test_display_round_trips_shape() {
    let exp = Exp::list(vec![
        Exp::symbol("printf"),
        Exp::string("Value: %d\\n"),
        Exp::Number(-4),
        Exp::list(vec![]),
    ]);

    assert_eq!(exp.to_string(), "(printf \"Value: %d\\n\" -4 ())");
}

#[test]
fn test_classify_arithmetic() {
    let items = list(vec![Exp::symbol("/"), Exp::Number(10), Exp::Number(2)]);
    match Form::classify(&items).unwrap() {
        Form::Arithmetic { op, left, right } => {
            assert_eq!(op, ArithmeticOp::Div);
            assert_eq!(*left, Exp::Number(10));
            assert_eq!(*right, Exp::Number(2));
        }
        other => panic!("unexpected form {:?}", other),
    }
}

#[test]
fn test_classify_comparisons() {
    for (spelling, expected) in [
        (">", ComparisonOp::Greater),
        ("<", ComparisonOp::Less),
        ("==", ComparisonOp::Equal),
        ("!=", ComparisonOp::NotEqual),
        (">=", ComparisonOp::GreaterEquals),
        ("<=", ComparisonOp::LessEquals),
    ] {
        let items = list(vec![Exp::symbol(spelling), Exp::Number(1), Exp::Number(2)]);
        match Form::classify(&items).unwrap() {
            Form::Comparison { op, .. } => assert_eq!(op, expected),
            other => panic!("unexpected form {:?}", other),
        }
    }
}

#[test]
fn test_classify_var_and_set() {
    let items = list(vec![
        Exp::symbol("var"),
        Exp::list(vec![Exp::symbol("s"), Exp::symbol("string")]),
        Exp::string("hi"),
    ]);
    assert!(matches!(Form::classify(&items).unwrap(), Form::Var { .. }));

    let items = list(vec![Exp::symbol("set"), Exp::symbol("x"), Exp::Number(3)]);
    match Form::classify(&items).unwrap() {
        Form::Set { name, value } => {
            assert_eq!(name, "x");
            assert_eq!(*value, Exp::Number(3));
        }
        other => panic!("unexpected form {:?}", other),
    }
}

#[test]
fn test_set_requires_symbol_target() {
    let items = list(vec![Exp::symbol("set"), Exp::Number(1), Exp::Number(3)]);
    let error = Form::classify(&items).unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedForm");
}

#[test]
fn test_wrong_arity_is_malformed() {
    let items = list(vec![Exp::symbol("+"), Exp::Number(1)]);
    let error = Form::classify(&items).unwrap_err();
    assert_eq!(
        *error.get_internal(),
        ErrorImpl::MalformedForm {
            form: String::from("(+ 1)"),
            message: String::from("expected 2 operands, received 1"),
        }
    );

    let items = list(vec![Exp::symbol("var"), Exp::symbol("x")]);
    assert_eq!(
        Form::classify(&items).unwrap_err().get_error_name(),
        "MalformedForm"
    );
}

#[test]
fn test_empty_list_is_malformed() {
    let error = Form::classify(&[]).unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedForm");
}

#[test]
fn test_non_symbol_head_is_unsupported() {
    let items = list(vec![Exp::Number(1), Exp::Number(2)]);
    let error = Form::classify(&items).unwrap_err();
    assert_eq!(error.get_error_name(), "UnsupportedConstruct");

    let items = list(vec![Exp::symbol("true"), Exp::Number(2)]);
    let error = Form::classify(&items).unwrap_err();
    assert_eq!(error.get_error_name(), "UnsupportedConstruct");
}

#[test]
fn test_unknown_symbol_is_call() {
    let items = list(vec![
        Exp::symbol("printf"),
        Exp::string("%d %d"),
        Exp::Number(1),
        Exp::Number(2),
    ]);
    match Form::classify(&items).unwrap() {
        Form::Call { callee, args } => {
            assert_eq!(callee, "printf");
            assert_eq!(args.len(), 3);
        }
        other => panic!("unexpected form {:?}", other),
    }
}

#[test]
fn test_begin_accepts_any_body_length() {
    let items = list(vec![Exp::symbol("begin")]);
    match Form::classify(&items).unwrap() {
        Form::Begin { body } => assert!(body.is_empty()),
        other => panic!("unexpected form {:?}", other),
    }
}

#[test]
fn test_reserved_names() {
    assert!(is_reserved("true"));
    assert!(is_reserved("begin"));
    assert!(is_reserved("+"));
    assert!(!is_reserved("x"));
    assert!(!is_reserved("printf"));
}
