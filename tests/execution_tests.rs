//! Execution tests for compiled programs.
//!
//! Programs are JIT-compiled and run in-process. Values are observed through
//! an external `record` function mapped to a Rust callback.

use std::cell::RefCell;

use inkwell::{
    context::Context,
    execution_engine::JitFunction,
    targets::{InitializationConfig, Target},
    OptimizationLevel,
};
use sprig::{
    compiler::{
        compiler::{CompileOptions, Compiler},
        types::IrType,
    },
    parser::parser::parse_program,
};

type EntryFunction = unsafe extern "C" fn() -> i32;

thread_local! {
    static RECORDED: RefCell<Vec<i32>> = const { RefCell::new(Vec::new()) };
}

extern "C" fn record(value: i32) -> i32 {
    RECORDED.with(|recorded| recorded.borrow_mut().push(value));
    value
}

/// Compiles and runs `source`, returning every value passed to `record`.
fn run(source: &str) -> Vec<i32> {
    Target::initialize_native(&InitializationConfig::default()).unwrap();

    let context = Context::create();
    let program = parse_program(source, Some(String::from("test.sp"))).unwrap();

    let mut compiler = Compiler::new(&context, CompileOptions::default());
    let record_function =
        compiler.declare_external("record", IrType::Int32, &[IrType::Int32], false);
    compiler.compile_program(&program).unwrap();

    let engine = compiler
        .module
        .create_jit_execution_engine(OptimizationLevel::None)
        .unwrap();
    engine.add_global_mapping(&record_function, record as usize);

    RECORDED.with(|recorded| recorded.borrow_mut().clear());

    let status = unsafe {
        let main: JitFunction<EntryFunction> = engine.get_function("main").unwrap();
        main.call()
    };
    assert_eq!(status, 0);

    RECORDED.with(|recorded| recorded.borrow().clone())
}

#[test]
fn test_set_mutates_storage() {
    assert_eq!(run("(var x 10) (set x 20) (record x)"), vec![20]);
}

#[test]
fn test_shadowing_restores_outer_binding() {
    let source = "(var x 1) (begin (var x 2) (record x)) (record x)";
    assert_eq!(run(source), vec![2, 1]);
}

#[test]
fn test_set_in_block_updates_outer_binding() {
    let source = "(var x 1) (begin (set x 5)) (record x)";
    assert_eq!(run(source), vec![5]);
}

#[test]
fn test_runtime_arithmetic() {
    let source = r#"
        (var a 7)
        (var b -2)
        (record (/ a b))
        (record (* a b))
        (record (- a b))
        (record (+ a b))
    "#;
    assert_eq!(run(source), vec![-3, -14, 9, 5]);
}

#[test]
fn test_arithmetic_wraps_at_runtime() {
    let source = "(var big 2147483647) (record (+ big 1))";
    assert_eq!(run(source), vec![i32::MIN]);
}

#[test]
fn test_version_global_is_mutable() {
    let source = "(record VERSION) (set VERSION (+ VERSION 1)) (record VERSION)";
    assert_eq!(run(source), vec![42, 43]);
}

#[test]
fn test_expression_values() {
    let source = "(record (var z 3)) (record (set z 4)) (record (begin)) (record (record 8))";
    assert_eq!(run(source), vec![3, 4, 0, 8, 8]);
}

#[test]
fn test_evaluation_order_is_left_to_right() {
    let source = "(record (+ (record 1) (record 2)))";
    assert_eq!(run(source), vec![1, 2, 3]);
}

#[test]
fn test_printf_returns_character_count() {
    assert_eq!(run("(record (printf \"abc\"))"), vec![3]);
}

#[test]
fn test_var_initializer_sees_the_outer_binding() {
    let source = "(var x 1) (begin (var x (+ x 10)) (record x)) (record x)";
    assert_eq!(run(source), vec![11, 1]);
}
