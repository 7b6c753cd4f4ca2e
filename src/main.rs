//! Sprig CLI entry point.

use std::{env, fs::read_to_string, path::PathBuf, process, time::Instant};

use clap::Parser;
use inkwell::context::Context;
use sprig::{
    compiler::compiler::{compile, CompileOptions},
    display_error,
    errors::errors::Error,
    parser::parser::parse_program,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sprig")]
#[command(about = "Compile S-expression programs to LLVM IR")]
struct Cli {
    /// Input program file
    #[arg(required_unless_present = "eval", conflicts_with = "eval")]
    file: Option<PathBuf>,

    /// Compile an inline program instead of a file
    #[arg(short, long)]
    eval: Option<String>,

    /// Where to write the textual IR
    #[arg(short, long, default_value = "out.ll")]
    output: PathBuf,

    /// Also print the module to stdout
    #[arg(long)]
    print: bool,

    /// Symbol of the entry function
    #[arg(long, default_value = "main")]
    entry: String,

    /// Module identifier, defaults to the input file name
    #[arg(long)]
    module_name: Option<String>,

    /// Set the target triple and data layout from the host machine
    #[arg(long)]
    host_target: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    let cli = Cli::parse();

    let (source, file_name) = match (&cli.eval, &cli.file) {
        (Some(source), _) => (source.clone(), String::from("<eval>")),
        (None, Some(path)) => {
            let source = read_to_string(path)?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            (source, file_name)
        }
        (None, None) => unreachable!("clap requires a file or --eval"),
    };

    let options = CompileOptions {
        module_name: cli.module_name.clone().unwrap_or_else(|| file_name.clone()),
        entry_symbol: cli.entry.clone(),
        host_target: cli.host_target,
        ..CompileOptions::default()
    };

    if let Err(error) = run(&cli, &source, &file_name, options) {
        display_error(&error, &source, &file_name);
        process::exit(1);
    }

    Ok(())
}

/// `RUST_LOG` replaces the default `sprig=info` filter entirely when set.
fn log_filter(directives: Option<String>) -> EnvFilter {
    match directives {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new("sprig=info"),
    }
}

fn run(cli: &Cli, source: &str, file_name: &str, options: CompileOptions) -> Result<(), Error> {
    let start = Instant::now();

    let program = parse_program(source, Some(String::from(file_name)))?;
    info!("Parsed in {:?}", start.elapsed());

    let compile_start = Instant::now();
    let context = Context::create();
    let compiler = compile(&program, &context, options)?;
    info!("Compiled in {:?}", compile_start.elapsed());

    if cli.print {
        println!("{}", compiler.print_to_string());
    }

    compiler.serialize(&cli.output)?;
    info!(
        "Wrote {} in {:?}",
        cli.output.display(),
        start.elapsed()
    );

    Ok(())
}
