use std::{fs, process};

use anyhow::{Context, Result};
use clap::Parser;

use brainrotc::{
    codegen, compile, diagnostics::Diagnostics, interpreter::Interpreter, CompileError,
    CompileOptions,
};
use commandline::{BackendOptions, Operation, Options};

mod commandline;

fn main() -> Result<()> {
    let options = Options::parse();
    stderrlog::new()
        .module(module_path!())
        .verbosity(options.verbose)
        .init()?;

    let succeeded = match &options.operation {
        Operation::Check { file } => check(file)?,
        Operation::Compile {
            file,
            backend,
            emit_asm,
        } => compile_file(file, backend, *emit_asm)?,
        Operation::Run { file, backend } => run(file, backend)?,
    };

    if !succeeded {
        process::exit(1);
    }
    Ok(())
}

fn read_source(file: &str) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("Failed to read '{}'", file))
}

/// Print the diagnostics report for a failed compilation.
fn describe_error(err: &CompileError, source: &str) {
    let mut diagnostics = Diagnostics::new(source);
    diagnostics.push(err);
    eprintln!("{}", diagnostics.report());
}

fn check(file: &str) -> Result<bool> {
    let source = read_source(file)?;
    match brainrotc::check(&source) {
        Ok(_) => {
            println!("No errors found.");
            Ok(true)
        }
        Err(err) => {
            describe_error(&err, &source);
            Ok(false)
        }
    }
}

fn compile_file(file: &str, backend: &BackendOptions, emit_asm: bool) -> Result<bool> {
    let source = read_source(file)?;
    let options = CompileOptions {
        optimise: backend.optimise(),
    };

    let result = compile(&source, &options).and_then(|listing| {
        let assembly = if emit_asm {
            Some(codegen::emit(&listing).map_err(CompileError::from)?)
        } else {
            None
        };
        Ok((listing, assembly))
    });

    match result {
        Ok((listing, assembly)) => {
            print!("{}", listing);
            if let Some(assembly) = assembly {
                println!();
                print!("{}", assembly);
            }
            Ok(true)
        }
        Err(err) => {
            describe_error(&err, &source);
            Ok(false)
        }
    }
}

fn run(file: &str, backend: &BackendOptions) -> Result<bool> {
    let source = read_source(file)?;
    let options = CompileOptions {
        optimise: backend.optimise(),
    };

    match compile(&source, &options) {
        Ok(listing) => {
            let execution = Interpreter::run(&listing);
            for value in execution.output() {
                println!("{}", value);
            }
            Ok(true)
        }
        Err(err) => {
            describe_error(&err, &source);
            Ok(false)
        }
    }
}
