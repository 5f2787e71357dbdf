use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(about = "A compiler for the brainrot language")]
pub struct Options {
    #[clap(subcommand)]
    pub operation: Operation,
    /// Logging verbosity; 0 only shows errors, 4 shows everything
    #[clap(short, long, default_value_t = 1)]
    pub verbose: usize,
}

#[derive(Debug, Subcommand)]
pub enum Operation {
    /// Check a program for errors
    Check { file: String },
    /// Compile a program and print its three-address code
    Compile {
        file: String,
        #[clap(flatten)]
        backend: BackendOptions,
        /// Also print the generated assembly
        #[clap(long)]
        emit_asm: bool,
    },
    /// Compile and run
    Run {
        file: String,
        #[clap(flatten)]
        backend: BackendOptions,
    },
}

#[derive(Debug, Args)]
pub struct BackendOptions {
    #[clap(short, long)]
    /// Do not optimise the generated code
    no_optimise: bool,
}

impl BackendOptions {
    pub fn optimise(&self) -> bool {
        !self.no_optimise
    }
}
