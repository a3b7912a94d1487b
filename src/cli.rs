use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plan2dsl")]
#[command(version)]
#[command(about = "Migrate GUI-built performance test plans to fluent DSL code", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a test plan file to DSL source code
    Convert {
        /// Path to test plan file (YAML or JSON)
        #[arg(short, long)]
        plan: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,

        /// Emit a runnable script instead of a bare expression
        #[arg(long)]
        script: bool,
    },

    /// Validate a test plan without generating code
    Validate {
        /// Path to test plan file (YAML or JSON)
        #[arg(short, long)]
        plan: PathBuf,
    },

    /// List supported configuration elements
    List,
}
