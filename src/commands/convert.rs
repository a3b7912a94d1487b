//! Convert command implementation
//!
//! Converts a serialized test plan into fluent DSL source code.

use crate::codegen::Generator;
use crate::error::Result;
use crate::loader::load_plan;
use crate::renderer::DslRenderer;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Arguments accepted by the convert command
pub struct ConvertCommandArgs {
    /// Path to the test plan file
    pub plan: PathBuf,
    /// Output file, stdout when absent
    pub output: Option<PathBuf>,
    /// Wrap the expression in a runnable script
    pub script: bool,
}

/// Execute the convert command
pub fn execute_convert(args: &ConvertCommandArgs) -> Result<()> {
    let document = load_plan(&args.plan)?;
    println!("{} Loaded plan file: {}", "✓".green(), args.plan.display());

    let generator = Generator::new();
    let tree = generator.generate(&document.plan)?;

    let renderer = DslRenderer::new();
    let dsl = if args.script {
        renderer.render_script(&tree)
    } else {
        renderer.render(&tree)
    };

    if let Some(path) = &args.output {
        fs::write(path, &dsl)?;
        println!("{} Generated DSL code: {}", "✓".green(), path.display());
    } else {
        println!("\n{}", dsl);
    }

    Ok(())
}
