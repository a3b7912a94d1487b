use crate::codegen::Generator;
use crate::models::ConfigNode;
use crate::{Result, loader};
use colored::*;
use std::path::Path;

pub fn execute_validate(plan_path: &Path) -> Result<()> {
    let mut has_errors = false;

    println!("{}", "Validating plan file...".bright_blue());
    println!("  Path: {}", plan_path.display());

    let document = match loader::load_plan(plan_path) {
        Ok(document) => {
            println!("{}", "✓ Plan is valid".green());
            println!("  Version: {}", document.version);
            println!("  Root element: {}", document.plan.element_type.bold());
            println!("  Elements: {}", count_elements(&document.plan));
            println!();
            Some(document)
        }
        Err(e) => {
            println!("{}", "✗ Plan validation failed".red().bold());
            println!("  {}", e.to_string().red());
            has_errors = true;
            println!();
            None
        }
    };

    // Dry-run generation surfaces unknown elements, malformed properties
    // and unsupported expressions without writing any output.
    if let Some(document) = document {
        println!("{}", "Checking element support...".bright_blue());

        match Generator::new().generate(&document.plan) {
            Ok(tree) => {
                println!("{}", "✓ All elements are supported".green());
                println!("  Generated calls: {}", tree.call_count());
            }
            Err(e) => {
                println!("{}", "✗ Generation check failed".red().bold());
                println!("  {}", e.to_string().red());
                has_errors = true;
            }
        }
        println!();
    }

    if has_errors {
        println!("{}", "✗ Validation completed with errors".red().bold());
        std::process::exit(1);
    } else {
        println!("{}", "✓ All validations passed successfully".green().bold());
        Ok(())
    }
}

fn count_elements(node: &ConfigNode) -> usize {
    1 + node.children.iter().map(count_elements).sum::<usize>()
}
