use crate::Result;
use crate::codegen::{Generator, LiteralValue, ScopeRule};
use colored::*;

pub fn execute_list() -> Result<()> {
    let generator = Generator::new();
    let descriptors = generator.registry().descriptors();

    println!(
        "{}",
        format!("Supported configuration elements ({}):", descriptors.len()).bold()
    );

    for descriptor in descriptors {
        println!();
        println!(
            "  {} {} {}",
            descriptor.element_type.bold(),
            "→".bright_cyan(),
            format!("{}(...)", descriptor.function_name).cyan()
        );

        let kind = match descriptor.scope_rule {
            ScopeRule::Container(_) => "container",
            ScopeRule::Attachment => "attachment",
        };
        println!("     Kind: {}", kind);

        if descriptor.params.is_empty() {
            println!("     Parameters: none");
            continue;
        }

        println!("     Parameters:");
        for param in &descriptor.params {
            match &param.default {
                Some(default) => println!(
                    "       - {} ({}, default {})",
                    param.property.bright_yellow(),
                    param.param_type.name(),
                    literal_text(default)
                ),
                None => println!(
                    "       - {} ({}, required)",
                    param.property.bright_yellow(),
                    param.param_type.name()
                ),
            }
        }
    }

    Ok(())
}

fn literal_text(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Str(s) => format!("{s:?}"),
        LiteralValue::Int(i) => i.to_string(),
        LiteralValue::Float(f) => f.to_string(),
        LiteralValue::Bool(b) => b.to_string(),
    }
}
