use clap::Parser;
use plan2dsl::{
    Result,
    cli::{Cli, Commands},
    commands::{self, ConvertCommandArgs},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            plan,
            output,
            script,
        } => {
            commands::execute_convert(&ConvertCommandArgs {
                plan,
                output,
                script,
            })?;
        }
        Commands::Validate { plan } => {
            commands::execute_validate(&plan)?;
        }
        Commands::List => {
            commands::execute_list()?;
        }
    }

    Ok(())
}
