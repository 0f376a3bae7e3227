mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    iris_runtime::init_logging();

    // Parse CLI args
    let cli = Cli::parse();

    // Handle init command early (doesn't need config)
    if let Commands::Init { path } = &cli.command {
        return commands::init::run_init(path);
    }

    // Load config
    let config = config::load_config(cli.config.as_deref())?;

    // Dispatch to command
    match cli.command {
        Commands::Init { .. } => {
            // Already handled above
            unreachable!()
        }
        Commands::Serve { host, port } => {
            commands::serve::execute(host, port, &config).await?;
        }
        Commands::Call { method, args } => {
            let succeeded = commands::call::execute(method, args, &config).await?;
            if !succeeded {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
