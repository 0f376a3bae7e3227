use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "irisd")]
#[command(about = "Iris - native vision capability bridge", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new config file
    Init {
        /// Path for new config file
        #[arg(default_value = "iris.toml")]
        path: PathBuf,
    },
    /// Start the HTTP/WebSocket gateway for the vision channel
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Dispatch a single method call and print the reply
    Call {
        /// Method name, e.g. initializeVision or analyzeImage
        method: String,
        /// Call arguments as a JSON object
        #[arg(long)]
        args: Option<String>,
    },
}
