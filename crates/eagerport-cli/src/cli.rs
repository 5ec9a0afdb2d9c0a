use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "eagerportctl", version, about = "Inspect exportable model adapters")]
pub struct Cli {
    /// Log level (RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered model adapters
    List,

    /// Print the example inputs and dynamic shapes of one adapter
    Describe {
        /// Registered adapter name
        name: String,
    },
}
