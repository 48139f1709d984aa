//! CLI entry points

pub mod serve;

use clap::{Parser, Subcommand};

/// Finboard - authorization and tenancy service
#[derive(Parser)]
#[command(name = "finboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
}
