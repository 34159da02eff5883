//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod service;
mod suite;

pub use service::ServiceCommands;
pub use suite::SuiteCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Test suite scheduling
    Suite {
        #[command(subcommand)]
        command: SuiteCommands,
    },
    /// Service catalog lookups
    Service {
        #[command(subcommand)]
        command: ServiceCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
///
/// # Returns
/// Result indicating success or failure
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Suite { command } => suite::handle_suite_command(command, config).await,
        Commands::Service { command } => service::handle_service_command(command),
    }
}
