//! CLI argument parsing with clap
//!
//! Defines the command-line interface: the `serve` command (default) and
//! `check-config` for validating configuration without starting the server.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Priority-aware notification routing service
#[derive(Parser, Debug)]
#[command(name = "courier-rs")]
#[command(about = "Routes notifications to Discord, Slack, Teams, SMS, and email")]
#[command(long_about = "
Courier-rs is an outbound notification router. It accepts a generic send
request over HTTP and relays it to one of several third-party channels
based on a channel selector and a priority level.

EXAMPLES:
    # Start the server with default configuration
    courier-rs serve

    # Start server on a custom host and port
    courier-rs serve --host 0.0.0.0 --port 8080

    # Use a custom configuration file
    courier-rs --config /etc/courier/production.toml serve

    # Validate configuration without starting the server
    courier-rs check-config
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Use a single TOML file instead of the layered config directory.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Host address to bind to, overriding configuration
        #[arg(long, value_name = "ADDRESS")]
        host: Option<String>,

        /// Port number to listen on, overriding configuration
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,

        /// Validate configuration and exit without binding
        #[arg(long)]
        dry_run: bool,
    },

    /// Load and validate configuration, then exit
    ///
    /// Returns exit code 0 if the configuration is valid, non-zero otherwise.
    CheckConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_with_overrides() {
        let cli = Cli::parse_from(["courier-rs", "serve", "--host", "0.0.0.0", "-p", "9000"]);
        match cli.command {
            Some(Commands::Serve { host, port, dry_run }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9000));
                assert!(!dry_run);
            }
            other => panic!("Expected Serve command, got {:?}", other),
        }
    }

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::parse_from(["courier-rs"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_check_config_command() {
        let cli = Cli::parse_from(["courier-rs", "check-config"]);
        assert!(matches!(cli.command, Some(Commands::CheckConfig)));
    }
}
