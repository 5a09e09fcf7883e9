use clap::Parser;

use courier_rs::cli::{Cli, Commands};
use courier_rs::config::{ConfigLoader, Settings};
use courier_rs::logger::init_logger;
use courier_rs::server::Server;

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_file(path),
        None => ConfigLoader::new()?,
    };
    Ok(loader.load()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings(&cli)?;

    match cli.command {
        Some(Commands::CheckConfig) => {
            // Logger is intentionally not initialized; keep the output plain
            println!("configuration is valid");
            println!("  server address: {}", settings.server.address());
            println!(
                "  configured channels: {:?}",
                settings.channels.configured_channels()
            );
            Ok(())
        }
        Some(Commands::Serve {
            host,
            port,
            dry_run,
        }) => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            settings.validate()?;

            if dry_run {
                println!("configuration is valid, exiting (--dry-run)");
                return Ok(());
            }

            init_logger(&settings.logger)?;
            Server::new(settings).run().await
        }
        None => {
            init_logger(&settings.logger)?;
            Server::new(settings).run().await
        }
    }
}
