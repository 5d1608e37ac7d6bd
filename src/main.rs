use clap::Parser;

use salon_rs::cli::{Cli, Commands, MigrateCommandHandler};
use salon_rs::config::ConfigLoader;
use salon_rs::logger::init_logger;
use salon_rs::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loader = match &cli.config {
        Some(path) => ConfigLoader::from_file(path.clone()),
        None => ConfigLoader::new().map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?,
    };
    let mut settings = loader
        .load()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    cli.apply_overrides(&mut settings);

    init_logger(&settings.logger)?;

    match &cli.command {
        Some(Commands::Migrate { dry_run }) => {
            MigrateCommandHandler::new(settings)
                .execute(*dry_run)
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
            Ok(())
        }
        Some(Commands::Serve { dry_run: true, .. }) => {
            // Settings already validated on load
            println!("Configuration is valid");
            Ok(())
        }
        Some(Commands::Serve { .. }) | None => Server::new(settings).run().await,
    }
}
