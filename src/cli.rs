//! CLI module.
//!
//! Argument parsing with clap, configuration overrides, and the
//! migrate command handler.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::settings::Settings;
use crate::db::MIGRATIONS;
use crate::error::{AppError, AppResult};

/// A salon management API server with database integration
#[derive(Parser, Debug)]
#[command(name = "salon-rs")]
#[command(about = "A salon management API server")]
#[command(version = crate::pkg_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Use a single TOML file instead of the layered config directory.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS")]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    Migrate {
        /// Show pending migrations without applying
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    /// Apply CLI overrides onto loaded settings.
    ///
    /// Precedence: CLI arguments beat configuration files and
    /// environment variables.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(Commands::Serve { host, port, .. }) = &self.command {
            if let Some(host) = host {
                settings.server.host = host.clone();
            }
            if let Some(port) = port {
                settings.server.port = *port;
            }
        }

        if self.verbose {
            settings.logger.level = "debug".to_string();
        } else if self.quiet {
            settings.logger.level = "error".to_string();
        }
    }
}

/// Handler for the migrate command.
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command.
    ///
    /// With `dry_run` set, pending migrations are listed but not
    /// applied.
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            self.show_pending_migrations().await
        } else {
            self.run_migrations().await
        }
    }

    /// Show pending migrations without applying them.
    async fn show_pending_migrations(&self) -> AppResult<()> {
        println!("Checking for pending migrations...");

        let database_url = self.config.database.url.clone();
        let pending_count: usize = tokio::task::spawn_blocking(move || {
            use diesel::Connection;
            use diesel::pg::PgConnection;
            use diesel_migrations::MigrationHarness;

            let mut conn =
                PgConnection::establish(&database_url).map_err(|e| AppError::Database {
                    operation: "establish connection for migration check".to_string(),
                    source: anyhow::anyhow!("Connection error: {}", e),
                })?;

            let pending = conn
                .pending_migrations(MIGRATIONS)
                .map_err(|e| AppError::Database {
                    operation: "check pending migrations".to_string(),
                    source: anyhow::anyhow!("Migration error: {}", e),
                })?;

            Ok::<_, AppError>(pending.len())
        })
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })??;

        if pending_count == 0 {
            println!("No pending migrations found - database is up to date");
        } else {
            println!("Found {} pending migration(s)", pending_count);
            println!("\nRun without --dry-run to apply these migrations");
        }

        Ok(())
    }

    /// Run pending migrations.
    async fn run_migrations(&self) -> AppResult<()> {
        println!("Running database migrations...");

        let applied = crate::db::run_pending_migrations(&self.config.database.url).await?;

        if applied == 0 {
            println!("No pending migrations - database is up to date");
        } else {
            println!("{} migration(s) applied", applied);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_overrides_apply() {
        let cli = Cli {
            command: Some(Commands::Serve {
                host: Some("0.0.0.0".to_string()),
                port: Some(8080),
                dry_run: false,
            }),
            config: None,
            verbose: false,
            quiet: false,
        };
        let mut settings = Settings::default();
        cli.apply_overrides(&mut settings);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_verbose_overrides_log_level() {
        let cli = Cli {
            command: None,
            config: None,
            verbose: true,
            quiet: false,
        };
        let mut settings = Settings::default();
        cli.apply_overrides(&mut settings);
        assert_eq!(settings.logger.level, "debug");
    }

    #[test]
    fn test_quiet_overrides_log_level() {
        let cli = Cli {
            command: None,
            config: None,
            verbose: false,
            quiet: true,
        };
        let mut settings = Settings::default();
        cli.apply_overrides(&mut settings);
        assert_eq!(settings.logger.level, "error");
    }
}
