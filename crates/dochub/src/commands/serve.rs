//! `dochub serve` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use dochub_config::{CliSettings, Config, NavigationDepth};
use dochub_server::{run_server, server_config_from_config};

use crate::commands::load_site;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover dochub.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Navigation filter depth: shallow or one-level (overrides config).
    #[arg(long)]
    depth: Option<NavigationDepth>,

    /// Enable verbose output (info-level logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or loading fails, or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.source_dir,
            depth: self.depth,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Source directory: {}",
            config.docs_resolved.source_dir.display()
        ));
        let site = load_site(&config)?;
        output.info(&format!(
            "Loaded {} pages in {} sections",
            site.store().generate_params().len(),
            site.sections().len()
        ));
        output.highlight(&format!(
            "Starting server on http://{}:{}",
            config.server.host, config.server.port
        ));

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config, Arc::new(site))
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
