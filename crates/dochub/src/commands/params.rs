//! `dochub params` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use dochub_config::{CliSettings, Config};

use crate::commands::load_site;
use crate::error::CliError;

/// Arguments for the params command.
#[derive(Args)]
pub(crate) struct ParamsArgs {
    /// Section identifier (e.g., "python").
    section: String,

    /// Path to configuration file (default: auto-discover dochub.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,
}

impl ParamsArgs {
    /// Execute the params command.
    ///
    /// Writes the section's parameters to stdout as a JSON array of
    /// segment arrays.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or loading fails, or the section is unknown.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = load_site(&config)?;

        let params = site.params(&self.section)?;

        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &params)?;
        writeln!(stdout)?;
        Ok(())
    }
}
