//! `scribe render` command implementation.

use std::path::PathBuf;

use clap::Args;
use scribe_config::{CliSettings, Config};
use scribe_site::OutputFormat;

use super::site_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Document to render.
    file: PathBuf,

    /// Directory containing `_name.*` partials (overrides config).
    #[arg(short, long)]
    partials_dir: Option<PathBuf>,

    /// Base URL for `image_tag` paths (overrides config).
    #[arg(long)]
    images_url: Option<String>,

    /// Convert the rendered markdown to HTML.
    #[arg(long)]
    html: bool,

    /// Path to configuration file (default: auto-discover scribe.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            partials_dir: self.partials_dir,
            images_url: self.images_url,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = site_from_config(&config)?;

        let document = site.render_file(&self.file)?;
        for warning in &document.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        let format = if self.html {
            OutputFormat::Html
        } else {
            OutputFormat::Markdown
        };
        output.document(&format.format_body(&document.body));
        Ok(())
    }
}
