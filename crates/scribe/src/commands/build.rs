//! `scribe build` command implementation.

use std::path::PathBuf;

use clap::Args;
use scribe_config::{CliSettings, Config};
use scribe_site::{OutputFormat, discover_documents};

use super::site_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Document source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Directory containing `_name.*` partials (overrides config).
    #[arg(short, long)]
    partials_dir: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Base URL for `image_tag` paths (overrides config).
    #[arg(long)]
    images_url: Option<String>,

    /// Write HTML instead of expanded markdown.
    #[arg(long)]
    pub(crate) html: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,

    /// Path to configuration file (default: auto-discover scribe.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            partials_dir: self.partials_dir,
            output_dir: self.output_dir,
            images_url: self.images_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let source_dir = &config.source_resolved.dir;
        let output_dir = &config.render_resolved.output_dir;
        output.info(&format!("Source: {}", source_dir.display()));
        output.info(&format!("Output: {}", output_dir.display()));

        let site = site_from_config(&config)?;
        output.info(&format!("Partials: {}", site.partials().len()));
        let documents = discover_documents(source_dir)?;
        let report = site.build(&documents);

        let format = if self.html {
            OutputFormat::Html
        } else {
            OutputFormat::Markdown
        };
        report.write(source_dir, output_dir, format)?;

        for document in &report.rendered {
            for warning in &document.warnings {
                output.warning(&format!("{}: {warning}", document.source.display()));
            }
        }
        for failure in &report.failed {
            output.error(&format!("Failed: {failure}"));
        }

        if !report.is_success() {
            return Err(CliError::Failed {
                failed: report.failed.len(),
                total: documents.len(),
            });
        }

        output.success(&format!(
            "Rendered {} documents to {}",
            report.rendered.len(),
            output_dir.display()
        ));
        Ok(())
    }
}
