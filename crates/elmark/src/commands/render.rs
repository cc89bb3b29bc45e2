//! `elmark render` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use elmark_config::{CliSettings, Config, SchemaConfig};
use elmark_render::{Renderer, Schema, node_from_json};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// JSON element tree to render (default: read stdin).
    input: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover elmark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File to write HTML to (overrides config; default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input parsing, rendering or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            output: self.output,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let json = match &self.input {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };

        let html = render_json(&json, &config.schema)?;

        match &config.output_resolved.path {
            Some(path) => {
                write_output(path, &html)?;
                Output::new().success(&format!(
                    "Wrote {} bytes to {}",
                    html.len(),
                    path.display()
                ));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

/// Parse `json` into a tree and render it with the configured schema.
fn render_json(json: &str, schema_config: &SchemaConfig) -> Result<String, CliError> {
    let node = node_from_json(json)?;
    let schema = schema_from_config(schema_config);
    let html = Renderer::with_schema(&schema).render(&node)?;
    tracing::info!(bytes = html.len(), "Rendered element tree");
    Ok(html)
}

/// Build the classification tables: defaults plus configured extensions.
fn schema_from_config(config: &SchemaConfig) -> Schema {
    Schema::new()
        .with_boolean_attributes(config.boolean_attributes.iter().cloned())
        .with_enumerated_attributes(config.enumerated_attributes.iter().cloned())
        .with_pass_through_attributes(config.pass_through_attributes.iter().cloned())
        .with_self_closing_tags(config.self_closing_tags.iter().cloned())
}

fn write_output(path: &Path, html: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}
