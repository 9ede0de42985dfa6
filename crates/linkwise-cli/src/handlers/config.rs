//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::logging::redaction::redact_json_value;
use crate::output::OutputWriter;
use serde::Serialize;

/// A searched configuration file location
#[derive(Debug, Serialize)]
struct ConfigPath {
    path: String,
    exists: bool,
}

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Show => handle_config_show(config, output),
        ConfigAction::Path => handle_config_path(output),
    }
}

/// Show the effective configuration with credentials redacted
fn handle_config_show(config: &Config, output: &mut OutputWriter) -> Result<()> {
    let mut value = serde_json::to_value(config)?;
    redact_json_value(&mut value);

    output.section("Effective configuration")?;
    output.data(&value)
}

/// List the configuration file locations in search order
fn handle_config_path(output: &mut OutputWriter) -> Result<()> {
    let paths: Vec<ConfigPath> = Config::default_config_paths()
        .into_iter()
        .map(|path| ConfigPath {
            exists: path.exists(),
            path: path.display().to_string(),
        })
        .collect();

    if output.format() != OutputFormat::Human {
        return output.data(&paths);
    }

    output.section("Configuration search path")?;
    for entry in &paths {
        let marker = if entry.exists { "found" } else { "-" };
        output.writeln(&format!("  {:5}  {}", marker, entry.path))?;
    }
    output.info("The first existing file is used; LINKWISE_CONFIG or --config overrides the search")
}
