//! `rigger config`: inspect configuration values.

use std::path::PathBuf;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `config_file` is the `--config` flag, if given.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    config_file: Option<PathBuf>,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.is_json() {
                output.json(&serde_json::json!({ "key": key, "value": value }))?;
            } else {
                output.print(&format!("{key} = {value:?}"))?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
                return Ok(());
            }
            output.header("Current Configuration:")?;
            let serialised = config.to_toml().map_err(|e| CliError::ConfigError {
                message: format!("{e:#}"),
                source: Some(e.into()),
            })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            let path = config_file.unwrap_or_else(AppConfig::config_path);
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "workspace.packages_dir" => Ok(config.workspace.packages_dir.display().to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "logging.file" => Ok(config
            .logging
            .file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
