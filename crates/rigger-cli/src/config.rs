//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `RIGGER_WORKSPACE__PACKAGES_DIR`, ...
//! 3. Config file (`--config`, or the platform config path when present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

/// Prefix of the environment variables that override config keys.
const ENV_PREFIX: &str = "RIGGER";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where packages live.
    pub workspace: WorkspaceConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Log file settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub packages_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to this file when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: WorkspaceConfig {
                packages_dir: PathBuf::from("packages"),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `RIGGER_*`
    /// environment variables.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let settings = config::Config::builder()
            .set_default(
                "workspace.packages_dir",
                defaults.workspace.packages_dir.to_string_lossy().into_owned(),
            )?
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("output.format", defaults.output.format)?
            .add_source(config::File::from(path.as_path()).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.rigger.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "rigger", "rigger")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".rigger.toml"))
    }

    /// The packages directory, with the `--packages-dir` flag taking
    /// precedence.
    pub fn packages_dir<'a>(&'a self, flag: Option<&'a Path>) -> &'a Path {
        flag.unwrap_or(&self.workspace.packages_dir)
    }

    /// Render as TOML, the format `rigger init` writes.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialise configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_packages_dir() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.workspace.packages_dir, PathBuf::from("packages"));
        assert!(cfg.logging.file.is_none());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rigger.toml");
        fs::write(
            &path,
            "[workspace]\npackages_dir = \"modules\"\n\n[logging]\nfile = \"rigger.log\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.workspace.packages_dir, PathBuf::from("modules"));
        assert_eq!(cfg.output.format, "auto");
        assert_eq!(cfg.logging.file, Some(PathBuf::from("rigger.log")));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn flag_wins_over_config() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.packages_dir(None), Path::new("packages"));
        assert_eq!(
            cfg.packages_dir(Some(Path::new("/srv/packages"))),
            Path::new("/srv/packages")
        );
    }

    #[test]
    fn toml_round_trips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rigger.toml");
        fs::write(&path, AppConfig::default().to_toml().unwrap()).unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.workspace.packages_dir, PathBuf::from("packages"));
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
