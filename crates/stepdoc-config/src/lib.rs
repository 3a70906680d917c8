//! Configuration management for stepdoc.
//!
//! Parses `stepdoc.toml` with serde and discovers it in the current
//! directory or its parents.
//!
//! ```toml
//! [render]
//! output = "evaDocx"
//! format = "json"
//!
//! [procedures]
//! dir = "${EVA_ROOT:-.}/procedures"
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! `procedures.dir` supports `${VAR}`, `${VAR:-default}` and a leading `~`.

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use stepdoc_modules::OutputType;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "stepdoc.toml";

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the output type.
    pub output: Option<OutputType>,
    /// Override the report format.
    pub format: Option<ReportFormat>,
    /// Override the procedures directory.
    pub procedures_dir: Option<PathBuf>,
}

/// How rendered alterations are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// One plain-text line per alteration.
    Text,
}

impl ReportFormat {
    /// Name used in config files and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => Err(ConfigError::Validation(format!(
                "unknown report format \"{other}\" (expected json or text)"
            ))),
        }
    }
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render section as parsed from TOML.
    render: RenderConfigRaw,
    /// Procedures section as parsed from TOML.
    procedures: ProceduresConfigRaw,

    /// Resolved render configuration (set after loading).
    #[serde(skip)]
    pub render_resolved: RenderConfig,
    /// Resolved procedures configuration (set after loading).
    #[serde(skip)]
    pub procedures_resolved: ProceduresConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RenderConfigRaw {
    output: Option<String>,
    format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProceduresConfigRaw {
    dir: Option<String>,
}

/// Resolved render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Output type alterations are rendered for.
    pub output: OutputType,
    /// Report format.
    pub format: ReportFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: OutputType::EvaDocx,
            format: ReportFormat::Json,
        }
    }
}

/// Resolved procedures configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProceduresConfig {
    /// Base directory for relative procedure files.
    pub dir: PathBuf,
}

impl ProceduresConfig {
    /// Locate a procedure file.
    ///
    /// Absolute paths and relative paths that exist from the working
    /// directory are used as given; other relative paths are joined onto
    /// the procedures directory.
    #[must_use]
    pub fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() || file.exists() {
            file.to_path_buf()
        } else {
            self.dir.join(file)
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`procedures.dir`").
        field: String,
        /// Error message (e.g., "${`EVA_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `stepdoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or parsing or
    /// validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output) = settings.output {
            self.render_resolved.output = output;
        }
        if let Some(format) = settings.format {
            self.render_resolved.format = format;
        }
        if let Some(dir) = &settings.procedures_dir {
            self.procedures_resolved.dir.clone_from(dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            procedures_resolved: ProceduresConfig {
                dir: base.to_path_buf(),
            },
            ..Self::default()
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate raw values and resolve paths against `config_dir`.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let defaults = RenderConfig::default();
        let output = match self.render.output.as_deref() {
            Some(name) => name
                .parse::<OutputType>()
                .map_err(|e| ConfigError::Validation(format!("render.output: {e}")))?,
            None => defaults.output,
        };
        let format = match self.render.format.as_deref() {
            Some(name) => name.parse::<ReportFormat>().map_err(|e| match e {
                ConfigError::Validation(message) => {
                    ConfigError::Validation(format!("render.format: {message}"))
                }
                other => other,
            })?,
            None => defaults.format,
        };
        self.render_resolved = RenderConfig { output, format };

        let dir = match self.procedures.dir.as_deref() {
            Some(dir) => config_dir.join(expand::expand_path(dir, "procedures.dir")?),
            None => config_dir.to_path_buf(),
        };
        self.procedures_resolved = ProceduresConfig { dir };

        Ok(())
    }
}
