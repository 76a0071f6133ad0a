use crate::help::DEFAULT_ENDPOINT;
use dirs::config_dir;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "confold";
const CONFIG_FILE_NAME: &str = "config.toml";
const CURRENT_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const MAX_TIMEOUT_SECS: u64 = 600;

/// Result returned by [`load_config`], capturing the source and any non-fatal issues.
#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub config: FileConfig,
    pub warnings: Vec<String>,
    pub source: ConfigSource,
}

/// Indicates where the configuration was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// No persisted configuration was found or usable; defaults were synthesized.
    Default,
    /// Configuration was read from `config.toml`.
    File,
}

/// Errors that can occur when persisting configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Ser(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {err}"),
            ConfigError::Ser(err) => write!(f, "TOML serialization error: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        Self::Ser(value)
    }
}

/// Disk-backed configuration schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default = "FileConfig::schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub submission: SubmissionPreferences,
    #[serde(default)]
    pub ui: UiPreferences,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            submission: SubmissionPreferences::default(),
            ui: UiPreferences::default(),
        }
    }
}

impl FileConfig {
    const fn schema_version() -> u32 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Where and how jobs are posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPreferences {
    #[serde(default = "SubmissionPreferences::default_endpoint")]
    pub endpoint: String,
    #[serde(default = "SubmissionPreferences::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "SubmissionPreferences::default_user_agent")]
    pub user_agent: String,
}

impl Default for SubmissionPreferences {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: Self::default_user_agent(),
        }
    }
}

impl SubmissionPreferences {
    fn default_endpoint() -> String {
        DEFAULT_ENDPOINT.to_string()
    }

    const fn default_timeout_secs() -> u64 {
        DEFAULT_TIMEOUT_SECS
    }

    fn default_user_agent() -> String {
        format!("confold/{}", env!("CARGO_PKG_VERSION"))
    }
}

/// UI-only preferences that the GUI needs to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    #[serde(default)]
    pub theme: ThemePreference,
    #[serde(default)]
    pub show_technical_log: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            theme: ThemePreference::Light,
            show_technical_log: false,
        }
    }
}

/// Theme preference options.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
    System,
}

/// Path to the configuration directory.
pub fn config_directory() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Path to `config.toml`.
pub fn config_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Load the configuration from the default location, falling back to defaults.
pub fn load_config() -> ConfigLoadResult {
    load_config_from(&config_path())
}

/// Load the configuration from an explicit path.
pub fn load_config_from(path: &Path) -> ConfigLoadResult {
    let mut warnings = Vec::new();

    if path.exists() {
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<FileConfig>(&raw) {
                Ok(cfg) => {
                    let (cfg, mut sanitize_warnings) = sanitize_config(cfg);
                    warnings.append(&mut sanitize_warnings);
                    return ConfigLoadResult {
                        config: cfg,
                        warnings,
                        source: ConfigSource::File,
                    };
                }
                Err(err) => {
                    warnings.push(format!(
                        "Failed to parse {} as TOML: {}. Falling back to defaults.",
                        path.display(),
                        err
                    ));
                }
            },
            Err(err) => {
                warnings.push(format!(
                    "Failed to read {}: {}. Falling back to defaults.",
                    path.display(),
                    err
                ));
            }
        }
    }

    ConfigLoadResult {
        config: FileConfig::default(),
        warnings,
        source: ConfigSource::Default,
    }
}

/// Persist the configuration to the default location.
pub fn save_config(config: &FileConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_path())
}

pub fn save_config_to(config: &FileConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(config)?;
    fs::write(path, serialized)?;
    Ok(())
}

/// Persist only UI preferences, keeping the submission section from disk.
pub fn save_ui_only(ui: &UiPreferences) -> Result<(), ConfigError> {
    let mut config = load_config().config;
    config.ui = ui.clone();
    save_config(&config)
}

fn sanitize_config(mut config: FileConfig) -> (FileConfig, Vec<String>) {
    let mut warnings = Vec::new();

    if config.schema_version != CURRENT_SCHEMA_VERSION {
        warnings.push(format!(
            "Unknown config schema version {}. Resetting to {}.",
            config.schema_version, CURRENT_SCHEMA_VERSION
        ));
        return (FileConfig::default(), warnings);
    }

    let submission = &mut config.submission;
    let endpoint = submission.endpoint.trim().to_string();
    match Url::parse(&endpoint) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            submission.endpoint = endpoint;
        }
        Ok(url) => {
            warnings.push(format!(
                "Endpoint scheme '{}' is not supported. Resetting to {}.",
                url.scheme(),
                DEFAULT_ENDPOINT
            ));
            submission.endpoint = DEFAULT_ENDPOINT.to_string();
        }
        Err(err) => {
            warnings.push(format!(
                "Endpoint '{}' is not a valid URL ({}). Resetting to {}.",
                endpoint, err, DEFAULT_ENDPOINT
            ));
            submission.endpoint = DEFAULT_ENDPOINT.to_string();
        }
    }

    if submission.timeout_secs == 0 {
        warnings.push(format!(
            "timeout_secs must be at least 1. Resetting to {DEFAULT_TIMEOUT_SECS}."
        ));
        submission.timeout_secs = DEFAULT_TIMEOUT_SECS;
    } else if submission.timeout_secs > MAX_TIMEOUT_SECS {
        warnings.push(format!(
            "timeout_secs {} exceeds {MAX_TIMEOUT_SECS}. Clamping.",
            submission.timeout_secs
        ));
        submission.timeout_secs = MAX_TIMEOUT_SECS;
    }

    if submission.user_agent.trim().is_empty() {
        warnings.push("user_agent is empty. Using the default.".to_string());
        submission.user_agent = SubmissionPreferences::default_user_agent();
    }

    (config, warnings)
}
