//! AX-009: `aurora.yaml` parsing, environment overrides, and validation.
//!
//! Every section is optional; a missing file behaves like an empty one.
//! Validation checks:
//! - version must be "1.0"
//! - `server.bind` must parse as a socket address
//! - `output.dir` must not be empty
//! - `default_lang`, when set, must name a supported language

use super::lang_select::DEFAULT_LANG_ENV;
use super::types::Lang;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default config file name.
pub const CONFIG_FILE: &str = "aurora.yaml";

/// Overrides `output.dir`.
pub const OUTPUT_DIR_ENV: &str = "AURORA_OUTPUT_DIR";

/// Overrides `server.bind`.
pub const BIND_ENV: &str = "AURORA_BIND";

pub const DEFAULT_BIND: &str = "127.0.0.1:5001";
pub const DEFAULT_OUTPUT_DIR: &str = "generated";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuroraConfig {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Language used instead of keyword selection (`AURORA_DEFAULT_LANG`)
    #[serde(default)]
    pub default_lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Append generation events to `<dir>/events.jsonl`
    #[serde(default = "default_true")]
    pub journal: bool,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            journal: true,
        }
    }
}

impl Default for AuroraConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            server: ServerConfig::default(),
            output: OutputConfig::default(),
            default_lang: None,
        }
    }
}

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Parse an aurora.yaml file from disk.
pub fn parse_config_file(path: &Path) -> Result<AuroraConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_config(&content)
}

/// Parse an aurora.yaml from a string. Empty input yields the defaults.
pub fn parse_config(yaml: &str) -> Result<AuroraConfig, String> {
    if yaml.trim().is_empty() {
        return Ok(AuroraConfig::default());
    }
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Load the config at `path`, or the defaults when `path` does not exist,
/// then apply environment overrides.
pub fn load_config(path: &Path) -> Result<AuroraConfig, String> {
    let mut config = if path.exists() {
        parse_config_file(path)?
    } else {
        AuroraConfig::default()
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Apply `AURORA_*` overrides. `lookup` abstracts the environment so tests do
/// not have to mutate process state. Empty values are ignored, as is a
/// default language we do not support.
pub fn apply_env_overrides(config: &mut AuroraConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    if let Some(dir) = get(OUTPUT_DIR_ENV) {
        config.output.dir = PathBuf::from(dir);
    }
    if let Some(bind) = get(BIND_ENV) {
        config.server.bind = bind;
    }
    if let Some(lang) = get(DEFAULT_LANG_ENV) {
        match lang.parse::<Lang>() {
            Ok(_) => config.default_lang = Some(lang),
            Err(e) => tracing::warn!(var = DEFAULT_LANG_ENV, error = %e, "ignoring override"),
        }
    }
}

/// Validate a parsed config. Returns a list of errors (empty = valid).
pub fn validate_config(config: &AuroraConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.version != "1.0" {
        errors.push(ValidationError {
            message: format!("version must be \"1.0\", got \"{}\"", config.version),
        });
    }

    if config.server.bind.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            message: format!(
                "server.bind '{}' is not a socket address (e.g. {})",
                config.server.bind, DEFAULT_BIND
            ),
        });
    }

    if config.output.dir.as_os_str().is_empty() {
        errors.push(ValidationError {
            message: "output.dir must not be empty".to_string(),
        });
    }

    if let Some(lang) = &config.default_lang {
        if let Err(e) = lang.parse::<Lang>() {
            errors.push(ValidationError {
                message: format!("default_lang: {}", e),
            });
        }
    }

    errors
}

/// The YAML written by `aurora-x init`.
pub fn default_config_yaml() -> String {
    format!(
        r#"version: "1.0"

server:
  bind: "{bind}"

output:
  # Generated projects land in <dir>/<name>-<digest>/
  dir: {dir}
  journal: true

# Force one language instead of keyword selection: python | go | rust | csharp
default_lang: null
"#,
        bind = DEFAULT_BIND,
        dir = DEFAULT_OUTPUT_DIR
    )
}
