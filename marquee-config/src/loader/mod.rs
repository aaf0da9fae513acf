//! Resolves the active [`CarouselConfig`].
//!
//! Evaluation order:
//! 1) `$MARQUEE_CONFIG_PATH` (TOML or JSON file),
//! 2) `$MARQUEE_CONFIG_JSON` (inline JSON),
//! 3) the first existing default file under the working directory,
//! 4) built-in defaults.
//!
//! Whatever wins is validated before it is returned.

pub mod error;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::CarouselConfig;
use error::ConfigLoadError;

pub const CONFIG_PATH_ENV: &str = "MARQUEE_CONFIG_PATH";
pub const CONFIG_JSON_ENV: &str = "MARQUEE_CONFIG_JSON";

const DEFAULT_CANDIDATES: &[&str] = &[
    "marquee.toml",
    "marquee.json",
    "config/marquee.toml",
    "config/marquee.json",
];

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Default => f.write_str("built-in defaults"),
            ConfigSource::EnvPath(path) => {
                write!(f, "{} ({CONFIG_PATH_ENV})", path.display())
            }
            ConfigSource::EnvInline => f.write_str(CONFIG_JSON_ENV),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CarouselConfig,
    pub source: ConfigSource,
}

impl ConfigLoad {
    /// Load from the process environment, resolving default files against
    /// the current working directory.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        Self::resolve(|key| std::env::var(key).ok(), Path::new("."))
    }

    /// Load with an explicit variable lookup and base directory for the
    /// default file search. Relative `$MARQUEE_CONFIG_PATH` values are taken
    /// as given.
    pub fn resolve<F>(lookup: F, root: &Path) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty =
            |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let (config, source) = if let Some(path) = non_empty(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            (load_from_file(&path)?, ConfigSource::EnvPath(path))
        } else if let Some(raw) = non_empty(CONFIG_JSON_ENV) {
            (parse_json(&raw, CONFIG_JSON_ENV)?, ConfigSource::EnvInline)
        } else if let Some(path) = find_default_file(root) {
            (load_from_file(&path)?, ConfigSource::File(path))
        } else {
            (CarouselConfig::default(), ConfigSource::Default)
        };

        config.validate()?;
        debug!(target: "carousel::config", %source, "configuration loaded");
        Ok(Self { config, source })
    }
}

pub fn load_from_file(path: &Path) -> Result<CarouselConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let origin = path.display().to_string();

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json(&contents, &origin),
        Some("toml") | Some("tml") => toml::from_str(&contents)
            .map_err(|err| ConfigLoadError::parse(origin, err)),
        _ => parse_from_str(&contents, &origin),
    }
}

/// Parse `contents` as TOML, falling back to JSON.
pub fn parse_from_str(
    contents: &str,
    origin: &str,
) -> Result<CarouselConfig, ConfigLoadError> {
    toml::from_str(contents).or_else(|toml_err| {
        serde_json::from_str(contents).map_err(|json_err| {
            ConfigLoadError::parse(
                origin,
                format!("toml error: {toml_err}; json error: {json_err}"),
            )
        })
    })
}

pub fn parse_json(
    raw: &str,
    origin: &str,
) -> Result<CarouselConfig, ConfigLoadError> {
    serde_json::from_str(raw).map_err(|err| ConfigLoadError::parse(origin, err))
}

fn find_default_file(root: &Path) -> Option<PathBuf> {
    DEFAULT_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_file())
}
