//! Parse Config from config file

use std::{
    fs::read_to_string,
    net::{AddrParseError, SocketAddr},
    path::{Path, PathBuf},
    str::FromStr,
};

use leptos::config::LeptosOptions;
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::LevelParseError;

/// Where the config is read from unless `FITDESK_CONFIG` says otherwise
pub const DEFAULT_CONFIG_PATH: &str = "/etc/fitdesk/config.toml";
pub const CONFIG_PATH_VAR: &str = "FITDESK_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to parse config file as toml: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Unable to read config file {path}: {source}")]
    ConfigFileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Unable to parse log_level: {0}")]
    LogLevel(#[from] LevelParseError),
    #[error("Unable to parse site_addr as socket address: {0}")]
    SiteAddr(#[from] AddrParseError),
    #[error("backend.{field} must be an absolute http(s) url, got {value:?}")]
    BackendUrl { field: &'static str, value: String },
}

#[derive(Deserialize)]
struct WebConfigData {
    /// The address to host the console on (e.g. 127.0.0.1:8080)
    site_addr: String,
}

#[derive(Deserialize)]
struct BackendConfigData {
    api_url: String,
    media_url: String,
}

/// The config data as it is present in (a well-formed) toml config file
#[derive(Deserialize)]
struct ConfigData {
    web: WebConfigData,
    backend: BackendConfigData,
    log_level: Option<String>,
    /// Log into daily rotated files in this directory in addition to stdout
    log_directory: Option<String>,
}

/// Where the REST backend lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base url of the REST api, without trailing /
    pub api_url: String,
    /// Base url uploaded media paths are relative to, without trailing /
    pub media_url: String,
}

fn backend_url(field: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    let has_host = ["http://", "https://"]
        .iter()
        .any(|scheme| trimmed.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()));
    if has_host {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::BackendUrl { field, value })
    }
}

/// The main config object that will be available across the Serverside application
#[derive(Debug, Clone)]
pub struct Config {
    pub leptos_options: LeptosOptions,
    pub log_level: LevelFilter,
    pub log_directory: Option<PathBuf>,
    pub backend: BackendConfig,
}
impl Config {
    fn try_from_config_data(value: ConfigData) -> Result<Self, ConfigError> {
        let addr = SocketAddr::from_str(value.web.site_addr.trim())?;
        let leptos_options = LeptosOptions::builder()
            .output_name("fitdesk")
            .site_root("target/site")
            .site_pkg_dir("pkg")
            .site_addr(addr)
            .build();
        let log_level =
            LevelFilter::from_str(value.log_level.as_deref().unwrap_or("INFO"))?;

        Ok(Self {
            leptos_options,
            log_level,
            log_directory: value.log_directory.map(PathBuf::from),
            backend: BackendConfig {
                api_url: backend_url("api_url", value.backend.api_url)?,
                media_url: backend_url("media_url", value.backend.media_url)?,
            },
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config_data: ConfigData = toml::from_str(content)?;
        Self::try_from_config_data(config_data)
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Read the config from `$FITDESK_CONFIG`, or the default location if that is unset
    pub fn try_create() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::read(&path)
    }
}

#[cfg(test)]
mod test;
