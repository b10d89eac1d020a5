use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::usecase::{HomeOptions, MAX_HOME_SECTIONS};

/// Overrides `api.base_url` when set
pub const BASE_URL_ENV: &str = "ANIMEDEV_API_URL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub home: HomeConfig,
    #[serde(default)]
    pub fake: FakeConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Fake,
    Remote,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Fake => write!(f, "fake"),
            Backend::Remote => write!(f, "remote"),
        }
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fake" => Ok(Backend::Fake),
            "remote" => Ok(Backend::Remote),
            other => Err(Error::InvalidInput(format!("unknown backend: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub backend: Backend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeConfig {
    #[serde(default = "default_max_sections")]
    pub max_sections: usize,
    #[serde(default)]
    pub genre_pacing_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FakeConfig {
    #[serde(default)]
    pub latency_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_page_limit() -> u32 {
    10
}

fn default_max_sections() -> usize {
    MAX_HOME_SECTIONS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            page_limit: default_page_limit(),
        }
    }
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            max_sections: default_max_sections(),
            genre_pacing_ms: 0,
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "animedev").ok_or(Error::NoConfigDir)
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

pub fn data_dir() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .map_err(|_| Error::NoDataDir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Read the config at `path`, writing defaults there if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Environment first, then the config file
    pub fn resolve_base_url(&self) -> String {
        std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.api.base_url.clone())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.api.request_timeout_ms)
    }

    pub fn fake_latency(&self) -> Duration {
        Duration::from_millis(self.fake.latency_ms)
    }

    pub fn home_options(&self) -> HomeOptions {
        HomeOptions {
            max_sections: self.home.max_sections.clamp(1, MAX_HOME_SECTIONS),
            genre_pacing: Duration::from_millis(self.home.genre_pacing_ms),
            request_timeout: self.request_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.general.backend = Backend::Remote;
        config.api.base_url = "https://api.example.test".to_string();
        config.home.genre_pacing_ms = 250;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[home]\nmax_sections = 3\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.home.max_sections, 3);
        assert_eq!(config.general.backend, Backend::Fake);
        assert_eq!(config.api.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_home_options_clamp_sections() {
        let mut config = Config::default();
        config.home.max_sections = 0;
        assert_eq!(config.home_options().max_sections, 1);

        config.home.max_sections = 40;
        assert_eq!(config.home_options().max_sections, MAX_HOME_SECTIONS);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general\nbackend = ").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("Remote".parse::<Backend>().unwrap(), Backend::Remote);
        assert!("carrier-pigeon".parse::<Backend>().is_err());
    }
}
