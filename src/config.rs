use crate::error::BlogError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";

/// User settings, read from `config.json` in the platform config dir.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed location: an http(s) URL or a path to a JSON file.
    pub source: String,
    /// Site root used to build article permalinks and share links.
    pub base_url: String,
    /// Suffix of every article page title.
    pub site_name: String,
    /// Default filter for the log file, overridden by `BLOG_EXPLORER_LOG`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: "posts.json".to_string(),
            base_url: "http://localhost:5500".to_string(),
            site_name: "Daily Science".to_string(),
            log_level: "info".to_string(),
        }
    }
}

pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "dailyscience", "blog-explorer")
}

/// Default location of the config file, if a home directory exists.
pub fn default_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

impl Config {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, BlogError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(BlogError::Config(format!("{}: {}", path.display(), e))),
        };
        serde_json::from_str(&text)
            .map_err(|e| BlogError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from an explicit path or the default location.
    pub fn load(path: Option<&Path>) -> Result<Self, BlogError> {
        match path.map(Path::to_path_buf).or_else(default_path) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }
}
