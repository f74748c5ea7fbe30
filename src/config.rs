// File: src/config.rs
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the remote collection API, without the `/api/todos` part.
    pub api_base_url: String,
    /// Skip TLS certificate verification (self-hosted servers).
    #[serde(default)]
    pub allow_insecure_certs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            allow_insecure_certs: false,
        }
    }
}

impl Config {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            allow_insecure_certs: false,
        }
    }

    fn path() -> Option<PathBuf> {
        ProjectDirs::from("org", "todomir", "todomir")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the platform config dir, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("no config directory"))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_defaults() {
        let config: Config = toml::from_str(r#"api_base_url = "https://todo.example""#).unwrap();
        assert_eq!(config.api_base_url, "https://todo.example");
        assert!(!config.allow_insecure_certs);
    }
}
