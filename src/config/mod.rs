//! Configuration: a TOML file under `~/.purelabel/`, created with defaults on
//! first run. The API key may live here or in the environment
//! (`GEMINI_API_KEY` / `GOOGLE_API_KEY`); the analysis client resolves the
//! environment itself.

use crate::llm::gemini::DEFAULT_MODEL;
use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::history::MAX_HISTORY;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gemini API key. Leave unset to use the environment.
    pub api_key: Option<String>,
    /// Model used for analysis.
    pub model: String,
    /// Location of the persisted history file. `~` is expanded.
    pub history_path: String,
    /// Retained history entries.
    pub max_history: usize,

    #[serde(skip)]
    config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            history_path: "~/.purelabel/history.json".to_string(),
            max_history: MAX_HISTORY,
            config_path: PathBuf::new(),
        }
    }
}

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let purelabel_dir = home.join(".purelabel");
        let config_path = purelabel_dir.join("config.toml");

        if !purelabel_dir.exists() {
            fs::create_dir_all(&purelabel_dir).context("Failed to create .purelabel directory")?;
        }

        if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path = config_path;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self {
                config_path: config_path.clone(),
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.max_history > 0, "max_history must be at least 1");
        anyhow::ensure!(!self.model.trim().is_empty(), "model must not be empty");
        Ok(())
    }

    /// History file location with `~` expanded.
    pub fn resolved_history_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.history_path).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.max_history, 10);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: Config = toml::from_str("model = \"gemini-2.0-flash\"").unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.max_history, 10);
    }

    #[test]
    fn tilde_is_expanded_in_history_path() {
        let config = Config::default();
        let resolved = config.resolved_history_path();
        assert!(!resolved.to_string_lossy().starts_with('~'));
        assert!(resolved.ends_with(".purelabel/history.json"));
    }

    #[test]
    fn absolute_history_path_is_kept() {
        let config: Config = toml::from_str("history_path = \"/tmp/history.json\"").unwrap();
        assert_eq!(
            config.resolved_history_path(),
            std::path::PathBuf::from("/tmp/history.json")
        );
    }
}
