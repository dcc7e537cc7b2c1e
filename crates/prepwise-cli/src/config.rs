//! Configuration management for PrepWise CLI
//!
//! Stores API key, profiles, and default settings in ~/.config/prepwise/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR: &str = "prepwise";
const CONFIG_FILE: &str = "config.toml";

/// Profile for a candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Number dialed for phone interviews
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Voice workflow used for web interviews
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
}

impl Profile {
    /// Name spoken to the candidate, falling back to the user ID
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.user_id)
    }
}

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Outbound telephony initiation endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephony_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            telephony_url: None,
            default_profile: None,
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file (or defaults), then apply environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Override settings from `PREPWISE_*` variables
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var("PREPWISE_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(url) = var("PREPWISE_BASE_URL") {
            self.base_url = url;
        }
        if let Some(url) = var("PREPWISE_TELEPHONY_URL") {
            self.telephony_url = Some(url);
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    pub fn add_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile, clearing the default if it pointed there
    pub fn remove_profile(&mut self, name: &str) -> bool {
        let removed = self.profiles.remove(name).is_some();
        if removed && self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        removed
    }

    pub fn set_default_profile(&mut self, name: String) -> bool {
        if self.profiles.contains_key(&name) {
            self.default_profile = Some(name);
            true
        } else {
            false
        }
    }

    /// Get the active profile (specified or default)
    pub fn get_profile(&self, name: Option<&str>) -> Option<&Profile> {
        let profile_name = name.or(self.default_profile.as_deref())?;
        self.profiles.get(profile_name)
    }

    /// Name of the profile a command will use
    pub fn profile_name<'a>(&'a self, name: Option<&'a str>) -> &'a str {
        name.or(self.default_profile.as_deref())
            .unwrap_or("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(user_id: &str) -> Profile {
        Profile {
            user_id: user_id.to_string(),
            name: Some("Ada".to_string()),
            phone: Some("+15550100".to_string()),
            workflow_id: None,
        }
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::parse("api_key = \"secret\"\n").unwrap();

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.base_url, "http://localhost:8000");
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_profiles_survive_toml() {
        let mut config = Config::default();
        config.add_profile("ada".to_string(), profile("u1"));
        config.set_default_profile("ada".to_string());

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();

        assert_eq!(parsed, config);
        assert_eq!(parsed.get_profile(None).unwrap().user_id, "u1");
    }

    #[test]
    fn test_default_profile_selection() {
        let mut config = Config::default();
        config.add_profile("ada".to_string(), profile("u1"));
        config.add_profile("bob".to_string(), profile("u2"));

        assert!(config.get_profile(None).is_none());
        assert!(!config.set_default_profile("carol".to_string()));
        assert!(config.set_default_profile("ada".to_string()));

        assert_eq!(config.get_profile(None).unwrap().user_id, "u1");
        assert_eq!(config.get_profile(Some("bob")).unwrap().user_id, "u2");
        assert_eq!(config.profile_name(None), "ada");
    }

    #[test]
    fn test_remove_default_profile_clears_default() {
        let mut config = Config::default();
        config.add_profile("ada".to_string(), profile("u1"));
        config.set_default_profile("ada".to_string());

        assert!(config.remove_profile("ada"));
        assert!(config.default_profile.is_none());
        assert!(!config.remove_profile("ada"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            "PREPWISE_API_KEY" => Some("from-env".to_string()),
            "PREPWISE_BASE_URL" => Some("https://api.example.com".to_string()),
            _ => None,
        });

        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.base_url, "https://api.example.com");
        assert!(config.telephony_url.is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_user_id() {
        let mut p = profile("u1");
        assert_eq!(p.display_name(), "Ada");
        p.name = None;
        assert_eq!(p.display_name(), "u1");
    }
}
