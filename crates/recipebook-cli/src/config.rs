use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = ".call-config";
const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallConfig {
    #[serde(rename = "current-profile")]
    pub current_profile: String,
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            current_profile: DEFAULT_PROFILE.to_string(),
            profiles: BTreeMap::from([(DEFAULT_PROFILE.to_string(), Profile::default())]),
        }
    }
}

impl CallConfig {
    /// Reads the config file, or `None` when it does not exist yet.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed config file {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw).with_context(|| format!("Cannot write {}", path.display()))
    }

    pub fn profile(&self) -> anyhow::Result<&Profile> {
        self.profiles
            .get(&self.current_profile)
            .ok_or_else(|| anyhow!("Profile '{}' is not configured", self.current_profile))
    }

    pub fn profile_mut(&mut self) -> &mut Profile {
        self.profiles
            .entry(self.current_profile.clone())
            .or_default()
    }

    /// Makes `name` the current profile, creating it empty if unknown.
    pub fn switch_profile(&mut self, name: &str) {
        self.current_profile = name.to_string();
        self.profiles.entry(name.to_string()).or_default();
    }
}
