// src/config.rs
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingSettings {
    /// Upper bound on optimistic-concurrency retries for counter updates.
    pub max_retries: u32,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self { max_retries: 5 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransportSettings {
    /// Webhook that receives in-place card replacement requests. When
    /// absent, replacement requests are dropped silently.
    pub replace_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedSettings {
    /// Optional YAML file of notification and delivery records to load at
    /// startup. Record creation is otherwise owned by the external
    /// composition and delivery pipelines.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub tracking: TrackingSettings,
    #[serde(default)]
    pub transport: TransportSettings,
    #[serde(default)]
    pub seed: SeedSettings,
}

impl Settings {
    pub fn load_from_file(filename: &str) -> Result<Settings, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(filename)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }
}
