use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Where the stock service listens when started with no arguments.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5009";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the agent service.
    pub endpoint: String,

    /// Per-request timeout.
    pub timeout_seconds: u64,

    /// Frame id used as the speaker when `speech` is run without `--speaker`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_speaker: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            default_speaker: None,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get_config_path() -> String {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        format!("{}/.ontoctl/config.yaml", home)
    }

    /// Loads the config file if present, falling back to defaults, then
    /// applies the `ONTOCTL_ENDPOINT` override. Command-line flags are
    /// applied on top of this by the caller.
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::get_config_path();
        let config_file = Path::new(&config_path);

        let mut config = if config_file.exists() {
            Self::load_from_file(config_file).unwrap_or_default()
        } else {
            Self::default()
        };

        if let Ok(endpoint) = std::env::var("ONTOCTL_ENDPOINT") {
            if !endpoint.is_empty() {
                config.endpoint = endpoint;
            }
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path();
        self.save_to_file(config_path)
    }
}
