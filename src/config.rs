//! Configuration loading with layered overrides.
//!
//! Config is loaded in order (each layer overrides the previous):
//! 1. Default values
//! 2. Config file (TOML)
//! 3. Environment variables
//! 4. CLI arguments
//!
//! Feature allow-lists only come from the config file; they are data, not
//! something to tweak per process.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Library configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub probe: ProbeConfig,
    /// Feature flag name to the WebIDs allowed to use it.
    #[serde(default)]
    pub features: BTreeMap<String, Vec<String>>,
}

/// Capability probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("podbrowser/{}", env!("CARGO_PKG_VERSION"))
}

/// Builder for loading configuration with customizable options.
#[derive(Debug, Clone)]
pub struct Loader {
    /// Environment variable prefix (e.g., "MYAPP" -> MYAPP_PROBE_TIMEOUT_SECS)
    pub env_prefix: String,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            env_prefix: "PODBROWSER".to_string(),
        }
    }
}

impl Loader {
    /// Create a new config loader with the given environment prefix.
    pub fn new(env_prefix: impl Into<String>) -> Self {
        Self {
            env_prefix: env_prefix.into(),
        }
    }

    /// Load configuration from file, environment, and CLI arguments.
    ///
    /// # Arguments
    /// * `config_path` - Optional path to TOML config file
    /// * `cli_timeout_secs` - CLI override for the probe timeout
    /// * `cli_user_agent` - CLI override for the probe user agent
    pub fn load(
        &self,
        config_path: Option<&Path>,
        cli_timeout_secs: Option<u64>,
        cli_user_agent: Option<&str>,
    ) -> crate::Result<Config> {
        // Start with file config or defaults
        let mut config: Config = if let Some(path) = config_path {
            let content = std::fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;
            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?
        } else {
            Config::default()
        };

        // Override with environment variables
        let prefix = &self.env_prefix;

        if let Ok(secs) = std::env::var(format!("{prefix}_PROBE_TIMEOUT_SECS"))
            && let Ok(s) = secs.parse()
        {
            config.probe.timeout_secs = s;
        }
        if let Ok(agent) = std::env::var(format!("{prefix}_USER_AGENT")) {
            config.probe.user_agent = agent;
        }

        // Override with CLI arguments
        if let Some(secs) = cli_timeout_secs {
            config.probe.timeout_secs = secs;
        }
        if let Some(agent) = cli_user_agent {
            config.probe.user_agent = agent.to_string();
        }

        // Validate
        if config.probe.timeout_secs == 0 {
            return Err(Error::Config(
                "probe.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if let Some((flag, _)) = config
            .features
            .iter()
            .find(|(_, ids)| ids.iter().any(|id| id.trim().is_empty()))
        {
            return Err(Error::Config(format!(
                "features.{flag} contains an empty WebID"
            )));
        }

        Ok(config)
    }
}
