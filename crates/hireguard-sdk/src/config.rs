//! Engine configuration
//!
//! Loaded from an optional `config/hireguard.{yaml,toml,json}` file and
//! `HIREGUARD_*` environment variables (a `.env` file is honored).

use crate::error::{Result, SdkError};
use hireguard_core::RuleTableConfig;
use hireguard_runtime::gather::{DEFAULT_ACTIVITY_LIMIT, DEFAULT_SESSION_LIMIT};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config/hireguard";
const ENV_PREFIX: &str = "HIREGUARD";

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Append each analysis result to the store
    pub persist_results: bool,

    /// Load blacklist entries from the store at build time
    pub load_blacklist: bool,

    /// A session is flagged when more heuristics than this trigger
    pub session_flag_threshold: usize,

    /// Activities pulled per analysis
    pub activity_limit: usize,

    /// Sessions pulled per analysis
    pub session_limit: usize,

    /// Enable metrics collection
    pub enable_metrics: bool,

    /// Rule reference tables
    pub rules: RuleTableConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            persist_results: true,
            load_blacklist: true,
            session_flag_threshold: 2,
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
            session_limit: DEFAULT_SESSION_LIMIT,
            enable_metrics: true,
            rules: RuleTableConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables and config file
    pub fn load() -> Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| SdkError::ConfigError(format!("Failed to deserialize config: {}", e))),
            Err(e) => {
                tracing::info!("No usable config source ({}), using default configuration", e);
                Ok(Self::default())
            }
        }
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(content, config::FileFormat::Yaml))
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| SdkError::ConfigError(e.to_string()))
    }

    pub fn with_persist_results(mut self, enabled: bool) -> Self {
        self.persist_results = enabled;
        self
    }

    pub fn with_load_blacklist(mut self, enabled: bool) -> Self {
        self.load_blacklist = enabled;
        self
    }

    pub fn with_session_flag_threshold(mut self, threshold: usize) -> Self {
        self.session_flag_threshold = threshold;
        self
    }

    pub fn with_rules(mut self, rules: RuleTableConfig) -> Self {
        self.rules = rules;
        self
    }
}
