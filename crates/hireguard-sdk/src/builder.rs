//! Builder pattern for RiskEngine

use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use crate::risk_engine::RiskEngine;
use hireguard_core::{RuleTable, RuleTableConfig};
use hireguard_runtime::{Blacklist, BlacklistLoader, MetricsCollector, RiskEngineConfig, RiskStore};
use std::sync::Arc;

/// Builder for RiskEngine
///
/// # Example
///
/// ```rust,ignore
/// use hireguard_sdk::{InMemoryStore, RiskEngineBuilder};
/// use std::sync::Arc;
///
/// let engine = RiskEngineBuilder::new()
///     .with_store(Arc::new(InMemoryStore::new()))
///     .persist_results(true)
///     .build()
///     .await?;
/// ```
pub struct RiskEngineBuilder {
    config: EngineConfig,
    store: Option<Arc<dyn RiskStore>>,
    metrics: Option<Arc<MetricsCollector>>,
    blacklist: Option<Blacklist>,
}

impl RiskEngineBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            store: None,
            metrics: None,
            blacklist: None,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the record store (required)
    pub fn with_store(mut self, store: Arc<dyn RiskStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the rule reference tables
    pub fn with_rules(mut self, rules: RuleTableConfig) -> Self {
        self.config.rules = rules;
        self
    }

    /// Override the rule reference tables from a YAML document
    pub fn with_rules_yaml(self, yaml: &str) -> Result<Self> {
        let rules = RuleTableConfig::from_yaml(yaml)?;
        Ok(self.with_rules(rules))
    }

    /// Use a fixed blacklist instead of loading one from the store
    pub fn with_blacklist(mut self, blacklist: Blacklist) -> Self {
        self.blacklist = Some(blacklist);
        self
    }

    /// Share an existing metrics collector
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Enable or disable result persistence
    pub fn persist_results(mut self, enabled: bool) -> Self {
        self.config.persist_results = enabled;
        self
    }

    /// Enable or disable loading the blacklist at build time
    pub fn load_blacklist(mut self, enabled: bool) -> Self {
        self.config.load_blacklist = enabled;
        self
    }

    /// Set the session flag threshold
    pub fn session_flag_threshold(mut self, threshold: usize) -> Self {
        self.config.session_flag_threshold = threshold;
        self
    }

    /// Enable metrics
    pub fn enable_metrics(mut self, enabled: bool) -> Self {
        self.config.enable_metrics = enabled;
        self
    }

    /// Build the engine.
    ///
    /// The blacklist is loaded once here; a failed load leaves it empty.
    pub async fn build(self) -> Result<RiskEngine> {
        let store = self.store.ok_or(SdkError::MissingStore)?;

        let blacklist = match self.blacklist {
            Some(blacklist) => blacklist,
            None if self.config.load_blacklist => BlacklistLoader::new(store.clone()).load().await,
            None => {
                tracing::debug!("Blacklist loading disabled");
                Blacklist::new()
            }
        };

        let risk_config = RiskEngineConfig::new(blacklist, RuleTable::new(&self.config.rules));
        let metrics = self
            .metrics
            .unwrap_or_else(|| Arc::new(MetricsCollector::new()));

        tracing::info!(
            "Risk engine ready: {} blacklisted emails, {} blacklisted IPs, persist_results={}",
            risk_config.blacklist.email_count(),
            risk_config.blacklist.ip_count(),
            self.config.persist_results
        );

        Ok(RiskEngine::new(self.config, risk_config, store, metrics))
    }
}

impl Default for RiskEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
