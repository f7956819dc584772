//! Core RiskEngine implementation

use super::monitor::SessionMonitor;
use crate::config::EngineConfig;
use crate::error::Result;
use hireguard_core::{AnalysisContext, FlagType, FraudAnalysisResult, SecurityFlag, SessionSnapshot};
use hireguard_runtime::{
    analyze_applications, analyze_behavior_patterns, analyze_network_patterns, analyze_profile,
    compute_result, AnalysisRecord, AnalysisWriter, BehaviorInput, BlacklistLoader, DataGatherer,
    MetricsCollector, PersistOutcome, RiskEngineConfig, RiskStore,
};
use std::sync::{Arc, RwLock};
use std::time::Instant;

/// Risk engine
///
/// Holds the rule table and blacklist snapshot, the store handle and the
/// metrics collector. Safe to share across tasks behind an `Arc`.
pub struct RiskEngine {
    config: EngineConfig,
    risk_config: RwLock<Arc<RiskEngineConfig>>,
    store: Arc<dyn RiskStore>,
    gatherer: DataGatherer,
    writer: AnalysisWriter,
    monitor: SessionMonitor,
    metrics: Arc<MetricsCollector>,
}

impl RiskEngine {
    /// Assemble an engine from already-loaded parts
    pub(crate) fn new(
        config: EngineConfig,
        risk_config: RiskEngineConfig,
        store: Arc<dyn RiskStore>,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        let gatherer = DataGatherer::new(store.clone())
            .with_limits(config.session_limit, config.activity_limit);
        let writer = AnalysisWriter::new(store.clone()).with_persist_results(config.persist_results);
        let monitor = SessionMonitor::new(config.session_flag_threshold);

        Self {
            config,
            risk_config: RwLock::new(Arc::new(risk_config)),
            store,
            gatherer,
            writer,
            monitor,
            metrics,
        }
    }

    /// Start a builder
    pub fn builder() -> crate::builder::RiskEngineBuilder {
        crate::builder::RiskEngineBuilder::new()
    }

    /// Run the full pipeline for one user.
    ///
    /// Storage read failures propagate. A failed result write is logged and
    /// counted; the computed result is still returned.
    pub async fn analyze_user(
        &self,
        user_id: &str,
        context: Option<AnalysisContext>,
    ) -> Result<FraudAnalysisResult> {
        let start = Instant::now();
        let risk_config = self.snapshot();
        let context = context.unwrap_or_default();

        tracing::debug!("Analyzing user {}", user_id);
        let data = self.gatherer.gather(user_id).await?;

        let profile = analyze_profile(data.profile.as_ref(), &risk_config);
        let application = analyze_applications(&data.applications);
        let behavior = analyze_behavior_patterns(
            &BehaviorInput::new(&data.activities, &context),
            &risk_config,
        );
        let network = analyze_network_patterns(&data.network);

        let record = AnalysisRecord::new(user_id, compute_result(profile, application, behavior, network));

        tracing::info!(
            "Analysis {} for user {}: score={} level={} recommendation={} indicators={}",
            record.analysis_id,
            user_id,
            record.result.risk_score,
            record.result.risk_level.as_str(),
            record.result.recommendation.as_str(),
            record.result.fraud_indicators.len()
        );

        if let PersistOutcome::Failed(_) = self.writer.write_analysis(&record).await {
            if self.config.enable_metrics {
                self.metrics.record_persist_failure();
            }
        }

        if self.config.enable_metrics {
            self.metrics
                .record_analysis(record.result.recommendation, start.elapsed());
        }

        Ok(record.result)
    }

    /// Check a live session snapshot.
    ///
    /// Returns `true` when the session may continue. When too many heuristics
    /// trigger, a `suspicious_session` flag is written and `false` returned.
    pub async fn monitor_user_session(&self, user_id: &str, snapshot: &SessionSnapshot) -> bool {
        let risk_config = self.snapshot();
        let indicators = self.monitor.indicators(snapshot, &risk_config);
        let flagged = self.monitor.should_flag(indicators.len());

        if self.config.enable_metrics {
            self.metrics.record_session(flagged);
        }

        if !flagged {
            tracing::debug!(
                "Session for user {} passed ({} indicators)",
                user_id,
                indicators.len()
            );
            return true;
        }

        tracing::warn!(
            "Suspicious session for user {}: {}",
            user_id,
            indicators.join(", ")
        );

        let flag = SecurityFlag::active(
            user_id,
            FlagType::SuspiciousSession,
            serde_json::json!(indicators),
        );
        if let PersistOutcome::Failed(_) = self.writer.write_flag(&flag).await {
            if self.config.enable_metrics {
                self.metrics.record_persist_failure();
            }
        }

        false
    }

    /// Re-read the blacklist from the store and swap it in.
    ///
    /// Analyses already running keep the snapshot they started with. A failed
    /// fetch installs an empty blacklist, matching startup behavior.
    pub async fn reload_blacklist(&self) {
        let blacklist = BlacklistLoader::new(self.store.clone()).load().await;
        let (emails, ips) = (blacklist.email_count(), blacklist.ip_count());

        let next = Arc::new(self.snapshot().with_blacklist(blacklist));
        *self
            .risk_config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = next;

        tracing::info!("Blacklist reloaded: {} emails, {} IPs", emails, ips);
    }

    /// Current rule table and blacklist snapshot
    pub fn snapshot(&self) -> Arc<RiskEngineConfig> {
        self.risk_config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Get metrics collector
    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    /// Get engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
