//! Analysis result persistence
//!
//! Computing a result and storing it are separate steps with separate
//! failure domains. Writes go to an append-only audit log; a failed write
//! is logged and reported as [`PersistOutcome::Failed`] but never turns a
//! computed decision into an error.

use crate::error::StorageError;
use crate::storage::RiskStore;
use chrono::{DateTime, Utc};
use hireguard_core::{FraudAnalysisResult, SecurityFlag};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Audit-log row for one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Unique identifier of this analysis
    pub analysis_id: Uuid,

    /// Analyzed user
    pub user_id: String,

    /// When the analysis was computed
    pub created_at: DateTime<Utc>,

    /// Full result, stored as computed
    pub result: FraudAnalysisResult,
}

impl AnalysisRecord {
    /// Wrap a result into a new record stamped with the current time
    pub fn new(user_id: impl Into<String>, result: FraudAnalysisResult) -> Self {
        Self {
            analysis_id: Uuid::new_v4(),
            user_id: user_id.into(),
            created_at: Utc::now(),
            result,
        }
    }
}

/// Outcome of a best-effort write
#[derive(Debug, Clone, PartialEq)]
pub enum PersistOutcome {
    /// Row written
    Persisted,

    /// Persistence disabled by configuration
    Skipped,

    /// Store rejected the write; the caller keeps its result
    Failed(StorageError),
}

impl PersistOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, PersistOutcome::Persisted)
    }
}

/// Writes analysis records and security flags to the store
#[derive(Clone)]
pub struct AnalysisWriter {
    store: Arc<dyn RiskStore>,
    persist_results: bool,
}

impl AnalysisWriter {
    /// Create a writer that persists analysis results
    pub fn new(store: Arc<dyn RiskStore>) -> Self {
        Self {
            store,
            persist_results: true,
        }
    }

    /// Enable or disable persisting analysis results (flags are always written)
    pub fn with_persist_results(mut self, enabled: bool) -> Self {
        self.persist_results = enabled;
        self
    }

    /// Append an analysis record
    pub async fn write_analysis(&self, record: &AnalysisRecord) -> PersistOutcome {
        if !self.persist_results {
            tracing::debug!(
                "Result persistence disabled, skipping analysis {} for user {}",
                record.analysis_id,
                record.user_id
            );
            return PersistOutcome::Skipped;
        }

        match self.store.insert_analysis(record).await {
            Ok(()) => {
                tracing::debug!(
                    "Persisted analysis {} for user {}",
                    record.analysis_id,
                    record.user_id
                );
                PersistOutcome::Persisted
            }
            Err(e) => {
                tracing::error!(
                    "Failed to persist analysis {} for user {}: {}",
                    record.analysis_id,
                    record.user_id,
                    e
                );
                PersistOutcome::Failed(e)
            }
        }
    }

    /// Append a security flag
    pub async fn write_flag(&self, flag: &SecurityFlag) -> PersistOutcome {
        match self.store.insert_security_flag(flag).await {
            Ok(()) => {
                tracing::info!(
                    "Raised {:?} flag for user {}",
                    flag.flag_type,
                    flag.user_id
                );
                PersistOutcome::Persisted
            }
            Err(e) => {
                tracing::error!(
                    "Failed to persist {:?} flag for user {}: {}",
                    flag.flag_type,
                    flag.user_id,
                    e
                );
                PersistOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::compute_result;
    use crate::storage::InMemoryStore;
    use hireguard_core::{
        ApplicationPattern, ApplicationRiskAnalysis, BehaviorRiskAnalysis, FlagType,
        NetworkRiskAnalysis, ProfileRiskAnalysis, VerificationStatus,
    };

    fn sample_result() -> FraudAnalysisResult {
        compute_result(
            ProfileRiskAnalysis {
                profile_completeness: 100.0,
                inconsistencies: vec![],
                suspicious_patterns: vec![],
                verification_status: VerificationStatus::default(),
            },
            ApplicationRiskAnalysis {
                application_volume: 0,
                application_pattern: ApplicationPattern::None,
                response_quality: 0.0,
                time_patterns: vec![],
            },
            BehaviorRiskAnalysis::default(),
            NetworkRiskAnalysis::default(),
        )
    }

    #[tokio::test]
    async fn test_write_analysis_appends() {
        let store = Arc::new(InMemoryStore::new());
        let writer = AnalysisWriter::new(store.clone());

        let first = AnalysisRecord::new("u1", sample_result());
        let second = AnalysisRecord::new("u1", sample_result());
        assert!(writer.write_analysis(&first).await.is_persisted());
        assert!(writer.write_analysis(&second).await.is_persisted());

        let stored = store.analyses().await;
        assert_eq!(stored.len(), 2);
        assert_ne!(stored[0].analysis_id, stored[1].analysis_id);
    }

    #[tokio::test]
    async fn test_write_failure_is_reported_not_raised() {
        let store = Arc::new(InMemoryStore::new());
        store.set_fail_writes(true);
        let writer = AnalysisWriter::new(store.clone());

        let outcome = writer
            .write_analysis(&AnalysisRecord::new("u1", sample_result()))
            .await;
        assert!(matches!(outcome, PersistOutcome::Failed(StorageError::Unavailable(_))));
        assert!(store.analyses().await.is_empty());
    }

    #[tokio::test]
    async fn test_disabled_persistence_skips() {
        let store = Arc::new(InMemoryStore::new());
        let writer = AnalysisWriter::new(store.clone()).with_persist_results(false);

        let outcome = writer
            .write_analysis(&AnalysisRecord::new("u1", sample_result()))
            .await;
        assert_eq!(outcome, PersistOutcome::Skipped);
        assert!(store.analyses().await.is_empty());

        let flag = SecurityFlag::active("u1", FlagType::SuspiciousSession, serde_json::json!([]));
        assert!(writer.write_flag(&flag).await.is_persisted());
        assert_eq!(store.security_flags().await.len(), 1);
    }
}
