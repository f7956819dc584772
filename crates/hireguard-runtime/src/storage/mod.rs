//! Storage collaborator boundary
//!
//! The engine only reads typed rows and appends records through [`RiskStore`].
//! Empty results are `Ok`; only genuine store failures are `Err`.

mod memory;
#[cfg(feature = "sqlx")]
pub mod postgres;

pub use memory::InMemoryStore;
#[cfg(feature = "sqlx")]
pub use postgres::PostgresStore;

use crate::error::StorageError;
use crate::result::AnalysisRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hireguard_core::{
    ActivityRecord, Application, BlacklistEntry, Profile, SecurityFlag, SessionRecord,
};

/// Result type for storage calls
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Async record store consumed by the engine
#[async_trait]
pub trait RiskStore: Send + Sync {
    /// Fetch a profile row by user id
    async fn get_profile(&self, user_id: &str) -> StorageResult<Option<Profile>>;

    /// All applications submitted by a candidate, in query order
    async fn applications_for_candidate(&self, candidate_id: &str)
        -> StorageResult<Vec<Application>>;

    /// Most recent sessions, newest first
    async fn recent_sessions(&self, user_id: &str, limit: usize)
        -> StorageResult<Vec<SessionRecord>>;

    /// Most recent activities, newest first
    async fn recent_activities(
        &self,
        user_id: &str,
        limit: usize,
    ) -> StorageResult<Vec<ActivityRecord>>;

    /// Number of other profiles whose email shares `domain`
    async fn count_profiles_with_email_domain(
        &self,
        domain: &str,
        exclude_user: &str,
    ) -> StorageResult<u32>;

    /// Number of other profiles created within `[start, end]`
    async fn count_registrations_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_user: &str,
    ) -> StorageResult<u32>;

    /// Number of other users with a session on one of this user's devices
    async fn count_shared_devices(&self, user_id: &str) -> StorageResult<u32>;

    /// Blacklist rows flagged active
    async fn active_blacklist(&self) -> StorageResult<Vec<BlacklistEntry>>;

    /// Append an analysis record (audit log, never updated)
    async fn insert_analysis(&self, record: &AnalysisRecord) -> StorageResult<()>;

    /// Append a security flag
    async fn insert_security_flag(&self, flag: &SecurityFlag) -> StorageResult<()>;
}
