//! In-memory store
//!
//! Backs tests and the demo. Failure switches let callers simulate an
//! unreachable store for reads, writes or the blacklist fetch independently.

use super::{RiskStore, StorageResult};
use crate::error::StorageError;
use crate::result::AnalysisRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hireguard_core::{
    ActivityRecord, Application, BlacklistEntry, Profile, SecurityFlag, SessionRecord,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    profiles: Vec<Profile>,
    applications: Vec<Application>,
    sessions: Vec<SessionRecord>,
    activities: Vec<ActivityRecord>,
    blacklist: Vec<BlacklistEntry>,
    analyses: Vec<AnalysisRecord>,
    flags: Vec<SecurityFlag>,
}

/// In-memory [`RiskStore`] implementation
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_blacklist: AtomicBool,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_profile(&mut self, profile: Profile) {
        self.tables.get_mut().profiles.push(profile);
    }

    pub fn add_application(&mut self, application: Application) {
        self.tables.get_mut().applications.push(application);
    }

    pub fn add_applications(&mut self, applications: Vec<Application>) {
        self.tables.get_mut().applications.extend(applications);
    }

    pub fn add_session(&mut self, session: SessionRecord) {
        self.tables.get_mut().sessions.push(session);
    }

    pub fn add_activity(&mut self, activity: ActivityRecord) {
        self.tables.get_mut().activities.push(activity);
    }

    pub fn add_activities(&mut self, activities: Vec<ActivityRecord>) {
        self.tables.get_mut().activities.extend(activities);
    }

    pub fn add_blacklist_entry(&mut self, entry: BlacklistEntry) {
        self.tables.get_mut().blacklist.push(entry);
    }

    /// Add a blacklist row after the store has been shared
    pub async fn insert_blacklist_entry(&self, entry: BlacklistEntry) {
        self.tables.write().await.blacklist.push(entry);
    }

    /// Make every read fail with `StorageError::Unavailable`
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every insert fail with `StorageError::Unavailable`
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make only the blacklist fetch fail
    pub fn set_fail_blacklist(&self, fail: bool) {
        self.fail_blacklist.store(fail, Ordering::SeqCst);
    }

    /// Persisted analysis records, in insertion order
    pub async fn analyses(&self) -> Vec<AnalysisRecord> {
        self.tables.read().await.analyses.clone()
    }

    /// Persisted security flags, in insertion order
    pub async fn security_flags(&self) -> Vec<SecurityFlag> {
        self.tables.read().await.flags.clone()
    }

    fn check_read(&self) -> StorageResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("read failure injected".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("write failure injected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RiskStore for InMemoryStore {
    async fn get_profile(&self, user_id: &str) -> StorageResult<Option<Profile>> {
        self.check_read()?;
        let tables = self.tables.read().await;
        Ok(tables.profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn applications_for_candidate(
        &self,
        candidate_id: &str,
    ) -> StorageResult<Vec<Application>> {
        self.check_read()?;
        let tables = self.tables.read().await;
        Ok(tables
            .applications
            .iter()
            .filter(|a| a.candidate_id == candidate_id)
            .cloned()
            .collect())
    }

    async fn recent_sessions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> StorageResult<Vec<SessionRecord>> {
        self.check_read()?;
        let tables = self.tables.read().await;
        let mut sessions: Vec<SessionRecord> = tables
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sessions.truncate(limit);
        Ok(sessions)
    }

    async fn recent_activities(
        &self,
        user_id: &str,
        limit: usize,
    ) -> StorageResult<Vec<ActivityRecord>> {
        self.check_read()?;
        let tables = self.tables.read().await;
        let mut activities: Vec<ActivityRecord> = tables
            .activities
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        activities.truncate(limit);
        Ok(activities)
    }

    async fn count_profiles_with_email_domain(
        &self,
        domain: &str,
        exclude_user: &str,
    ) -> StorageResult<u32> {
        self.check_read()?;
        let domain = domain.to_lowercase();
        let tables = self.tables.read().await;
        let count = tables
            .profiles
            .iter()
            .filter(|p| p.user_id != exclude_user)
            .filter(|p| p.email_domain().as_deref() == Some(domain.as_str()))
            .count();
        Ok(count as u32)
    }

    async fn count_registrations_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_user: &str,
    ) -> StorageResult<u32> {
        self.check_read()?;
        let tables = self.tables.read().await;
        let count = tables
            .profiles
            .iter()
            .filter(|p| p.user_id != exclude_user)
            .filter(|p| p.created_at >= start && p.created_at <= end)
            .count();
        Ok(count as u32)
    }

    async fn count_shared_devices(&self, user_id: &str) -> StorageResult<u32> {
        self.check_read()?;
        let tables = self.tables.read().await;

        let devices: HashSet<&str> = tables
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .filter_map(|s| s.device_id.as_deref())
            .collect();

        let others: HashSet<&str> = tables
            .sessions
            .iter()
            .filter(|s| s.user_id != user_id)
            .filter(|s| s.device_id.as_deref().is_some_and(|d| devices.contains(d)))
            .map(|s| s.user_id.as_str())
            .collect();

        Ok(others.len() as u32)
    }

    async fn active_blacklist(&self) -> StorageResult<Vec<BlacklistEntry>> {
        self.check_read()?;
        if self.fail_blacklist.load(Ordering::SeqCst) {
            return Err(StorageError::Query("blacklist failure injected".to_string()));
        }
        let tables = self.tables.read().await;
        Ok(tables
            .blacklist
            .iter()
            .filter(|e| e.is_active)
            .cloned()
            .collect())
    }

    async fn insert_analysis(&self, record: &AnalysisRecord) -> StorageResult<()> {
        self.check_write()?;
        self.tables.write().await.analyses.push(record.clone());
        Ok(())
    }

    async fn insert_security_flag(&self, flag: &SecurityFlag) -> StorageResult<()> {
        self.check_write()?;
        self.tables.write().await.flags.push(flag.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(id: &str, user: &str, device: Option<&str>, at: DateTime<Utc>) -> SessionRecord {
        SessionRecord {
            id: id.to_string(),
            user_id: user.to_string(),
            device_id: device.map(str::to_string),
            ip_address: None,
            user_agent: None,
            created_at: at,
        }
    }

    #[tokio::test]
    async fn test_missing_profile_is_none() {
        let store = InMemoryStore::new();
        assert!(store.get_profile("nobody").await.unwrap().is_none());
        assert!(store.applications_for_candidate("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recent_sessions_newest_first_and_limited() {
        let now = Utc::now();
        let mut store = InMemoryStore::new();
        store.add_session(session("s1", "u1", None, now - Duration::hours(2)));
        store.add_session(session("s2", "u1", None, now));
        store.add_session(session("s3", "u1", None, now - Duration::hours(1)));
        store.add_session(session("s4", "u2", None, now));

        let sessions = store.recent_sessions("u1", 2).await.unwrap();
        let ids: Vec<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "s3"]);
    }

    #[tokio::test]
    async fn test_email_domain_count_excludes_self() {
        let now = Utc::now();
        let mut store = InMemoryStore::new();
        for (i, email) in ["a@corp.io", "b@CORP.io", "c@corp.io", "d@other.io"].iter().enumerate() {
            let mut p = Profile::new(format!("u{}", i), now);
            p.email = Some(email.to_string());
            store.add_profile(p);
        }

        let count = store
            .count_profiles_with_email_domain("corp.io", "u0")
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_registration_window() {
        let now = Utc::now();
        let mut store = InMemoryStore::new();
        store.add_profile(Profile::new("u1", now));
        store.add_profile(Profile::new("u2", now - Duration::hours(23)));
        store.add_profile(Profile::new("u3", now + Duration::hours(25)));

        let count = store
            .count_registrations_between(now - Duration::hours(24), now + Duration::hours(24), "u1")
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_shared_devices() {
        let now = Utc::now();
        let mut store = InMemoryStore::new();
        store.add_session(session("s1", "u1", Some("dev-a"), now));
        store.add_session(session("s2", "u2", Some("dev-a"), now));
        store.add_session(session("s3", "u3", Some("dev-a"), now));
        store.add_session(session("s4", "u3", Some("dev-a"), now));
        store.add_session(session("s5", "u4", Some("dev-b"), now));

        assert_eq!(store.count_shared_devices("u1").await.unwrap(), 2);
        assert_eq!(store.count_shared_devices("u4").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = InMemoryStore::new();
        store.set_fail_reads(true);
        assert!(matches!(
            store.get_profile("u1").await,
            Err(StorageError::Unavailable(_))
        ));
        store.set_fail_reads(false);

        store.set_fail_blacklist(true);
        assert!(store.active_blacklist().await.is_err());
        assert!(store.get_profile("u1").await.is_ok());

        store.set_fail_writes(true);
        let flag = SecurityFlag::active(
            "u1",
            hireguard_core::FlagType::SuspiciousSession,
            serde_json::json!([]),
        );
        assert!(store.insert_security_flag(&flag).await.is_err());
        assert!(store.security_flags().await.is_empty());
    }
}
