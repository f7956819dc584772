//! PostgreSQL store
//!
//! Expected tables:
//! - `profiles` (user_id, first_name, last_name, email, bio, email_verified,
//!   phone_verified, linkedin_url, github_url, created_at)
//! - `job_applications` (id, candidate_id, cover_letter, applied_at)
//! - `user_sessions` (id, user_id, device_id, ip_address, user_agent, created_at)
//! - `user_activities` (id, user_id, action, created_at)
//! - `security_blacklist` (type, value, is_active)
//! - `fraud_analyses` (id, user_id, risk_score, risk_level, recommendation,
//!   confidence, analysis_data, created_at); `analysis_data` holds the full
//!   serialized result
//! - `security_flags` (user_id, flag_type, evidence, status, created_at)

use super::{RiskStore, StorageResult};
use crate::error::StorageError;
use crate::result::AnalysisRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hireguard_core::{
    ActivityRecord, Application, BlacklistEntry, BlacklistKind, FlagStatus, FlagType,
    FraudAnalysisResult, Profile, SecurityFlag, SessionRecord,
};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

/// PostgreSQL-backed [`RiskStore`]
pub struct PostgresStore {
    pool: Arc<PgPool>,
}

impl PostgresStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Connect a new pool from a database URL
    pub async fn connect(database_url: &str) -> StorageResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        tracing::info!("Connected PostgreSQL risk store");
        Ok(Self::new(Arc::new(pool)))
    }

    fn profile_from_row(row: &PgRow) -> StorageResult<Profile> {
        Ok(Profile {
            user_id: row.try_get("user_id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            bio: row.try_get("bio")?,
            email_verified: row.try_get::<Option<bool>, _>("email_verified")?.unwrap_or(false),
            phone_verified: row.try_get::<Option<bool>, _>("phone_verified")?.unwrap_or(false),
            linkedin_url: row.try_get("linkedin_url")?,
            github_url: row.try_get("github_url")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn count_from_row(row: &PgRow) -> StorageResult<u32> {
        let count: i64 = row.try_get(0)?;
        u32::try_from(count).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

fn parse_blacklist_kind(raw: &str) -> Option<BlacklistKind> {
    match raw {
        "email" => Some(BlacklistKind::Email),
        "ip" => Some(BlacklistKind::Ip),
        _ => None,
    }
}

/// Build an entry from raw column values; `None` when the row is unusable
fn blacklist_entry(
    raw_type: Option<&str>,
    value: Option<String>,
    is_active: Option<bool>,
) -> Option<BlacklistEntry> {
    let entry_type = parse_blacklist_kind(raw_type?)?;
    let value = value.filter(|v| !v.trim().is_empty())?;
    Some(BlacklistEntry {
        entry_type,
        value,
        is_active: is_active.unwrap_or(true),
    })
}

/// JSON stored in `fraud_analyses.analysis_data`: the whole result,
/// indicators and their evidence included
fn analysis_payload(result: &FraudAnalysisResult) -> StorageResult<serde_json::Value> {
    serde_json::to_value(result).map_err(|e| StorageError::Serialization(e.to_string()))
}

fn flag_type_name(flag_type: FlagType) -> &'static str {
    match flag_type {
        FlagType::SuspiciousSession => "suspicious_session",
    }
}

fn flag_status_name(status: FlagStatus) -> &'static str {
    match status {
        FlagStatus::Active => "active",
        FlagStatus::Resolved => "resolved",
    }
}

#[async_trait]
impl RiskStore for PostgresStore {
    async fn get_profile(&self, user_id: &str) -> StorageResult<Option<Profile>> {
        let row = sqlx::query(
            "SELECT user_id, first_name, last_name, email, bio, email_verified, phone_verified,
                    linkedin_url, github_url, created_at
             FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&*self.pool)
        .await?;

        row.as_ref().map(Self::profile_from_row).transpose()
    }

    async fn applications_for_candidate(
        &self,
        candidate_id: &str,
    ) -> StorageResult<Vec<Application>> {
        let rows = sqlx::query(
            "SELECT id, candidate_id, cover_letter, applied_at
             FROM job_applications WHERE candidate_id = $1",
        )
        .bind(candidate_id)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter()
            .map(|row| -> StorageResult<Application> {
                Ok(Application {
                    id: row.try_get("id")?,
                    candidate_id: row.try_get("candidate_id")?,
                    cover_letter: row.try_get("cover_letter")?,
                    applied_at: row.try_get("applied_at")?,
                })
            })
            .collect()
    }

    async fn recent_sessions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> StorageResult<Vec<SessionRecord>> {
        let rows = sqlx::query(
            "SELECT id, user_id, device_id, ip_address, user_agent, created_at
             FROM user_sessions WHERE user_id = $1
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter()
            .map(|row| -> StorageResult<SessionRecord> {
                Ok(SessionRecord {
                    id: row.try_get("id")?,
                    user_id: row.try_get("user_id")?,
                    device_id: row.try_get("device_id")?,
                    ip_address: row.try_get("ip_address")?,
                    user_agent: row.try_get("user_agent")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }

    async fn recent_activities(
        &self,
        user_id: &str,
        limit: usize,
    ) -> StorageResult<Vec<ActivityRecord>> {
        let rows = sqlx::query(
            "SELECT id, user_id, action, created_at
             FROM user_activities WHERE user_id = $1
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter()
            .map(|row| -> StorageResult<ActivityRecord> {
                Ok(ActivityRecord {
                    id: row.try_get("id")?,
                    user_id: row.try_get("user_id")?,
                    action: row.try_get("action")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }

    async fn count_profiles_with_email_domain(
        &self,
        domain: &str,
        exclude_user: &str,
    ) -> StorageResult<u32> {
        let row = sqlx::query(
            "SELECT COUNT(*) FROM profiles
             WHERE lower(split_part(email, '@', 2)) = lower($1) AND user_id <> $2",
        )
        .bind(domain)
        .bind(exclude_user)
        .fetch_one(&*self.pool)
        .await?;

        Self::count_from_row(&row)
    }

    async fn count_registrations_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_user: &str,
    ) -> StorageResult<u32> {
        let row = sqlx::query(
            "SELECT COUNT(*) FROM profiles
             WHERE created_at BETWEEN $1 AND $2 AND user_id <> $3",
        )
        .bind(start)
        .bind(end)
        .bind(exclude_user)
        .fetch_one(&*self.pool)
        .await?;

        Self::count_from_row(&row)
    }

    async fn count_shared_devices(&self, user_id: &str) -> StorageResult<u32> {
        let row = sqlx::query(
            "SELECT COUNT(DISTINCT other.user_id) FROM user_sessions other
             WHERE other.user_id <> $1
               AND other.device_id IN (
                   SELECT device_id FROM user_sessions
                   WHERE user_id = $1 AND device_id IS NOT NULL
               )",
        )
        .bind(user_id)
        .fetch_one(&*self.pool)
        .await?;

        Self::count_from_row(&row)
    }

    async fn active_blacklist(&self) -> StorageResult<Vec<BlacklistEntry>> {
        let rows = sqlx::query(
            "SELECT type, value, is_active FROM security_blacklist WHERE is_active = true",
        )
        .fetch_all(&*self.pool)
        .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let fields = (
                row.try_get::<Option<String>, _>("type"),
                row.try_get::<Option<String>, _>("value"),
                row.try_get::<Option<bool>, _>("is_active"),
            );
            let (raw_type, value, is_active) = match fields {
                (Ok(raw_type), Ok(value), Ok(is_active)) => (raw_type, value, is_active),
                (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                    tracing::warn!("Skipping unreadable blacklist row: {}", e);
                    continue;
                }
            };

            match blacklist_entry(raw_type.as_deref(), value.clone(), is_active) {
                Some(entry) => entries.push(entry),
                None => tracing::warn!(
                    "Skipping malformed blacklist row: type={:?} value={:?}",
                    raw_type,
                    value
                ),
            }
        }

        Ok(entries)
    }

    async fn insert_analysis(&self, record: &AnalysisRecord) -> StorageResult<()> {
        let analysis_data = analysis_payload(&record.result)?;

        sqlx::query(
            "INSERT INTO fraud_analyses
                (id, user_id, risk_score, risk_level, recommendation, confidence, analysis_data, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(record.analysis_id)
        .bind(&record.user_id)
        .bind(i16::from(record.result.risk_score))
        .bind(record.result.risk_level.as_str())
        .bind(record.result.recommendation.as_str())
        .bind(record.result.confidence)
        .bind(analysis_data)
        .bind(record.created_at)
        .execute(&*self.pool)
        .await?;

        Ok(())
    }

    async fn insert_security_flag(&self, flag: &SecurityFlag) -> StorageResult<()> {
        sqlx::query(
            "INSERT INTO security_flags (user_id, flag_type, evidence, status, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&flag.user_id)
        .bind(flag_type_name(flag.flag_type))
        .bind(&flag.evidence)
        .bind(flag_status_name(flag.status))
        .bind(flag.created_at)
        .execute(&*self.pool)
        .await?;

        Ok(())
    }
}
