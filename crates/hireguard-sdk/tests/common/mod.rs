//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use hireguard_core::{
    ActivityRecord, Application, BlacklistEntry, LocationData, MouseMovement, Profile,
    SessionRecord, SessionSnapshot,
};
use hireguard_runtime::InMemoryStore;
use hireguard_sdk::{RiskEngine, RiskEngineBuilder};
use std::sync::Arc;

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

/// Profile with every scored field filled in
pub fn complete_profile(user_id: &str, email: &str) -> Profile {
    let mut profile = Profile::new(user_id, base_time());
    profile.first_name = Some("Ada".to_string());
    profile.last_name = Some("Lovelace".to_string());
    profile.email = Some(email.to_string());
    profile.bio = Some("Backend engineer with ten years of Rust and Go.".to_string());
    profile.email_verified = true;
    profile
}

/// Bare profile created `hours` after the base time
pub fn profile_at(user_id: &str, email: &str, hours: i64) -> Profile {
    let mut profile = Profile::new(user_id, base_time() + Duration::hours(hours));
    profile.email = Some(email.to_string());
    profile
}

/// `count` applications spaced one hour apart
pub fn applications(candidate_id: &str, count: usize) -> Vec<Application> {
    (0..count)
        .map(|i| Application {
            id: format!("{}-app-{}", candidate_id, i),
            candidate_id: candidate_id.to_string(),
            cover_letter: None,
            applied_at: base_time() + Duration::hours(i as i64),
        })
        .collect()
}

pub fn session_on_device(id: &str, user_id: &str, device_id: &str) -> SessionRecord {
    SessionRecord {
        id: id.to_string(),
        user_id: user_id.to_string(),
        device_id: Some(device_id.to_string()),
        ip_address: None,
        user_agent: None,
        created_at: base_time(),
    }
}

pub fn activity(id: &str, user_id: &str, action: &str, minutes: i64) -> ActivityRecord {
    ActivityRecord {
        id: id.to_string(),
        user_id: user_id.to_string(),
        action: action.to_string(),
        created_at: base_time() + Duration::minutes(minutes),
    }
}

pub fn vpn_location() -> LocationData {
    LocationData {
        country: Some("DE".to_string()),
        vpn_detected: true,
        ..Default::default()
    }
}

/// Snapshot of an ordinary human session
pub fn human_session() -> SessionSnapshot {
    SessionSnapshot {
        actions_per_minute: 8.0,
        mouse_movements: Some(vec![
            MouseMovement { x: 1, y: 2, timestamp_ms: 10 },
            MouseMovement { x: 40, y: 22, timestamp_ms: 160 },
        ]),
        ip_address: None,
        device_fingerprint: None,
    }
}

/// Test helper that seeds an in-memory store and builds an engine over it
pub struct TestEngine {
    store: InMemoryStore,
    builder: RiskEngineBuilder,
}

impl TestEngine {
    pub fn new() -> Self {
        Self {
            store: InMemoryStore::new(),
            builder: RiskEngineBuilder::new(),
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.store.add_profile(profile);
        self
    }

    pub fn with_applications(mut self, applications: Vec<Application>) -> Self {
        self.store.add_applications(applications);
        self
    }

    pub fn with_session(mut self, session: SessionRecord) -> Self {
        self.store.add_session(session);
        self
    }

    pub fn with_activities(mut self, activities: Vec<ActivityRecord>) -> Self {
        self.store.add_activities(activities);
        self
    }

    pub fn with_blacklist_entry(mut self, entry: BlacklistEntry) -> Self {
        self.store.add_blacklist_entry(entry);
        self
    }

    /// Make the blacklist fetch fail during build
    pub fn with_failing_blacklist(self) -> Self {
        self.store.set_fail_blacklist(true);
        self
    }

    pub fn configure(mut self, f: impl FnOnce(RiskEngineBuilder) -> RiskEngineBuilder) -> Self {
        self.builder = f(self.builder);
        self
    }

    /// Build the engine, returning the shared store for inspection
    pub async fn build(self) -> (RiskEngine, Arc<InMemoryStore>) {
        let store = Arc::new(self.store);
        let engine = self
            .builder
            .with_store(store.clone())
            .build()
            .await
            .expect("engine should build");
        (engine, store)
    }
}
