//! Data gathering for a single user analysis
//!
//! Independent reads are issued concurrently. Missing rows degrade to empty
//! defaults; a failing store call aborts the gather and surfaces unchanged.

use crate::error::StorageError;
use crate::storage::RiskStore;
use chrono::Duration;
use hireguard_core::{ActivityRecord, Application, NetworkSignals, Profile, SessionRecord};
use std::sync::Arc;

/// Default number of sessions pulled per analysis
pub const DEFAULT_SESSION_LIMIT: usize = 100;

/// Default number of activities pulled per analysis
pub const DEFAULT_ACTIVITY_LIMIT: usize = 1000;

/// Half-width of the co-registration window around the user's creation time
const REGISTRATION_WINDOW_HOURS: i64 = 24;

/// Raw records for one user
#[derive(Debug, Clone, Default)]
pub struct GatheredData {
    pub profile: Option<Profile>,
    pub applications: Vec<Application>,
    /// Newest first
    pub sessions: Vec<SessionRecord>,
    /// Newest first
    pub activities: Vec<ActivityRecord>,
    pub network: NetworkSignals,
}

/// Pulls everything the analyzers need from a [`RiskStore`]
pub struct DataGatherer {
    store: Arc<dyn RiskStore>,
    session_limit: usize,
    activity_limit: usize,
}

impl DataGatherer {
    pub fn new(store: Arc<dyn RiskStore>) -> Self {
        Self {
            store,
            session_limit: DEFAULT_SESSION_LIMIT,
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }

    pub fn with_limits(mut self, session_limit: usize, activity_limit: usize) -> Self {
        self.session_limit = session_limit;
        self.activity_limit = activity_limit;
        self
    }

    pub fn store(&self) -> &Arc<dyn RiskStore> {
        &self.store
    }

    /// Gather profile, history and network signals for `user_id`
    pub async fn gather(&self, user_id: &str) -> Result<GatheredData, StorageError> {
        let store = self.store.as_ref();

        let (profile, applications, sessions, activities, shared_devices) = tokio::try_join!(
            store.get_profile(user_id),
            store.applications_for_candidate(user_id),
            store.recent_sessions(user_id, self.session_limit),
            store.recent_activities(user_id, self.activity_limit),
            store.count_shared_devices(user_id),
        )?;

        let (duplicate_profiles, suspicious_connections) = match &profile {
            Some(profile) => {
                let window = Duration::hours(REGISTRATION_WINDOW_HOURS);
                let domain_count = async {
                    match profile.email_domain() {
                        Some(domain) => {
                            store
                                .count_profiles_with_email_domain(&domain, user_id)
                                .await
                        }
                        None => Ok(0),
                    }
                };
                let registration_count = store.count_registrations_between(
                    profile.created_at - window,
                    profile.created_at + window,
                    user_id,
                );
                tokio::try_join!(domain_count, registration_count)?
            }
            None => (0, 0),
        };

        tracing::debug!(
            user_id,
            profile_found = profile.is_some(),
            applications = applications.len(),
            sessions = sessions.len(),
            activities = activities.len(),
            duplicate_profiles,
            suspicious_connections,
            shared_devices,
            "Gathered user data"
        );

        Ok(GatheredData {
            profile,
            applications,
            sessions,
            activities,
            network: NetworkSignals {
                duplicate_profiles,
                shared_devices,
                suspicious_connections,
            },
        })
    }
}
