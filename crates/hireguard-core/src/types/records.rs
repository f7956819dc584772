//! Raw records gathered about a user, and the caller-supplied request context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's profile row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub email_verified: bool,

    #[serde(default)]
    pub phone_verified: bool,

    /// Presence of the URL counts as linked; the URL itself is never validated
    #[serde(default)]
    pub linkedin_url: Option<String>,

    #[serde(default)]
    pub github_url: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Create a profile with only the identifying fields set
    pub fn new(user_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            first_name: None,
            last_name: None,
            email: None,
            bio: None,
            email_verified: false,
            phone_verified: false,
            linkedin_url: None,
            github_url: None,
            created_at,
        }
    }

    /// Domain part of the email address, lower-cased
    pub fn email_domain(&self) -> Option<String> {
        self.email
            .as_deref()
            .and_then(|email| email.rsplit_once('@'))
            .map(|(_, domain)| domain.trim().to_lowercase())
            .filter(|domain| !domain.is_empty())
    }
}

/// A job application submitted by a candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub candidate_id: String,

    #[serde(default)]
    pub cover_letter: Option<String>,

    pub applied_at: DateTime<Utc>,
}

/// A stored login session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub user_id: String,

    /// Stable device identifier derived from the client fingerprint
    #[serde(default)]
    pub device_id: Option<String>,

    #[serde(default)]
    pub ip_address: Option<String>,

    #[serde(default)]
    pub user_agent: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// A single tracked user action (page view, click, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    pub user_id: String,
    pub action: String,
    pub created_at: DateTime<Utc>,
}

/// Client device fingerprint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFingerprint {
    #[serde(default)]
    pub browser_info: String,

    #[serde(default)]
    pub screen_resolution: String,

    #[serde(default)]
    pub timezone: String,

    #[serde(default)]
    pub language: String,

    /// `navigator.webdriver` as reported by the client
    #[serde(default)]
    pub webdriver: bool,
}

/// Geo/VPN lookup output, produced by an external collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationData {
    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub vpn_detected: bool,

    #[serde(default)]
    pub proxy_detected: bool,

    #[serde(default)]
    pub tor_detected: bool,
}

/// Optional request context for a full analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisContext {
    #[serde(default)]
    pub ip_address: Option<String>,

    #[serde(default)]
    pub user_agent: Option<String>,

    #[serde(default)]
    pub device_fingerprint: Option<DeviceFingerprint>,

    #[serde(default)]
    pub location: LocationData,
}

impl AnalysisContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the client IP address
    pub fn with_ip_address(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the device fingerprint
    pub fn with_device_fingerprint(mut self, fingerprint: DeviceFingerprint) -> Self {
        self.device_fingerprint = Some(fingerprint);
        self
    }

    /// Set the geo lookup result
    pub fn with_location(mut self, location: LocationData) -> Self {
        self.location = location;
        self
    }
}

/// A single pointer movement sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseMovement {
    pub x: i32,
    pub y: i32,
    pub timestamp_ms: i64,
}

/// Live session snapshot evaluated by the session monitor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default)]
    pub actions_per_minute: f64,

    /// `None` when the client reported no pointer telemetry at all
    #[serde(default)]
    pub mouse_movements: Option<Vec<MouseMovement>>,

    #[serde(default)]
    pub ip_address: Option<String>,

    #[serde(default)]
    pub device_fingerprint: Option<DeviceFingerprint>,
}

/// Blacklist category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlacklistKind {
    Email,
    Ip,
}

/// A stored blacklist row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    #[serde(rename = "type")]
    pub entry_type: BlacklistKind,
    pub value: String,
    pub is_active: bool,
}

impl BlacklistEntry {
    pub fn email(value: impl Into<String>) -> Self {
        Self {
            entry_type: BlacklistKind::Email,
            value: value.into(),
            is_active: true,
        }
    }

    pub fn ip(value: impl Into<String>) -> Self {
        Self {
            entry_type: BlacklistKind::Ip,
            value: value.into(),
            is_active: true,
        }
    }

    /// Mark the entry inactive
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}
