//! Per-stage analysis outputs

use super::records::DeviceFingerprint;
use serde::{Deserialize, Serialize};

/// Verification flags copied from the profile row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationStatus {
    pub email: bool,
    pub phone: bool,
    pub linkedin: bool,
    pub github: bool,
}

/// Profile completeness and consistency analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRiskAnalysis {
    /// 0-100
    pub profile_completeness: f64,
    pub inconsistencies: Vec<String>,
    pub suspicious_patterns: Vec<String>,
    pub verification_status: VerificationStatus,
}

/// Application volume classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationPattern {
    None,
    Normal,
    Active,
    HighVolume,
    MassApplication,
}

/// Application volume and timing analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRiskAnalysis {
    pub application_volume: u32,
    pub application_pattern: ApplicationPattern,
    /// 0-100
    pub response_quality: f64,
    pub time_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    /// Seconds between the oldest and newest activity
    pub duration: i64,
    pub page_views: u32,
    /// Holds both click-volume and device-fingerprint findings
    pub click_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAnalysis {
    pub ip_address: Option<String>,
    pub country: Option<String>,
    pub vpn_detected: bool,
    pub proxy_detected: bool,
    pub ip_blacklisted: bool,
}

/// Session, device and location analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorRiskAnalysis {
    pub session_data: SessionData,
    pub device_fingerprint: DeviceFingerprint,
    pub location_analysis: LocationAnalysis,
}

/// Raw neighbor counts fed to the network analyzer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSignals {
    pub duplicate_profiles: u32,
    pub shared_devices: u32,
    pub suspicious_connections: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotDetection {
    /// 0-1
    pub probability: f64,
    pub indicators: Vec<String>,
}

/// Duplicate-account and co-registration analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRiskAnalysis {
    pub duplicate_profiles: u32,
    pub shared_devices: u32,
    pub suspicious_connections: u32,
    pub bot_detection: BotDetection,
}
