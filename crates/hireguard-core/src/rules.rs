//! Risk rules
//!
//! The rule set is closed: every rule is a [`RiskRule`] variant and is
//! evaluated by [`RuleTable`], which owns the reference tables the rules
//! consult (disposable providers, high-risk countries, ...). Rules are pure,
//! return non-negative points, and never read each other's output.

use crate::error::{CoreError, Result};
use crate::types::{DeviceFingerprint, LocationData, Profile};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const DISPOSABLE_EMAIL_POINTS: u32 = 50;
const MISSING_FIELD_POINTS: u32 = 25;
const REGULAR_CADENCE_POINTS: u32 = 30;
/// ms²
const REGULAR_CADENCE_VARIANCE: f64 = 1000.0;

const HEADLESS_POINTS: u32 = 50;
const WEBDRIVER_POINTS: u32 = 40;
const UNCOMMON_RESOLUTION_POINTS: u32 = 10;
const DEVICE_POINTS_CAP: u32 = 60;

const VPN_POINTS: u32 = 25;
const PROXY_POINTS: u32 = 35;
const TOR_POINTS: u32 = 50;
const HIGH_RISK_COUNTRY_POINTS: u32 = 20;
const GEO_POINTS_CAP: u32 = 70;

/// Every rule known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskRule {
    DisposableEmail,
    IncompleteProfile,
    HighApplicationVolume,
    SuspiciousTiming,
    DeviceFingerprint,
    GeographicRisk,
}

impl RiskRule {
    pub const ALL: [RiskRule; 6] = [
        RiskRule::DisposableEmail,
        RiskRule::IncompleteProfile,
        RiskRule::HighApplicationVolume,
        RiskRule::SuspiciousTiming,
        RiskRule::DeviceFingerprint,
        RiskRule::GeographicRisk,
    ];

    /// Stable rule name
    pub fn name(&self) -> &'static str {
        match self {
            RiskRule::DisposableEmail => "disposable_email",
            RiskRule::IncompleteProfile => "incomplete_profile",
            RiskRule::HighApplicationVolume => "high_application_volume",
            RiskRule::SuspiciousTiming => "suspicious_timing",
            RiskRule::DeviceFingerprint => "device_fingerprint",
            RiskRule::GeographicRisk => "geographic_risk",
        }
    }

    fn expected_input(&self) -> &'static str {
        match self {
            RiskRule::DisposableEmail => "an email",
            RiskRule::IncompleteProfile => "a profile",
            RiskRule::HighApplicationVolume => "a count",
            RiskRule::SuspiciousTiming => "a timestamp list",
            RiskRule::DeviceFingerprint => "a device fingerprint",
            RiskRule::GeographicRisk => "location data",
        }
    }
}

/// Typed rule input
#[derive(Debug, Clone, Copy)]
pub enum RuleInput<'a> {
    Email(&'a str),
    Profile(&'a Profile),
    Count(u32),
    /// Event timestamps in milliseconds
    Timestamps(&'a [i64]),
    Fingerprint(&'a DeviceFingerprint),
    Location(&'a LocationData),
}

/// Reference tables consulted by the rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTableConfig {
    #[serde(default = "default_disposable_domains")]
    pub disposable_domains: Vec<String>,

    /// ISO 3166-1 alpha-2 codes
    #[serde(default = "default_high_risk_countries")]
    pub high_risk_countries: Vec<String>,

    #[serde(default = "default_common_resolutions")]
    pub common_resolutions: Vec<String>,

    /// Case-insensitive substrings identifying automated browsers
    #[serde(default = "default_headless_markers")]
    pub headless_markers: Vec<String>,
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_disposable_domains() -> Vec<String> {
    to_strings(&[
        "10minutemail.com",
        "tempmail.org",
        "guerrillamail.com",
        "mailinator.com",
        "yopmail.com",
        "throwaway.email",
        "temp-mail.org",
        "trashmail.com",
    ])
}

fn default_high_risk_countries() -> Vec<String> {
    to_strings(&["KP", "IR", "SY", "CU", "RU"])
}

fn default_common_resolutions() -> Vec<String> {
    to_strings(&[
        "1920x1080",
        "1366x768",
        "1536x864",
        "1440x900",
        "1280x720",
        "1280x800",
        "1600x900",
        "2560x1440",
        "390x844",
        "414x896",
    ])
}

fn default_headless_markers() -> Vec<String> {
    to_strings(&["headless", "phantomjs", "selenium", "puppeteer", "playwright"])
}

impl Default for RuleTableConfig {
    fn default() -> Self {
        Self {
            disposable_domains: default_disposable_domains(),
            high_risk_countries: default_high_risk_countries(),
            common_resolutions: default_common_resolutions(),
            headless_markers: default_headless_markers(),
        }
    }
}

impl RuleTableConfig {
    /// Parse a YAML document; missing keys fall back to the built-in tables
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

fn lowercase_set(items: &[String]) -> HashSet<String> {
    items.iter().map(|s| s.trim().to_lowercase()).collect()
}

/// Immutable rule table, built once at engine construction
#[derive(Debug, Clone)]
pub struct RuleTable {
    disposable_domains: HashSet<String>,
    high_risk_countries: HashSet<String>,
    common_resolutions: HashSet<String>,
    headless_markers: Vec<String>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new(&RuleTableConfig::default())
    }
}

impl RuleTable {
    pub fn new(config: &RuleTableConfig) -> Self {
        Self {
            disposable_domains: lowercase_set(&config.disposable_domains),
            high_risk_countries: config
                .high_risk_countries
                .iter()
                .map(|c| c.trim().to_uppercase())
                .collect(),
            common_resolutions: lowercase_set(&config.common_resolutions),
            headless_markers: config
                .headless_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
        }
    }

    /// Evaluate a rule against a typed input
    pub fn evaluate(&self, rule: RiskRule, input: RuleInput<'_>) -> Result<u32> {
        let points = match (rule, input) {
            (RiskRule::DisposableEmail, RuleInput::Email(email)) => self.disposable_email(email),
            (RiskRule::IncompleteProfile, RuleInput::Profile(profile)) => {
                self.incomplete_profile(profile)
            }
            (RiskRule::HighApplicationVolume, RuleInput::Count(count)) => {
                self.high_application_volume(count)
            }
            (RiskRule::SuspiciousTiming, RuleInput::Timestamps(timestamps)) => {
                self.suspicious_timing(timestamps)
            }
            (RiskRule::DeviceFingerprint, RuleInput::Fingerprint(fp)) => self.device_fingerprint(fp),
            (RiskRule::GeographicRisk, RuleInput::Location(location)) => {
                self.geographic_risk(location)
            }
            (rule, _) => {
                return Err(CoreError::RuleInputMismatch {
                    rule: rule.name(),
                    expected: rule.expected_input(),
                })
            }
        };
        Ok(points)
    }

    /// Email hosted by a known throwaway provider
    pub fn disposable_email(&self, email: &str) -> u32 {
        let domain = match email.rsplit_once('@') {
            Some((_, domain)) => domain.trim().to_lowercase(),
            None => return 0,
        };

        if self.disposable_domains.contains(&domain) {
            DISPOSABLE_EMAIL_POINTS
        } else {
            0
        }
    }

    /// Points per missing required field
    pub fn incomplete_profile(&self, profile: &Profile) -> u32 {
        let missing = [
            &profile.first_name,
            &profile.last_name,
            &profile.email,
            &profile.bio,
        ]
        .iter()
        .filter(|field| field.as_deref().map_or(true, |v| v.trim().is_empty()))
        .count() as u32;

        missing * MISSING_FIELD_POINTS
    }

    pub fn high_application_volume(&self, count: u32) -> u32 {
        match count {
            c if c > 50 => 40,
            c if c > 20 => 25,
            c if c > 10 => 10,
            _ => 0,
        }
    }

    /// A highly regular cadence (low interval variance) looks automated
    pub fn suspicious_timing(&self, timestamps: &[i64]) -> u32 {
        if timestamps.len() < 3 {
            return 0;
        }

        let intervals: Vec<f64> = timestamps
            .windows(2)
            .map(|pair| pair[1].abs_diff(pair[0]) as f64)
            .collect();
        let n = intervals.len() as f64;
        let mean = intervals.iter().sum::<f64>() / n;
        let variance = intervals.iter().map(|i| (i - mean).powi(2)).sum::<f64>() / n;

        if variance < REGULAR_CADENCE_VARIANCE {
            REGULAR_CADENCE_POINTS
        } else {
            0
        }
    }

    pub fn device_fingerprint(&self, fp: &DeviceFingerprint) -> u32 {
        let mut points = 0;

        let browser = fp.browser_info.to_lowercase();
        if self.headless_markers.iter().any(|m| browser.contains(m.as_str())) {
            points += HEADLESS_POINTS;
        }

        if fp.webdriver {
            points += WEBDRIVER_POINTS;
        }

        let resolution = fp.screen_resolution.trim().to_lowercase();
        if !resolution.is_empty() && !self.common_resolutions.contains(&resolution) {
            points += UNCOMMON_RESOLUTION_POINTS;
        }

        points.min(DEVICE_POINTS_CAP)
    }

    pub fn geographic_risk(&self, location: &LocationData) -> u32 {
        let mut points = 0;

        if location.vpn_detected {
            points += VPN_POINTS;
        }
        if location.proxy_detected {
            points += PROXY_POINTS;
        }
        if location.tor_detected {
            points += TOR_POINTS;
        }
        if let Some(country) = &location.country {
            if self.high_risk_countries.contains(&country.trim().to_uppercase()) {
                points += HIGH_RISK_COUNTRY_POINTS;
            }
        }

        points.min(GEO_POINTS_CAP)
    }
}
