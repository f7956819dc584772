//! Session, device and location signals

use crate::config::RiskEngineConfig;
use hireguard_core::{
    ActivityRecord, AnalysisContext, BehaviorRiskAnalysis, DeviceFingerprint, LocationAnalysis,
    SessionData,
};

const HIGH_CLICK_VOLUME: usize = 100;
const SUSPICIOUS_DEVICE_POINTS: u32 = 30;

/// Input to [`analyze_behavior_patterns`]
#[derive(Debug, Clone, Copy)]
pub struct BehaviorInput<'a> {
    /// Activities in any order; they are sorted newest-first on entry
    pub activities: &'a [ActivityRecord],
    pub context: &'a AnalysisContext,
    pub device_fingerprint: Option<&'a DeviceFingerprint>,
}

impl<'a> BehaviorInput<'a> {
    /// Take the fingerprint from the context
    pub fn new(activities: &'a [ActivityRecord], context: &'a AnalysisContext) -> Self {
        Self {
            activities,
            context,
            device_fingerprint: context.device_fingerprint.as_ref(),
        }
    }
}

pub fn analyze_behavior_patterns(
    input: &BehaviorInput<'_>,
    config: &RiskEngineConfig,
) -> BehaviorRiskAnalysis {
    let mut activities: Vec<&ActivityRecord> = input.activities.iter().collect();
    activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let duration = match (activities.first(), activities.last()) {
        (Some(newest), Some(oldest)) => (newest.created_at - oldest.created_at).num_seconds(),
        _ => 0,
    };

    let page_views = activities.iter().filter(|a| a.action == "page_view").count() as u32;
    let clicks = activities.iter().filter(|a| a.action == "click").count();

    let mut click_patterns = Vec::new();
    if clicks > HIGH_CLICK_VOLUME {
        click_patterns.push("High click volume".to_string());
    }

    let device_fingerprint = input.device_fingerprint.cloned().unwrap_or_default();
    let device_points = config.rules.device_fingerprint(&device_fingerprint);
    if device_points > SUSPICIOUS_DEVICE_POINTS {
        tracing::debug!("Device fingerprint scored {} points", device_points);
        click_patterns.push("Suspicious device fingerprint".to_string());
    }

    let ip_address = input.context.ip_address.clone();
    let ip_blacklisted = ip_address
        .as_deref()
        .is_some_and(|ip| config.blacklist.contains_ip(ip));
    let location = &input.context.location;

    BehaviorRiskAnalysis {
        session_data: SessionData {
            duration,
            page_views,
            click_patterns,
        },
        device_fingerprint,
        location_analysis: LocationAnalysis {
            ip_address,
            country: location.country.clone(),
            vpn_detected: location.vpn_detected,
            proxy_detected: location.proxy_detected,
            ip_blacklisted,
        },
    }
}
