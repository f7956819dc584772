//! Duplicate-account and co-registration signals

use hireguard_core::{BotDetection, NetworkRiskAnalysis, NetworkSignals};

// Probability is accumulated in tenths so the 0.7 boundary stays exact.
const DUPLICATE_TENTHS: u32 = 4;
const CONNECTION_TENTHS: u32 = 3;
const SHARED_DEVICE_TENTHS: u32 = 3;

/// Derive bot probability and indicators from neighbor counts.
///
/// Indicators use looser thresholds than the probability contributions, so
/// they surface before they move the score.
pub fn analyze_network_patterns(signals: &NetworkSignals) -> NetworkRiskAnalysis {
    let mut tenths = 0;
    if signals.duplicate_profiles > 10 {
        tenths += DUPLICATE_TENTHS;
    }
    if signals.suspicious_connections > 20 {
        tenths += CONNECTION_TENTHS;
    }
    if signals.shared_devices > 5 {
        tenths += SHARED_DEVICE_TENTHS;
    }
    let probability = (tenths.min(10) as f64 / 10.0).min(1.0);

    let mut indicators = Vec::new();
    if signals.duplicate_profiles > 5 {
        indicators.push("Multiple similar profiles detected".to_string());
    }
    if signals.suspicious_connections > 10 {
        indicators.push("High number of accounts created in short timeframe".to_string());
    }

    NetworkRiskAnalysis {
        duplicate_profiles: signals.duplicate_profiles,
        shared_devices: signals.shared_devices,
        suspicious_connections: signals.suspicious_connections,
        bot_detection: BotDetection {
            probability,
            indicators,
        },
    }
}
