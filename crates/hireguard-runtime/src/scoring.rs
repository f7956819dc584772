//! Risk aggregation and decision policy
//!
//! Weighted score:
//!
//! | Component   | Weight | Contribution                          |
//! |-------------|--------|---------------------------------------|
//! | Profile     | 0.30   | (100 - completeness) * 0.30           |
//! | Application | 0.25   | min(volume * 2, 100) * 0.25           |
//! | Behavior    | 0.25   | 50 * 0.25 when a VPN is detected      |
//! | Network     | 0.20   | min(duplicate profiles * 10, 100) * 0.20 |
//!
//! Proxy detection, bot probability and most indicator evidence do not move
//! the number; they surface through the indicator list and the block override.

use hireguard_core::{
    AnalysisBreakdown, ApplicationRiskAnalysis, BehaviorRiskAnalysis, FraudAnalysisResult,
    FraudIndicator, IndicatorType, NetworkRiskAnalysis, ProfileRiskAnalysis, Recommendation,
    RiskLevel, Severity,
};
use serde_json::json;

const PROFILE_WEIGHT: f64 = 0.30;
const APPLICATION_WEIGHT: f64 = 0.25;
const BEHAVIOR_WEIGHT: f64 = 0.25;
const NETWORK_WEIGHT: f64 = 0.20;

const VPN_COMPONENT: f64 = 50.0;

const BLOCK_SCORE: u8 = 90;
const REJECT_SCORE: u8 = 70;
const REVIEW_SCORE: u8 = 40;

const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Weighted composite score, rounded and clamped to [0, 100]
pub fn calculate_risk_score(
    profile: &ProfileRiskAnalysis,
    application: &ApplicationRiskAnalysis,
    behavior: &BehaviorRiskAnalysis,
    network: &NetworkRiskAnalysis,
) -> u8 {
    let profile_component = (100.0 - profile.profile_completeness) * PROFILE_WEIGHT;

    let application_component =
        (application.application_volume.saturating_mul(2).min(100)) as f64 * APPLICATION_WEIGHT;

    let behavior_component = if behavior.location_analysis.vpn_detected {
        VPN_COMPONENT * BEHAVIOR_WEIGHT
    } else {
        0.0
    };

    let network_component =
        (network.duplicate_profiles.saturating_mul(10).min(100)) as f64 * NETWORK_WEIGHT;

    let total = profile_component + application_component + behavior_component + network_component;
    total.round().clamp(0.0, 100.0) as u8
}

/// Independent indicator checks; every one that fires is listed
pub fn generate_fraud_indicators(
    profile: &ProfileRiskAnalysis,
    application: &ApplicationRiskAnalysis,
    behavior: &BehaviorRiskAnalysis,
    network: &NetworkRiskAnalysis,
) -> Vec<FraudIndicator> {
    let mut indicators = Vec::new();

    if profile.profile_completeness < 50.0 {
        indicators.push(FraudIndicator {
            indicator_type: IndicatorType::IncompleteProfile,
            severity: Severity::Medium,
            description: "Profile is significantly incomplete".to_string(),
            evidence: json!({ "completeness": profile.profile_completeness }),
            weight: 0.3,
        });
    }

    if application.application_volume > 20 {
        indicators.push(FraudIndicator {
            indicator_type: IndicatorType::HighApplicationVolume,
            severity: Severity::High,
            description: "Unusually high number of job applications".to_string(),
            evidence: json!({
                "volume": application.application_volume,
                "pattern": application.application_pattern,
            }),
            weight: 0.4,
        });
    }

    if behavior.location_analysis.vpn_detected {
        indicators.push(FraudIndicator {
            indicator_type: IndicatorType::VpnUsage,
            severity: Severity::Medium,
            description: "VPN usage detected".to_string(),
            evidence: json!({
                "ipAddress": behavior.location_analysis.ip_address,
                "country": behavior.location_analysis.country,
            }),
            weight: 0.3,
        });
    }

    if network.bot_detection.probability > 0.7 {
        indicators.push(FraudIndicator {
            indicator_type: IndicatorType::BotBehavior,
            severity: Severity::Critical,
            description: "Automated account behavior detected".to_string(),
            evidence: json!({
                "probability": network.bot_detection.probability,
                "indicators": network.bot_detection.indicators,
            }),
            weight: 0.6,
        });
    }

    indicators
}

/// Mean indicator weight, or 0.5 when nothing fired
pub fn calculate_confidence(indicators: &[FraudIndicator]) -> f64 {
    if indicators.is_empty() {
        return DEFAULT_CONFIDENCE;
    }

    let total: f64 = indicators.iter().map(|i| i.weight).sum();
    (total / indicators.len() as f64).min(1.0)
}

/// First matching rule wins: critical indicator or score >= 90 blocks,
/// then reject, review, approve.
pub fn determine_recommendation(score: u8, indicators: &[FraudIndicator]) -> Recommendation {
    let has_critical = indicators.iter().any(|i| i.severity == Severity::Critical);

    if has_critical || score >= BLOCK_SCORE {
        Recommendation::Block
    } else if score >= REJECT_SCORE {
        Recommendation::Reject
    } else if score >= REVIEW_SCORE {
        Recommendation::Review
    } else {
        Recommendation::Approve
    }
}

/// Join the four analyses into a final result. Pure; never fails.
pub fn compute_result(
    profile: ProfileRiskAnalysis,
    application: ApplicationRiskAnalysis,
    behavior: BehaviorRiskAnalysis,
    network: NetworkRiskAnalysis,
) -> FraudAnalysisResult {
    let risk_score = calculate_risk_score(&profile, &application, &behavior, &network);
    let fraud_indicators = generate_fraud_indicators(&profile, &application, &behavior, &network);
    let recommendation = determine_recommendation(risk_score, &fraud_indicators);
    let confidence = calculate_confidence(&fraud_indicators);

    FraudAnalysisResult {
        risk_score,
        risk_level: RiskLevel::from_score(risk_score),
        fraud_indicators,
        recommendation,
        confidence,
        analysis: AnalysisBreakdown {
            profile,
            application,
            behavior,
            network,
        },
    }
}
