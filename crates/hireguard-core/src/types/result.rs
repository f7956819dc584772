//! Final analysis result, fraud indicators and security flags

use super::analysis::{
    ApplicationRiskAnalysis, BehaviorRiskAnalysis, NetworkRiskAnalysis, ProfileRiskAnalysis,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Indicator severity. Only `Critical` takes part in the block override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Bucketed risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Bucket a 0-100 score, highest bucket first
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => RiskLevel::Critical,
            60..=79 => RiskLevel::High,
            30..=59 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Recommended action for the analyzed user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    /// Let the user through
    Approve,

    /// Send for manual review
    Review,

    /// Reject the user's activity
    Reject,

    /// Block the account outright
    Block,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Approve => "approve",
            Recommendation::Review => "review",
            Recommendation::Reject => "reject",
            Recommendation::Block => "block",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorType {
    IncompleteProfile,
    HighApplicationVolume,
    VpnUsage,
    BotBehavior,
}

/// An itemized, explainable contribution to the verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudIndicator {
    #[serde(rename = "type")]
    pub indicator_type: IndicatorType,
    pub severity: Severity,
    pub description: String,
    pub evidence: serde_json::Value,
    /// 0-1
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisBreakdown {
    pub profile: ProfileRiskAnalysis,
    pub application: ApplicationRiskAnalysis,
    pub behavior: BehaviorRiskAnalysis,
    pub network: NetworkRiskAnalysis,
}

/// Terminal artifact of a full analysis. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAnalysisResult {
    /// Integer in [0, 100]
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub fraud_indicators: Vec<FraudIndicator>,
    pub recommendation: Recommendation,
    /// 0-1
    pub confidence: f64,
    pub analysis: AnalysisBreakdown,
}

impl FraudAnalysisResult {
    /// Whether any indicator carries critical severity
    pub fn has_critical_indicator(&self) -> bool {
        self.fraud_indicators
            .iter()
            .any(|indicator| indicator.severity == Severity::Critical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagType {
    SuspiciousSession,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagStatus {
    Active,
    Resolved,
}

/// Flag raised by the session monitor; resolved later by a reviewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityFlag {
    pub user_id: String,
    pub flag_type: FlagType,
    pub evidence: serde_json::Value,
    pub status: FlagStatus,
    pub created_at: DateTime<Utc>,
}

impl SecurityFlag {
    /// Create an active flag stamped with the current time
    pub fn active(user_id: impl Into<String>, flag_type: FlagType, evidence: serde_json::Value) -> Self {
        Self {
            user_id: user_id.into(),
            flag_type,
            evidence,
            status: FlagStatus::Active,
            created_at: Utc::now(),
        }
    }
}
