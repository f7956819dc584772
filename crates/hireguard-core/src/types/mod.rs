//! Domain types shared by every HireGuard crate

pub mod analysis;
pub mod records;
pub mod result;

pub use analysis::{
    ApplicationPattern, ApplicationRiskAnalysis, BehaviorRiskAnalysis, BotDetection,
    LocationAnalysis, NetworkRiskAnalysis, NetworkSignals, ProfileRiskAnalysis, SessionData,
    VerificationStatus,
};
pub use records::{
    ActivityRecord, AnalysisContext, Application, BlacklistEntry, BlacklistKind,
    DeviceFingerprint, LocationData, MouseMovement, Profile, SessionRecord, SessionSnapshot,
};
pub use result::{
    AnalysisBreakdown, FlagStatus, FlagType, FraudAnalysisResult, FraudIndicator, IndicatorType,
    Recommendation, RiskLevel, SecurityFlag, Severity,
};
