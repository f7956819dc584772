//! HireGuard Risk Engine SDK
//!
//! High-level API for scoring job-board users and checking live sessions.

pub mod builder;
pub mod config;
pub mod error;
pub mod risk_engine;

// Re-export main types
pub use builder::RiskEngineBuilder;
pub use config::EngineConfig;
pub use error::{Result, SdkError};
pub use risk_engine::{RiskEngine, SessionMonitor};

// Re-export commonly used types from dependencies
pub use hireguard_core::{
    AnalysisContext, DeviceFingerprint, FraudAnalysisResult, LocationData, Recommendation,
    RiskLevel, RuleTableConfig, SessionSnapshot,
};
pub use hireguard_runtime::{InMemoryStore, MetricsCollector, RiskStore};
