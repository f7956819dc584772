//! HireGuard Runtime - Analysis and scoring for the HireGuard risk engine
//!
//! This crate provides the storage collaborator boundary, blacklist loading,
//! the four risk analyzers, the scoring and decision policy, and best-effort
//! result persistence.

pub mod analysis;
pub mod config;
pub mod error;
pub mod gather;
pub mod lists;
pub mod observability;
pub mod result;
pub mod scoring;
pub mod storage;

// Re-export main types
pub use analysis::{
    analyze_applications, analyze_behavior_patterns, analyze_network_patterns, analyze_profile,
    BehaviorInput,
};
pub use config::RiskEngineConfig;
pub use error::StorageError;
pub use gather::{DataGatherer, GatheredData};
pub use lists::{Blacklist, BlacklistLoader};
pub use observability::{Counter, Histogram, MetricsCollector};
pub use result::{AnalysisRecord, AnalysisWriter, PersistOutcome};
pub use scoring::{
    calculate_confidence, calculate_risk_score, compute_result, determine_recommendation,
    generate_fraud_indicators,
};
pub use storage::{InMemoryStore, RiskStore};
