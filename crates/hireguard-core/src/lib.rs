//! HireGuard Core - Core types and rule definitions for the HireGuard risk engine
//!
//! This crate provides the fundamental types used across the HireGuard crates:
//! - Records gathered about a user (profile, applications, sessions, activities)
//! - Analysis outputs, fraud indicators and the final analysis result
//! - The closed rule set and its evaluation table
//! - Error types

pub mod error;
pub mod rules;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use rules::{RiskRule, RuleInput, RuleTable, RuleTableConfig};
pub use types::*;
