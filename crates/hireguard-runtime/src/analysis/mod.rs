//! Risk analyzers
//!
//! Four independent, pure analyzers. Each one maps gathered records to a
//! typed analysis; none of them reads another's output.

mod application;
mod behavior;
mod network;
mod profile;

pub use application::analyze_applications;
pub use behavior::{analyze_behavior_patterns, BehaviorInput};
pub use network::analyze_network_patterns;
pub use profile::analyze_profile;
