//! RiskEngine - main API for user analysis and session monitoring
//!
//! - `engine`: the `RiskEngine` entry points and blacklist reload
//! - `monitor`: live session heuristics

mod engine;
mod monitor;

pub use engine::RiskEngine;
pub use monitor::{
    SessionMonitor, BLACKLISTED_IP, HIGH_ACTION_RATE, NO_MOUSE_MOVEMENT, SUSPICIOUS_DEVICE,
};
