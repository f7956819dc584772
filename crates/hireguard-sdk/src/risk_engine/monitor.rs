//! Live session heuristics
//!
//! Cheap checks on a single session snapshot. No gathering, no scoring.

use hireguard_core::SessionSnapshot;
use hireguard_runtime::RiskEngineConfig;

const MAX_ACTIONS_PER_MINUTE: f64 = 100.0;
const SUSPICIOUS_DEVICE_POINTS: u32 = 30;

pub const HIGH_ACTION_RATE: &str = "High action rate";
pub const NO_MOUSE_MOVEMENT: &str = "No mouse movement detected";
pub const SUSPICIOUS_DEVICE: &str = "Suspicious device fingerprint";
pub const BLACKLISTED_IP: &str = "IP address is blacklisted";

/// Evaluates session snapshots against a trigger threshold
#[derive(Debug, Clone, Copy)]
pub struct SessionMonitor {
    flag_threshold: usize,
}

impl SessionMonitor {
    pub fn new(flag_threshold: usize) -> Self {
        Self { flag_threshold }
    }

    pub fn flag_threshold(&self) -> usize {
        self.flag_threshold
    }

    /// Names of the heuristics the snapshot triggers
    pub fn indicators(
        &self,
        snapshot: &SessionSnapshot,
        config: &RiskEngineConfig,
    ) -> Vec<&'static str> {
        let mut indicators = Vec::new();

        if snapshot.actions_per_minute > MAX_ACTIONS_PER_MINUTE {
            indicators.push(HIGH_ACTION_RATE);
        }

        if snapshot
            .mouse_movements
            .as_ref()
            .map_or(true, |moves| moves.is_empty())
        {
            indicators.push(NO_MOUSE_MOVEMENT);
        }

        if let Some(fp) = &snapshot.device_fingerprint {
            if config.rules.device_fingerprint(fp) > SUSPICIOUS_DEVICE_POINTS {
                indicators.push(SUSPICIOUS_DEVICE);
            }
        }

        if let Some(ip) = &snapshot.ip_address {
            if config.blacklist.contains_ip(ip) {
                indicators.push(BLACKLISTED_IP);
            }
        }

        indicators
    }

    /// Flag only when strictly more heuristics than the threshold trigger
    pub fn should_flag(&self, triggered: usize) -> bool {
        triggered > self.flag_threshold
    }
}

impl Default for SessionMonitor {
    fn default() -> Self {
        Self::new(2)
    }
}
