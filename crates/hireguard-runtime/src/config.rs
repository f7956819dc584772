//! Shared engine state: blacklist sets and the rule table.
//!
//! Built once at startup and passed by reference into every analysis call.

use crate::lists::Blacklist;
use hireguard_core::{RuleTable, RuleTableConfig};

#[derive(Debug, Clone, Default)]
pub struct RiskEngineConfig {
    pub blacklist: Blacklist,
    pub rules: RuleTable,
}

impl RiskEngineConfig {
    pub fn new(blacklist: Blacklist, rules: RuleTable) -> Self {
        Self { blacklist, rules }
    }

    /// Build with the given rule tables and an empty blacklist
    pub fn from_rule_config(config: &RuleTableConfig) -> Self {
        Self::new(Blacklist::new(), RuleTable::new(config))
    }

    /// Same rules, different blacklist
    pub fn with_blacklist(&self, blacklist: Blacklist) -> Self {
        Self {
            blacklist,
            rules: self.rules.clone(),
        }
    }
}
