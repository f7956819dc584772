//! Blacklist loader

use super::Blacklist;
use crate::storage::RiskStore;
use std::sync::Arc;

/// Loads the active blacklist from the store
pub struct BlacklistLoader {
    store: Arc<dyn RiskStore>,
}

impl BlacklistLoader {
    pub fn new(store: Arc<dyn RiskStore>) -> Self {
        Self { store }
    }

    /// Load active entries.
    ///
    /// Never fails: a store error yields an empty blacklist, and malformed
    /// rows are dropped while the rest are kept.
    pub async fn load(&self) -> Blacklist {
        match self.store.active_blacklist().await {
            Ok(entries) => {
                let blacklist = Blacklist::from_entries(entries);
                tracing::info!(
                    "Loaded blacklist: {} emails, {} IPs",
                    blacklist.email_count(),
                    blacklist.ip_count()
                );
                blacklist
            }
            Err(e) => {
                tracing::warn!("Failed to load blacklist, continuing without it: {}", e);
                Blacklist::new()
            }
        }
    }
}
