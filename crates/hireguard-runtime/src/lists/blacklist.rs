//! In-memory blacklist sets

use hireguard_core::{BlacklistEntry, BlacklistKind};
use std::collections::HashSet;

/// Blacklisted emails and IP addresses
///
/// Emails are matched case-insensitively; IPs are matched verbatim after
/// trimming.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blacklist {
    emails: HashSet<String>,
    ips: HashSet<String>,
}

impl Blacklist {
    /// Create an empty blacklist
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored rows, keeping active entries with a usable value
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = BlacklistEntry>,
    {
        let mut blacklist = Self::new();
        for entry in entries {
            if !entry.is_active {
                continue;
            }
            if !blacklist.insert(entry.entry_type, &entry.value) {
                tracing::warn!(
                    "Skipping malformed {:?} blacklist entry: {:?}",
                    entry.entry_type,
                    entry.value
                );
            }
        }
        blacklist
    }

    /// Returns false if the value was empty
    fn insert(&mut self, kind: BlacklistKind, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        match kind {
            BlacklistKind::Email => self.emails.insert(value.to_lowercase()),
            BlacklistKind::Ip => self.ips.insert(value.to_string()),
        };
        true
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.emails.contains(&email.trim().to_lowercase())
    }

    pub fn contains_ip(&self, ip: &str) -> bool {
        self.ips.contains(ip.trim())
    }

    pub fn email_count(&self) -> usize {
        self.emails.len()
    }

    pub fn ip_count(&self) -> usize {
        self.ips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.ips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_filters_inactive() {
        let blacklist = Blacklist::from_entries(vec![
            BlacklistEntry::email("fraud@example.com"),
            BlacklistEntry::email("old@example.com").inactive(),
            BlacklistEntry::ip("203.0.113.7"),
        ]);

        assert!(blacklist.contains_email("fraud@example.com"));
        assert!(!blacklist.contains_email("old@example.com"));
        assert!(blacklist.contains_ip("203.0.113.7"));
        assert_eq!(blacklist.email_count(), 1);
        assert_eq!(blacklist.ip_count(), 1);
    }

    #[test]
    fn test_email_match_is_case_insensitive() {
        let blacklist = Blacklist::from_entries(vec![BlacklistEntry::email("Fraud@Example.com")]);
        assert!(blacklist.contains_email("fraud@example.COM"));
        assert!(blacklist.contains_email("  fraud@example.com "));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let blacklist = Blacklist::from_entries(vec![
            BlacklistEntry::email("   "),
            BlacklistEntry::ip(""),
            BlacklistEntry::ip("198.51.100.1"),
        ]);

        assert_eq!(blacklist.email_count(), 0);
        assert_eq!(blacklist.ip_count(), 1);
    }

    #[test]
    fn test_empty() {
        let blacklist = Blacklist::new();
        assert!(blacklist.is_empty());
        assert!(!blacklist.contains_email("a@b.c"));
        assert!(!blacklist.contains_ip("127.0.0.1"));
    }
}
