//! Blacklist management
//!
//! Blacklisted emails and IPs are loaded once from the store and are
//! read-only afterwards. Loading fails open.

mod blacklist;
pub mod loader;

pub use blacklist::Blacklist;
pub use loader::BlacklistLoader;
