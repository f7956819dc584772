//! Analysis records and best-effort persistence

mod persistence;

pub use persistence::{AnalysisRecord, AnalysisWriter, PersistOutcome};
