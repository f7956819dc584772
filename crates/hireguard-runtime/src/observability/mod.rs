//! Observability module
//!
//! In-process counters and latency histograms for the risk engine.

pub mod metrics;

pub use metrics::{Counter, Histogram, MetricsCollector};
