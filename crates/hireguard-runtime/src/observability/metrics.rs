//! Metrics collection

use hireguard_core::Recommendation;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

pub const ANALYSES_TOTAL: &str = "analyses_total";
pub const ANALYSIS_DURATION: &str = "analysis_duration";
pub const FLAGS_RAISED: &str = "session_flags_raised";
pub const SESSIONS_MONITORED: &str = "sessions_monitored";
pub const PERSIST_FAILURES: &str = "persist_failures";

/// Monotonic counter
#[derive(Debug)]
pub struct Counter {
    name: String,
    value: AtomicU64,
}

impl Counter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inc(&self) {
        self.add(1);
    }

    pub fn add(&self, value: u64) {
        self.value.fetch_add(value, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.value.store(0, Ordering::Relaxed);
    }
}

/// Samples retained per histogram; older ones are evicted first
pub const DEFAULT_HISTOGRAM_WINDOW: usize = 1024;

/// Histogram over a sliding window of the most recent samples
#[derive(Debug)]
pub struct Histogram {
    name: String,
    capacity: usize,
    state: RwLock<HistogramState>,
}

#[derive(Debug, Default)]
struct HistogramState {
    window: VecDeque<f64>,
    total: u64,
}

impl Histogram {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, DEFAULT_HISTOGRAM_WINDOW)
    }

    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            name: name.into(),
            capacity,
            state: RwLock::new(HistogramState {
                window: VecDeque::with_capacity(capacity),
                total: 0,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn observe(&self, value: f64) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if state.window.len() == self.capacity {
            state.window.pop_front();
        }
        state.window.push_back(value);
        state.total += 1;
    }

    /// Observe a duration in seconds
    pub fn observe_duration(&self, duration: Duration) {
        self.observe(duration.as_secs_f64());
    }

    /// Samples currently in the window
    pub fn count(&self) -> usize {
        self.read_state().window.len()
    }

    /// Observations since creation or the last reset, evicted ones included
    pub fn total_count(&self) -> u64 {
        self.read_state().total
    }

    /// Mean of the windowed samples
    pub fn avg(&self) -> f64 {
        let state = self.read_state();
        if state.window.is_empty() {
            0.0
        } else {
            state.window.iter().sum::<f64>() / state.window.len() as f64
        }
    }

    /// Get percentile (0-100) of the windowed samples
    pub fn percentile(&self, p: f64) -> f64 {
        let mut values: Vec<f64> = self.read_state().window.iter().copied().collect();
        if values.is_empty() {
            return 0.0;
        }

        values.sort_by(|a, b| a.total_cmp(b));
        let index = ((p / 100.0) * (values.len() - 1) as f64).round() as usize;
        values[index.min(values.len() - 1)]
    }

    pub fn reset(&self) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.window.clear();
        state.total = 0;
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, HistogramState> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Metrics collector
#[derive(Debug, Default)]
pub struct MetricsCollector {
    counters: RwLock<HashMap<String, Arc<Counter>>>,
    histograms: RwLock<HashMap<String, Arc<Histogram>>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a counter
    pub fn counter(&self, name: &str) -> Arc<Counter> {
        self.counters
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Counter::new(name)))
            .clone()
    }

    /// Get or create a histogram
    pub fn histogram(&self, name: &str) -> Arc<Histogram> {
        self.histograms
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Histogram::new(name)))
            .clone()
    }

    /// Record a completed analysis
    pub fn record_analysis(&self, recommendation: Recommendation, duration: Duration) {
        self.counter(ANALYSES_TOTAL).inc();
        self.counter(&format!("recommendation_{}", recommendation.as_str()))
            .inc();
        self.histogram(ANALYSIS_DURATION).observe_duration(duration);
    }

    /// Record a monitored session and whether it was flagged
    pub fn record_session(&self, flagged: bool) {
        self.counter(SESSIONS_MONITORED).inc();
        if flagged {
            self.counter(FLAGS_RAISED).inc();
        }
    }

    pub fn record_persist_failure(&self) {
        self.counter(PERSIST_FAILURES).inc();
    }

    pub fn counter_names(&self) -> Vec<String> {
        self.counters
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect()
    }

    pub fn reset_all(&self) {
        for counter in self
            .counters
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
        {
            counter.reset();
        }
        for histogram in self
            .histograms
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
        {
            histogram.reset();
        }
    }
}
