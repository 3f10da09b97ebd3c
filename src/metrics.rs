//! Metrics collection and reporting for keyspace runs.
//!
//! A [`MetricsCollector`] attached to a [`Runner`](crate::Runner) receives the
//! search statistics of every partition after the join, plus the run's wall
//! time. Everything can be printed or saved at the end.
//!
//! # Example
//!
//! ```no_run
//! use keyspace::metrics::MetricsCollector;
//! use keyspace::{ExecMode, KeyRules, Runner};
//!
//! # fn main() -> anyhow::Result<()> {
//! let metrics = MetricsCollector::new();
//! let runner = Runner::new(ExecMode::default()).with_metrics(metrics.clone());
//! runner.run(&KeyRules::new(8, 5, 4))?;
//!
//! metrics.print();
//! metrics.save_to_file("metrics.json")?;
//! # Ok(())
//! # }
//! ```

use crate::enumerator::SearchStats;
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::any::Any;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Trait for custom metrics.
pub trait Metric: Send + Sync + Any {
    /// The name of this metric (e.g., `keys_total`).
    fn name(&self) -> &str;

    /// The current value of this metric as a JSON value.
    fn value(&self) -> Value;

    /// Cast to Any for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutable cast to Any for in-place updates.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Thread-safe, cheaply cloneable metrics sink.
#[derive(Clone, Default)]
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsCollectorInner>>,
}

#[derive(Default)]
struct MetricsCollectorInner {
    metrics: HashMap<String, Box<dyn Metric>>,
    start_time: Option<Instant>,
    end_time: Option<Instant>,
}

impl MetricsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MetricsCollectorInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record_start(&self) {
        self.lock().start_time = Some(Instant::now());
    }

    pub fn record_end(&self) {
        self.lock().end_time = Some(Instant::now());
    }

    /// Elapsed run time, once both ends were recorded.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        let inner = self.lock();
        match (inner.start_time, inner.end_time) {
            (Some(start), Some(end)) => Some(end.duration_since(start)),
            _ => None,
        }
    }

    /// Add to a counter, creating it at zero first if needed. Wraps on overflow.
    ///
    /// A non-counter metric of the same name is replaced.
    pub fn increment_counter(&self, name: &str, value: u64) {
        let mut inner = self.lock();
        if let Some(counter) = inner
            .metrics
            .get_mut(name)
            .and_then(|m| m.as_any_mut().downcast_mut::<CounterMetric>())
        {
            counter.count = counter.count.wrapping_add(value);
            return;
        }
        inner.metrics.insert(
            name.to_string(),
            Box::new(CounterMetric::with_value(name, value)),
        );
    }

    /// Append a sample to a histogram, creating it if needed.
    pub fn record_histogram(&self, name: &str, value: f64) {
        let mut inner = self.lock();
        if let Some(hist) = inner
            .metrics
            .get_mut(name)
            .and_then(|m| m.as_any_mut().downcast_mut::<HistogramMetric>())
        {
            hist.record(value);
            return;
        }
        inner.metrics.insert(
            name.to_string(),
            Box::new(HistogramMetric::with_values(name, vec![value])),
        );
    }

    /// Fold one partition's search statistics into the running counters.
    #[allow(clippy::cast_precision_loss)]
    pub fn record_partition(&self, stats: &SearchStats) {
        self.increment_counter("partitions", 1);
        self.increment_counter("keys_total", stats.keys);
        self.increment_counter("nodes_visited", stats.nodes);
        self.increment_counter("pruned_frequency", stats.pruned_frequency);
        self.increment_counter("pruned_macs", stats.pruned_macs);
        self.increment_counter("pruned_triple", stats.pruned_triple);
        self.record_histogram("partition_keys", stats.keys as f64);
    }

    /// All metrics as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let inner = self.lock();
        let mut metrics_json = serde_json::Map::new();

        for (name, metric) in &inner.metrics {
            metrics_json.insert(name.clone(), json!({ "value": metric.value() }));
        }

        if let (Some(start), Some(end)) = (inner.start_time, inner.end_time) {
            metrics_json.insert(
                "execution_time_ms".to_string(),
                json!({
                    "value": end.duration_since(start).as_millis(),
                    "description": "Total run time in milliseconds",
                }),
            );
        }
        Value::Object(metrics_json)
    }

    /// Print all metrics to stdout, sorted by name.
    pub fn print(&self) {
        println!("\n========== Keyspace Metrics ==========");
        if let Some(elapsed) = self.elapsed() {
            println!(
                "Execution Time: {:.3}s ({} ms)",
                elapsed.as_secs_f64(),
                elapsed.as_millis()
            );
            println!("--------------------------------------");
        }

        let inner = self.lock();
        let mut sorted: Vec<_> = inner.metrics.iter().collect();
        sorted.sort_by_key(|(name, _)| *name);
        for (name, metric) in sorted {
            println!("{name}: {}", metric.value());
        }
        drop(inner);
        println!("======================================\n");
    }

    /// Write all metrics to `path` as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let formatted = serde_json::to_string_pretty(&self.to_json())?;
        let mut file = File::create(path)
            .with_context(|| format!("creating metrics file {}", path.display()))?;
        file.write_all(formatted.as_bytes())?;
        Ok(())
    }

    /// Metric names mapped to their current values.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.lock()
            .metrics
            .iter()
            .map(|(name, metric)| (name.clone(), metric.value()))
            .collect()
    }
}

// ========== Built-in Metrics ==========

/// A monotonically increasing count.
pub struct CounterMetric {
    name: String,
    count: u64,
}

impl CounterMetric {
    pub fn with_value(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

impl Metric for CounterMetric {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Value {
        json!(self.count)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Distribution of recorded values, e.g. keys per partition.
pub struct HistogramMetric {
    name: String,
    values: Vec<f64>,
}

impl HistogramMetric {
    pub fn with_values(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn record(&mut self, value: f64) {
        self.values.push(value);
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> HistogramStats {
        if self.values.is_empty() {
            return HistogramStats::default();
        }

        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let sum: f64 = sorted.iter().sum();
        HistogramStats {
            count,
            sum,
            mean: sum / count as f64,
            min: sorted[0],
            max: sorted[count - 1],
            p50: sorted[count / 2],
            p95: sorted[(count * 95) / 100],
        }
    }
}

impl Metric for HistogramMetric {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Value {
        let stats = self.stats();
        json!({
            "count": stats.count,
            "sum": stats.sum,
            "mean": stats.mean,
            "min": stats.min,
            "max": stats.max,
            "p50": stats.p50,
            "p95": stats.p95,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Summary of a [`HistogramMetric`].
#[derive(Debug, Clone, Default)]
pub struct HistogramStats {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub p50: f64,
    pub p95: f64,
}
