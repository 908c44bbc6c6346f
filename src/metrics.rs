//! Metrics collection and reporting for a planner run.
//!
//! Mirrors the generic `Metric` trait / `MetricsCollector` pairing used
//! elsewhere in this crate: custom metrics can be registered alongside the
//! built-in counters the scheduler records for every run, and the whole set
//! can be printed to stdout or dumped as JSON.
//!
//! # Example
//!
//! ```no_run
//! use yardbeam::metrics::PlannerMetrics;
//!
//! let mut metrics = PlannerMetrics::new();
//! metrics.record_start();
//! metrics.record_phase(0, 12);
//! metrics.record_result(4, 37.5);
//! metrics.record_end();
//! metrics.print();
//! ```

use serde_json::{json, Value};
use std::any::Any;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Result;

/// Trait for custom metrics registered alongside the built-in ones.
pub trait Metric: Send + Sync + Any {
    fn name(&self) -> &str;
    fn value(&self) -> Value;
    fn description(&self) -> Option<&str> {
        None
    }
    fn as_any(&self) -> &dyn Any;
}

#[derive(Clone)]
struct CounterMetric {
    name: String,
    count: u64,
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
}

struct GaugeMetric {
    name: String,
    value: f64,
}

impl Metric for GaugeMetric {
    fn name(&self) -> &str {
        &self.name
    }
    fn value(&self) -> Value {
        json!(self.value)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Thread-safe container for collecting planner run metrics.
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsCollectorInner>>,
}

struct MetricsCollectorInner {
    metrics: HashMap<String, Box<dyn Metric>>,
    start_time: Option<Instant>,
    end_time: Option<Instant>,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MetricsCollectorInner {
                metrics: HashMap::new(),
                start_time: None,
                end_time: None,
            })),
        }
    }

    pub fn register(&mut self, metric: Box<dyn Metric>) {
        let mut inner = self.inner.lock().unwrap();
        inner.metrics.insert(metric.name().to_string(), metric);
    }

    pub fn record_start(&self) {
        self.inner.lock().unwrap().start_time = Some(Instant::now());
    }

    pub fn record_end(&self) {
        self.inner.lock().unwrap().end_time = Some(Instant::now());
    }

    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        let inner = self.inner.lock().unwrap();
        match (inner.start_time, inner.end_time) {
            (Some(start), Some(end)) => Some(end.duration_since(start)),
            _ => None,
        }
    }

    pub fn set_counter(&self, name: &str, value: u64) {
        let mut inner = self.inner.lock().unwrap();
        inner.metrics.insert(name.to_string(), Box::new(CounterMetric { name: name.to_string(), count: value }));
    }

    pub fn set_gauge(&self, name: &str, value: f64) {
        let mut inner = self.inner.lock().unwrap();
        inner.metrics.insert(name.to_string(), Box::new(GaugeMetric { name: name.to_string(), value }));
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        let inner = self.inner.lock().unwrap();
        let mut metrics_json = serde_json::Map::new();
        for (name, metric) in &inner.metrics {
            let mut metric_obj = serde_json::Map::new();
            metric_obj.insert("value".to_string(), metric.value());
            if let Some(desc) = metric.description() {
                metric_obj.insert("description".to_string(), json!(desc));
            }
            metrics_json.insert(name.clone(), Value::Object(metric_obj));
        }
        if let (Some(start), Some(end)) = (inner.start_time, inner.end_time) {
            let elapsed_ms = end.duration_since(start).as_millis();
            metrics_json.insert("elapsed_ms".to_string(), json!(elapsed_ms));
        }
        drop(inner);
        json!(metrics_json)
    }

    pub fn print(&self) {
        let j = self.to_json();
        println!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let j = self.to_json();
        let mut f = File::create(path)?;
        f.write_all(serde_json::to_string_pretty(&j)?.as_bytes())?;
        Ok(())
    }
}

/// Convenience wrapper around [`MetricsCollector`] that knows the specific
/// counters a planner run produces: how many branches survived each
/// target's pruning round, and the winning plan's size and makespan.
pub struct PlannerMetrics {
    collector: MetricsCollector,
    phases: u64,
}

impl Default for PlannerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PlannerMetrics {
    #[must_use]
    pub fn new() -> Self {
        PlannerMetrics { collector: MetricsCollector::new(), phases: 0 }
    }

    pub fn record_start(&self) {
        self.collector.record_start();
    }

    pub fn record_end(&self) {
        self.collector.record_end();
    }

    pub fn record_phase(&mut self, phase_index: usize, beam_size_after_prune: usize) {
        self.phases += 1;
        self.collector.set_counter("phases_processed", self.phases);
        self.collector.set_gauge(&format!("beam_size_phase_{phase_index}"), beam_size_after_prune as f64);
    }

    pub fn record_result(&self, mission_count: usize, makespan: f64) {
        self.collector.set_counter("mission_count", mission_count as u64);
        self.collector.set_gauge("makespan", makespan);
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        self.collector.to_json()
    }

    pub fn print(&self) {
        self.collector.print();
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        self.collector.save_to_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_phase_and_result_counters() {
        let mut m = PlannerMetrics::new();
        m.record_phase(0, 5);
        m.record_phase(1, 3);
        m.record_result(4, 12.5);
        let json = m.to_json();
        assert_eq!(json["phases_processed"]["value"], json!(2));
        assert_eq!(json["mission_count"]["value"], json!(4));
        assert_eq!(json["makespan"]["value"], json!(12.5));
    }
}
