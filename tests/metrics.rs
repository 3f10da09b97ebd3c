//! Tests for the metrics module.
#![cfg(feature = "metrics")]

use anyhow::Result;
use keyspace::metrics::{HistogramMetric, Metric, MetricsCollector};
use keyspace::{ExecMode, KeyRules, Runner, SearchStats};
use serde_json::json;


#[test]
fn test_histogram_metric() {
    let hist = HistogramMetric::with_values("test_hist", vec![5.0, 1.0, 3.0, 2.0, 4.0]);
    let stats = hist.stats();
    assert_eq!(stats.count, 5);
    assert_approx_eq!(stats.mean, 3.0);
    assert_approx_eq!(stats.min, 1.0);
    assert_approx_eq!(stats.max, 5.0);
    assert_approx_eq!(stats.p50, 3.0);
    assert_eq!(hist.value()["count"], json!(5));
    assert_eq!(HistogramMetric::with_values("empty", Vec::new()).stats().count, 0);
}

#[test]
fn test_increment_counter() {
    let collector = MetricsCollector::new();
    collector.increment_counter("requests", 1);
    collector.increment_counter("requests", 5);

    let snapshot = collector.snapshot();
    assert_eq!(snapshot.get("requests").unwrap(), &json!(6));
}

#[test]
fn test_record_partition() {
    let collector = MetricsCollector::new();
    let stats = SearchStats {
        keys: 10,
        nodes: 40,
        pruned_frequency: 1,
        pruned_macs: 2,
        pruned_triple: 3,
    };
    collector.record_partition(&stats);
    collector.record_partition(&stats);

    let snap = collector.snapshot();
    assert_eq!(snap["partitions"], json!(2));
    assert_eq!(snap["keys_total"], json!(20));
    assert_eq!(snap["nodes_visited"], json!(80));
    assert_eq!(snap["pruned_triple"], json!(6));
    assert_eq!(snap["partition_keys"]["count"], json!(2));
}

#[test]
fn test_runner_reports_to_metrics() -> Result<()> {
    let metrics = MetricsCollector::new();
    let out = Runner::new(ExecMode::default())
        .with_metrics(metrics.clone())
        .run(&KeyRules::new(6, 4, 2))?;

    let snap = metrics.snapshot();
    assert_eq!(snap["keys_total"], json!(out.legal_keys));
    assert_eq!(snap["partitions"], json!(4));
    assert_eq!(snap["nodes_visited"], json!(out.stats.nodes));
    assert_eq!(snap["partition_keys"]["max"], json!(429.0));
    assert!(metrics.elapsed().is_some());
    Ok(())
}

#[test]
fn test_save_to_file() -> Result<()> {
    let metrics = MetricsCollector::new();
    Runner::new(ExecMode::Sequential)
        .with_metrics(metrics.clone())
        .run(&KeyRules::new(4, 3, 2))?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("metrics.json");
    metrics.save_to_file(&path)?;

    let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(saved["keys_total"]["value"], json!(54));
    assert!(saved["execution_time_ms"]["value"].is_u64());
    Ok(())
}
