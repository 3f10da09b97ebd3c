use anyhow::Result;
use clap::Parser;
use keyspace::crosscheck::{count_by_state_graph, count_macs_only};
use keyspace::utils::group_thousands;
use keyspace::{KeyspaceConfig, KeyspaceOutcome};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "keyspace", about = "Count and sample legal MACS / EN-1303 key bittings")]
struct Cli {
    /// JSON config file; flags given here override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Cuts per key.
    #[arg(short = 'n', long)]
    length: Option<usize>,
    /// Distinct cut depths.
    #[arg(short = 'd', long)]
    depths: Option<usize>,
    /// Maximum adjacent cut difference.
    #[arg(short = 'm', long)]
    macs: Option<u32>,
    /// Print a uniform sample of this many legal keys.
    #[arg(short = 's', long = "sample-size")]
    sample_size: Option<usize>,
    /// Seed for sampling.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of leading cuts fixed per partition.
    #[arg(long = "split-depth")]
    split_depth: Option<usize>,
    /// Worker threads.
    #[arg(long)]
    threads: Option<usize>,
    /// Search on one thread without partitioning.
    #[arg(long)]
    sequential: bool,
    /// Also count with the state-graph and MACS-only counters.
    #[arg(long)]
    verify: bool,
    /// Print run metrics.
    #[arg(long)]
    metrics: bool,
    /// Print the outcome as JSON.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> Result<KeyspaceConfig> {
        let mut config = match &self.config {
            Some(path) => KeyspaceConfig::from_json_file(path)?,
            None => KeyspaceConfig::default(),
        };
        if let Some(v) = self.length {
            config.length = v;
        }
        if let Some(v) = self.depths {
            config.depths = v;
        }
        if let Some(v) = self.macs {
            config.macs = v;
        }
        if let Some(v) = self.sample_size {
            config.sample_size = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(v) = self.split_depth {
            config.split_depth = v;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        config.sequential |= self.sequential;
        config.validated()
    }
}

fn print_outcome(outcome: &KeyspaceOutcome) {
    let rules = &outcome.rules;
    println!("n = {}, k = {}, macs = {}", rules.length, rules.depths, rules.macs);
    println!("Legal keys: {}", group_thousands(outcome.legal_keys));
    if !outcome.samples.is_empty() {
        println!("Samples: ");
        for key in &outcome.samples {
            println!("{key}");
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (verify, show_metrics, json) = (cli.verify, cli.metrics, cli.json);
    let config = cli.into_config()?;
    let rules = config.rules();

    let runner = config.runner();
    #[cfg(feature = "metrics")]
    let metrics = keyspace::metrics::MetricsCollector::new();
    #[cfg(feature = "metrics")]
    let runner = runner.with_metrics(metrics.clone());
    let outcome = runner.run(&rules)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    if verify {
        let by_states = count_by_state_graph(&rules);
        println!("State-graph count: {}", group_thousands(by_states));
        println!(
            "MACS-only count: {}",
            group_thousands(count_macs_only(rules.length, rules.depths, rules.macs))
        );
        anyhow::ensure!(
            by_states == outcome.legal_keys,
            "state-graph count {by_states} disagrees with search count {}",
            outcome.legal_keys
        );
    }

    #[cfg(feature = "metrics")]
    if show_metrics {
        metrics.print();
    }
    #[cfg(not(feature = "metrics"))]
    if show_metrics {
        tracing::warn!("built without the `metrics` feature; --metrics ignored");
    }
    Ok(())
}
