use crate::combine::merge_all;
use crate::combiners::UniformReservoir;
use crate::config::DEFAULT_SEED;
use crate::constraints::KeyRules;
use crate::enumerator::SearchStats;
use crate::key::Key;
#[cfg(feature = "metrics")]
use crate::metrics::MetricsCollector;
use crate::partition::{Partition, PartitionOutcome, partitions};
use crate::validation::{Validate, into_anyhow};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    /// One partition, searched on the calling thread.
    Sequential,
    /// One partition per legal prefix of `split_depth` cuts, searched on a
    /// dedicated rayon pool.
    Parallel { threads: Option<usize>, split_depth: usize },
}

impl Default for ExecMode {
    fn default() -> Self {
        Self::Parallel { threads: None, split_depth: 1 }
    }
}

/// Final result of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyspaceOutcome {
    pub rules: KeyRules,
    /// Legal keys in the whole space. Wraps silently past `u64::MAX`.
    pub legal_keys: u64,
    /// Uniform sample of up to `sample_size` legal keys.
    pub samples: Vec<Key>,
    pub partitions: usize,
    pub stats: SearchStats,
}

pub struct Runner {
    pub mode: ExecMode,
    pub sample_size: usize,
    pub seed: u64,
    #[cfg(feature = "metrics")]
    metrics: Option<MetricsCollector>,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(ExecMode::default())
    }
}

impl Runner {
    #[must_use]
    pub fn new(mode: ExecMode) -> Self {
        Self {
            mode,
            sample_size: 0,
            seed: DEFAULT_SEED,
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }

    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Report per-partition statistics and run time to `metrics`.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Count every legal key under `rules` and sample `sample_size` of them.
    ///
    /// # Errors
    ///
    /// Returns an error if `rules` has no cuts, no depths or more depths than
    /// a [`Depth`](crate::key::Depth) can hold, or if the worker pool cannot
    /// be built.
    pub fn run(&self, rules: &KeyRules) -> Result<KeyspaceOutcome> {
        into_anyhow("key rules", rules.validate())?;
        info!(
            length = rules.length,
            depths = rules.depths,
            macs = rules.macs,
            sample_size = self.sample_size,
            mode = ?self.mode,
            "keyspace run started"
        );
        #[cfg(feature = "metrics")]
        if let Some(m) = &self.metrics {
            m.record_start();
        }
        let started = Instant::now();

        let sampler = UniformReservoir::<Key>::new(self.sample_size, self.seed);
        let outcomes = match self.mode {
            ExecMode::Sequential => vec![explore(&Partition::whole(), rules, &sampler)],
            ExecMode::Parallel { threads, split_depth } => {
                let parts = partitions(rules, split_depth);
                let threads = threads
                    .unwrap_or_else(|| parts.len().min(num_cpus::get()))
                    .max(1);
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("keyspace-{i}"))
                    .build()
                    .context("building partition thread pool")?;
                pool.install(|| {
                    parts
                        .par_iter()
                        .map(|p| explore(p, rules, &sampler))
                        .collect::<Vec<_>>()
                })
            }
        };

        #[cfg(feature = "metrics")]
        if let Some(m) = &self.metrics {
            for out in &outcomes {
                m.record_partition(&out.stats);
            }
        }

        let outcome = combine(rules, outcomes, &sampler);
        info!(
            legal_keys = outcome.legal_keys,
            samples = outcome.samples.len(),
            partitions = outcome.partitions,
            elapsed_ms = started.elapsed().as_millis(),
            "keyspace run finished"
        );
        #[cfg(feature = "metrics")]
        if let Some(m) = &self.metrics {
            m.record_end();
        }
        Ok(outcome)
    }
}

fn explore(part: &Partition, rules: &KeyRules, sampler: &UniformReservoir<Key>) -> PartitionOutcome {
    let out = part.explore(rules, sampler.create_partition(part.index as u64));
    debug!(
        partition = out.index,
        prefix = ?out.prefix,
        legal_keys = out.legal_keys,
        nodes = out.stats.nodes,
        "partition finished"
    );
    out
}

/// Single-threaded reduction after the join: sum counts (wrapping), merge reservoirs.
fn combine(
    rules: &KeyRules,
    outcomes: Vec<PartitionOutcome>,
    sampler: &UniformReservoir<Key>,
) -> KeyspaceOutcome {
    let partitions = outcomes.len();
    let mut legal_keys = 0u64;
    let mut stats = SearchStats::default();
    let mut reservoirs = Vec::with_capacity(partitions);
    for out in outcomes {
        legal_keys = legal_keys.wrapping_add(out.legal_keys);
        stats.merge(&out.stats);
        reservoirs.push(out.reservoir);
    }

    KeyspaceOutcome {
        rules: *rules,
        legal_keys,
        samples: merge_all(sampler, reservoirs),
        partitions,
        stats,
    }
}
