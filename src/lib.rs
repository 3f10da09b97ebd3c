//! # Keyspace
//!
//! Counts and uniformly samples the legal bittings of a pin-tumbler key
//! system. A key is `length` cuts, each a depth in `[0, depths)`, and it is
//! legal when:
//!
//! - **MACS**: adjacent cuts differ by at most `macs` depths
//! - **EN-1303 frequency**: no depth appears in more than `length / 2` cuts
//! - **EN-1303 no triples**: no three consecutive cuts are equal
//!
//! ## Quick Start
//!
//! ```
//! use keyspace::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let rules = KeyRules::new(8, 5, 4);
//! let outcome = Runner::new(ExecMode::default())
//!     .with_sample_size(5)
//!     .with_seed(42)
//!     .run(&rules)?;
//!
//! assert_eq!(outcome.legal_keys, 310_000);
//! assert_eq!(outcome.samples.len(), 5);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Pruned search
//!
//! The [`Enumerator`] grows a key one cut at a time in a single reusable
//! [`KeyBuffer`], rejecting a depth as soon as it breaks a rule. Every rule is
//! checked incrementally in O(1), so the work is proportional to the number of
//! legal prefixes rather than to `depths^length`.
//!
//! ### Partitions
//!
//! Fixing the first cut (or the first few, see
//! [`ExecMode::Parallel`]) splits the search into independent subtrees. The
//! [`Runner`] searches them on a rayon pool, each with its own buffer, count
//! and [`Reservoir`], and combines the results on one thread after the join.
//!
//! ### Sampling
//!
//! Each partition samples its own keys with Algorithm R. The per-partition
//! reservoirs are then merged two at a time, drawing from each side in
//! proportion to how many keys it actually saw, which keeps the final sample
//! uniform over the whole keyspace without ever storing it.
//!
//! ## Limitations
//!
//! Counts are `u64` and wrap silently for keyspaces beyond `u64::MAX`.
//!
//! ## Module Overview
//!
//! - [`constraints`] - the three rules, incremental and whole-key
//! - [`key`] - keys and the search buffer
//! - [`enumerator`] - depth-first search and key sinks
//! - [`partition`] - prefix partitions
//! - [`combiners`] - reservoir sampling
//! - [`runner`] - parallel execution and result combination
//! - [`config`] - JSON-loadable run configuration
//! - [`crosscheck`] - independent counters for verification
//! - [`metrics`] - run statistics (feature `metrics`)
//! - [`testing`] - assertions and fixtures for tests

pub mod combine;
pub mod combiners;
pub mod config;
pub mod constraints;
pub mod crosscheck;
pub mod enumerator;
pub mod key;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod partition;
pub mod runner;
pub mod testing;
pub mod utils;
pub mod validation;

// General re-exports
pub use combine::CombineFn;
pub use combiners::{Reservoir, UniformReservoir};
pub use config::KeyspaceConfig;
pub use constraints::KeyRules;
pub use enumerator::{Enumerator, KeySink, NullSink, SearchStats};
pub use key::{Depth, Key, KeyBuffer};
pub use partition::{Partition, partitions};
pub use runner::{ExecMode, KeyspaceOutcome, Runner};
