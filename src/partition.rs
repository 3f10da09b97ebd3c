//! Splitting the keyspace into independent subtrees.
//!
//! A [`Partition`] is a legal prefix of `split_depth` cuts. The partitions of
//! one split depth are disjoint and together cover every legal key, so each can
//! be searched on its own thread with private state.

use crate::combiners::Reservoir;
use crate::constraints::KeyRules;
use crate::enumerator::{Enumerator, KeySink, SearchStats};
use crate::key::{Depth, Key, KeyBuffer};
use serde::{Deserialize, Serialize};

/// One subtree of the search, rooted at a fixed prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub index: usize,
    pub prefix: Vec<Depth>,
}

/// What one partition produced.
#[derive(Debug)]
pub struct PartitionOutcome {
    pub index: usize,
    pub prefix: Vec<Depth>,
    pub legal_keys: u64,
    pub stats: SearchStats,
    pub reservoir: Reservoir<Key>,
}

/// Collects prefixes as partitions, numbering them in search order.
struct PrefixSink(Vec<Partition>);

impl KeySink for PrefixSink {
    fn accept(&mut self, key: &[Depth]) {
        let index = self.0.len();
        self.0.push(Partition {
            index,
            prefix: key.to_vec(),
        });
    }
}

/// Every legal prefix of `split_depth` cuts (clamped to the key length).
///
/// `split_depth == 0` yields a single partition with an empty prefix, i.e. the
/// whole search. `split_depth == 1` yields one partition per usable depth.
#[must_use]
pub fn partitions(rules: &KeyRules, split_depth: usize) -> Vec<Partition> {
    let mut sink = PrefixSink(Vec::new());
    let mut buf = KeyBuffer::new(rules.length, rules.depths);
    Enumerator::new(*rules)
        .stopping_at(split_depth)
        .run(&mut buf, &mut sink);
    sink.0
}

impl Partition {
    /// The partition covering the whole keyspace.
    #[must_use]
    pub const fn whole() -> Self {
        Self {
            index: 0,
            prefix: Vec::new(),
        }
    }

    /// Search this subtree to completion, offering every key to `reservoir`.
    #[must_use]
    pub fn explore(&self, rules: &KeyRules, mut reservoir: Reservoir<Key>) -> PartitionOutcome {
        let mut buf = KeyBuffer::with_prefix(rules.length, rules.depths, &self.prefix);
        let mut search = Enumerator::new(*rules);
        let legal_keys = search.run(&mut buf, &mut reservoir);
        PartitionOutcome {
            index: self.index,
            prefix: self.prefix.clone(),
            legal_keys,
            stats: *search.stats(),
            reservoir,
        }
    }
}
