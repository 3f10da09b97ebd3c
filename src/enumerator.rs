//! Pruned depth-first enumeration of legal keys.
//!
//! The enumerator extends a [`KeyBuffer`] one cut at a time. A depth is only
//! committed if it keeps the frequency cap and the MACS bound on the newest
//! pair; the no-triple rule is checked on entry to each level against the
//! committed prefix. Every surviving node is therefore the prefix of at least
//! zero legal keys and no prefix is visited twice.
//!
//! # Example
//!
//! ```
//! use keyspace::constraints::KeyRules;
//! use keyspace::enumerator::Enumerator;
//! use keyspace::key::{Key, KeyBuffer};
//!
//! let rules = KeyRules::new(4, 3, 2);
//! let mut keys: Vec<Key> = Vec::new();
//! let mut buf = KeyBuffer::new(rules.length, rules.depths);
//! let found = Enumerator::new(rules).run(&mut buf, &mut keys);
//!
//! assert_eq!(found, 54);
//! assert_eq!(keys.len(), 54);
//! ```

use crate::combiners::Reservoir;
use crate::constraints::{KeyRules, frequency_ok, macs_ok, no_three_consecutive};
use crate::key::{Depth, Key, KeyBuffer};
use serde::{Deserialize, Serialize};

/// Receives every key the enumerator completes.
///
/// `key` borrows the search buffer; implementations copy it if they keep it.
pub trait KeySink {
    fn accept(&mut self, key: &[Depth]);
}

/// Discards keys; for count-only runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl KeySink for NullSink {
    #[inline]
    fn accept(&mut self, _key: &[Depth]) {}
}

impl KeySink for Vec<Key> {
    fn accept(&mut self, key: &[Depth]) {
        self.push(Key::from(key));
    }
}

impl KeySink for Reservoir<Key> {
    #[inline]
    fn accept(&mut self, key: &[Depth]) {
        self.offer_with(|| Key::from(key));
    }
}

/// Work done by one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Keys completed (wraps on overflow).
    pub keys: u64,
    /// Prefixes entered that passed every rule.
    pub nodes: u64,
    /// Candidate depths rejected by the frequency cap.
    pub pruned_frequency: u64,
    /// Candidate depths rejected by MACS.
    pub pruned_macs: u64,
    /// Prefixes rejected on entry for ending in three equal cuts.
    pub pruned_triple: u64,
}

impl SearchStats {
    pub fn merge(&mut self, other: &Self) {
        self.keys = self.keys.wrapping_add(other.keys);
        self.nodes = self.nodes.wrapping_add(other.nodes);
        self.pruned_frequency = self.pruned_frequency.wrapping_add(other.pruned_frequency);
        self.pruned_macs = self.pruned_macs.wrapping_add(other.pruned_macs);
        self.pruned_triple = self.pruned_triple.wrapping_add(other.pruned_triple);
    }
}

/// Depth-first key search over one [`KeyBuffer`].
#[derive(Clone, Debug)]
pub struct Enumerator {
    rules: KeyRules,
    stop_at: usize,
    stats: SearchStats,
}

impl Enumerator {
    /// Search for complete keys of `rules.length` cuts.
    #[must_use]
    pub const fn new(rules: KeyRules) -> Self {
        Self {
            rules,
            stop_at: rules.length,
            stats: SearchStats {
                keys: 0,
                nodes: 0,
                pruned_frequency: 0,
                pruned_macs: 0,
                pruned_triple: 0,
            },
        }
    }

    /// Report prefixes of `len` cuts instead of full keys.
    ///
    /// Frequency caps still use the full key length, so every reported prefix
    /// can be a prefix of a legal key as far as the incremental rules know.
    #[must_use]
    pub fn stopping_at(mut self, len: usize) -> Self {
        self.stop_at = len.min(self.rules.length);
        self
    }

    #[must_use]
    pub const fn rules(&self) -> &KeyRules {
        &self.rules
    }

    #[must_use]
    pub const fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Enumerate every completion of the buffer's committed prefix and return
    /// how many were found by this call.
    ///
    /// The prefix must already satisfy the rules. The buffer is returned in the
    /// state it was passed in.
    pub fn run<S: KeySink>(&mut self, buf: &mut KeyBuffer, sink: &mut S) -> u64 {
        debug_assert_eq!(buf.length(), self.rules.length, "buffer sized for another key length");
        let before = self.stats.keys;
        self.descend(buf, sink);
        self.stats.keys.wrapping_sub(before)
    }

    fn descend<S: KeySink>(&mut self, buf: &mut KeyBuffer, sink: &mut S) {
        let filled = buf.filled();
        if !no_three_consecutive(buf.prefix(), filled) {
            self.stats.pruned_triple = self.stats.pruned_triple.wrapping_add(1);
            return;
        }
        self.stats.nodes = self.stats.nodes.wrapping_add(1);

        if filled == self.stop_at {
            if self.stop_at == self.rules.length {
                self.self_check(buf.prefix());
            }
            self.stats.keys = self.stats.keys.wrapping_add(1);
            sink.accept(buf.prefix());
            return;
        }

        let prev = buf.last();
        #[allow(clippy::cast_possible_truncation)]
        for depth in (0..self.rules.depths).map(|d| d as Depth) {
            if !frequency_ok(buf.frequencies(), depth, self.rules.length) {
                self.stats.pruned_frequency = self.stats.pruned_frequency.wrapping_add(1);
                continue;
            }
            if let Some(prev) = prev
                && !macs_ok(&[prev, depth], 0, 2, self.rules.macs)
            {
                self.stats.pruned_macs = self.stats.pruned_macs.wrapping_add(1);
                continue;
            }
            buf.commit(depth);
            self.descend(buf, sink);
            buf.retract();
        }
    }

    #[inline]
    fn self_check(&self, key: &[Depth]) {
        debug_assert!(
            crate::constraints::is_valid_key(key, &self.rules),
            "enumerated a key that fails the full check: {key:?} under {:?}",
            self.rules
        );
    }
}
