//! Keying constraints.
//!
//! Three rules decide whether a key is legal:
//!
//! - **MACS** (maximum adjacent cut specification): adjacent cuts differ by at
//!   most `macs` depths.
//! - **EN-1303 frequency**: no depth occupies more than `floor(length / 2)`
//!   positions of the full key.
//! - **EN-1303 no triples**: no three consecutive cuts share a depth.
//!
//! The enumerator only uses the incremental forms ([`macs_ok`] on the newest
//! pair, [`frequency_ok`], [`no_three_consecutive`]), each O(1) per extension.
//! The `slow_*` validators rescan a whole key and exist for self-checks and
//! test oracles.

use crate::key::Depth;
use serde::{Deserialize, Serialize};

/// The parameters that define a keyspace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyRules {
    /// Number of cuts per key (`n`).
    pub length: usize,
    /// Number of distinct depth values (`h`).
    pub depths: usize,
    /// Largest allowed difference between adjacent cuts.
    pub macs: u32,
}

impl KeyRules {
    #[must_use]
    pub const fn new(length: usize, depths: usize, macs: u32) -> Self {
        Self {
            length,
            depths,
            macs,
        }
    }

    /// Most positions any single depth may take in a full key.
    #[inline]
    #[must_use]
    pub const fn frequency_cap(&self) -> usize {
        self.length / 2
    }
}

#[inline]
fn cut_distance(a: Depth, b: Depth) -> u32 {
    u32::from(a.abs_diff(b))
}

/// Every adjacent pair in `key[begin..end]` differs by at most `macs`.
///
/// The enumerator calls this with `end - begin == 2` on the newest pair only;
/// earlier pairs were checked when they were committed.
#[inline]
#[must_use]
pub fn macs_ok(key: &[Depth], begin: usize, end: usize, macs: u32) -> bool {
    let end = end.min(key.len());
    if end <= begin {
        return true;
    }
    key[begin..end]
        .windows(2)
        .all(|w| cut_distance(w[0], w[1]) <= macs)
}

/// Placing one more `value` keeps its count within `floor(length / 2)`.
#[inline]
#[must_use]
pub fn frequency_ok(freqs: &[u32], value: Depth, length: usize) -> bool {
    (freqs[usize::from(value)] as usize) < length / 2
}

/// The last three of the first `size` cuts are not all equal.
///
/// Vacuously true for `size < 3`.
#[inline]
#[must_use]
pub fn no_three_consecutive(key: &[Depth], size: usize) -> bool {
    if size < 3 {
        return true;
    }
    !(key[size - 1] == key[size - 2] && key[size - 2] == key[size - 3])
}

/// Whole-key MACS check.
#[must_use]
pub fn slow_macs(key: &[Depth], macs: u32) -> bool {
    macs_ok(key, 0, key.len(), macs)
}

/// Whole-key frequency check, counting from scratch.
#[must_use]
pub fn slow_frequency(key: &[Depth], depths: usize) -> bool {
    let mut counts = vec![0usize; depths.max(1)];
    for &d in key {
        let Some(slot) = counts.get_mut(usize::from(d)) else {
            return false;
        };
        *slot += 1;
    }
    counts.iter().all(|&c| c <= key.len() / 2)
}

/// Whole-key scan for three equal consecutive cuts.
#[must_use]
pub fn slow_no_three_consecutive(key: &[Depth]) -> bool {
    key.windows(3).all(|w| !(w[0] == w[1] && w[1] == w[2]))
}

/// A complete key is legal under `rules`.
#[must_use]
pub fn is_valid_key(key: &[Depth], rules: &KeyRules) -> bool {
    key.len() == rules.length
        && key.iter().all(|&d| usize::from(d) < rules.depths)
        && slow_macs(key, rules.macs)
        && slow_frequency(key, rules.depths)
        && slow_no_three_consecutive(key)
}
