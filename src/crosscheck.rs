//! Independent counters used to check the enumerator.
//!
//! None of these share code with the depth-first search:
//!
//! - [`brute_force`] generates all `depths^length` sequences and filters them
//!   with the whole-key validators.
//! - [`count_by_state_graph`] walks the keyspace level by level over states
//!   `(frequency table, last two cuts)` and adds up path counts.
//! - [`count_macs_only`] counts sequences under the MACS bound alone, via
//!   powers of the depth adjacency matrix.

use crate::constraints::{KeyRules, is_valid_key};
use crate::key::{Depth, Key};
use std::collections::HashMap;

/// Every legal key, in lexicographic order. Exponential; small inputs only.
#[must_use]
pub fn brute_force(rules: &KeyRules) -> Vec<Key> {
    let mut keys = Vec::new();
    if rules.depths == 0 || rules.depths > usize::from(Depth::MAX) + 1 {
        return keys;
    }
    let top = (rules.depths - 1) as Depth;
    let mut seq: Vec<Depth> = vec![0; rules.length];
    loop {
        if is_valid_key(&seq, rules) {
            keys.push(Key::from(seq.as_slice()));
        }
        // odometer increment, last position fastest
        let mut pos = rules.length;
        loop {
            if pos == 0 {
                return keys;
            }
            pos -= 1;
            if seq[pos] < top {
                seq[pos] += 1;
                break;
            }
            seq[pos] = 0;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct KeyState {
    freqs: Vec<u32>,
    tail: (Option<Depth>, Option<Depth>),
}

/// Count legal keys by dynamic programming over key states.
///
/// Two prefixes with the same frequency table and the same last two cuts
/// have exactly the same legal completions, so prefixes are merged by state
/// and only their multiplicities are carried forward.
#[must_use]
pub fn count_by_state_graph(rules: &KeyRules) -> u64 {
    let cap = rules.frequency_cap() as u32;
    let mut level: HashMap<KeyState, u64> = HashMap::new();
    level.insert(
        KeyState {
            freqs: vec![0; rules.depths],
            tail: (None, None),
        },
        1,
    );

    for _ in 0..rules.length {
        let mut next: HashMap<KeyState, u64> = HashMap::with_capacity(level.len());
        for (state, paths) in &level {
            let (before, last) = state.tail;
            #[allow(clippy::cast_possible_truncation)]
            for cut in (0..rules.depths).map(|d| d as Depth) {
                if before == Some(cut) && last == Some(cut) {
                    continue;
                }
                if let Some(last) = last
                    && u32::from(last.abs_diff(cut)) > rules.macs
                {
                    continue;
                }
                if state.freqs[usize::from(cut)] + 1 > cap {
                    continue;
                }
                let mut freqs = state.freqs.clone();
                freqs[usize::from(cut)] += 1;
                let entry = next
                    .entry(KeyState {
                        freqs,
                        tail: (last, Some(cut)),
                    })
                    .or_insert(0);
                *entry = entry.wrapping_add(*paths);
            }
        }
        level = next;
    }

    level.values().fold(0u64, |acc, &p| acc.wrapping_add(p))
}

type Matrix = Vec<Vec<u64>>;

fn identity(size: usize) -> Matrix {
    (0..size)
        .map(|i| (0..size).map(|j| u64::from(i == j)).collect())
        .collect()
}

fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
    let size = a.len();
    let mut out = vec![vec![0u64; size]; size];
    for i in 0..size {
        for k in 0..size {
            let aik = a[i][k];
            if aik == 0 {
                continue;
            }
            for j in 0..size {
                out[i][j] = out[i][j].wrapping_add(aik.wrapping_mul(b[k][j]));
            }
        }
    }
    out
}

/// Sequences of `length` cuts over `depths` values with adjacent cuts at most
/// `macs` apart, ignoring both EN-1303 rules.
///
/// Entry `(i, j)` of `A^(length-1)` counts such sequences starting at depth
/// `i` and ending at depth `j`, where `A[i][j] = 1` iff `|i - j| <= macs`.
/// Wraps on overflow.
#[must_use]
pub fn count_macs_only(length: usize, depths: usize, macs: u32) -> u64 {
    if length == 0 {
        return 1;
    }
    let adjacency: Matrix = (0..depths)
        .map(|i| {
            (0..depths)
                .map(|j| u64::from(i.abs_diff(j) <= macs as usize))
                .collect()
        })
        .collect();

    let mut result = identity(depths);
    let mut base = adjacency;
    let mut exp = length - 1;
    while exp > 0 {
        if exp & 1 == 1 {
            result = multiply(&result, &base);
        }
        base = multiply(&base, &base);
        exp >>= 1;
    }

    result
        .iter()
        .flatten()
        .fold(0u64, |acc, &x| acc.wrapping_add(x))
}
