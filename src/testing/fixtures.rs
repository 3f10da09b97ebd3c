//! Keyspaces with known counts and sampling-frequency helpers.

use crate::constraints::KeyRules;

/// A keyspace and its number of legal keys, computed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownKeyspace {
    pub rules: KeyRules,
    pub legal_keys: u64,
}

const fn known(length: usize, depths: usize, macs: u32, legal_keys: u64) -> KnownKeyspace {
    KnownKeyspace {
        rules: KeyRules::new(length, depths, macs),
        legal_keys,
    }
}

/// Keyspaces small enough for brute force, including the degenerate ones.
///
/// # Example
///
/// ```
/// use keyspace::testing::small_keyspaces;
///
/// assert!(small_keyspaces().iter().any(|k| k.legal_keys == 0));
/// ```
#[must_use]
pub fn small_keyspaces() -> Vec<KnownKeyspace> {
    vec![
        known(1, 1, 0, 0),
        known(1, 3, 0, 0),
        known(2, 2, 0, 0),
        known(2, 2, 1, 2),
        known(2, 3, 5, 6),
        known(3, 2, 1, 0),
        known(3, 3, 0, 0),
        known(4, 3, 1, 22),
        known(4, 3, 2, 54),
        known(5, 3, 1, 20),
        known(6, 3, 2, 420),
        known(6, 4, 2, 1554),
    ]
}

/// Larger keyspaces, too big for brute force in a test.
#[must_use]
pub fn medium_keyspaces() -> Vec<KnownKeyspace> {
    vec![
        known(7, 5, 9, 58_980),
        known(8, 4, 1, 1_242),
        known(8, 5, 4, 310_000),
        known(10, 4, 1, 6_848),
    ]
}

/// The original default run: ten cuts, six depths, MACS four.
#[must_use]
pub const fn reference_keyspace() -> KnownKeyspace {
    known(10, 6, 4, 30_336_792)
}

/// Run `sample` for `trials` rounds and count how often each of `universe`
/// items was returned. `sample` gets the round number, usable as a seed.
///
/// # Panics
///
/// Panics if `sample` returns an item `>= universe`.
///
/// # Example
///
/// ```
/// use keyspace::combiners::Reservoir;
/// use keyspace::testing::inclusion_counts;
///
/// let hits = inclusion_counts(10, 100, |round| {
///     let mut r = Reservoir::new(3, round);
///     (0..10).for_each(|x| r.offer(x));
///     r.into_items()
/// });
/// assert_eq!(hits.iter().sum::<u64>(), 300);
/// ```
pub fn inclusion_counts<F>(universe: usize, trials: u64, mut sample: F) -> Vec<u64>
where
    F: FnMut(u64) -> Vec<usize>,
{
    let mut hits = vec![0u64; universe];
    for round in 0..trials {
        for item in sample(round) {
            hits[item] += 1;
        }
    }
    hits
}
