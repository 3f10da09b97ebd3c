//! Assertion functions for keys and samples.

use crate::constraints::{
    KeyRules, is_valid_key, slow_frequency, slow_macs, slow_no_three_consecutive,
};
use crate::key::Key;
use std::collections::HashSet;
use std::fmt::Debug;

/// Assert that two slices are equal element by element, in order.
///
/// # Panics
///
/// Panics on a length mismatch or at the first differing index.
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(a, e, "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}");
    }
}

/// Assert that every key is legal under `rules`, naming the rule a bad key breaks.
///
/// # Panics
///
/// Panics on the first illegal key.
///
/// # Example
///
/// ```
/// use keyspace::constraints::KeyRules;
/// use keyspace::key::Key;
/// use keyspace::testing::assert_all_keys_valid;
///
/// let rules = KeyRules::new(4, 3, 1);
/// assert_all_keys_valid(&[Key(vec![0, 1, 1, 2])], &rules);
/// ```
pub fn assert_all_keys_valid(keys: &[Key], rules: &KeyRules) {
    for (i, key) in keys.iter().enumerate() {
        if is_valid_key(key.depths(), rules) {
            continue;
        }
        let d = key.depths();
        panic!(
            "Illegal key at index {i}: {key:?} under {rules:?}\n  length ok: {}\n  depths in range: {}\n  macs ok: {}\n  frequency ok: {}\n  no triples: {}",
            d.len() == rules.length,
            d.iter().all(|&x| usize::from(x) < rules.depths),
            slow_macs(d, rules.macs),
            slow_frequency(d, rules.depths),
            slow_no_three_consecutive(d),
        );
    }
}

/// Assert that no key appears twice.
///
/// # Panics
///
/// Panics naming the first duplicate.
pub fn assert_keys_distinct(keys: &[Key]) {
    let mut seen = HashSet::with_capacity(keys.len());
    for (i, key) in keys.iter().enumerate() {
        assert!(seen.insert(key), "Duplicate key at index {i}: {key:?}");
    }
}

/// Assert that every observed inclusion rate is within `tolerance` of `expected`.
///
/// `hits[i]` is how many of `trials` runs included item `i`.
///
/// # Panics
///
/// Panics naming the worst item if any rate is out of tolerance.
///
/// # Example
///
/// ```
/// use keyspace::testing::assert_inclusion_rates;
///
/// assert_inclusion_rates(&[498, 502, 500], 1000, 0.5, 0.01);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn assert_inclusion_rates(hits: &[u64], trials: u64, expected: f64, tolerance: f64) {
    assert!(trials > 0, "no trials");
    let worst = hits
        .iter()
        .enumerate()
        .map(|(i, &h)| (i, h as f64 / trials as f64))
        .max_by(|a, b| (a.1 - expected).abs().total_cmp(&(b.1 - expected).abs()));
    if let Some((i, rate)) = worst {
        assert!(
            (rate - expected).abs() <= tolerance,
            "Inclusion rate out of tolerance for item {i}:\n  Expected: {expected:.5} ± {tolerance}\n  Actual: {rate:.5}\n  Hits: {hits:?}"
        );
    }
}
