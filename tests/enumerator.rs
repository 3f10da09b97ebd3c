use keyspace::crosscheck::brute_force;
use keyspace::testing::*;
use keyspace::{Enumerator, Key, KeyBuffer, KeyRules, NullSink, SearchStats, partitions};

fn enumerate(rules: KeyRules) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut buf = KeyBuffer::new(rules.length, rules.depths);
    let found = Enumerator::new(rules).run(&mut buf, &mut keys);
    assert_eq!(found as usize, keys.len());
    keys
}

#[test]
fn matches_brute_force_key_for_key() {
    for fixture in small_keyspaces() {
        let keys = enumerate(fixture.rules);
        assert_eq!(keys.len() as u64, fixture.legal_keys, "{:?}", fixture.rules);
        // depth-first in increasing depth order is lexicographic order
        assert_collections_equal(&keys, &brute_force(&fixture.rules));
    }
}

#[test]
fn worked_example_four_cuts_three_depths() {
    let keys = enumerate(KeyRules::new(4, 3, 2));
    assert_eq!(keys.len(), 54);
    assert_all_keys_valid(&keys, &KeyRules::new(4, 3, 2));
    assert_keys_distinct(&keys);
    assert!(keys.contains(&Key(vec![0, 0, 1, 1])));
    assert!(!keys.contains(&Key(vec![0, 0, 0, 1])));
    assert!(!keys.contains(&Key(vec![0, 0, 2, 0])));
}

#[test]
fn medium_keyspaces_count_correctly() {
    for fixture in medium_keyspaces() {
        let mut buf = KeyBuffer::new(fixture.rules.length, fixture.rules.depths);
        let found = Enumerator::new(fixture.rules).run(&mut buf, &mut NullSink);
        assert_eq!(found, fixture.legal_keys, "{:?}", fixture.rules);
    }
}

#[test]
fn buffer_is_restored_after_search() {
    let rules = KeyRules::new(6, 4, 2);
    let mut buf = KeyBuffer::with_prefix(6, 4, &[1, 3]);
    let before = buf.clone();
    Enumerator::new(rules).run(&mut buf, &mut NullSink);
    assert_eq!(buf.prefix(), before.prefix());
    assert_eq!(buf.frequencies(), before.frequencies());
}

#[test]
fn searching_from_a_prefix_finds_only_its_completions() {
    let rules = KeyRules::new(6, 4, 2);
    let mut keys: Vec<Key> = Vec::new();
    let mut buf = KeyBuffer::with_prefix(6, 4, &[1]);
    Enumerator::new(rules).run(&mut buf, &mut keys);
    assert_eq!(keys.len(), 429);
    assert!(keys.iter().all(|k| k.depths()[0] == 1));
    assert_all_keys_valid(&keys, &rules);
}

#[test]
fn stats_account_for_the_search() {
    let rules = KeyRules::new(4, 3, 1);
    let mut search = Enumerator::new(rules);
    let mut buf = KeyBuffer::new(4, 3);
    search.run(&mut buf, &mut NullSink);

    let stats = search.stats();
    assert_eq!(stats.keys, 22);
    assert!(stats.nodes > stats.keys);
    assert!(stats.pruned_macs > 0);
    assert!(stats.pruned_frequency > 0);
    // a cap of two rejects a third equal cut before the triple check can
    assert_eq!(stats.pruned_triple, 0);
}

#[test]
fn triple_check_prunes_once_the_cap_allows_three() {
    let rules = KeyRules::new(6, 3, 2);
    let mut search = Enumerator::new(rules);
    let mut buf = KeyBuffer::new(6, 3);
    assert_eq!(search.run(&mut buf, &mut NullSink), 420);
    assert!(search.stats().pruned_triple > 0);
}

#[test]
fn stats_wrap_silently_on_overflow() {
    let mut total = SearchStats {
        keys: u64::MAX,
        nodes: u64::MAX,
        pruned_frequency: u64::MAX,
        pruned_macs: 0,
        pruned_triple: u64::MAX - 1,
    };
    let mut search = Enumerator::new(KeyRules::new(4, 3, 2));
    search.run(&mut KeyBuffer::new(4, 3), &mut NullSink);
    total.merge(search.stats());

    let part = search.stats();
    assert_eq!(total.keys, part.keys - 1);
    assert_eq!(total.nodes, part.nodes - 1);
    assert_eq!(total.pruned_frequency, part.pruned_frequency - 1);
    assert_eq!(total.pruned_macs, part.pruned_macs);
    assert_eq!(total.pruned_triple, part.pruned_triple.wrapping_sub(2));
}

#[test]
fn repeated_runs_accumulate_stats_but_return_per_run_counts() {
    let rules = KeyRules::new(4, 3, 2);
    let mut search = Enumerator::new(rules);
    let mut buf = KeyBuffer::new(4, 3);
    assert_eq!(search.run(&mut buf, &mut NullSink), 54);
    assert_eq!(search.run(&mut buf, &mut NullSink), 54);
    assert_eq!(search.stats().keys, 108);
}

#[test]
fn stopping_early_reports_prefixes() {
    let rules = KeyRules::new(5, 3, 1);
    let mut prefixes: Vec<Key> = Vec::new();
    let mut buf = KeyBuffer::new(5, 3);
    Enumerator::new(rules).stopping_at(2).run(&mut buf, &mut prefixes);
    let expected: Vec<Key> = [[0, 0], [0, 1], [1, 0], [1, 1], [1, 2], [2, 1], [2, 2]]
        .into_iter()
        .map(|p| Key(p.to_vec()))
        .collect();
    assert_collections_equal(&prefixes, &expected);
}

#[test]
fn single_cut_keys_are_never_legal() {
    // floor(1 / 2) = 0 leaves no room for any depth
    for depths in 1..=4 {
        assert!(enumerate(KeyRules::new(1, depths, 3)).is_empty());
        assert!(partitions(&KeyRules::new(1, depths, 3), 1).is_empty());
    }
}

#[test]
fn non_binding_macs_leaves_only_en1303() {
    let loose = enumerate(KeyRules::new(6, 3, 2));
    let huge = enumerate(KeyRules::new(6, 3, 1_000));
    assert_eq!(loose, huge);
    assert_eq!(loose.len(), 420);
}
