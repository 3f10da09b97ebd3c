use keyspace::constraints::*;

#[test]
fn macs_checks_only_the_requested_window() {
    let key = [0u8, 3, 3, 1];
    assert!(!macs_ok(&key, 0, 2, 2));
    assert!(macs_ok(&key, 1, 3, 0));
    assert!(macs_ok(&key, 2, 4, 2));
    assert!(!macs_ok(&key, 0, 4, 2));
    assert!(macs_ok(&key, 0, 4, 3));
}

#[test]
fn macs_window_edges_are_vacuous() {
    let key = [0u8, 9];
    assert!(macs_ok(&key, 0, 1, 0));
    assert!(macs_ok(&key, 1, 1, 0));
    assert!(macs_ok(&key, 2, 0, 0));
    // end past the key is clamped
    assert!(!macs_ok(&key, 0, 10, 8));
}

#[test]
fn frequency_cap_is_half_the_full_length() {
    let freqs = [2u32, 0, 1];
    // length 6 -> cap 3
    assert!(frequency_ok(&freqs, 0, 6));
    assert!(frequency_ok(&freqs, 1, 6));
    // length 5 -> cap 2
    assert!(!frequency_ok(&freqs, 0, 5));
    assert!(frequency_ok(&freqs, 2, 5));
    // length 1 -> cap 0, nothing fits
    assert!(!frequency_ok(&[0], 0, 1));
}

#[test]
fn triple_check_looks_at_the_last_three_committed() {
    let key = [1u8, 1, 1, 2];
    assert!(no_three_consecutive(&key, 0));
    assert!(no_three_consecutive(&key, 2));
    assert!(!no_three_consecutive(&key, 3));
    assert!(no_three_consecutive(&key, 4));
}

#[test]
fn short_keys_never_form_triples() {
    assert!(no_three_consecutive(&[], 0));
    assert!(no_three_consecutive(&[4], 1));
    assert!(no_three_consecutive(&[4, 4], 2));
    assert!(slow_no_three_consecutive(&[4, 4]));
}

#[test]
fn slow_validators_scan_the_whole_key() {
    assert!(slow_macs(&[0, 2, 4, 2], 2));
    assert!(!slow_macs(&[0, 2, 5, 2], 2));

    assert!(slow_frequency(&[0, 1, 0, 1], 2));
    assert!(!slow_frequency(&[0, 1, 0, 0], 2));
    assert!(!slow_frequency(&[0, 7], 2), "out-of-range depth");

    assert!(slow_no_three_consecutive(&[0, 0, 1, 1, 0, 0]));
    assert!(!slow_no_three_consecutive(&[0, 1, 1, 1, 0]));
}

#[test]
fn is_valid_key_combines_every_rule() {
    let rules = KeyRules::new(4, 3, 1);
    assert!(is_valid_key(&[0, 1, 1, 2], &rules));
    assert!(!is_valid_key(&[0, 2, 1, 1], &rules), "macs");
    assert!(!is_valid_key(&[1, 1, 1, 0], &rules), "frequency and triple");
    assert!(!is_valid_key(&[0, 1, 1], &rules), "length");
    assert!(!is_valid_key(&[0, 1, 2, 3], &rules), "depth range");
}

#[test]
fn key_rules_helpers() {
    let rules = KeyRules::new(7, 5, 3);
    assert_eq!(rules.frequency_cap(), 3);
    assert_eq!(KeyRules::new(1, 5, 3).frequency_cap(), 0);
}
