use anyhow::Result;
use keyspace::config::{DEFAULT_SEED, KeyspaceConfig};
use keyspace::validation::Validate;
use keyspace::{ExecMode, KeyRules};
use std::io::Write;

#[test]
fn defaults_are_the_reference_run() {
    let c = KeyspaceConfig::default();
    assert_eq!(c.rules(), KeyRules::new(10, 6, 4));
    assert_eq!(c.sample_size, 0);
    assert_eq!(c.seed, DEFAULT_SEED);
    assert_eq!(c.exec_mode(), ExecMode::Parallel { threads: None, split_depth: 1 });
    assert!(c.validate().is_ok());
}

#[test]
fn partial_json_keeps_defaults() -> Result<()> {
    let c = KeyspaceConfig::from_json_str(r#"{ "length": 8, "macs": 2, "sample_size": 4 }"#)?;
    assert_eq!(c.rules(), KeyRules::new(8, 6, 2));
    assert_eq!(c.sample_size, 4);
    assert_eq!(c.split_depth, 1);
    Ok(())
}

#[test]
fn unknown_fields_are_rejected() {
    let err = KeyspaceConfig::from_json_str(r#"{ "lenght": 8 }"#).unwrap_err();
    assert!(format!("{err:#}").contains("lenght"));
}

#[test]
fn sequential_flag_selects_sequential_mode() -> Result<()> {
    let c = KeyspaceConfig::from_json_str(r#"{ "sequential": true, "threads": 4 }"#)?;
    assert_eq!(c.exec_mode(), ExecMode::Sequential);
    Ok(())
}

#[test]
fn validation_reports_every_bad_field() {
    let c = KeyspaceConfig {
        length: 0,
        depths: 300,
        threads: Some(0),
        ..KeyspaceConfig::default()
    };
    let errors = c.validate().unwrap_err();
    let fields: Vec<_> = errors.iter().filter_map(|e| e.field.as_deref()).collect();
    assert_eq!(fields, vec!["length", "depths", "threads"]);

    let msg = format!("{:#}", c.validated().unwrap_err());
    assert!(msg.contains("invalid keyspace config"));
    assert!(msg.contains("[depths]"));
}

#[test]
fn split_depth_must_fit_the_key() {
    let c = KeyspaceConfig {
        length: 4,
        split_depth: 5,
        ..KeyspaceConfig::default()
    };
    let errors = c.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field.as_deref(), Some("split_depth"));
    assert_eq!(errors[0].code.as_deref(), Some("out_of_range"));
}

#[test]
fn largest_depth_count_is_allowed() {
    let c = KeyspaceConfig {
        depths: 256,
        ..KeyspaceConfig::default()
    };
    assert!(c.validated().is_ok());
}

#[test]
fn loads_from_file() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, r#"{{ "length": 6, "depths": 4, "macs": 2, "seed": 9 }}"#)?;
    let c = KeyspaceConfig::from_json_file(file.path())?.validated()?;
    assert_eq!(c.seed, 9);

    let out = c.runner().run(&c.rules())?;
    assert_eq!(out.legal_keys, 1554);
    Ok(())
}

#[test]
fn missing_file_names_the_path() {
    let err = KeyspaceConfig::from_json_file("/nonexistent/keyspace.json").unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/keyspace.json"));
}

#[test]
fn config_round_trips_through_json() -> Result<()> {
    let c = KeyspaceConfig {
        threads: Some(2),
        sample_size: 7,
        ..KeyspaceConfig::default()
    };
    let back = KeyspaceConfig::from_json_str(&serde_json::to_string(&c)?)?;
    assert_eq!(back, c);
    Ok(())
}

#[test]
fn key_rules_validate_on_their_own() {
    assert!(KeyRules::new(2, 256, 0).validate().is_ok());
    let errors = KeyRules::new(0, 257, 1).validate().unwrap_err();
    let fields: Vec<_> = errors.iter().filter_map(|e| e.field.as_deref()).collect();
    assert_eq!(fields, vec!["length", "depths"]);
}
