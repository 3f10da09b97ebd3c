//! Run configuration.
//!
//! [`KeyspaceConfig`] gathers everything a run needs: the keyspace parameters,
//! the sample size and seed, and how to execute. It deserializes from JSON
//! with defaults for every field, so a file only has to name what it changes:
//!
//! ```json
//! { "length": 12, "depths": 6, "macs": 3, "sample_size": 5 }
//! ```

use crate::constraints::KeyRules;
use crate::runner::{ExecMode, Runner};
use crate::validation::{
    ValidationError, ValidationResult, Validate, combine_validations, into_anyhow, validators,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 0xFEDE123;

/// Largest supported depth count; depths are stored as `u8`.
pub const MAX_DEPTHS: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyspaceConfig {
    /// Cuts per key.
    pub length: usize,
    /// Distinct depth values.
    pub depths: usize,
    /// Maximum adjacent cut difference.
    pub macs: u32,
    /// Keys to sample uniformly; `0` disables sampling.
    pub sample_size: usize,
    pub seed: u64,
    /// Prefix length fixed per partition.
    pub split_depth: usize,
    /// Worker threads; defaults to the smaller of partition count and CPUs.
    pub threads: Option<usize>,
    /// Run the whole search as one partition on the calling thread.
    pub sequential: bool,
}

impl Default for KeyspaceConfig {
    fn default() -> Self {
        Self {
            length: 10,
            depths: 6,
            macs: 4,
            sample_size: 0,
            seed: DEFAULT_SEED,
            split_depth: 1,
            threads: None,
            sequential: false,
        }
    }
}

impl KeyspaceConfig {
    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON or unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parsing keyspace config")
    }

    /// Read and parse a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// This config, if it passes [`Validate`].
    ///
    /// # Errors
    ///
    /// Returns an error listing every invalid field.
    pub fn validated(self) -> Result<Self> {
        into_anyhow("keyspace config", self.validate())?;
        Ok(self)
    }

    #[must_use]
    pub const fn rules(&self) -> KeyRules {
        KeyRules::new(self.length, self.depths, self.macs)
    }

    #[must_use]
    pub const fn exec_mode(&self) -> ExecMode {
        if self.sequential {
            ExecMode::Sequential
        } else {
            ExecMode::Parallel {
                threads: self.threads,
                split_depth: self.split_depth,
            }
        }
    }

    /// A runner for this config. Does not validate.
    #[must_use]
    pub fn runner(&self) -> Runner {
        Runner::new(self.exec_mode())
            .with_sample_size(self.sample_size)
            .with_seed(self.seed)
    }
}

impl Validate for KeyRules {
    fn validate(&self) -> ValidationResult {
        combine_validations(vec![
            validators::at_least("length", self.length, 1),
            validators::in_range("depths", self.depths, 1, MAX_DEPTHS),
        ])
    }
}

impl Validate for KeyspaceConfig {
    fn validate(&self) -> ValidationResult {
        let threads = match self.threads {
            Some(0) => Err(vec![
                ValidationError::field("threads", "must be at least 1 when set").with_code("too_small"),
            ]),
            _ => Ok(()),
        };
        let split = if self.length >= 1 {
            validators::in_range("split_depth", self.split_depth, 1, self.length)
        } else {
            Ok(())
        };
        combine_validations(vec![
            self.rules().validate(),
            split,
            threads,
        ])
    }
}
