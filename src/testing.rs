//! Testing utilities for keyspace consumers.
//!
//! - **Assertions**: check emitted keys against the whole-key rules and check
//!   sampling frequencies against their expected rate
//! - **Fixtures**: keyspaces with independently computed counts, and a helper
//!   that measures how often each item survives a sampling procedure
//!
//! # Quick Start
//!
//! ```
//! use keyspace::testing::*;
//! use keyspace::{ExecMode, Runner};
//!
//! # fn main() -> anyhow::Result<()> {
//! for fixture in small_keyspaces() {
//!     let outcome = Runner::new(ExecMode::Sequential)
//!         .with_sample_size(10)
//!         .run(&fixture.rules)?;
//!     assert_eq!(outcome.legal_keys, fixture.legal_keys);
//!     assert_all_keys_valid(&outcome.samples, &fixture.rules);
//! }
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
