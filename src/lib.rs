//! # transformer-harness
//!
//! A data-driven harness for SQL transformation tests. Test cases name an
//! ordered list of query fragments from a shared library plus literal input
//! and expected-output datasets; the harness composes the script, writes the
//! fixture files and lets an external runner (`ksql-test-runner` by default)
//! decide pass or fail.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use transformer_harness::harness::{HarnessConfig, TestHarness};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HarnessConfig::from_file("harness.yaml")?;
//!     let harness = TestHarness::from_config(&config)?;
//!
//!     let (passed, output) = harness.perform_test("transformer_blocks_test")?.into_parts();
//!     assert!(passed, "TEST FAILED!!\n{}", output);
//!     Ok(())
//! }
//! ```

pub mod harness;
