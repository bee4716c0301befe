//! Transformer Test Harness
//!
//! Validates SQL transformation logic by assembling fixtures from a shared
//! query library and handing them to an external test runner:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Test Harness Flow                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  1. Look up the test case in the test-case catalog              │
//! │  2. Concatenate its query fragments, in declared order          │
//! │  3. Write statements / input / output fixture files             │
//! │  4. Run the external runner against those three paths           │
//! │  5. Classify its output: passed iff it contains "Test passed!"  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of it is synchronous and single-threaded. Every run writes to the same
//! fixture paths, so two runs sharing a fixture directory must never overlap.
//!
//! # Usage
//!
//! ```bash
//! # Run the whole catalog
//! transformer_test --config harness.yaml run
//!
//! # Run a single test case
//! transformer_test --config harness.yaml run transformer_blocks_test
//!
//! # Print the composed script for a test case
//! transformer_test --config harness.yaml resolve transformer_blocks_test
//!
//! # Check the catalogs for unknown query references
//! transformer_test --config harness.yaml check
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod executor;
pub mod fixture;
pub mod logging;
pub mod process;
pub mod report;
pub mod resolver;
pub mod verdict;

pub use catalog::{Catalog, QueryCatalog, TestCase, TestCaseCatalog};
pub use config::HarnessConfig;
pub use error::{HarnessError, HarnessResult};
pub use executor::{TestHarness, TestOutcome};
pub use process::{CommandRunner, ProcessRunner, RunnerInvocation, RunnerOutput};
pub use resolver::{QueryResolver, ResolvedFixture};
pub use verdict::{classify, Verdict, PASS_MARKER};
