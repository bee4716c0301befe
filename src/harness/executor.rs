//! Test execution
//!
//! [`TestHarness::perform_test`] is the whole pipeline for one test case:
//! resolve, write the three fixture files, invoke the runner, classify. Suites
//! are plain sequential loops over it; nothing here runs concurrently.

use super::catalog::Catalog;
use super::config::HarnessConfig;
use super::error::HarnessResult;
use super::fixture::FixtureWriter;
use super::process::{CommandRunner, ProcessRunner, RunnerInvocation};
use super::report::{ReportGenerator, SuiteReport};
use super::resolver::QueryResolver;
use super::verdict::classify;
use std::time::Instant;

/// Result of one test invocation
#[derive(Debug, Clone, PartialEq)]
pub struct TestOutcome {
    pub test_name: String,

    /// Whether the runner output carried the pass marker
    pub passed: bool,

    /// Raw runner output
    pub output: String,

    /// Runner exit code, if any. Not used for classification.
    pub exit_code: Option<i32>,

    /// Query references that contributed nothing to the script
    pub missing_queries: Vec<String>,

    pub duration_ms: u64,
}

impl TestOutcome {
    /// `(passed, raw_output)`
    pub fn into_parts(self) -> (bool, String) {
        (self.passed, self.output)
    }
}

/// Assertion message for a failed outcome
pub fn failure_message(outcome: &TestOutcome) -> String {
    format!("TEST FAILED!!\n{}", outcome.output)
}

/// Owns the catalogs, the fixture location and the runner
pub struct TestHarness<R: ProcessRunner = CommandRunner> {
    catalog: Catalog,
    fixtures: FixtureWriter,
    runner: R,
}

impl TestHarness<CommandRunner> {
    /// Load catalogs and build the real runner from config
    pub fn from_config(config: &HarnessConfig) -> HarnessResult<Self> {
        let catalog = Catalog::load(config)?;
        Ok(Self::new(
            catalog,
            FixtureWriter::from_config(config),
            CommandRunner::from_config(&config.runner),
        ))
    }
}

impl<R: ProcessRunner> TestHarness<R> {
    pub fn new(catalog: Catalog, fixtures: FixtureWriter, runner: R) -> Self {
        Self {
            catalog,
            fixtures,
            runner,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn fixtures(&self) -> &FixtureWriter {
        &self.fixtures
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn resolver(&self) -> QueryResolver<'_> {
        QueryResolver::new(&self.catalog)
    }

    /// Resolve, materialize, run and classify one test case.
    ///
    /// Errors only for an unknown test name or a fixture write failure. A
    /// runner that cannot start yields a failed outcome, not an error.
    pub fn perform_test(&self, test_name: &str) -> HarnessResult<TestOutcome> {
        let start = Instant::now();

        let resolved = self.resolver().resolve(test_name)?;
        let paths = self.fixtures.write(&resolved)?;

        log::info!("Performing test-execution for '{}'...", test_name);
        let output = self.runner.run(&RunnerInvocation::from(paths));

        let passed = classify(&output.text).is_passed();
        if passed {
            log::info!("Test '{}' passed", test_name);
        } else {
            log::info!(
                "Test '{}' failed (exit code: {:?})",
                test_name,
                output.exit_code
            );
        }

        Ok(TestOutcome {
            test_name: resolved.test_name,
            passed,
            output: output.text,
            exit_code: output.exit_code,
            missing_queries: resolved.missing_queries,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Run the named test cases one after another, each exactly once.
    /// A case that errors is recorded and the run continues.
    pub fn run_suite<S: AsRef<str>>(&self, suite: &str, names: &[S]) -> SuiteReport {
        let mut report = ReportGenerator::new(suite);

        for name in names {
            let name = name.as_ref();
            let start = Instant::now();
            match self.perform_test(name) {
                Ok(outcome) => report.add_outcome(&outcome),
                Err(e) => {
                    log::error!("Test '{}' could not be executed: {}", name, e);
                    report.add_error(name, &e, start.elapsed().as_millis() as u64);
                }
            }
        }

        report.generate()
    }

    /// Run every catalog test case in declaration order
    pub fn run_all(&self, suite: &str) -> SuiteReport {
        let names: Vec<String> = self
            .catalog
            .test_cases
            .names()
            .into_iter()
            .map(str::to_string)
            .collect();
        self.run_suite(suite, &names)
    }
}
