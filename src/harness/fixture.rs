//! Fixture file materialization
//!
//! Three files at fixed locations, overwritten on every run and never cleaned
//! up. Runs sharing a fixture directory must not overlap.

use super::config::{FixtureNames, HarnessConfig};
use super::error::{HarnessError, HarnessResult};
use super::resolver::ResolvedFixture;
use std::path::{Path, PathBuf};

/// Locations of the fixture files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePaths {
    pub statements: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Writes resolved fixtures into a directory
#[derive(Debug, Clone)]
pub struct FixtureWriter {
    dir: PathBuf,
    names: FixtureNames,
}

impl FixtureWriter {
    pub fn new(dir: impl Into<PathBuf>, names: FixtureNames) -> Self {
        Self {
            dir: dir.into(),
            names,
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.fixture_dir_path(), config.fixtures.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn paths(&self) -> FixturePaths {
        FixturePaths {
            statements: self.dir.join(&self.names.statements),
            input: self.dir.join(&self.names.input),
            output: self.dir.join(&self.names.output),
        }
    }

    /// Write script, input and output, in that order, replacing any previous
    /// content.
    pub fn write(&self, fixture: &ResolvedFixture) -> HarnessResult<FixturePaths> {
        log::info!(
            "Updating test files ({}, {}, {})",
            self.names.statements,
            self.names.input,
            self.names.output
        );

        std::fs::create_dir_all(&self.dir).map_err(|e| HarnessError::io(&self.dir, e))?;

        let paths = self.paths();
        write_file(&paths.statements, &fixture.script)?;
        write_file(&paths.input, &fixture.input)?;
        write_file(&paths.output, &fixture.output)?;

        Ok(paths)
    }
}

fn write_file(path: &Path, contents: &str) -> HarnessResult<()> {
    log::debug!("Writing test data into file {}", path.display());
    std::fs::write(path, contents).map_err(|e| HarnessError::io(path, e))
}
