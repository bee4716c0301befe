//! Harness configuration
//!
//! Describes where the catalogs live, where fixtures are materialized and how
//! the external test runner is invoked. Loaded from YAML; every field has a
//! default so an empty document yields the stock ksql-test-runner layout:
//!
//! ```yaml
//! root_dir: automation
//! queries_file: transformer_queries.json
//! test_data_file: test_files/transformer_test_data.json
//! fixture_dir: test_files
//! fixtures:
//!   statements: statements.sql
//!   input: input.json
//!   output: output.json
//! runner:
//!   program: ksql-test-runner
//!   script_flag: -s
//!   input_flag: -i
//!   output_flag: -o
//! ```

use super::error::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level harness configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Base directory for every relative path below
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Query catalog (JSON object: name -> SQL text)
    #[serde(default = "default_queries_file")]
    pub queries_file: PathBuf,

    /// Test-case catalog (JSON array of test records)
    #[serde(default = "default_test_data_file")]
    pub test_data_file: PathBuf,

    /// Directory the fixture files are written to
    #[serde(default = "default_fixture_dir")]
    pub fixture_dir: PathBuf,

    /// Fixture file names
    #[serde(default)]
    pub fixtures: FixtureNames,

    /// External runner invocation
    #[serde(default)]
    pub runner: RunnerConfig,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_queries_file() -> PathBuf {
    PathBuf::from("transformer_queries.json")
}

fn default_test_data_file() -> PathBuf {
    PathBuf::from("test_files/transformer_test_data.json")
}

fn default_fixture_dir() -> PathBuf {
    PathBuf::from("test_files")
}

/// File names of the three fixture artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureNames {
    #[serde(default = "default_statements")]
    pub statements: String,

    #[serde(default = "default_input")]
    pub input: String,

    #[serde(default = "default_output")]
    pub output: String,
}

fn default_statements() -> String {
    "statements.sql".to_string()
}

fn default_input() -> String {
    "input.json".to_string()
}

fn default_output() -> String {
    "output.json".to_string()
}

impl Default for FixtureNames {
    fn default() -> Self {
        Self {
            statements: default_statements(),
            input: default_input(),
            output: default_output(),
        }
    }
}

/// How to call the external test-execution binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    /// Program name or path
    #[serde(default = "default_program")]
    pub program: String,

    /// Extra leading arguments, placed before the fixture flags
    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default = "default_script_flag")]
    pub script_flag: String,

    #[serde(default = "default_input_flag")]
    pub input_flag: String,

    #[serde(default = "default_output_flag")]
    pub output_flag: String,
}

fn default_program() -> String {
    "ksql-test-runner".to_string()
}

fn default_script_flag() -> String {
    "-s".to_string()
}

fn default_input_flag() -> String {
    "-i".to_string()
}

fn default_output_flag() -> String {
    "-o".to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
            script_flag: default_script_flag(),
            input_flag: default_input_flag(),
            output_flag: default_output_flag(),
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            queries_file: default_queries_file(),
            test_data_file: default_test_data_file(),
            fixture_dir: default_fixture_dir(),
            fixtures: FixtureNames::default(),
            runner: RunnerConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Load config from a YAML file.
    ///
    /// A relative `root_dir` is taken relative to the directory containing
    /// the config file, so a config can sit next to its catalogs.
    pub fn from_file(path: impl AsRef<Path>) -> HarnessResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;

        let mut config = Self::from_yaml(&content, path.display().to_string())?;
        if config.root_dir.is_relative() {
            config.root_dir = config_base_dir(path).join(&config.root_dir);
        }
        Ok(config)
    }

    /// Parse config from a YAML string
    pub fn from_yaml(yaml: &str, file_name: String) -> HarnessResult<Self> {
        // An empty document deserializes to unit, not to a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| HarnessError::ConfigParse {
            message: e.to_string(),
            file: file_name,
        })
    }

    /// Set the base directory
    pub fn with_root_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.root_dir = dir.into();
        self
    }

    /// Set the fixture directory
    pub fn with_fixture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixture_dir = dir.into();
        self
    }

    /// Set the external runner program
    pub fn with_runner_program(mut self, program: impl Into<String>) -> Self {
        self.runner.program = program.into();
        self
    }

    /// Resolve a path against `root_dir` unless it is already absolute
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_dir.join(path)
        }
    }

    pub fn queries_path(&self) -> PathBuf {
        self.resolve_path(&self.queries_file)
    }

    pub fn test_data_path(&self) -> PathBuf {
        self.resolve_path(&self.test_data_file)
    }

    pub fn fixture_dir_path(&self) -> PathBuf {
        self.resolve_path(&self.fixture_dir)
    }
}

/// Parent directory of a config file, or `.` for a bare file name
fn config_base_dir(file_path: &Path) -> PathBuf {
    file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
