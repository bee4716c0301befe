//! Query and test-case catalogs
//!
//! Two static JSON sources feed the harness:
//! - the query catalog, an object mapping a fragment name to its SQL text
//! - the test-case catalog, an ordered array of test records
//!
//! Both are loaded once into a [`Catalog`] and never mutated afterwards.

use super::config::HarnessConfig;
use super::error::{HarnessError, HarnessResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Mapping from query fragment name to SQL text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryCatalog {
    queries: HashMap<String, String>,
}

impl QueryCatalog {
    pub fn new(queries: HashMap<String, String>) -> Self {
        Self { queries }
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> HarnessResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        Self::from_json(&content, path.display().to_string())
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str, file_name: String) -> HarnessResult<Self> {
        serde_json::from_str(json).map_err(|e| HarnessError::CatalogParse {
            message: e.to_string(),
            file: file_name,
        })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.queries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.queries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Query names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.queries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<const N: usize> From<[(&str, &str); N]> for QueryCatalog {
    fn from(entries: [(&str, &str); N]) -> Self {
        Self::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// A single named test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Lookup key
    pub name: String,

    /// Query fragment names, concatenated in this order
    #[serde(default)]
    pub sql_queries: Vec<String>,

    /// Input dataset, written verbatim to the input fixture
    #[serde(deserialize_with = "dataset_text")]
    pub input: String,

    /// Expected output dataset, written verbatim to the output fixture
    #[serde(deserialize_with = "dataset_text")]
    pub output: String,
}

impl TestCase {
    pub fn new(
        name: impl Into<String>,
        sql_queries: &[&str],
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sql_queries: sql_queries.iter().map(|q| q.to_string()).collect(),
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Accept a dataset either as a JSON string (kept verbatim) or as an inline
/// JSON document (serialized back to pretty JSON text).
fn dataset_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        other => serde_json::to_string_pretty(&other).map_err(serde::de::Error::custom),
    }
}

/// Ordered collection of test cases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestCaseCatalog {
    cases: Vec<TestCase>,
}

impl TestCaseCatalog {
    pub fn new(cases: Vec<TestCase>) -> Self {
        Self { cases }
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> HarnessResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        Self::from_json(&content, path.display().to_string())
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str, file_name: String) -> HarnessResult<Self> {
        serde_json::from_str(json).map_err(|e| HarnessError::CatalogParse {
            message: e.to_string(),
            file: file_name,
        })
    }

    /// First test case with exactly this name
    pub fn find(&self, name: &str) -> Option<&TestCase> {
        self.cases.iter().find(|c| c.name == name)
    }

    /// Test-case names in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// A test case referencing a query the query catalog does not define
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub test_case: String,
    pub query: String,
}

/// Both catalogs, loaded once per harness
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub queries: QueryCatalog,
    pub test_cases: TestCaseCatalog,
}

impl Catalog {
    pub fn new(queries: QueryCatalog, test_cases: TestCaseCatalog) -> Self {
        Self {
            queries,
            test_cases,
        }
    }

    /// Load both catalogs from the locations named in the config
    pub fn load(config: &HarnessConfig) -> HarnessResult<Self> {
        log::info!("Loading query catalog and test-case catalog...");

        let queries = QueryCatalog::from_file(config.queries_path())?;
        let test_cases = TestCaseCatalog::from_file(config.test_data_path())?;

        log::debug!(
            "Loaded {} queries and {} test cases",
            queries.len(),
            test_cases.len()
        );

        Ok(Self::new(queries, test_cases))
    }

    /// Every (test case, query) reference the query catalog cannot satisfy,
    /// in declaration order
    pub fn unresolved_references(&self) -> Vec<UnresolvedReference> {
        self.test_cases
            .iter()
            .flat_map(|case| {
                case.sql_queries
                    .iter()
                    .filter(|q| !self.queries.contains(q))
                    .map(|q| UnresolvedReference {
                        test_case: case.name.clone(),
                        query: q.clone(),
                    })
            })
            .collect()
    }

    /// Test-case names declared more than once; only the first is reachable
    pub fn duplicate_test_cases(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for case in self.test_cases.iter() {
            if !seen.insert(case.name.as_str()) && !duplicates.contains(&case.name) {
                duplicates.push(case.name.clone());
            }
        }
        duplicates
    }

    /// Explicit consistency check. Resolution never calls this.
    pub fn validate(&self) -> HarnessResult<()> {
        let mut problems: Vec<String> = self
            .duplicate_test_cases()
            .into_iter()
            .map(|name| format!("Duplicate test case name: {}", name))
            .collect();

        problems.extend(self.unresolved_references().into_iter().map(|r| {
            format!(
                "Test case '{}': references unknown query '{}'",
                r.test_case, r.query
            )
        }));

        if problems.is_empty() {
            Ok(())
        } else {
            Err(HarnessError::InvalidCatalog { problems })
        }
    }
}
