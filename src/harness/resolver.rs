//! Query library resolver
//!
//! Maps a test-case name to the composed SQL script plus the literal input and
//! expected-output datasets. Fragments are concatenated in declaration order
//! with nothing inserted between them; duplicates are resolved independently.

use super::catalog::{Catalog, QueryCatalog};
use super::error::{HarnessError, HarnessResult};

/// Everything needed to materialize one fixture set
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFixture {
    pub test_name: String,

    /// Concatenated SQL script
    pub script: String,

    /// Input dataset text
    pub input: String,

    /// Expected output dataset text
    pub output: String,

    /// Query references that contributed nothing, in declaration order
    pub missing_queries: Vec<String>,
}

/// Resolves test cases against a borrowed catalog
#[derive(Debug, Clone, Copy)]
pub struct QueryResolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> QueryResolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Resolve a test case by exact name.
    ///
    /// Unknown query references do not fail resolution: they are left out of
    /// the script and reported in [`ResolvedFixture::missing_queries`].
    pub fn resolve(&self, test_name: &str) -> HarnessResult<ResolvedFixture> {
        log::info!("Parsing transformer test-data for '{}'...", test_name);

        let case = self.catalog.test_cases.find(test_name).ok_or_else(|| {
            HarnessError::UnknownTestCase {
                name: test_name.to_string(),
            }
        })?;

        let (script, missing_queries) = compose_script(&self.catalog.queries, &case.sql_queries);

        for name in &missing_queries {
            log::warn!(
                "Test case '{}' references unknown query '{}'; it contributes nothing",
                test_name,
                name
            );
        }

        Ok(ResolvedFixture {
            test_name: case.name.clone(),
            script,
            input: case.input.clone(),
            output: case.output.clone(),
            missing_queries,
        })
    }

    /// Compose a script from query names using this resolver's catalog
    pub fn compose_script(&self, names: &[String]) -> (String, Vec<String>) {
        compose_script(&self.catalog.queries, names)
    }
}

/// Concatenate fragments in order. Returns the script and the names that
/// were not found.
pub fn compose_script(queries: &QueryCatalog, names: &[String]) -> (String, Vec<String>) {
    log::debug!("Parsing query-string from {} fragments...", names.len());

    let mut script = String::new();
    let mut missing = Vec::new();

    for name in names {
        match queries.get(name) {
            Some(text) => script.push_str(text),
            None => missing.push(name.clone()),
        }
    }

    (script, missing)
}
