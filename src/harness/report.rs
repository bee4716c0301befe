//! Suite report generation
//!
//! Generates suite reports in multiple formats:
//! - Text (human-readable console output)
//! - JSON (machine-readable)
//! - JUnit XML (CI/CD integration)

use super::error::HarnessError;
use super::executor::TestOutcome;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Complete suite run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite name
    pub suite: String,

    /// Run ID
    pub run_id: String,

    /// Start time (RFC 3339)
    pub start_time: String,

    /// End time (RFC 3339)
    pub end_time: String,

    /// Total duration in milliseconds
    pub duration_ms: u64,

    pub summary: SuiteSummary,

    /// Per-case results, in execution order
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    /// True when every case passed
    pub fn all_passed(&self) -> bool {
        self.summary.failed == 0 && self.summary.errors == 0
    }
}

/// Summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,

    /// Cases that could not be executed at all
    pub errors: usize,
}

/// Report for a single test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    pub name: String,

    pub status: CaseStatus,

    pub duration_ms: u64,

    /// Raw runner output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Harness error if the case could not be executed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_queries: Vec<String>,
}

/// Test case status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Passed,
    Failed,
    Error,
}

/// Collects case results while a suite runs
pub struct ReportGenerator {
    suite: String,
    run_id: String,
    cases: Vec<CaseReport>,
    start_time: chrono::DateTime<chrono::Utc>,
}

impl ReportGenerator {
    pub fn new(suite: &str) -> Self {
        let start_time = chrono::Utc::now();
        Self {
            suite: suite.to_string(),
            run_id: generate_run_id(&start_time),
            cases: Vec::new(),
            start_time,
        }
    }

    pub fn add_outcome(&mut self, outcome: &TestOutcome) {
        self.cases.push(CaseReport {
            name: outcome.test_name.clone(),
            status: if outcome.passed {
                CaseStatus::Passed
            } else {
                CaseStatus::Failed
            },
            duration_ms: outcome.duration_ms,
            output: Some(outcome.output.clone()),
            error: None,
            missing_queries: outcome.missing_queries.clone(),
        });
    }

    pub fn add_error(&mut self, name: &str, error: &HarnessError, duration_ms: u64) {
        self.cases.push(CaseReport {
            name: name.to_string(),
            status: CaseStatus::Error,
            duration_ms,
            output: None,
            error: Some(error.to_string()),
            missing_queries: Vec::new(),
        });
    }

    pub fn generate(&self) -> SuiteReport {
        let end_time = chrono::Utc::now();
        let duration = end_time - self.start_time;

        SuiteReport {
            suite: self.suite.clone(),
            run_id: self.run_id.clone(),
            start_time: self.start_time.to_rfc3339(),
            end_time: end_time.to_rfc3339(),
            duration_ms: duration.num_milliseconds().max(0) as u64,
            summary: self.calculate_summary(),
            cases: self.cases.clone(),
        }
    }

    fn calculate_summary(&self) -> SuiteSummary {
        let count = |status: CaseStatus| self.cases.iter().filter(|c| c.status == status).count();

        SuiteSummary {
            total: self.cases.len(),
            passed: count(CaseStatus::Passed),
            failed: count(CaseStatus::Failed),
            errors: count(CaseStatus::Error),
        }
    }
}

/// Short hex id derived from the start timestamp
fn generate_run_id(start: &chrono::DateTime<chrono::Utc>) -> String {
    format!("{:x}", start.timestamp_millis().rem_euclid(0xFFFFFF))
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Junit,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "junit" | "xml" => Ok(OutputFormat::Junit),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Write report to output
pub fn write_report(
    report: &SuiteReport,
    format: OutputFormat,
    writer: &mut dyn Write,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => write_text_report(report, writer),
        OutputFormat::Json => write_json_report(report, writer),
        OutputFormat::Junit => write_junit_report(report, writer),
    }
}

fn write_text_report(report: &SuiteReport, writer: &mut dyn Write) -> std::io::Result<()> {
    writeln!(writer, "\nTransformer Test Report")?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "Suite: {}", report.suite)?;
    writeln!(writer, "Run ID: {}", report.run_id)?;
    writeln!(writer, "Duration: {}ms", report.duration_ms)?;

    for case in &report.cases {
        let status = match case.status {
            CaseStatus::Passed => "PASSED",
            CaseStatus::Failed => "FAILED",
            CaseStatus::Error => "ERROR",
        };
        writeln!(writer, "\n[{}] {} ({}ms)", status, case.name, case.duration_ms)?;

        if !case.missing_queries.is_empty() {
            writeln!(
                writer,
                "   Missing queries: {}",
                case.missing_queries.join(", ")
            )?;
        }

        if let Some(ref error) = case.error {
            writeln!(writer, "   ERROR: {}", error)?;
        }

        if case.status == CaseStatus::Failed {
            if let Some(ref output) = case.output {
                writeln!(writer, "   TEST FAILED!!")?;
                for line in output.lines() {
                    writeln!(writer, "   | {}", line)?;
                }
            }
        }
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "there are {} passed and {} failed tests",
        report.summary.passed,
        report.summary.failed + report.summary.errors
    )?;

    Ok(())
}

fn write_json_report(report: &SuiteReport, writer: &mut dyn Write) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    writeln!(writer, "{}", json)
}

fn write_junit_report(report: &SuiteReport, writer: &mut dyn Write) -> std::io::Result<()> {
    let seconds = report.duration_ms as f64 / 1000.0;

    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        writer,
        r#"<testsuites name="{}" tests="{}" failures="{}" errors="{}" time="{:.3}">"#,
        escape_xml(&report.suite),
        report.summary.total,
        report.summary.failed,
        report.summary.errors,
        seconds
    )?;
    writeln!(
        writer,
        r#"  <testsuite name="{}" tests="{}" failures="{}" errors="{}" time="{:.3}">"#,
        escape_xml(&report.suite),
        report.cases.len(),
        report.summary.failed,
        report.summary.errors,
        seconds
    )?;

    for case in &report.cases {
        writeln!(
            writer,
            r#"    <testcase name="{}" classname="{}" time="{:.3}">"#,
            escape_xml(&case.name),
            escape_xml(&report.suite),
            case.duration_ms as f64 / 1000.0
        )?;

        match case.status {
            CaseStatus::Failed => {
                writeln!(writer, r#"      <failure message="TEST FAILED!!">"#)?;
                if let Some(ref output) = case.output {
                    writeln!(writer, "{}", escape_xml(output))?;
                }
                writeln!(writer, "      </failure>")?;
            }
            CaseStatus::Error => {
                if let Some(ref error) = case.error {
                    writeln!(
                        writer,
                        r#"      <error message="{}">{}</error>"#,
                        escape_xml(error),
                        escape_xml(error)
                    )?;
                }
            }
            CaseStatus::Passed => {}
        }

        writeln!(writer, "    </testcase>")?;
    }

    writeln!(writer, "  </testsuite>")?;
    writeln!(writer, "</testsuites>")?;

    Ok(())
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
