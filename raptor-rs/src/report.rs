//! Test records and the Markdown report rendered from them.

use serde_json::Value;
use std::fmt::{self, Write};

pub const REPORT_TITLE: &str = "RSSL Subcontractor API — Test Report";
pub const API_VERSION: &str = "v0 (simulation)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => f.write_str("PASS"),
            TestStatus::Fail => f.write_str("FAIL"),
            TestStatus::Skip => f.write_str("SKIP"),
        }
    }
}

/// One checked condition inside a test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assertion {
    pub description: String,
    pub passed: bool,
}

/// Outcome of a single test, as it appears in the report.
///
/// Steps build a record with [`TestRecord::new`] and call
/// [`TestRecord::check`] for every condition. Checks never short-circuit, so
/// each one shows up individually.
#[derive(Clone, Debug)]
pub struct TestRecord {
    pub name: String,
    pub method: String,
    pub endpoint: String,
    pub request_body: Option<Value>,
    pub response: Option<Value>,
    pub assertions: Vec<Assertion>,
    skipped: bool,
}

impl TestRecord {
    pub fn new(method: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            method: method.into(),
            endpoint: endpoint.into(),
            request_body: None,
            response: None,
            assertions: vec![],
            skipped: false,
        }
    }

    /// A test that could not run because a prerequisite is missing. It
    /// carries a single failing assertion explaining why.
    pub fn skipped(reason: &str) -> Self {
        let mut record = Self::new("N/A", "N/A");
        record.skipped = true;
        record.check(format!("SKIPPED: {reason}"), false);
        record
    }

    pub fn with_request(mut self, body: Value) -> Self {
        self.request_body = Some(body);
        self
    }

    pub fn with_response(mut self, body: Value) -> Self {
        self.response = Some(body);
        self
    }

    pub fn check(&mut self, description: impl Into<String>, passed: bool) -> &mut Self {
        self.assertions.push(Assertion {
            description: description.into(),
            passed,
        });
        self
    }

    pub fn passed(&self) -> bool {
        !self.skipped && self.assertions.iter().all(|assertion| assertion.passed)
    }

    pub fn status(&self) -> TestStatus {
        if self.skipped {
            TestStatus::Skip
        } else if self.passed() {
            TestStatus::Pass
        } else {
            TestStatus::Fail
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage rounded to one decimal place; 0 for an empty run.
    pub pass_rate: f64,
}

/// Every record of a run, in execution order.
#[derive(Clone, Debug, Default)]
pub struct Report {
    pub records: Vec<TestRecord>,
}

impl Report {
    pub fn push(&mut self, record: TestRecord) {
        self.records.push(record)
    }

    /// Skipped tests count as failures.
    pub fn summary(&self) -> Summary {
        let total = self.records.len();
        let passed = self
            .records
            .iter()
            .filter(|record| record.status() == TestStatus::Pass)
            .count();
        let pass_rate = if total == 0 {
            0.0
        } else {
            (passed as f64 / total as f64 * 1000.0).round() / 10.0
        };

        Summary {
            total,
            passed,
            failed: total - passed,
            pass_rate,
        }
    }

    /// Renders the Markdown report. Output depends only on the records and
    /// the two strings passed in.
    pub fn render_markdown(&self, generated_at: &str, target: &str) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_markdown(&mut out, generated_at, target);
        out
    }

    fn write_markdown(&self, out: &mut String, generated_at: &str, target: &str) -> fmt::Result {
        let summary = self.summary();
        let pass_rate = if summary.total == 0 {
            "0".to_string()
        } else {
            format!("{:.1}", summary.pass_rate)
        };

        writeln!(out, "# {REPORT_TITLE}")?;
        writeln!(out)?;
        writeln!(out, "**Generated:** {generated_at}")?;
        writeln!(out, "**Target:** `{target}`")?;
        writeln!(out, "**API Version:** {API_VERSION}")?;
        writeln!(out)?;
        writeln!(out, "## Summary")?;
        writeln!(out)?;
        writeln!(out, "| Metric | Count |")?;
        writeln!(out, "|--------|-------|")?;
        writeln!(out, "| Total tests | {} |", summary.total)?;
        writeln!(out, "| Passed | {} |", summary.passed)?;
        writeln!(out, "| Failed | {} |", summary.failed)?;
        writeln!(out, "| Pass rate | {pass_rate}% |")?;
        writeln!(out)?;
        writeln!(out, "---")?;
        writeln!(out)?;

        for (index, record) in self.records.iter().enumerate() {
            writeln!(out, "## {}. {}", index + 1, record.name)?;
            writeln!(out)?;
            writeln!(out, "| | |")?;
            writeln!(out, "|---|---|")?;
            writeln!(out, "| **Status** | `{}` |", record.status())?;
            writeln!(out, "| **HTTP Method** | `{}` |", record.method)?;
            writeln!(out, "| **Endpoint** | `{}` |", record.endpoint)?;
            writeln!(out)?;

            if let Some(body) = &record.request_body {
                write_json_block(out, "Request Body", body)?;
            }
            if let Some(body) = &record.response {
                write_json_block(out, "API Response", body)?;
            }

            writeln!(out, "**Assertions:**")?;
            writeln!(out)?;
            for assertion in &record.assertions {
                let mark = if assertion.passed { "[x]" } else { "[ ]" };
                writeln!(out, "- {mark} {}", assertion.description)?;
            }
            writeln!(out)?;
            writeln!(out, "---")?;
            writeln!(out)?;
        }

        Ok(())
    }
}

fn write_json_block(out: &mut String, label: &str, body: &Value) -> fmt::Result {
    let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
    writeln!(out, "**{label}:**")?;
    writeln!(out)?;
    writeln!(out, "```json")?;
    writeln!(out, "{pretty}")?;
    writeln!(out, "```")?;
    writeln!(out)
}
