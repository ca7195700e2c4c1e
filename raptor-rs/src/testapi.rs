use crate::report::{Report, TestRecord, TestStatus};
use crate::types::{ResultID, SampleID};
use crate::{Client, Error, TestMatcher};
use ::std::{boxed::Box, future::Future, pin::Pin};
use async_trait::async_trait;
use core::fmt::Debug;
use dyn_clone::DynClone;
use tracing::{info, warn};

pub type AsyncTestFunc = for<'a> fn(
    &'a mut Client,
    &'a mut RunContext,
) -> Pin<
    Box<
        dyn Future<Output = Result<TestRecord, Error>> // future API / pollable
            + Send // required by non-single-threaded executors
            + 'a,
    >,
>;

/// State handed from one step of a run to the next.
///
/// Later steps depend on identifiers discovered by earlier ones; keeping
/// them here makes that dependency part of every step's signature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunContext {
    pub sample_id: SampleID,
    /// Result created by the single-create step, once it has been found again.
    pub created_result_id: Option<ResultID>,
    /// Results created by the batch step; removed during cleanup.
    pub batch_result_ids: Vec<ResultID>,
}

impl RunContext {
    pub fn new(sample_id: SampleID) -> Self {
        Self {
            sample_id,
            ..Default::default()
        }
    }
}

#[async_trait]
pub trait Testable: DynClone + Send + Sync {
    fn name(&self) -> &str;

    /// Tests that run even when the name does not match the test pattern.
    fn always_run(&self) -> bool {
        false
    }

    async fn run_test(
        &self,
        client: &mut Client,
        context: &mut RunContext,
    ) -> Result<TestRecord, Error>;
}

impl Debug for dyn Testable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Testable({})", self.name())
    }
}

dyn_clone::clone_trait_object!(Testable);
/// Description of a test suite
#[derive(Clone, Debug)]
pub struct Suite {
    pub name: String,
    pub description: String,
    pub tests: Vec<Box<dyn Testable>>,
}

impl Suite {
    pub fn add<T: Testable + 'static>(&mut self, test: T) {
        self.tests.push(Box::new(test))
    }
}

#[derive(Clone)]
pub struct TestSpec {
    // These fields end up in the report. Be sure to add
    // a meaningful name here.
    pub name: String,
    pub description: String,
    // If AlwaysRun is true, the test will run even if Name does not match the test
    // pattern. Steps that every later step relies on, such as authentication,
    // should set it.
    pub always_run: bool,
    // The Run function is invoked when the test executes.
    pub run: AsyncTestFunc,
}

#[async_trait]
impl Testable for TestSpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn always_run(&self) -> bool {
        self.always_run
    }

    async fn run_test(
        &self,
        client: &mut Client,
        context: &mut RunContext,
    ) -> Result<TestRecord, Error> {
        let mut record = (self.run)(client, context).await?;
        record.name = self.name.clone();
        Ok(record)
    }
}

/// Runs every suite in order and collects one record per executed test.
///
/// A step that returns an error aborts the whole run; the error is passed
/// back unchanged.
pub async fn run_suite(
    client: &mut Client,
    context: &mut RunContext,
    test_matcher: Option<&TestMatcher>,
    suites: Vec<Suite>,
) -> Result<Report, Error> {
    let mut report = Report::default();

    for suite in suites {
        if let Some(test_match) = test_matcher {
            if !test_match.match_test(&suite.name, "") {
                continue;
            }
        }

        info!(suite = %suite.name, tests = suite.tests.len(), "starting suite");

        for test in &suite.tests {
            if let Some(test_match) = test_matcher {
                if !test.always_run() && !test_match.match_test(&suite.name, test.name()) {
                    continue;
                }
            }

            let record = test.run_test(client, context).await?;
            match record.status() {
                TestStatus::Skip => warn!(test = %record.name, "skipped"),
                status => info!(test = %record.name, %status, "finished"),
            }
            report.push(record);
        }

        info!(suite = %suite.name, "finished suite");
    }

    Ok(report)
}
