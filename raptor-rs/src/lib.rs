#![warn(clippy::unwrap_used)]
mod client;
mod error;
mod macros;
pub mod report;
mod testapi;
mod testmatch;
pub mod types;
pub mod utils;

pub use client::{Client, ClientConfig, API_PREFIX, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, TOKEN_PATH};
pub use error::Error;
pub use report::{Assertion, Report, Summary, TestRecord, TestStatus};
pub use testapi::{run_suite, AsyncTestFunc, RunContext, Suite, TestSpec, Testable};
pub use testmatch::TestMatcher;
