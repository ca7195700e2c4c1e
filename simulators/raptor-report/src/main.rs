#![warn(clippy::unwrap_used)]

use anyhow::Context;
use raptor::{run_suite, Client, RunContext};
use raptor_report::config::Config;
use raptor_report::suites::raptor_api_suite;

const REPORT_PATH: &str = "test_report.md";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let target = config.client.base_url.clone();

    let mut client = Client::new(config.client).context("failed to build the API client")?;
    let mut context = RunContext::new(config.sample_id);

    let report = run_suite(
        &mut client,
        &mut context,
        config.test_matcher.as_ref(),
        vec![raptor_api_suite()],
    )
    .await
    .context("test run aborted")?;

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S %Z").to_string();
    let markdown = report.render_markdown(&generated_at, &target);
    std::fs::write(REPORT_PATH, markdown)
        .with_context(|| format!("failed to write {REPORT_PATH}"))?;

    let summary = report.summary();
    println!("Report written to {REPORT_PATH}");
    println!("{}/{} tests passed", summary.passed, summary.total);

    Ok(())
}
