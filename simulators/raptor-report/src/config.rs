use anyhow::{bail, Context};
use raptor::types::{Credentials, SampleID};
use raptor::{ClientConfig, TestMatcher, DEFAULT_BASE_URL};
use std::env;
use std::time::Duration;

pub const BASE_URL_VAR: &str = "RAPTOR_BASE_URL";
pub const CLIENT_ID_VAR: &str = "RAPTOR_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "RAPTOR_CLIENT_SECRET";
pub const TIMEOUT_VAR: &str = "RAPTOR_TIMEOUT_SECS";
pub const SAMPLE_ID_VAR: &str = "RAPTOR_SAMPLE_ID";
pub const TEST_PATTERN_VAR: &str = "RAPTOR_TEST_PATTERN";

pub const DEFAULT_SAMPLE_ID: SampleID = 101;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for one report run.
#[derive(Clone, Debug)]
pub struct Config {
    pub client: ClientConfig,
    pub sample_id: SampleID,
    pub test_matcher: Option<TestMatcher>,
}

impl Config {
    /// Reads the run settings from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let client_id = match non_empty(CLIENT_ID_VAR) {
            Some(client_id) => client_id,
            None => bail!("{CLIENT_ID_VAR} environment variable not set"),
        };
        let client_secret = match non_empty(CLIENT_SECRET_VAR) {
            Some(client_secret) => client_secret,
            None => bail!("{CLIENT_SECRET_VAR} environment variable not set"),
        };

        let base_url = non_empty(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match non_empty(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{TIMEOUT_VAR} must be a whole number of seconds"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("{TIMEOUT_VAR} must be greater than zero");
        }

        let sample_id = match non_empty(SAMPLE_ID_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<SampleID>()
                .with_context(|| format!("{SAMPLE_ID_VAR} must be a sample number"))?,
            None => DEFAULT_SAMPLE_ID,
        };

        let test_matcher = match non_empty(TEST_PATTERN_VAR) {
            Some(pattern) => Some(
                TestMatcher::new(&pattern)
                    .with_context(|| format!("invalid {TEST_PATTERN_VAR} {pattern:?}"))?,
            ),
            None => None,
        };

        let client = ClientConfig::new(Credentials::new(client_id, client_secret))
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(timeout_secs));

        Ok(Self {
            client,
            sample_id,
            test_matcher,
        })
    }
}
