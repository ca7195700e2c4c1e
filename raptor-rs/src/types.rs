use serde::{Deserialize, Serialize};
use std::fmt;

pub type SampleID = u64;
pub type ResultID = u64;

/// Client-credentials pair handed to the token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /oauth2/token`.
#[derive(Clone, Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub grant_type: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// A lab specimen as served by `GET /samples` and `GET /samples/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub sample_number: SampleID,
    pub rssl_code: String,
    pub description: String,
}

/// A named measurement attached to a sample.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleResult {
    pub result_number: ResultID,
    pub sample_number: SampleID,
    pub result_name: String,
    pub result_value: String,
}

/// Payload for creating a result, alone or as part of a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResult {
    pub result_name: String,
    #[serde(default)]
    pub result_value: String,
}

impl NewResult {
    pub fn new(result_name: impl Into<String>, result_value: impl Into<String>) -> Self {
        Self {
            result_name: result_name.into(),
            result_value: result_value.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct BatchCreateRequest<'a> {
    pub results: &'a [NewResult],
}

#[derive(Clone, Debug, Serialize)]
pub struct UpdateResultRequest<'a> {
    pub result_value: &'a str,
}
