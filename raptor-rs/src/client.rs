use crate::error::Error;
use crate::types::{
    BatchCreateRequest, Credentials, NewResult, ResultID, SampleID, TokenRequest,
    UpdateResultRequest,
};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://staging.api.rssl.com";
pub const API_PREFIX: &str = "/raptor/v0";
pub const TOKEN_PATH: &str = "/oauth2/token";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to build a [`Client`]. Cloning a config is how a second,
/// independent client against the same service is made.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Wraps the Raptor v0 HTTP API.
///
/// The client starts without a token. [`Client::authenticate`] stores one and
/// every other operation sends it as a bearer token; calling them earlier
/// fails with [`Error::AuthenticationRequired`] without touching the network.
#[derive(Clone, Debug)]
pub struct Client {
    config: ClientConfig,
    http: reqwest::Client,
    access_token: Option<String>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self {
            config,
            http,
            access_token: None,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Runs the client-credentials grant and keeps the returned token for
    /// subsequent calls.
    pub async fn authenticate(&mut self) -> Result<&str, Error> {
        let credentials = &self.config.credentials;
        let body = TokenRequest {
            grant_type: "client_credentials",
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
        };
        let request = self.request(Method::POST, TOKEN_PATH).json(&body);
        let data = self.send(request).await?;

        let token = match data.get("access_token").and_then(Value::as_str) {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => {
                return Err(Error::AuthenticationFailed {
                    response: data.to_string(),
                })
            }
        };

        debug!("stored access token");
        Ok(self.access_token.insert(token).as_str())
    }

    /// GET /samples
    pub async fn list_samples(&self) -> Result<Value, Error> {
        let request = self.authorized(Method::GET, &format!("{API_PREFIX}/samples"))?;
        self.send(request).await
    }

    /// GET /samples/{id}
    pub async fn get_sample(&self, sample_id: SampleID) -> Result<Value, Error> {
        let request =
            self.authorized(Method::GET, &format!("{API_PREFIX}/samples/{sample_id}"))?;
        self.send(request).await
    }

    /// GET /samples/{id}/results
    pub async fn list_results(&self, sample_id: SampleID) -> Result<Value, Error> {
        let request = self.authorized(Method::GET, &results_path(sample_id))?;
        self.send(request).await
    }

    /// POST /samples/{id}/results with a single result.
    pub async fn create_result(
        &self,
        sample_id: SampleID,
        result_name: &str,
        result_value: &str,
    ) -> Result<Value, Error> {
        let body = NewResult::new(result_name, result_value);
        let request = self
            .authorized(Method::POST, &results_path(sample_id))?
            .json(&body);
        self.send(request).await
    }

    /// POST /samples/{id}/results with several results in one request.
    pub async fn create_results(
        &self,
        sample_id: SampleID,
        results: &[NewResult],
    ) -> Result<Value, Error> {
        let request = self
            .authorized(Method::POST, &results_path(sample_id))?
            .json(&BatchCreateRequest { results });
        self.send(request).await
    }

    /// GET /samples/{id}/results/{id}
    pub async fn get_result(
        &self,
        sample_id: SampleID,
        result_id: ResultID,
    ) -> Result<Value, Error> {
        let request = self.authorized(Method::GET, &result_path(sample_id, result_id))?;
        self.send(request).await
    }

    /// PUT /samples/{id}/results/{id}. Only the value of a result can change.
    pub async fn update_result(
        &self,
        sample_id: SampleID,
        result_id: ResultID,
        result_value: &str,
    ) -> Result<Value, Error> {
        let request = self
            .authorized(Method::PUT, &result_path(sample_id, result_id))?
            .json(&UpdateResultRequest { result_value });
        self.send(request).await
    }

    /// DELETE /samples/{id}/results/{id}
    pub async fn delete_result(
        &self,
        sample_id: SampleID,
        result_id: ResultID,
    ) -> Result<Value, Error> {
        let request = self.authorized(Method::DELETE, &result_path(sample_id, result_id))?;
        self.send(request).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        debug!(%method, %url, "building request");
        self.http.request(method, url)
    }

    // The token check must stay ahead of request construction.
    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, Error> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(Error::AuthenticationRequired)?;

        Ok(self
            .request(method, path)
            .header(AUTHORIZATION, format!("Bearer {token}")))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, Error> {
        let response = request.send().await?.error_for_status()?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "received response");

        Ok(serde_json::from_str(&body)?)
    }
}

fn results_path(sample_id: SampleID) -> String {
    format!("{API_PREFIX}/samples/{sample_id}/results")
}

fn result_path(sample_id: SampleID, result_id: ResultID) -> String {
    format!("{API_PREFIX}/samples/{sample_id}/results/{result_id}")
}
