/// Failures surfaced by [`crate::Client`] and the suite runner.
///
/// Nothing is retried or recovered locally; every variant is handed straight
/// back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A protected operation was invoked before `authenticate` succeeded.
    /// Raised before any request is built, so nothing reaches the network.
    #[error("No access token. Call authenticate first.")]
    AuthenticationRequired,

    /// The token endpoint answered but did not hand out a usable token.
    #[error("token response missing access_token: {response}")]
    AuthenticationFailed { response: String },

    /// Connection failure, timeout, or a non-2xx status.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("failed to parse JSON response: {0}")]
    ResponseDecode(#[from] serde_json::Error),
}
