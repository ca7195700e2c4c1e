use super::constants::{VISIBLE_CREDENTIAL_CHARS, VISIBLE_TOKEN_CHARS};
use raptor::utils::redact;
use raptor::{dyn_async, Client, Error, RunContext, TestRecord, TOKEN_PATH};
use serde_json::json;

dyn_async! {
    pub async fn test_fetch_access_token<'a>(client: &'a mut Client, _context: &'a mut RunContext) -> Result<TestRecord, Error> {
        let credentials = client.config().credentials.clone();
        let token = client.authenticate().await?.to_string();

        let mut record = TestRecord::new("POST", TOKEN_PATH)
            .with_request(json!({
                "grant_type": "client_credentials",
                "client_id": redact(&credentials.client_id, VISIBLE_CREDENTIAL_CHARS),
                "client_secret": redact(&credentials.client_secret, VISIBLE_CREDENTIAL_CHARS),
            }))
            .with_response(json!({
                "access_token": redact(&token, VISIBLE_TOKEN_CHARS),
                "token_type": "bearer",
            }));
        record.check("Token is a non-empty string", !token.is_empty());

        Ok(record)
    }
}

dyn_async! {
    // A second client built from the same settings has never authenticated,
    // so the guard must fire before any request leaves the process.
    pub async fn test_authentication_enforcement<'a>(client: &'a mut Client, _context: &'a mut RunContext) -> Result<TestRecord, Error> {
        let unauthenticated = Client::new(client.config().clone())?;

        let error_message = match unauthenticated.list_samples().await {
            Err(err @ Error::AuthenticationRequired) => Some(err.to_string()),
            Err(err) => return Err(err),
            Ok(_) => None,
        };

        let mut record = TestRecord::new("N/A", "N/A (client-side guard)")
            .with_response(json!({ "error": error_message }));
        record
            .check("AuthenticationRequired error is raised", error_message.is_some())
            .check(
                "Error message mentions missing token",
                error_message.as_deref().is_some_and(|message| message.contains("No access token")),
            );

        Ok(record)
    }
}
