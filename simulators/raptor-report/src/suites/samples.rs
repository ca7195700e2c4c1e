use super::utils::{all_have_key, array_field, has_key};
use raptor::types::Sample;
use raptor::{dyn_async, Client, Error, RunContext, TestRecord, API_PREFIX};
use serde_json::Value;
use tracing::info;

dyn_async! {
    pub async fn test_list_samples<'a>(client: &'a mut Client, _context: &'a mut RunContext) -> Result<TestRecord, Error> {
        let response = client.list_samples().await?;
        let samples = array_field(&response, "samples");
        let entries = samples.map(Vec::as_slice).unwrap_or_default();

        let mut record = TestRecord::new("GET", format!("{API_PREFIX}/samples"));
        record
            .check("Response contains 'samples' key", has_key(&response, "samples"))
            .check("'samples' is an array", samples.is_some())
            .check("Array is not empty", !entries.is_empty())
            .check("Each sample has 'sample_number'", all_have_key(entries, "sample_number"))
            .check("Each sample has 'rssl_code'", all_have_key(entries, "rssl_code"))
            .check("Each sample has 'description'", all_have_key(entries, "description"));

        Ok(record.with_response(response))
    }
}

dyn_async! {
    pub async fn test_get_sample<'a>(client: &'a mut Client, context: &'a mut RunContext) -> Result<TestRecord, Error> {
        let sample_id = context.sample_id;
        let response = client.get_sample(sample_id).await?;

        if let Ok(sample) = serde_json::from_value::<Sample>(response.clone()) {
            info!(sample = sample.sample_number, code = %sample.rssl_code, "fetched sample");
        }

        let mut record = TestRecord::new("GET", format!("{API_PREFIX}/samples/{sample_id}"));
        record
            .check("Response contains 'sample_number'", has_key(&response, "sample_number"))
            .check(
                format!("sample_number matches requested id ({sample_id})"),
                response.get("sample_number").and_then(Value::as_u64) == Some(sample_id),
            )
            .check("Response contains 'rssl_code'", has_key(&response, "rssl_code"))
            .check("Response contains 'description'", has_key(&response, "description"));

        Ok(record.with_response(response))
    }
}
