use super::constants::{
    BATCH_RESULT_A, BATCH_RESULT_B, MISSING_CREATED_RESULT, SINGLE_RESULT_NAME,
    SINGLE_RESULT_VALUE, UPDATED_RESULT_VALUE,
};
use super::utils::{all_have_key, array_field, find_result_by_name, has_key, str_field, u64_field};
use raptor::types::{NewResult, SampleID};
use raptor::{dyn_async, Client, Error, RunContext, TestRecord, API_PREFIX};
use serde_json::{json, Value};
use tracing::{debug, info};

fn results_endpoint(sample_id: SampleID) -> String {
    format!("{API_PREFIX}/samples/{sample_id}/results")
}

fn has_value(entry: Option<&Value>, value: &str) -> bool {
    entry.and_then(|entry| str_field(entry, "result_value")) == Some(value)
}

dyn_async! {
    pub async fn test_list_results<'a>(client: &'a mut Client, context: &'a mut RunContext) -> Result<TestRecord, Error> {
        let response = client.list_results(context.sample_id).await?;
        let results = array_field(&response, "results");

        let mut record = TestRecord::new("GET", results_endpoint(context.sample_id));
        record
            .check("Response contains 'results' key", has_key(&response, "results"))
            .check("'results' is an array", results.is_some());

        if let Some(entries) = results.filter(|entries| !entries.is_empty()) {
            record
                .check("Each result has 'result_number'", all_have_key(entries, "result_number"))
                .check("Each result has 'sample_number'", all_have_key(entries, "sample_number"))
                .check("Each result has 'result_name'", all_have_key(entries, "result_name"))
                .check("Each result has 'result_value'", all_have_key(entries, "result_value"));
        }

        Ok(record.with_response(response))
    }
}

dyn_async! {
    // Creation answers with an empty object, so the new id is only
    // discoverable by listing again.
    pub async fn test_create_single_result<'a>(client: &'a mut Client, context: &'a mut RunContext) -> Result<TestRecord, Error> {
        let sample_id = context.sample_id;
        let body = NewResult::new(SINGLE_RESULT_NAME, SINGLE_RESULT_VALUE);
        let response = client
            .create_result(sample_id, &body.result_name, &body.result_value)
            .await?;

        let results_after = client.list_results(sample_id).await?;
        let created = find_result_by_name(&results_after, SINGLE_RESULT_NAME);

        context.created_result_id = created.and_then(|entry| u64_field(entry, "result_number"));
        if let Some(result_id) = context.created_result_id {
            info!(result_id, "created single result");
        }

        let mut record = TestRecord::new("POST", results_endpoint(sample_id))
            .with_request(json!(body));
        record
            .check("API returns a hash (empty JSON object)", response.is_object())
            .check("New result appears in results list", created.is_some())
            .check(
                "Created result has correct name",
                created.and_then(|entry| str_field(entry, "result_name")) == Some(SINGLE_RESULT_NAME),
            )
            .check("Created result has correct value", has_value(created, SINGLE_RESULT_VALUE));

        Ok(record.with_response(response))
    }
}

dyn_async! {
    pub async fn test_create_batch_results<'a>(client: &'a mut Client, context: &'a mut RunContext) -> Result<TestRecord, Error> {
        let sample_id = context.sample_id;
        let batch = vec![
            NewResult::new(BATCH_RESULT_A.0, BATCH_RESULT_A.1),
            NewResult::new(BATCH_RESULT_B.0, BATCH_RESULT_B.1),
        ];
        let response = client.create_results(sample_id, &batch).await?;

        let results_after = client.list_results(sample_id).await?;
        let batch_a = find_result_by_name(&results_after, BATCH_RESULT_A.0);
        let batch_b = find_result_by_name(&results_after, BATCH_RESULT_B.0);

        context.batch_result_ids = [batch_a, batch_b]
            .into_iter()
            .flatten()
            .filter_map(|entry| u64_field(entry, "result_number"))
            .collect();
        debug!(ids = ?context.batch_result_ids, "created batch results");

        let mut record = TestRecord::new("POST", results_endpoint(sample_id))
            .with_request(json!({ "results": batch }));
        record
            .check("API returns a hash (empty JSON object)", response.is_object())
            .check("Batch result A appears in results list", batch_a.is_some())
            .check("Batch result B appears in results list", batch_b.is_some())
            .check("Batch result A has correct value", has_value(batch_a, BATCH_RESULT_A.1))
            .check("Batch result B has correct value", has_value(batch_b, BATCH_RESULT_B.1));

        Ok(record.with_response(response))
    }
}

dyn_async! {
    pub async fn test_get_single_result<'a>(client: &'a mut Client, context: &'a mut RunContext) -> Result<TestRecord, Error> {
        let Some(result_id) = context.created_result_id else {
            return Ok(TestRecord::skipped(MISSING_CREATED_RESULT));
        };
        let sample_id = context.sample_id;
        let response = client.get_result(sample_id, result_id).await?;

        let mut record = TestRecord::new("GET", format!("{}/{result_id}", results_endpoint(sample_id)));
        record
            .check(
                "result_number matches requested id",
                u64_field(&response, "result_number") == Some(result_id),
            )
            .check(
                format!("sample_number matches {sample_id}"),
                u64_field(&response, "sample_number") == Some(sample_id),
            )
            .check(
                format!("result_name is '{SINGLE_RESULT_NAME}'"),
                str_field(&response, "result_name") == Some(SINGLE_RESULT_NAME),
            )
            .check(
                format!("result_value is '{SINGLE_RESULT_VALUE}'"),
                str_field(&response, "result_value") == Some(SINGLE_RESULT_VALUE),
            );

        Ok(record.with_response(response))
    }
}

dyn_async! {
    pub async fn test_update_result<'a>(client: &'a mut Client, context: &'a mut RunContext) -> Result<TestRecord, Error> {
        let Some(result_id) = context.created_result_id else {
            return Ok(TestRecord::skipped(MISSING_CREATED_RESULT));
        };
        let sample_id = context.sample_id;
        let response = client
            .update_result(sample_id, result_id, UPDATED_RESULT_VALUE)
            .await?;
        let updated = client.get_result(sample_id, result_id).await?;

        let mut record = TestRecord::new("PUT", format!("{}/{result_id}", results_endpoint(sample_id)))
            .with_request(json!({ "result_value": UPDATED_RESULT_VALUE }));
        record
            .check("API returns a hash (empty JSON object)", response.is_object())
            .check(
                format!("result_value was updated to '{UPDATED_RESULT_VALUE}'"),
                str_field(&updated, "result_value") == Some(UPDATED_RESULT_VALUE),
            );

        Ok(record.with_response(response))
    }
}

dyn_async! {
    pub async fn test_delete_result<'a>(client: &'a mut Client, context: &'a mut RunContext) -> Result<TestRecord, Error> {
        let Some(result_id) = context.created_result_id else {
            return Ok(TestRecord::skipped(MISSING_CREATED_RESULT));
        };
        let sample_id = context.sample_id;
        let response = client.delete_result(sample_id, result_id).await?;

        let mut record = TestRecord::new("DELETE", format!("{}/{result_id}", results_endpoint(sample_id)));
        record.check("API returns a hash (empty JSON object)", response.is_object());

        Ok(record.with_response(response))
    }
}

dyn_async! {
    pub async fn test_verify_deletion<'a>(client: &'a mut Client, context: &'a mut RunContext) -> Result<TestRecord, Error> {
        let Some(result_id) = context.created_result_id else {
            return Ok(TestRecord::skipped(MISSING_CREATED_RESULT));
        };
        let sample_id = context.sample_id;
        let listing = client.list_results(sample_id).await?;
        let ids: Vec<u64> = array_field(&listing, "results")
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| u64_field(entry, "result_number"))
                    .collect()
            })
            .unwrap_or_default();

        let mut record = TestRecord::new("GET", results_endpoint(sample_id))
            .with_response(json!({ "remaining_result_ids": ids }));
        record.check(
            "Deleted result no longer appears in results list",
            !ids.contains(&result_id),
        );

        for batch_id in std::mem::take(&mut context.batch_result_ids) {
            client.delete_result(sample_id, batch_id).await?;
            debug!(result_id = batch_id, "removed batch result");
        }

        Ok(record)
    }
}
