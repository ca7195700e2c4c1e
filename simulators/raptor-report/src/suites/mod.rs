pub mod auth;
pub mod constants;
pub mod results;
pub mod samples;
mod utils;

use raptor::{Suite, TestSpec};

use self::auth::{test_authentication_enforcement, test_fetch_access_token};
use self::constants::SUITE_NAME;
use self::results::{
    test_create_batch_results, test_create_single_result, test_delete_result,
    test_get_single_result, test_list_results, test_update_result, test_verify_deletion,
};
use self::samples::{test_get_sample, test_list_samples};

/// The full, order-dependent Raptor API suite.
pub fn raptor_api_suite() -> Suite {
    let mut suite = Suite {
        name: SUITE_NAME.to_string(),
        description: "Exercises every Raptor v0 endpoint against a live service:
        authentication, sample reads, and the full result lifecycle. Later tests
        use identifiers discovered by earlier ones."
            .to_string(),
        tests: vec![],
    };

    suite.add(TestSpec {
        name: "Authenticate — fetch access token".to_string(),
        description: "Runs the client-credentials grant.".to_string(),
        always_run: true,
        run: test_fetch_access_token,
    });

    suite.add(TestSpec {
        name: "List all samples".to_string(),
        description: "".to_string(),
        always_run: false,
        run: test_list_samples,
    });

    suite.add(TestSpec {
        name: "Get a single sample".to_string(),
        description: "".to_string(),
        always_run: false,
        run: test_get_sample,
    });

    suite.add(TestSpec {
        name: "List results for a sample".to_string(),
        description: "".to_string(),
        always_run: false,
        run: test_list_results,
    });

    suite.add(TestSpec {
        name: "Create a single result".to_string(),
        description: "Creates a result and finds its id by listing.".to_string(),
        always_run: false,
        run: test_create_single_result,
    });

    suite.add(TestSpec {
        name: "Create multiple results (batch)".to_string(),
        description: "Creates two results in one request.".to_string(),
        always_run: false,
        run: test_create_batch_results,
    });

    suite.add(TestSpec {
        name: "Get a single result".to_string(),
        description: "".to_string(),
        always_run: false,
        run: test_get_single_result,
    });

    suite.add(TestSpec {
        name: "Update a result value".to_string(),
        description: "".to_string(),
        always_run: false,
        run: test_update_result,
    });

    suite.add(TestSpec {
        name: "Delete a result".to_string(),
        description: "".to_string(),
        always_run: false,
        run: test_delete_result,
    });

    suite.add(TestSpec {
        name: "Verify deleted result is gone".to_string(),
        description: "Also removes the batch-created results.".to_string(),
        always_run: false,
        run: test_verify_deletion,
    });

    suite.add(TestSpec {
        name: "Unauthenticated request is rejected by client".to_string(),
        description: "A fresh client must refuse protected calls before any request.".to_string(),
        always_run: false,
        run: test_authentication_enforcement,
    });

    suite
}
