pub const SUITE_NAME: &str = "raptor-api";

pub const SINGLE_RESULT_NAME: &str = "Report Test Single";
pub const SINGLE_RESULT_VALUE: &str = "99.9";
pub const UPDATED_RESULT_VALUE: &str = "UPDATED-777";

pub const BATCH_RESULT_A: (&str, &str) = ("Report Batch A", "10.0");
pub const BATCH_RESULT_B: (&str, &str) = ("Report Batch B", "20.0");

pub const MISSING_CREATED_RESULT: &str = "No result_id available from prior create";

// Characters of a credential or token left readable in the report.
pub const VISIBLE_CREDENTIAL_CHARS: usize = 9;
pub const VISIBLE_TOKEN_CHARS: usize = 41;
