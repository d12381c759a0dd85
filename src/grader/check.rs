//! Check evaluation.

use super::canonical::{encode_expected, encode_rows};
use super::result::CheckResult;
use crate::db::DatabaseClient;
use crate::exercise::Check;
use tracing::debug;

/// Runs one check against the sandbox and compares its rows to the expected literal.
///
/// Never fails: query, schema, scan and expected-literal problems all become a
/// failed result carrying the underlying diagnostic.
pub async fn run_check(db: &dyn DatabaseClient, check: &Check) -> CheckResult {
    let rows = match db.fetch_rows(&check.query).await {
        Ok(rows) => rows,
        Err(failure) => {
            debug!("Check '{}' failed to query: {}", check.name, failure);
            return CheckResult::fail(&check.name, failure.to_string());
        }
    };
    let actual = encode_rows(&rows);

    let expected = match encode_expected(&check.expected) {
        Ok(expected) => expected,
        Err(e) => {
            return CheckResult::fail(&check.name, format!("Invalid expected JSON: {e}"));
        }
    };

    if actual == expected {
        CheckResult::pass(&check.name)
    } else {
        debug!("Check '{}' mismatch: expected {} got {}", check.name, expected, actual);
        CheckResult::mismatch(&check.name, &check.description, expected, actual)
    }
}
