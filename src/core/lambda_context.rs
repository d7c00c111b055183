//! Per-invocation execution context

use serde::{Deserialize, Serialize};

/// Context of the invocation a record was logged from.
///
/// Passed alongside each record; its request id is copied into the record's
/// `record.requestId` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LambdaContext {
    pub aws_request_id: String,
}

impl LambdaContext {
    pub fn new(aws_request_id: impl Into<String>) -> Self {
        Self {
            aws_request_id: aws_request_id.into(),
        }
    }
}
