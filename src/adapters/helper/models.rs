//! Wire models for the OneNote helper program
//!
//! The helper reads exactly one JSON-RPC style request from stdin and writes
//! exactly one response to stdout before exiting.

use crate::domain::errors::AutomationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request sent to the helper
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    pub id: u64,
}

/// Response written by the helper
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
    #[serde(default)]
    pub id: u64,
}

/// Error object inside a response
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// Result of `OpenHierarchy`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenHierarchyResult {
    pub object_id: String,
}

impl RpcResponse {
    /// Parse raw helper stdout and unwrap the result value
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponse` for unparsable output or a mismatched ID, and
    /// `Rpc` when the helper reported an error.
    pub fn parse(stdout: &[u8], expected_id: u64) -> Result<Value, AutomationError> {
        let response: RpcResponse = serde_json::from_slice(stdout).map_err(|e| {
            AutomationError::InvalidResponse(format!(
                "{e}; output: {}",
                String::from_utf8_lossy(stdout).trim()
            ))
        })?;

        if let Some(error) = response.error {
            return Err(AutomationError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        if response.id != expected_id {
            return Err(AutomationError::InvalidResponse(format!(
                "response id {} does not match request id {expected_id}",
                response.id
            )));
        }

        Ok(response.result.unwrap_or(Value::Null))
    }
}
