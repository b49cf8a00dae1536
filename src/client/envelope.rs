//! Response envelope normalization
//!
//! The ChatVerse backend answers with `{success, data, message?, meta?}`.
//! Older endpoints return a raw payload with no wrapper; those pass through
//! unchanged so existing callers keep working.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Normalized API response consumers depend on.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: Option<String>,
    pub meta: Option<Value>,
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Discard the envelope, keeping only the payload.
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Whether a body is the standardized envelope: a JSON object carrying a
/// boolean `success` field.
pub(crate) fn is_envelope(body: &Value) -> bool {
    body.get("success").map(Value::is_boolean).unwrap_or(false)
}

/// Normalize a response body into `ApiResponse<Value>`.
///
/// An envelope with `success: false` becomes `ApiError::Api` carrying the
/// original message and the HTTP status it arrived with. A non-envelope body
/// is passed through as the data itself (legacy compatibility).
pub(crate) fn normalize(status: u16, body: Value) -> Result<ApiResponse<Value>, ApiError> {
    if !is_envelope(&body) {
        return Ok(ApiResponse {
            data: body,
            message: None,
            meta: None,
            success: true,
        });
    }

    let success = body["success"].as_bool().unwrap_or(false);
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);

    if !success {
        return Err(ApiError::Api {
            message: message.unwrap_or_else(|| "Request failed".to_string()),
            status,
        });
    }

    let mut body = body;
    let data = body
        .as_object_mut()
        .and_then(|obj| obj.remove("data"))
        .unwrap_or(Value::Null);
    let meta = body.as_object_mut().and_then(|obj| obj.remove("meta"));

    Ok(ApiResponse {
        data,
        message,
        meta,
        success: true,
    })
}

/// Deserialize the payload of a normalized response into a concrete type.
pub(crate) fn decode<T: DeserializeOwned>(
    resp: ApiResponse<Value>,
) -> Result<ApiResponse<T>, ApiError> {
    let data = serde_json::from_value(resp.data)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    Ok(ApiResponse {
        data,
        message: resp.message,
        meta: resp.meta,
        success: resp.success,
    })
}
