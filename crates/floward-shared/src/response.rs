//! Error bodies returned by the auth API.
//!
//! The backend answers failures either FastAPI-style (`{"detail": ...}`) or with
//! its own envelope (`{"error": {"code": ..., "message": ...}}`). `detail` is a
//! plain string for handled errors and a list of `{"msg": ...}` objects for
//! request validation failures.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rejection text the backend uses for a duplicate registration.
pub const EMAIL_ALREADY_REGISTERED: &str = "Email already registered";

/// Structured error envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Any non-2xx response body. Unknown shapes decode to the empty body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl ErrorBody {
    /// Decode each field on its own, so a malformed `error` does not hide a
    /// usable `detail` and vice versa.
    pub fn from_value(value: &Value) -> Self {
        let error = value
            .get("error")
            .and_then(|error| serde_json::from_value(error.clone()).ok());
        Self {
            detail: value.get("detail").filter(|detail| !detail.is_null()).cloned(),
            error,
        }
    }

    /// Text carried by `detail`, if any.
    pub fn detail_message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }

    /// Text carried by `error.message`, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error
            .as_ref()?
            .message
            .clone()
            .filter(|message| !message.is_empty())
    }

    /// Server-supplied message: `detail` first, then `error.message`.
    pub fn message(&self) -> Option<String> {
        self.detail_message().or_else(|| self.error_message())
    }

    /// Whether either field carries exactly `text`.
    pub fn reports(&self, text: &str) -> bool {
        let in_detail = matches!(&self.detail, Some(Value::String(detail)) if detail == text);
        let in_error = self
            .error
            .as_ref()
            .and_then(|error| error.message.as_deref())
            == Some(text);
        in_detail || in_error
    }
}
