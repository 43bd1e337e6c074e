//! Token endpoint replies.

use serde::Serialize;
use serde_json::Value;

/// Token returned by the provider.
///
/// Decoding is best-effort: unknown fields are ignored and missing or
/// ill-typed fields are left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Lifetime as sent by the provider; some send a number, some a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// Decode a response body, tolerating partial or malformed JSON.
    pub fn from_body(body: &str) -> Self {
        let object = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(object)) => object,
            Ok(other) => {
                tracing::warn!(kind = json_kind(&other), "Token response is not a JSON object");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to decode token response");
                return Self::default();
            }
        };

        let text = |key: &str| object.get(key).and_then(as_text);

        Self {
            access_token: text("access_token").unwrap_or_default(),
            scope: text("scope"),
            expires_in: text("expires_in"),
            token_type: text("token_type"),
        }
    }

    pub fn has_token(&self) -> bool {
        !self.access_token.is_empty()
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
