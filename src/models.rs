/// Response envelope shared by every Pardot JSON response.
///
/// Bodies look like `{"@attributes": {"stat": "ok", "version": 1}, ...}` on
/// success and `{"@attributes": {"stat": "fail", "err_code": 1}, "err": "..."}`
/// on failure. Only the envelope is typed; the rest stays a `serde_json::Value`.
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::PardotError;

/// Deserialize an optional value that may be a JSON number or a string, storing as String.
fn deserialize_optional_string_or_number<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_json::Value::Null) | None => Ok(None),
        Some(v) => Ok(Some(v.to_string())),
    }
}

/// The `@attributes` object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseAttributes {
    #[serde(default)]
    pub stat: String,
    #[serde(default, deserialize_with = "deserialize_optional_string_or_number")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string_or_number")]
    pub err_code: Option<String>,
}

impl ResponseAttributes {
    /// Read the envelope from a decoded body; a missing or odd-shaped one reads as empty.
    pub fn from_body(body: &serde_json::Value) -> Self {
        body.get("@attributes")
            .and_then(|attrs| serde_json::from_value(attrs.clone()).ok())
            .unwrap_or_default()
    }

    pub fn is_ok(&self) -> bool {
        self.stat == "ok"
    }
}

/// Turn a decoded body into `Ok(body)` or the API error it reports.
pub fn check_api_status(
    body: serde_json::Value,
    request: &str,
) -> Result<serde_json::Value, PardotError> {
    let attributes = ResponseAttributes::from_body(&body);
    if attributes.is_ok() {
        return Ok(body);
    }
    let message = body
        .get("err")
        .and_then(|m| m.as_str())
        .unwrap_or("Unknown error")
        .to_string();
    Err(PardotError::Api {
        code: attributes.err_code.unwrap_or_default(),
        message,
        request: request.to_string(),
    })
}

/// Response of `login/version/3`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub api_key: String,
}
