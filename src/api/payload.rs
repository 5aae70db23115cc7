//! Request body extraction for the create endpoints.
//!
//! Bodies may be JSON or `application/x-www-form-urlencoded`. Scalar fields
//! are reduced to text so both encodings go through the same validators as
//! query strings.

use axum::{
    Form,
    body::Body,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::ApiError;

const MALFORMED_BODY: &str = "Request body is malformed.";

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Body extractor accepting JSON or form encoding. An empty body yields
/// `T::default()`.
#[derive(Debug)]
pub struct Payload<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let form = is_form(&req);
        let (parts, body) = req.into_parts();

        let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|e| {
                tracing::debug!("Failed to buffer request body: {}", e);
                ApiError::validation(MALFORMED_BODY)
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        if form {
            let Form(value) = Form::<T>::from_request(
                Request::from_parts(parts, Body::from(bytes)),
                state,
            )
            .await
            .map_err(|e| {
                tracing::debug!("Rejected form body: {}", e);
                ApiError::validation(MALFORMED_BODY)
            })?;
            return Ok(Self(value));
        }

        serde_json::from_slice(&bytes).map(Self).map_err(|e| {
            tracing::debug!("Rejected JSON body: {}", e);
            ApiError::validation(MALFORMED_BODY)
        })
    }
}

/// Renders a body scalar as the text a query string would carry.
///
/// `null` and `false` count as absent. Integral numbers lose any `.0`.
#[must_use]
pub fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => Some(s),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                Some(format!("{f:.0}"))
            }
            _ => Some(n.to_string()),
        },
        other => Some(other.to_string()),
    }
}

/// `deserialize_with` adapter for optional scalar body fields.
pub fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(scalar_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "deserialize_scalar")]
        prize_value: Option<String>,
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(json!("14.5")), Some("14.5".to_string()));
        assert_eq!(scalar_text(json!(30)), Some("30".to_string()));
        assert_eq!(scalar_text(json!(30.0)), Some("30".to_string()));
        assert_eq!(scalar_text(json!(-7)), Some("-7".to_string()));
        assert_eq!(scalar_text(json!(14.166881)), Some("14.166881".to_string()));
        assert_eq!(scalar_text(json!(true)), Some("true".to_string()));
        assert_eq!(scalar_text(json!(null)), None);
        assert_eq!(scalar_text(json!(false)), None);
    }

    #[test]
    fn test_deserialize_scalar_field() {
        let s: Sample = serde_json::from_value(json!({ "prize_value": 25 })).unwrap();
        assert_eq!(s.prize_value.as_deref(), Some("25"));

        let s: Sample = serde_json::from_value(json!({})).unwrap();
        assert!(s.prize_value.is_none());

        let s: Sample = serde_json::from_value(json!({ "prize_value": null })).unwrap();
        assert!(s.prize_value.is_none());
    }
}
