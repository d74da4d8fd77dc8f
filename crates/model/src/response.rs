use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Structured result handed back to the invoking platform.
///
/// The handler always resolves to one of these; failures are carried in the
/// status code rather than raised through the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// Expiration timestamp of the matched session, describe only
    #[serde(
        rename = "maxExpiration",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub max_expiration: Option<String>,
}

impl SessionResponse {
    /// Successful expire acknowledgement.
    pub fn ok() -> Self {
        SessionResponse {
            status_code: 200,
            max_expiration: None,
        }
    }

    /// Successful describe carrying the session's expiration time.
    pub fn with_expiration(expires: DateTime<Utc>) -> Self {
        SessionResponse {
            status_code: 200,
            max_expiration: Some(expires.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }

    /// Missing field or unrecognized enumerated value on the request.
    pub fn bad_request() -> Self {
        SessionResponse {
            status_code: 400,
            max_expiration: None,
        }
    }

    /// No session matched the requested identity.
    pub fn not_found() -> Self {
        SessionResponse {
            status_code: 404,
            max_expiration: None,
        }
    }

    /// The remote session service call failed.
    pub fn service_failure() -> Self {
        SessionResponse {
            status_code: 500,
            max_expiration: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{Value, json};

    #[test]
    fn describe_response_formats_expiration_as_iso8601() {
        let expires: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

        let response: SessionResponse = SessionResponse::with_expiration(expires);

        assert_eq!(200, response.status_code);
        assert_eq!(
            Some("2024-01-01T10:00:00Z".to_string()),
            response.max_expiration
        );
    }

    #[test]
    fn serialized_response_uses_status_code_key() {
        let value: Value = serde_json::to_value(SessionResponse::not_found()).unwrap();

        assert_eq!(json!({"statusCode": 404}), value);
    }

    #[test]
    fn serialized_response_omits_absent_expiration() {
        let value: Value = serde_json::to_value(SessionResponse::ok()).unwrap();

        assert!(value.get("maxExpiration").is_none());
    }
}
