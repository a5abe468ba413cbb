use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Error envelope returned by the API handlers.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
    pub message: String,
}

/// Envelope rendered by the error normalizer.
#[derive(Debug, Serialize)]
pub struct NormalizedErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Formats a UTC instant as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The current time, formatted for response payloads.
pub fn timestamp() -> String {
    format_timestamp(Utc::now())
}

pub fn success<T>(status: StatusCode, body: T) -> Response
where
    T: Serialize,
{
    (status, Json(body)).into_response()
}

pub fn error(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Response {
    let body = ApiErrorResponse {
        error: error.into(),
        message: message.into(),
    };

    (status, Json(body)).into_response()
}

/// Serde adapter for timestamps stored on models.
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(*at))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_uses_millis_and_z() {
        let at = Utc.with_ymd_and_hms(2023, 5, 12, 8, 30, 1).unwrap();
        assert_eq!(format_timestamp(at), "2023-05-12T08:30:01.000Z");
    }

    #[test]
    fn test_error_envelope_status() {
        let response = error(StatusCode::CONFLICT, "Email already exists", "taken");
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
