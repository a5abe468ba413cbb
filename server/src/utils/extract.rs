use axum::async_trait;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::utils::normalizer::{ErrorKind, ServerError};

/// JSON body extractor whose failures are routed through the error normalizer.
///
/// A request without a JSON content type, or with an empty body, yields
/// `T::default()` so that handlers report missing fields themselves.
pub struct JsonBody<T>(pub T);

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Ok(Self(T::default()));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            let trace = format!("{:?}", rejection);
            ServerError::other(Some(rejection.status()), Some(rejection.body_text()))
                .with_trace(trace)
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        match Json::<T>::from_bytes(&bytes) {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ServerError::from(rejection)),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON with the wrong shape.
            JsonRejection::JsonDataError(err) => {
                ServerError::new(ErrorKind::Validation).with_trace(err.body_text())
            }
            other => {
                let trace = format!("{:?}", other);
                ServerError::other(Some(other.status()), Some(other.body_text()))
                    .with_trace(trace)
            }
        }
    }
}
