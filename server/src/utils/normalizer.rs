//! Last-resort error translation.
//!
//! Failures that are not answered inline by a handler (body decode failures,
//! unmatched routes, panics) travel down the chain as a [`ServerError`] stored in
//! the response extensions. [`normalize_errors`] picks them up, logs them with
//! the request context and renders the uniform `{success, error, stack?}` body.

use std::any::Any;

use axum::extract::{Request, State};
use axum::http::{Method, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::config::Environment;
use crate::utils::response::{timestamp, NormalizedErrorResponse};

const DEFAULT_MESSAGE: &str = "Server Error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A path value that could not be cast to the resource's id type.
    Cast,
    DuplicateKey,
    Validation,
    InvalidToken,
    TokenExpired,
    Other {
        status: Option<StatusCode>,
        message: Option<String>,
    },
}

impl ErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::Cast => StatusCode::NOT_FOUND,
            ErrorKind::DuplicateKey | ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::InvalidToken | ErrorKind::TokenExpired => StatusCode::UNAUTHORIZED,
            ErrorKind::Other { status, .. } => {
                status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    pub fn public_message(&self) -> &str {
        match self {
            ErrorKind::Cast => "Resource not found",
            ErrorKind::DuplicateKey => "Duplicate field value entered",
            ErrorKind::Validation => "Validation Error",
            ErrorKind::InvalidToken => "Invalid token",
            ErrorKind::TokenExpired => "Token expired",
            ErrorKind::Other { message, .. } => match message.as_deref() {
                Some(message) if !message.is_empty() => message,
                _ => DEFAULT_MESSAGE,
            },
        }
    }
}

/// An error handed to the normalizer instead of being answered inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerError {
    pub kind: ErrorKind,
    /// Diagnostic detail. Logged always, returned to clients only outside
    /// production.
    pub trace: Option<String>,
}

impl ServerError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, trace: None }
    }

    pub fn other(status: Option<StatusCode>, message: Option<String>) -> Self {
        Self::new(ErrorKind::Other { status, message })
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    pub fn render(&self, environment: Environment) -> Response {
        let body = NormalizedErrorResponse {
            success: false,
            error: self.kind.public_message().to_string(),
            stack: if environment.is_production() {
                None
            } else {
                self.trace.clone()
            },
        };

        (self.status_code(), Json(body)).into_response()
    }

    fn log(&self, method: &Method, uri: &Uri) {
        error!(
            error = %self.kind.public_message(),
            stack = self.trace.as_deref().unwrap_or(""),
            method = %method,
            url = %uri,
            timestamp = %timestamp(),
            "Error"
        );
    }
}

impl IntoResponse for ServerError {
    /// Renders the production body and tags the response so that
    /// [`normalize_errors`] can re-render it with request context.
    fn into_response(self) -> Response {
        let mut response = self.render(Environment::Production);
        response.extensions_mut().insert(self);
        response
    }
}

pub async fn normalize_errors(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ServerError>() {
        Some(err) => {
            err.log(&method, &uri);
            err.render(environment)
        }
        None => response,
    }
}

/// Router fallback for paths no route matches.
pub async fn route_not_found(method: Method, uri: Uri) -> ServerError {
    let message = format!("Route {} {} not found", method, uri.path());
    ServerError::other(Some(StatusCode::NOT_FOUND), Some(message))
}

/// Turns a caught handler panic into a normalized 500.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    ServerError::other(None, None)
        .with_trace(format!("panic: {}", detail))
        .into_response()
}
