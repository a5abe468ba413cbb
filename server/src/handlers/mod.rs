use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use crate::utils::response::{success, timestamp};

pub mod users;

pub use users::{create_user, get_user, list_users};

const API_VERSION: &str = "1.0.0";

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
    timestamp: String,
}

#[derive(Serialize)]
struct EndpointMap {
    health: &'static str,
    hello: &'static str,
    users: &'static str,
}

#[derive(Serialize)]
struct WelcomePayload {
    message: &'static str,
    version: &'static str,
    timestamp: String,
    endpoints: EndpointMap,
}

#[derive(Serialize)]
struct HelloPayload {
    message: &'static str,
    timestamp: String,
    status: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "starter-api",
        timestamp: timestamp(),
    };

    success(StatusCode::OK, payload)
}

pub async fn welcome() -> Response {
    let payload = WelcomePayload {
        message: "Welcome to Alchemi Express API!",
        version: API_VERSION,
        timestamp: timestamp(),
        endpoints: EndpointMap {
            health: "/health",
            hello: "/hello",
            users: "/users",
        },
    };

    success(StatusCode::OK, payload)
}

pub async fn hello() -> Response {
    let payload = HelloPayload {
        message: "Hello from Alchemi Express API!",
        timestamp: timestamp(),
        status: "success",
    };

    success(StatusCode::OK, payload)
}
