use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use crate::models::{CreateUserRequest, CreatedUserResponse, NewUser, UserResponse, UsersResponse};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::JsonBody;
use crate::utils::response::{success, timestamp};

const LIST_FAILED: &str = "Failed to fetch users";
const GET_FAILED: &str = "Failed to fetch user";
const CREATE_FAILED: &str = "Failed to create user";

/// The integer prefix of a path segment: optional sign, then ASCII digits.
/// Anything after the digits is ignored, so `3.7` reads as 3 and `12abc` as 12.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LeadingInteger {
    negative: bool,
    /// Digits without leading zeros, `"0"` for zero.
    digits: String,
}

impl LeadingInteger {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim_start();
        let (negative, rest) = match raw.as_bytes().first() {
            Some(b'-') => (true, &raw[1..]),
            Some(b'+') => (false, &raw[1..]),
            _ => (false, raw),
        };

        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if end == 0 {
            return None;
        }

        let digits = rest[..end].trim_start_matches('0');
        let digits = if digits.is_empty() { "0" } else { digits };

        Some(Self {
            negative: negative && digits != "0",
            digits: digits.to_string(),
        })
    }

    /// `None` for negative values and values beyond `u64`.
    fn as_u64(&self) -> Option<u64> {
        if self.negative {
            return None;
        }
        self.digits.parse().ok()
    }
}

impl std::fmt::Display for LeadingInteger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negative {
            write!(f, "-{}", self.digits)
        } else {
            f.write_str(&self.digits)
        }
    }
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Response, AppError> {
    let users = state
        .store
        .list()
        .await
        .map_err(|e| AppError::from_store(LIST_FAILED, e))?;

    let body = UsersResponse {
        total: users.len(),
        users,
        timestamp: timestamp(),
    };

    Ok(success(StatusCode::OK, body))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let id = LeadingInteger::parse(&raw_id)
        .ok_or_else(|| AppError::InvalidUserId(raw_id.clone()))?;

    // Ids are positive, so a negative or oversized value can only miss.
    let Some(lookup) = id.as_u64() else {
        return Err(AppError::UserNotFound(id.to_string()));
    };

    let user = state
        .store
        .get_by_id(lookup)
        .await
        .map_err(|e| AppError::from_store(GET_FAILED, e))?
        .ok_or_else(|| AppError::UserNotFound(id.to_string()))?;

    Ok(success(
        StatusCode::OK,
        UserResponse {
            user,
            timestamp: timestamp(),
        },
    ))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateUserRequest>,
) -> Result<Response, AppError> {
    let new_user = NewUser::normalize(request).ok_or(AppError::MissingFields)?;

    let user = state
        .store
        .create(new_user)
        .await
        .map_err(|e| AppError::from_store(CREATE_FAILED, e))?;

    Ok(success(
        StatusCode::CREATED,
        CreatedUserResponse {
            user,
            message: "User created successfully",
            timestamp: timestamp(),
        },
    ))
}
