use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::response::iso_millis;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/users`. Both fields are optional at the wire level so that
/// an absent field is reported as a missing field rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// A validated, normalized user ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    /// Trims both fields and lowercases the email. Returns `None` when either
    /// field is absent or blank.
    pub fn normalize(request: CreateUserRequest) -> Option<Self> {
        let name = request.name?.trim().to_string();
        let email = request.email?.trim().to_lowercase();

        if name.is_empty() || email.is_empty() {
            return None;
        }

        Some(Self { name, email })
    }
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
    pub total: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub user: User,
    pub message: &'static str,
    pub timestamp: String,
}
