use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserSummary {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct HelloPayload {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UsersPayload {
    users: Vec<UserSummary>,
}

/// Thin client for the starter API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.clone(),
        }
    }

    /// `GET /api/hello`, returning the greeting text.
    pub async fn hello(&self) -> Result<String, ClientError> {
        let payload: HelloPayload = self.get_json("/api/hello").await?;
        Ok(payload.message)
    }

    /// `GET /api/users`.
    pub async fn users(&self) -> Result<Vec<UserSummary>, ClientError> {
        let payload: UsersPayload = self.get_json("/api/users").await?;
        Ok(payload.users)
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, ClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");

        let value = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await?;

        Ok(value)
    }
}
