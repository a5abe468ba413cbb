use std::fmt::Write;

use crate::api::{ApiClient, UserSummary};
use crate::state::FetchState;

const CONNECT_FAILED: &str = "Failed to connect to API";

/// Greeting panel plus user list, each backed by an independent fetch.
#[derive(Debug)]
pub struct Dashboard {
    client: ApiClient,
    message: FetchState<String>,
    users: FetchState<Vec<UserSummary>>,
}

impl Dashboard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            message: FetchState::Idle,
            users: FetchState::Idle,
        }
    }

    pub fn message(&self) -> &FetchState<String> {
        &self.message
    }

    pub fn users(&self) -> &FetchState<Vec<UserSummary>> {
        &self.users
    }

    /// Initial load: both fetches run concurrently and settle independently.
    pub async fn load(&mut self) {
        self.message = FetchState::Loading;
        let previous_users = std::mem::replace(&mut self.users, FetchState::Loading);

        let (message, users) = tokio::join!(self.client.hello(), self.client.users());

        self.message = settle_message(message);
        self.users = settle_users(users, previous_users);
    }

    pub async fn refresh_message(&mut self) {
        self.message = FetchState::Loading;
        self.message = settle_message(self.client.hello().await);
    }

    pub async fn refresh_users(&mut self) {
        let previous = std::mem::replace(&mut self.users, FetchState::Loading);
        self.users = settle_users(self.client.users().await, previous);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(out, "Alchemi React + Express Template");
        let _ = writeln!(out);
        let _ = writeln!(out, "API Connection Test");
        let _ = writeln!(out, "  {}", message_line(&self.message));
        let _ = writeln!(out);
        let _ = writeln!(out, "Users Data");

        match &self.users {
            FetchState::Loaded(users) if !users.is_empty() => {
                for user in users {
                    let _ = writeln!(out, "  - {} <{}>", user.name, user.email);
                }
            }
            FetchState::Loading => {
                let _ = writeln!(out, "  Loading...");
            }
            _ => {
                let _ = writeln!(out, "  No users data available");
            }
        }

        out
    }
}

fn settle_message(result: Result<String, crate::error::ClientError>) -> FetchState<String> {
    match result {
        Ok(message) => FetchState::Loaded(message),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching message");
            FetchState::Failed(CONNECT_FAILED.to_string())
        }
    }
}

/// A failed users fetch is logged and keeps whatever list was shown before.
fn settle_users(
    result: Result<Vec<UserSummary>, crate::error::ClientError>,
    previous: FetchState<Vec<UserSummary>>,
) -> FetchState<Vec<UserSummary>> {
    match result {
        Ok(users) => FetchState::Loaded(users),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching users");
            match previous {
                FetchState::Loaded(users) => FetchState::Loaded(users),
                _ => FetchState::Failed(e.to_string()),
            }
        }
    }
}

fn message_line(state: &FetchState<String>) -> &str {
    match state {
        FetchState::Loading => "Loading...",
        FetchState::Loaded(message) if !message.is_empty() => message.as_str(),
        FetchState::Failed(message) => message.as_str(),
        _ => "No message yet",
    }
}
