use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;

use super::{StoreError, UserStore};
use crate::models::{NewUser, User};

const SEED_USERS: [(&str, &str, (i32, u32, u32)); 5] = [
    ("John Doe", "john.doe@example.com", (2023, 1, 15)),
    ("Jane Smith", "jane.smith@example.com", (2023, 2, 20)),
    ("Bob Johnson", "bob.johnson@example.com", (2023, 3, 10)),
    ("Alice Brown", "alice.brown@example.com", (2023, 4, 5)),
    ("Charlie Wilson", "charlie.wilson@example.com", (2023, 5, 12)),
];

/// Process-local store. Cloning shares the underlying collection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the five sample users.
    pub fn seeded() -> Self {
        let users = SEED_USERS
            .iter()
            .zip(1u64..)
            .map(|(&(name, email, (year, month, day)), id)| User {
                id,
                name: name.to_string(),
                email: email.to_string(),
                created_at: midnight_utc(year, month, day),
            })
            .collect();

        Self::with_users(users)
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }
}

fn midnight_utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn next_id(users: &[User]) -> Result<u64, StoreError> {
    match users.iter().map(|u| u.id).max() {
        Some(max) => max.checked_add(1).ok_or(StoreError::IdSpaceExhausted),
        None => Ok(1),
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn get_by_id(&self, id: u64) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        // Uniqueness check, id assignment and append share one write guard.
        let mut users = self.users.write().await;

        let email = user.email.to_lowercase();
        if users.iter().any(|u| u.email.to_lowercase() == email) {
            return Err(StoreError::EmailTaken(user.email));
        }

        let created = User {
            id: next_id(&users)?,
            name: user.name,
            email: user.email,
            created_at: Utc::now(),
        };
        users.push(created.clone());

        tracing::info!(user_id = created.id, email = %created.email, "Created user");
        Ok(created)
    }
}
