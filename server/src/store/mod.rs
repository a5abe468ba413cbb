use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewUser, User};

pub mod memory;

pub use memory::InMemoryUserStore;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("User with email '{0}' already exists")]
    EmailTaken(String),

    #[error("No user ids left to assign")]
    IdSpaceExhausted,
}

/// Persistence seam for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users in insertion order.
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn get_by_id(&self, id: u64) -> Result<Option<User>, StoreError>;

    /// Stores a normalized user, assigning its id and creation time.
    ///
    /// Fails with [`StoreError::EmailTaken`] when another user already has the
    /// same email, compared case-insensitively.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
}
