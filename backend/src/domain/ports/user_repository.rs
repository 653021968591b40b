//! Outbound port for user lookups.

use async_trait::async_trait;

use crate::domain::user::{FacultySummary, User, UserId};

/// Failures surfaced by user persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// The database could not be reached or a connection checkout failed.
    #[error("user store connection failed: {message}")]
    Connection { message: String },

    /// The query itself failed.
    #[error("user store query failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Return every user with the faculty role, name ascending.
    async fn list_faculty(&self) -> Result<Vec<FacultySummary>, UserPersistenceError>;
}
