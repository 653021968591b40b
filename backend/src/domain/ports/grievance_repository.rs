//! Outbound port for grievance persistence.

use async_trait::async_trait;

use crate::domain::filter::GrievanceFilter;
use crate::domain::grievance::{Grievance, GrievanceId};
use crate::domain::user::FacultySummary;

/// Failures surfaced by grievance persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrievancePersistenceError {
    /// The database could not be reached or a connection checkout failed.
    #[error("grievance store connection failed: {message}")]
    Connection { message: String },

    /// The query or update itself failed.
    #[error("grievance store query failed: {message}")]
    Query { message: String },
}

impl GrievancePersistenceError {
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

/// Persistence port for the grievance collection.
///
/// Implementations return grievances already enriched with the joined
/// student and assignee user details.
#[async_trait]
pub trait GrievanceRepository: Send + Sync {
    /// List grievances matching the filter, newest filing first.
    async fn list(
        &self,
        filter: &GrievanceFilter,
    ) -> Result<Vec<Grievance>, GrievancePersistenceError>;

    /// Fetch a single grievance by id.
    async fn find_by_id(
        &self,
        id: &GrievanceId,
    ) -> Result<Option<Grievance>, GrievancePersistenceError>;

    /// Atomically set the assignee and move the status to `assigned`,
    /// returning the updated grievance.
    ///
    /// Returns `Ok(None)` when the grievance no longer exists; the caller
    /// decides how to report that.
    async fn assign(
        &self,
        id: &GrievanceId,
        assignee: &FacultySummary,
    ) -> Result<Option<Grievance>, GrievancePersistenceError>;
}
