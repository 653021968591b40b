//! Assignment use-case: route a grievance to a faculty member.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::grievance::{Grievance, GrievanceId};
use crate::domain::ports::{
    GrievanceAssignment, GrievancePersistenceError, GrievanceRepository, UserPersistenceError,
    UserRepository,
};
use crate::domain::user::{FacultySummary, Role, UserId};
use crate::domain::Error;

fn map_grievance_persistence_error(error: GrievancePersistenceError) -> Error {
    match error {
        GrievancePersistenceError::Connection { message } => Error::service_unavailable(message),
        GrievancePersistenceError::Query { message } => Error::internal(message),
    }
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}

/// Guarded assignment transition over the persistence ports.
///
/// Verifies the grievance exists and the candidate holds the faculty role
/// before handing the actual mutation to the repository, which applies it
/// as a single atomic update. Reassigning an already-assigned grievance is
/// permitted and silently overwrites the previous assignee.
#[derive(Clone)]
pub struct AssignmentService {
    grievances: Arc<dyn GrievanceRepository>,
    users: Arc<dyn UserRepository>,
}

impl AssignmentService {
    /// Create a new service over the given persistence ports.
    pub fn new(grievances: Arc<dyn GrievanceRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { grievances, users }
    }
}

#[async_trait]
impl GrievanceAssignment for AssignmentService {
    async fn assign(&self, grievance: &GrievanceId, faculty: &UserId) -> Result<Grievance, Error> {
        let existing = self
            .grievances
            .find_by_id(grievance)
            .await
            .map_err(map_grievance_persistence_error)?;
        if existing.is_none() {
            return Err(Error::not_found("Grievance not found"));
        }

        let candidate = self
            .users
            .find_by_id(faculty)
            .await
            .map_err(map_user_persistence_error)?;
        let assignee = match candidate {
            Some(user) if user.role() == Role::Faculty => FacultySummary::from(&user),
            _ => return Err(Error::invalid_request("Invalid faculty member")),
        };

        let updated = self
            .grievances
            .assign(grievance, &assignee)
            .await
            .map_err(map_grievance_persistence_error)?
            .ok_or_else(|| Error::not_found("Grievance not found"))?;

        info!(
            grievance_id = %grievance,
            faculty_id = %faculty,
            "grievance assigned"
        );
        Ok(updated)
    }
}
