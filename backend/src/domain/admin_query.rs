//! Read-side use-cases for the admin dashboard.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::filter::GrievanceFilter;
use crate::domain::grievance::Grievance;
use crate::domain::ports::{
    FacultyQuery, GrievancePersistenceError, GrievanceQuery, GrievanceRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::user::FacultySummary;
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

/// Thin read service translating persistence failures into domain errors.
///
/// The repositories already return grievances enriched and sorted, so this
/// service adds no logic beyond the error mapping; it exists so HTTP
/// handlers depend on driving ports only.
#[derive(Clone)]
pub struct AdminQueryService {
    grievances: Arc<dyn GrievanceRepository>,
    users: Arc<dyn UserRepository>,
}

impl AdminQueryService {
    /// Create a new read service over the given persistence ports.
    pub fn new(grievances: Arc<dyn GrievanceRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { grievances, users }
    }
}

#[async_trait]
impl GrievanceQuery for AdminQueryService {
    async fn list_grievances(&self, filter: &GrievanceFilter) -> Result<Vec<Grievance>, Error> {
        self.grievances
            .list(filter)
            .await
            .map_err(map_grievance_persistence_error)
    }
}

#[async_trait]
impl FacultyQuery for AdminQueryService {
    async fn list_faculty(&self) -> Result<Vec<FacultySummary>, Error> {
        self.users
            .list_faculty()
            .await
            .map_err(map_user_persistence_error)
    }
}
