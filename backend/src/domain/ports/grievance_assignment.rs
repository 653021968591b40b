//! Driving port for the grievance assignment operation.

use async_trait::async_trait;

use crate::domain::grievance::{Grievance, GrievanceId};
use crate::domain::user::UserId;
use crate::domain::Error;

/// Domain use-case port for assigning a grievance to a faculty member.
#[async_trait]
pub trait GrievanceAssignment: Send + Sync {
    /// Assign the grievance to the candidate user.
    ///
    /// Fails with `not_found` when the grievance is unknown and with
    /// `invalid_request` when the candidate is missing or not faculty.
    async fn assign(&self, grievance: &GrievanceId, faculty: &UserId) -> Result<Grievance, Error>;
}

/// Assignment stub used when no persistence is configured.
///
/// The fixture dataset is read-only, so every assignment reports the
/// grievance as unknown.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGrievanceAssignment;

#[async_trait]
impl GrievanceAssignment for FixtureGrievanceAssignment {
    async fn assign(&self, _grievance: &GrievanceId, _faculty: &UserId) -> Result<Grievance, Error> {
        Err(Error::not_found("Grievance not found"))
    }
}
