//! Driving port for the admin grievance listing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::filter::GrievanceFilter;
use crate::domain::grievance::{Grievance, GrievanceId, GrievanceStatus, StudentDetails};
use crate::domain::user::{Department, UserId};
use crate::domain::Error;

/// Domain use-case port for the filtered admin listing.
#[async_trait]
pub trait GrievanceQuery: Send + Sync {
    /// Return grievances matching the filter, newest filing first.
    async fn list_grievances(&self, filter: &GrievanceFilter) -> Result<Vec<Grievance>, Error>;
}

/// Deterministic grievance listing used until persistence is wired.
///
/// Honours the filter in process so the no-database server mode still
/// demonstrates the query semantics.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGrievanceQuery;

fn fixture_timestamp(raw: &str) -> Result<DateTime<Utc>, Error> {
    raw.parse::<DateTime<Utc>>()
        .map_err(|err| Error::internal(format!("invalid fixture timestamp: {err}")))
}

fn fixture_grievances() -> Result<Vec<Grievance>, Error> {
    let department = Department::new("Computer Science")
        .map_err(|err| Error::internal(format!("invalid fixture department: {err}")))?;
    let student = StudentDetails {
        id: UserId::new("2f6d1a58-7c3b-4f0e-9f44-6a1b2c3d4e5f")
            .map_err(|err| Error::internal(format!("invalid fixture id: {err}")))?,
        name: "Priya Sharma".to_owned(),
        email: "priya@example.edu".to_owned(),
        registration_number: Some("CS-2021-014".to_owned()),
        program: Some("B.Tech CSE".to_owned()),
        department: department.clone(),
    };

    let grievance = Grievance::try_new(
        GrievanceId::new("b3e1c7a9-2d4f-4b6a-8c0e-1f2a3b4c5d6e")
            .map_err(|err| Error::internal(format!("invalid fixture id: {err}")))?,
        "Projector not working in CS-204",
        "The projector has been flickering for two weeks.",
        department,
        GrievanceStatus::Open,
        fixture_timestamp("2024-03-12T08:30:00Z")?,
        student,
        None,
    )
    .map_err(|err| Error::internal(format!("invalid fixture grievance: {err}")))?;

    Ok(vec![grievance])
}

#[async_trait]
impl GrievanceQuery for FixtureGrievanceQuery {
    async fn list_grievances(&self, filter: &GrievanceFilter) -> Result<Vec<Grievance>, Error> {
        Ok(fixture_grievances()?
            .into_iter()
            .filter(|grievance| filter.matches(grievance))
            .collect())
    }
}
