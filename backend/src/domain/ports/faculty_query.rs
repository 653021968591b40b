//! Driving port for the faculty roster read.

use async_trait::async_trait;

use crate::domain::user::{Department, FacultySummary, UserId};
use crate::domain::Error;

/// Domain use-case port for listing assignable faculty members.
#[async_trait]
pub trait FacultyQuery: Send + Sync {
    /// Return every user with the faculty role, name ascending.
    async fn list_faculty(&self) -> Result<Vec<FacultySummary>, Error>;
}

/// Deterministic faculty roster used until persistence is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFacultyQuery;

const FIXTURE_FACULTY: [(&str, &str, &str, &str); 2] = [
    (
        "6b8f4f2a-0d5e-4a7c-9d05-0a4f6f1c2b11",
        "Dr. Kavita Iyer",
        "iyer@example.edu",
        "Computer Science",
    ),
    (
        "9f2a6c1e-3b44-4d8a-8c77-5e90d21f4a02",
        "Dr. Suresh Menon",
        "menon@example.edu",
        "Mechanical",
    ),
];

#[async_trait]
impl FacultyQuery for FixtureFacultyQuery {
    async fn list_faculty(&self) -> Result<Vec<FacultySummary>, Error> {
        FIXTURE_FACULTY
            .into_iter()
            .map(|(id, name, email, department)| {
                // Fixture rows are compile-time constants; surface invalid
                // data as an internal error so regressions are caught.
                Ok(FacultySummary {
                    id: UserId::new(id)
                        .map_err(|err| Error::internal(format!("invalid fixture id: {err}")))?,
                    name: name.to_owned(),
                    email: email.to_owned(),
                    department: Department::new(department).map_err(|err| {
                        Error::internal(format!("invalid fixture department: {err}"))
                    })?,
                })
            })
            .collect()
    }
}
