//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`GrievanceQuery`], [`FacultyQuery`],
//! [`GrievanceAssignment`], [`LoginService`]) are what the HTTP handlers
//! call; outbound ports ([`GrievanceRepository`], [`UserRepository`]) are
//! what the persistence adapters implement.

mod faculty_query;
mod grievance_assignment;
mod grievance_query;
mod grievance_repository;
mod login_service;
mod user_repository;

pub use faculty_query::{FacultyQuery, FixtureFacultyQuery};
pub use grievance_assignment::{FixtureGrievanceAssignment, GrievanceAssignment};
pub use grievance_query::{FixtureGrievanceQuery, GrievanceQuery};
pub use grievance_repository::{GrievancePersistenceError, GrievanceRepository};
pub use login_service::{AuthenticatedUser, FixtureLoginService, LoginService};
pub use user_repository::{UserPersistenceError, UserRepository};
