//! Typed client for the grievance tracker's admin API.
//!
//! Mirrors the admin dashboard's data flow in library form: a
//! [`FilterSelection`] of the four listing facets, an [`AdminApi`] transport
//! port with a reqwest-backed implementation, and a [`Dashboard`]
//! single-writer state container that orchestrates concurrent fetches,
//! discards stale responses, and reconciles assignments from the server
//! echo.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod filter;

pub use api::{AdminApi, AssigneeRecord, FacultyMember, GrievanceRecord, HttpAdminApi, StudentRecord};
pub use dashboard::{Dashboard, RefreshTicket};
pub use error::ClientError;
pub use filter::{FilterField, FilterSelection};
