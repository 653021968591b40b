//! Grievance-tracking service library.
//!
//! Students file grievances; faculty and admins triage, assign, and resolve
//! them. This crate exposes the domain model, the HTTP inbound adapter, and
//! the PostgreSQL outbound adapter; the binary in `main.rs` wires them into
//! an Actix server.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-scoped tracing middleware.
pub use middleware::Trace;
