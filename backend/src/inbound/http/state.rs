//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FacultyQuery, GrievanceAssignment, GrievanceQuery, LoginService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Filtered admin grievance listing.
    pub grievances: Arc<dyn GrievanceQuery>,
    /// Assignable faculty roster.
    pub faculty: Arc<dyn FacultyQuery>,
    /// Guarded assignment operation.
    pub assignment: Arc<dyn GrievanceAssignment>,
    /// Credential verification.
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixtureFacultyQuery, FixtureGrievanceAssignment, FixtureGrievanceQuery,
    ///     FixtureLoginService,
    /// };
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureGrievanceQuery),
    ///     Arc::new(FixtureFacultyQuery),
    ///     Arc::new(FixtureGrievanceAssignment),
    ///     Arc::new(FixtureLoginService),
    /// );
    /// let _grievances = state.grievances.clone();
    /// ```
    pub fn new(
        grievances: Arc<dyn GrievanceQuery>,
        faculty: Arc<dyn FacultyQuery>,
        assignment: Arc<dyn GrievanceAssignment>,
        login: Arc<dyn LoginService>,
    ) -> Self {
        Self {
            grievances,
            faculty,
            assignment,
            login,
        }
    }
}
