//! Builders for HTTP state ports and repository-backed service pairs.

use std::sync::Arc;

use actix_web::web;

use backend::domain::ports::{
    FixtureFacultyQuery, FixtureGrievanceAssignment, FixtureGrievanceQuery, FixtureLoginService,
};
use backend::domain::{AdminQueryService, AssignmentService};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DieselGrievanceRepository, DieselLoginService, DieselUserRepository,
};

use super::ServerConfig;

/// Build the HTTP dependency bundle from the server configuration.
///
/// With a database pool the ports are Diesel-backed; without one the
/// fixture ports serve deterministic data so the server can run locally
/// and in handler tests without PostgreSQL.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            let grievances = Arc::new(DieselGrievanceRepository::new(pool.clone()));
            let users = Arc::new(DieselUserRepository::new(pool.clone()));
            let queries = Arc::new(AdminQueryService::new(grievances.clone(), users.clone()));
            let assignment = Arc::new(AssignmentService::new(grievances, users));
            HttpState::new(
                queries.clone(),
                queries,
                assignment,
                Arc::new(DieselLoginService::new(pool.clone())),
            )
        }
        None => HttpState::new(
            Arc::new(FixtureGrievanceQuery),
            Arc::new(FixtureFacultyQuery),
            Arc::new(FixtureGrievanceAssignment),
            Arc::new(FixtureLoginService),
        ),
    };
    web::Data::new(state)
}
