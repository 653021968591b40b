//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: the admin endpoints, login, and health probes, plus
//! the session cookie security scheme. The generated specification backs
//! Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::admin::{
    AssignGrievanceRequest, AssigneeBody, FacultyBody, GrievanceBody, StudentBody,
};
use crate::inbound::http::auth::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Grievance tracker backend API",
        description = "Admin triage endpoints for student grievances: filtered listing, faculty roster, and assignment."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::admin::list_grievances,
        crate::inbound::http::admin::assign_grievance,
        crate::inbound::http::admin::list_faculty,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        GrievanceBody,
        StudentBody,
        AssigneeBody,
        FacultyBody,
        AssignGrievanceRequest,
    )),
    tags(
        (name = "admin", description = "Grievance triage operations"),
        (name = "auth", description = "Session establishment"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI document structure.

    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn openapi_registers_admin_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/admin/grievances"));
        assert!(paths.contains_key("/api/admin/grievances/{id}/assign"));
        assert!(paths.contains_key("/api/admin/faculty"));
        assert!(paths.contains_key("/api/login"));
    }

    #[test]
    fn openapi_registers_error_schema() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.keys().any(|key| key.ends_with("Error")));
        assert!(schemas.keys().any(|key| key.ends_with("GrievanceBody")));
    }
}
