//! Admin dashboard HTTP handlers.
//!
//! ```text
//! GET /api/admin/grievances?department=&status=&month=&year=
//! PUT /api/admin/grievances/{id}/assign {"facultyId":"..."}
//! GET /api/admin/faculty
//! ```
//!
//! All three require an admin session.

use actix_web::{get, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::grievance::{AssigneeDetails, Grievance, GrievanceId, StudentDetails};
use crate::domain::user::{FacultySummary, UserId};
use crate::domain::{Error, GrievanceFilter};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    map_filter_error, missing_field_error, parse_uuid, FieldName,
};
use crate::inbound::http::ApiResult;

/// Raw listing facets as they arrive on the query string.
///
/// Absent and empty values are equivalent; validation happens in the domain
/// filter builder.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GrievanceListQuery {
    /// Department equality facet.
    pub department: Option<String>,
    /// Status equality facet (open, assigned, resolved).
    pub status: Option<String>,
    /// Filing month (1–12); only effective together with `year`.
    pub month: Option<String>,
    /// Filing year; only effective together with `month`.
    pub year: Option<String>,
}

impl GrievanceListQuery {
    fn to_filter(&self) -> Result<GrievanceFilter, Error> {
        GrievanceFilter::from_parts(
            self.department.as_deref(),
            self.status.as_deref(),
            self.month.as_deref(),
            self.year.as_deref(),
        )
        .map_err(|err| map_filter_error(&err))
    }
}

/// Joined filing-student fields on a listed grievance.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    pub department: String,
}

/// Joined assignee fields on a listed grievance.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
}

/// Grievance as exposed by the admin listing and assignment endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrievanceBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub department: String,
    pub status: String,
    #[schema(format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
    pub student: StudentBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<AssigneeBody>,
}

impl From<&StudentDetails> for StudentBody {
    fn from(student: &StudentDetails) -> Self {
        Self {
            id: student.id.to_string(),
            name: student.name.clone(),
            email: student.email.clone(),
            registration_number: student.registration_number.clone(),
            program: student.program.clone(),
            department: student.department.to_string(),
        }
    }
}

impl From<&AssigneeDetails> for AssigneeBody {
    fn from(assignee: &AssigneeDetails) -> Self {
        Self {
            id: assignee.id.to_string(),
            name: assignee.name.clone(),
            email: assignee.email.clone(),
            department: assignee.department.to_string(),
        }
    }
}

impl From<&Grievance> for GrievanceBody {
    fn from(grievance: &Grievance) -> Self {
        Self {
            id: grievance.id().to_string(),
            title: grievance.title().to_owned(),
            description: grievance.description().to_owned(),
            department: grievance.department().to_string(),
            status: grievance.status().to_string(),
            created_at: grievance.created_at(),
            student: StudentBody::from(grievance.student()),
            assigned_to: grievance.assigned_to().map(AssigneeBody::from),
        }
    }
}

/// Faculty roster entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacultyBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
}

impl From<&FacultySummary> for FacultyBody {
    fn from(summary: &FacultySummary) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.name.clone(),
            email: summary.email.clone(),
            department: summary.department.to_string(),
        }
    }
}

/// Assignment request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignGrievanceRequest {
    /// Candidate assignee; must reference a user with the faculty role.
    #[schema(format = "uuid")]
    pub faculty_id: Option<String>,
}

/// List grievances for the admin dashboard under the current filter.
#[utoipa::path(
    get,
    path = "/api/admin/grievances",
    params(GrievanceListQuery),
    responses(
        (status = 200, description = "Matching grievances, newest first", body = [GrievanceBody]),
        (status = 400, description = "Malformed filter facet", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listGrievances"
)]
#[get("/admin/grievances")]
pub async fn list_grievances(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<GrievanceListQuery>,
) -> ApiResult<web::Json<Vec<GrievanceBody>>> {
    session.require_admin()?;
    let filter = query.to_filter()?;
    let grievances = state.grievances.list_grievances(&filter).await?;
    Ok(web::Json(
        grievances.iter().map(GrievanceBody::from).collect(),
    ))
}

/// Assign a grievance to a faculty member.
#[utoipa::path(
    put,
    path = "/api/admin/grievances/{id}/assign",
    params(("id" = String, Path, format = "uuid", description = "Grievance identifier")),
    request_body = AssignGrievanceRequest,
    responses(
        (status = 200, description = "Updated grievance", body = GrievanceBody),
        (status = 400, description = "Missing facultyId or invalid faculty member", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 404, description = "Grievance not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "assignGrievance"
)]
#[put("/admin/grievances/{id}/assign")]
pub async fn assign_grievance(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AssignGrievanceRequest>,
) -> ApiResult<web::Json<GrievanceBody>> {
    session.require_admin()?;

    let grievance_id = GrievanceId::from_uuid(parse_uuid(&path.into_inner(), FieldName::new("id"))?);

    let faculty_raw = payload
        .into_inner()
        .faculty_id
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error(FieldName::new("facultyId")))?;
    let faculty_id = UserId::from_uuid(parse_uuid(&faculty_raw, FieldName::new("facultyId"))?);

    let updated = state.assignment.assign(&grievance_id, &faculty_id).await?;
    Ok(web::Json(GrievanceBody::from(&updated)))
}

/// List every faculty member eligible for assignment.
#[utoipa::path(
    get,
    path = "/api/admin/faculty",
    responses(
        (status = 200, description = "Faculty roster", body = [FacultyBody]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listFaculty"
)]
#[get("/admin/faculty")]
pub async fn list_faculty(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<FacultyBody>>> {
    session.require_admin()?;
    let roster = state.faculty.list_faculty().await?;
    Ok(web::Json(roster.iter().map(FacultyBody::from).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use actix_web::{http::StatusCode, test as actix_test, web, App, HttpResponse};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::{json, Value};

    use super::*;
    use crate::domain::grievance::GrievanceStatus;
    use crate::domain::ports::{
        AuthenticatedUser, FacultyQuery, FixtureLoginService, GrievanceAssignment, GrievanceQuery,
    };
    use crate::domain::user::{Department, Role};

    const GRIEVANCE_ID: &str = "b3e1c7a9-2d4f-4b6a-8c0e-1f2a3b4c5d6e";
    const FACULTY_ID: &str = "6b8f4f2a-0d5e-4a7c-9d05-0a4f6f1c2b11";

    fn department() -> Department {
        Department::new("Computer Science").expect("valid department")
    }

    fn sample_grievance(status: GrievanceStatus) -> Grievance {
        let assignee = AssigneeDetails {
            id: UserId::new(FACULTY_ID).expect("valid id"),
            name: "Dr. Kavita Iyer".into(),
            email: "iyer@example.edu".into(),
            department: department(),
        };
        Grievance::try_new(
            GrievanceId::new(GRIEVANCE_ID).expect("valid id"),
            "Projector not working in CS-204",
            "The projector has been flickering for two weeks.",
            department(),
            status,
            Utc.with_ymd_and_hms(2024, 3, 12, 8, 30, 0).single().expect("valid timestamp"),
            StudentDetails {
                id: UserId::random(),
                name: "Priya Sharma".into(),
                email: "priya@example.edu".into(),
                registration_number: Some("CS-2021-014".into()),
                program: Some("B.Tech CSE".into()),
                department: department(),
            },
            (status == GrievanceStatus::Assigned).then_some(assignee),
        )
        .expect("valid grievance")
    }

    /// Records the filter each call received and returns a canned listing.
    #[derive(Default)]
    struct RecordingGrievanceQuery {
        seen: Mutex<Vec<GrievanceFilter>>,
    }

    #[async_trait]
    impl GrievanceQuery for RecordingGrievanceQuery {
        async fn list_grievances(&self, filter: &GrievanceFilter) -> Result<Vec<Grievance>, Error> {
            self.seen.lock().expect("seen lock").push(filter.clone());
            Ok(vec![sample_grievance(GrievanceStatus::Open)])
        }
    }

    struct StubFacultyQuery;

    #[async_trait]
    impl FacultyQuery for StubFacultyQuery {
        async fn list_faculty(&self) -> Result<Vec<FacultySummary>, Error> {
            Ok(vec![FacultySummary {
                id: UserId::new(FACULTY_ID).expect("valid id"),
                name: "Dr. Kavita Iyer".into(),
                email: "iyer@example.edu".into(),
                department: department(),
            }])
        }
    }

    /// Returns the configured outcome and records the ids it was called with.
    struct StubAssignment {
        outcome: Mutex<Option<Result<Grievance, Error>>>,
        calls: Mutex<Vec<(GrievanceId, UserId)>>,
    }

    impl StubAssignment {
        fn with_outcome(outcome: Result<Grievance, Error>) -> Self {
            Self {
                outcome: Mutex::new(Some(outcome)),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn never_called() -> Self {
            Self {
                outcome: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().expect("calls lock").len()
        }
    }

    #[async_trait]
    impl GrievanceAssignment for StubAssignment {
        async fn assign(
            &self,
            grievance: &GrievanceId,
            faculty: &UserId,
        ) -> Result<Grievance, Error> {
            self.calls
                .lock()
                .expect("calls lock")
                .push((*grievance, *faculty));
            self.outcome
                .lock()
                .expect("outcome lock")
                .take()
                .expect("assignment outcome configured")
        }
    }

    struct TestPorts {
        grievances: Arc<RecordingGrievanceQuery>,
        assignment: Arc<StubAssignment>,
    }

    impl Default for TestPorts {
        fn default() -> Self {
            Self {
                grievances: Arc::new(RecordingGrievanceQuery::default()),
                assignment: Arc::new(StubAssignment::never_called()),
            }
        }
    }

    fn test_app(
        ports: &TestPorts,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let state = web::Data::new(HttpState::new(
            ports.grievances.clone(),
            Arc::new(StubFacultyQuery),
            ports.assignment.clone(),
            Arc::new(FixtureLoginService),
        ));
        App::new()
            .app_data(state)
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/seed-session/{role}",
                web::get().to(|session: SessionContext, path: web::Path<String>| async move {
                    let role = path.into_inner().parse::<Role>().map_err(|err| {
                        Error::internal(format!("invalid seeded role: {err}"))
                    })?;
                    session.persist_identity(&AuthenticatedUser {
                        id: UserId::random(),
                        role,
                    })?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .service(
                web::scope("/api")
                    .service(list_grievances)
                    .service(assign_grievance)
                    .service(list_faculty),
            )
    }

    async fn session_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        role: &str,
    ) -> actix_web::cookie::Cookie<'static> {
        let res = actix_test::call_service(
            app,
            actix_test::TestRequest::get()
                .uri(&format!("/seed-session/{role}"))
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn listing_without_session_is_unauthorised() {
        let ports = TestPorts::default();
        let app = actix_test::init_service(test_app(&ports)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/admin/grievances")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(ports.grievances.seen.lock().expect("seen lock").is_empty());
    }

    #[rstest]
    #[case("student")]
    #[case("faculty")]
    #[actix_web::test]
    async fn listing_with_non_admin_role_is_forbidden(#[case] role: &str) {
        let ports = TestPorts::default();
        let app = actix_test::init_service(test_app(&ports)).await;
        let cookie = session_cookie(&app, role).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/admin/grievances")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn listing_with_no_facets_passes_an_empty_filter() {
        let ports = TestPorts::default();
        let app = actix_test::init_service(test_app(&ports)).await;
        let cookie = session_cookie(&app, "admin").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/admin/grievances")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let seen = ports.grievances.seen.lock().expect("seen lock");
        assert_eq!(seen.len(), 1);
        assert!(seen[0].is_empty());
    }

    #[actix_web::test]
    async fn listing_translates_facets_into_the_domain_filter() {
        let ports = TestPorts::default();
        let app = actix_test::init_service(test_app(&ports)).await;
        let cookie = session_cookie(&app, "admin").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/admin/grievances?department=Computer%20Science&status=&month=3&year=2024")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let seen = ports.grievances.seen.lock().expect("seen lock");
        let filter = &seen[0];
        assert_eq!(
            filter.department().map(ToString::to_string),
            Some("Computer Science".to_owned())
        );
        assert_eq!(filter.status(), None);
        let window = filter.window().expect("window present");
        assert_eq!(
            window.start(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single().expect("valid")
        );
        assert_eq!(
            window.end(),
            Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).single().expect("valid")
        );
    }

    #[rstest]
    #[case("month=13&year=2024", "month", "invalid_month")]
    #[case("month=3&year=abc", "year", "invalid_year")]
    #[case("status=closed", "status", "invalid_status")]
    #[actix_web::test]
    async fn malformed_facets_are_rejected_before_the_query_runs(
        #[case] query: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let ports = TestPorts::default();
        let app = actix_test::init_service(test_app(&ports)).await;
        let cookie = session_cookie(&app, "admin").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/admin/grievances?{query}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(value["details"]["field"], field);
        assert_eq!(value["details"]["code"], code);
        assert!(ports.grievances.seen.lock().expect("seen lock").is_empty());
    }

    #[actix_web::test]
    async fn listing_serialises_camel_case_with_joined_users() {
        let ports = TestPorts::default();
        let app = actix_test::init_service(test_app(&ports)).await;
        let cookie = session_cookie(&app, "admin").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/admin/grievances")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let value: Value = actix_test::read_body_json(res).await;
        let first = &value.as_array().expect("array")[0];
        assert_eq!(first["status"], "open");
        assert_eq!(first["student"]["registrationNumber"], "CS-2021-014");
        assert!(first["student"].get("registration_number").is_none());
        assert!(first.get("assignedTo").is_none());
    }

    #[actix_web::test]
    async fn assignment_returns_the_updated_grievance() {
        let ports = TestPorts {
            assignment: Arc::new(StubAssignment::with_outcome(Ok(sample_grievance(
                GrievanceStatus::Assigned,
            )))),
            ..TestPorts::default()
        };
        let app = actix_test::init_service(test_app(&ports)).await;
        let cookie = session_cookie(&app, "admin").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/admin/grievances/{GRIEVANCE_ID}/assign"))
                .cookie(cookie)
                .set_json(json!({ "facultyId": FACULTY_ID }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(value["status"], "assigned");
        assert_eq!(value["assignedTo"]["name"], "Dr. Kavita Iyer");

        let calls = ports.assignment.calls.lock().expect("calls lock");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.to_string(), GRIEVANCE_ID);
        assert_eq!(calls[0].1.to_string(), FACULTY_ID);
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({ "facultyId": "" }))]
    #[case(json!({ "facultyId": "   " }))]
    #[actix_web::test]
    async fn assignment_requires_a_faculty_id(#[case] body: Value) {
        let ports = TestPorts::default();
        let app = actix_test::init_service(test_app(&ports)).await;
        let cookie = session_cookie(&app, "admin").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/admin/grievances/{GRIEVANCE_ID}/assign"))
                .cookie(cookie)
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(value["details"]["field"], "facultyId");
        assert_eq!(value["details"]["code"], "missing_field");
        assert_eq!(ports.assignment.call_count(), 0);
    }

    #[actix_web::test]
    async fn assignment_rejects_malformed_ids() {
        let ports = TestPorts::default();
        let app = actix_test::init_service(test_app(&ports)).await;
        let cookie = session_cookie(&app, "admin").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/admin/grievances/not-a-uuid/assign")
                .cookie(cookie)
                .set_json(json!({ "facultyId": FACULTY_ID }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(value["details"]["code"], "invalid_uuid");
        assert_eq!(ports.assignment.call_count(), 0);
    }

    #[rstest]
    #[case(Error::not_found("Grievance not found"), StatusCode::NOT_FOUND)]
    #[case(Error::invalid_request("Invalid faculty member"), StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn assignment_surface_domain_failures(
        #[case] outcome: Error,
        #[case] expected: StatusCode,
    ) {
        let expected_message = outcome.message().to_owned();
        let ports = TestPorts {
            assignment: Arc::new(StubAssignment::with_outcome(Err(outcome))),
            ..TestPorts::default()
        };
        let app = actix_test::init_service(test_app(&ports)).await;
        let cookie = session_cookie(&app, "admin").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/admin/grievances/{GRIEVANCE_ID}/assign"))
                .cookie(cookie)
                .set_json(json!({ "facultyId": FACULTY_ID }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), expected);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(value["message"], expected_message);
    }

    #[actix_web::test]
    async fn faculty_roster_serialises_contact_fields() {
        let ports = TestPorts::default();
        let app = actix_test::init_service(test_app(&ports)).await;
        let cookie = session_cookie(&app, "admin").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/admin/faculty")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(res).await;
        let first = &value.as_array().expect("array")[0];
        assert_eq!(first["name"], "Dr. Kavita Iyer");
        assert_eq!(first["email"], "iyer@example.edu");
        assert_eq!(first["department"], "Computer Science");
    }
}
