//! Shared helper utilities for backend integration tests.
//!
//! Provides an in-memory implementation of both persistence ports plus an
//! application factory that wires the real domain services and HTTP
//! handlers over it, so the suite exercises the full request path without
//! PostgreSQL.

use std::sync::{Arc, Mutex};

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::{test, web, App};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use backend::domain::grievance::{Grievance, GrievanceId, GrievanceStatus, StudentDetails};
use backend::domain::ports::{
    FixtureLoginService, GrievancePersistenceError, GrievanceRepository, UserPersistenceError,
    UserRepository,
};
use backend::domain::user::{Department, FacultySummary, Role, User, UserId};
use backend::domain::{AdminQueryService, AssignmentService, GrievanceFilter};
use backend::inbound::http::admin::{assign_grievance, list_faculty, list_grievances};
use backend::inbound::http::auth::login;
use backend::inbound::http::state::HttpState;

/// In-memory store backing both persistence ports.
#[derive(Default)]
pub struct InMemoryStore {
    grievances: Mutex<Vec<Grievance>>,
    users: Mutex<Vec<User>>,
}

impl InMemoryStore {
    pub fn insert_user(&self, user: User) {
        self.users.lock().expect("users lock").push(user);
    }

    pub fn insert_grievance(&self, grievance: Grievance) {
        self.grievances
            .lock()
            .expect("grievances lock")
            .push(grievance);
    }

    pub fn grievance(&self, id: &GrievanceId) -> Option<Grievance> {
        self.grievances
            .lock()
            .expect("grievances lock")
            .iter()
            .find(|grievance| grievance.id() == id)
            .cloned()
    }
}

#[async_trait]
impl GrievanceRepository for InMemoryStore {
    async fn list(
        &self,
        filter: &GrievanceFilter,
    ) -> Result<Vec<Grievance>, GrievancePersistenceError> {
        let mut matching: Vec<Grievance> = self
            .grievances
            .lock()
            .expect("grievances lock")
            .iter()
            .filter(|grievance| filter.matches(grievance))
            .cloned()
            .collect();
        matching.sort_by_key(|grievance| std::cmp::Reverse(grievance.created_at()));
        Ok(matching)
    }

    async fn find_by_id(
        &self,
        id: &GrievanceId,
    ) -> Result<Option<Grievance>, GrievancePersistenceError> {
        Ok(self.grievance(id))
    }

    async fn assign(
        &self,
        id: &GrievanceId,
        assignee: &FacultySummary,
    ) -> Result<Option<Grievance>, GrievancePersistenceError> {
        let mut grievances = self.grievances.lock().expect("grievances lock");
        let Some(slot) = grievances.iter_mut().find(|grievance| grievance.id() == id) else {
            return Ok(None);
        };
        let updated = slot.clone().with_assignee(assignee.into());
        *slot = updated.clone();
        Ok(Some(updated))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .users
            .lock()
            .expect("users lock")
            .iter()
            .find(|user| user.id() == id)
            .cloned())
    }

    async fn list_faculty(&self) -> Result<Vec<FacultySummary>, UserPersistenceError> {
        let mut roster: Vec<FacultySummary> = self
            .users
            .lock()
            .expect("users lock")
            .iter()
            .filter(|user| user.role() == Role::Faculty)
            .map(FacultySummary::from)
            .collect();
        roster.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roster)
    }
}

pub fn department(name: &str) -> Department {
    Department::new(name).expect("valid department")
}

pub fn seed_user(name: &str, email: &str, role: Role, dept: &str) -> User {
    User::try_new(UserId::random(), name, email, role, department(dept)).expect("valid user")
}

pub fn seed_grievance(
    title: &str,
    dept: &str,
    status: GrievanceStatus,
    created_at: &str,
    student: &User,
) -> Grievance {
    let created = created_at
        .parse::<DateTime<Utc>>()
        .expect("valid timestamp");
    Grievance::try_new(
        GrievanceId::random(),
        title,
        "filed via test seed",
        department(dept),
        status,
        created,
        StudentDetails::from(student),
        None,
    )
    .expect("valid grievance")
}

/// Build the application under test over the shared store.
pub fn test_app(
    store: Arc<InMemoryStore>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let queries = Arc::new(AdminQueryService::new(store.clone(), store.clone()));
    let assignment = Arc::new(AssignmentService::new(store.clone(), store));
    let state = web::Data::new(HttpState::new(
        queries.clone(),
        queries,
        assignment,
        Arc::new(FixtureLoginService),
    ));

    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();

    App::new().app_data(state).service(
        web::scope("/api")
            .wrap(session)
            .service(login)
            .service(list_grievances)
            .service(assign_grievance)
            .service(list_faculty),
    )
}

/// Log in with the fixture admin credentials and return the session cookie.
pub async fn admin_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> actix_web::cookie::Cookie<'static> {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(serde_json::json!({
                "email": "admin@example.edu",
                "password": "password",
            }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "admin login should succeed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
