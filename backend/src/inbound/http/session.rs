//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting or requiring an
//! authenticated identity.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::AuthenticatedUser;
use crate::domain::user::{Role, UserId};
use crate::domain::Error;

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USER_ROLE_KEY: &str = "user_role";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity in the session cookie.
    pub fn persist_identity(&self, identity: &AuthenticatedUser) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, identity.id.to_string())
            .and_then(|()| self.0.insert(USER_ROLE_KEY, identity.role.as_str()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current identity from the session, if present and intact.
    pub fn identity(&self) -> Result<Option<AuthenticatedUser>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let role = self
            .0
            .get::<String>(USER_ROLE_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;

        let (Some(id), Some(role)) = (id, role) else {
            return Ok(None);
        };

        match (UserId::new(&id), role.parse::<Role>()) {
            (Ok(id), Ok(role)) => Ok(Some(AuthenticatedUser { id, role })),
            _ => {
                tracing::warn!("discarding malformed identity in session cookie");
                Ok(None)
            }
        }
    }

    /// Require an authenticated identity or return `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<AuthenticatedUser, Error> {
        self.identity()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require an authenticated admin or return `401`/`403`.
    pub fn require_admin(&self) -> Result<AuthenticatedUser, Error> {
        let identity = self.require_identity()?;
        if identity.role != Role::Admin {
            return Err(Error::forbidden("admin role required"));
        }
        Ok(identity)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    const FIXTURE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn session_app(
        role: Role,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/login",
                web::get().to(move |session: SessionContext| async move {
                    let identity = AuthenticatedUser {
                        id: UserId::new(FIXTURE_ID).map_err(|err| {
                            Error::internal(format!("invalid fixture id: {err}"))
                        })?,
                        role,
                    };
                    session.persist_identity(&identity)?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/admin-only",
                web::get().to(|session: SessionContext| async move {
                    let identity = session.require_admin()?;
                    Ok::<_, Error>(HttpResponse::Ok().body(identity.id.to_string()))
                }),
            )
    }

    async fn login_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> actix_web::cookie::Cookie<'static> {
        let res = test::call_service(app, test::TestRequest::get().uri("/login").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn admin_identity_round_trips() {
        let app = test::init_service(session_app(Role::Admin)).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/admin-only")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, FIXTURE_ID.as_bytes());
    }

    #[actix_web::test]
    async fn missing_session_is_unauthorised() {
        let app = test::init_service(session_app(Role::Admin)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/admin-only").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn non_admin_role_is_forbidden() {
        let app = test::init_service(session_app(Role::Faculty)).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/admin-only")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
