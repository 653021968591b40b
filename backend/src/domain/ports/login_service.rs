//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure. This makes HTTP handler tests deterministic because they
//! can substitute a test double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::user::{Role, UserId};
use crate::domain::{Error, LoginCredentials};

/// Identity established by a successful login, persisted into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Stable account identifier.
    pub id: UserId,
    /// Account role driving endpoint authorisation.
    pub role: Role,
}

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, Error>;
}

/// Temporary in-memory authenticator used until persistence is wired.
///
/// This preserves the development behaviour: `admin@example.edu` /
/// `password` authenticates as a fixed admin identity.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, Error> {
        if credentials.email() == "admin@example.edu" && credentials.password() == "password" {
            let id = UserId::new("123e4567-e89b-12d3-a456-426614174000")
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
            Ok(AuthenticatedUser {
                id,
                role: Role::Admin,
            })
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn credentials(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(email, password).expect("valid test credentials")
    }

    #[tokio::test]
    async fn fixture_credentials_authenticate_as_admin() {
        let identity = FixtureLoginService
            .authenticate(&credentials("admin@example.edu", "password"))
            .await
            .expect("fixture credentials authenticate");
        assert_eq!(identity.role, Role::Admin);
    }

    #[rstest]
    #[case("admin@example.edu", "wrong")]
    #[case("someone@example.edu", "password")]
    #[tokio::test]
    async fn other_credentials_are_rejected(#[case] email: &str, #[case] password: &str) {
        let err = FixtureLoginService
            .authenticate(&credentials(email, password))
            .await
            .expect_err("non fixture credentials must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
