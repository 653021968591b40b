//! Diesel-backed `LoginService` adapter.
//!
//! Looks the account up by email and verifies the supplied password against
//! the stored Argon2id PHC-format hash. Unknown accounts and wrong
//! passwords produce the same `unauthorized` error so the endpoint does not
//! leak which addresses exist.

use argon2::{Argon2, PasswordVerifier};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AuthenticatedUser, LoginService};
use crate::domain::user::{Role, UserId};
use crate::domain::{Error, LoginCredentials};

use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `LoginService` port.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a new service with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> Error {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            Error::service_unavailable(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> Error {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            Error::service_unavailable("database connection error")
        }
        _ => Error::internal("database error"),
    }
}

/// Verify a plaintext password against an Argon2id PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or an internal
/// error if the stored hash is malformed.
fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|err| Error::internal(format!("malformed stored credential hash: {err}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(Error::internal(format!(
            "credential verification failed: {err}"
        ))),
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, Error> {
        let row: Option<UserRow> = {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            users::table
                .filter(users::email.eq(credentials.email()))
                .select(UserRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
        };

        let Some(row) = row else {
            return Err(Error::unauthorized("invalid credentials"));
        };

        if !verify_password(credentials.password(), &row.password_hash)? {
            return Err(Error::unauthorized("invalid credentials"));
        }

        let role = row
            .role
            .parse::<Role>()
            .map_err(|err| Error::internal(format!("user {}: {err}", row.id)))?;

        Ok(AuthenticatedUser {
            id: UserId::from_uuid(row.id),
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Password verification coverage; the lookup path is exercised by the
    //! integration suite through the driving port.
    use argon2::password_hash::rand_core::OsRng;
    use argon2::password_hash::SaltString;
    use argon2::PasswordHasher;

    use super::*;
    use crate::domain::ErrorCode;

    fn hash_password(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("hashing succeeds")
            .to_string()
    }

    #[test]
    fn matching_password_verifies() {
        let hash = hash_password("correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &hash).expect("verifies"));
    }

    #[test]
    fn wrong_password_is_a_mismatch_not_an_error() {
        let hash = hash_password("secret");
        assert!(!verify_password("other", &hash).expect("verifies"));
    }

    #[test]
    fn malformed_hash_is_an_internal_error() {
        let err = verify_password("secret", "not-a-phc-hash").expect_err("malformed hash");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
