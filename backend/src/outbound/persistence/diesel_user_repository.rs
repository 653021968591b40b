//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::{Department, FacultySummary, Role, User, UserId};

use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain user persistence errors.
pub(crate) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain user persistence errors.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

/// Convert a database row to a domain [`User`].
///
/// Rows written by the application always satisfy the domain invariants;
/// violations indicate out-of-band writes and surface as query errors.
pub(crate) fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let role = row
        .role
        .parse::<Role>()
        .map_err(|err| UserPersistenceError::query(format!("user {}: {err}", row.id)))?;
    let department = Department::new(row.department)
        .map_err(|err| UserPersistenceError::query(format!("user {}: {err}", row.id)))?;
    let user = User::try_new(UserId::from_uuid(row.id), row.name, row.email, role, department)
        .map_err(|err| UserPersistenceError::query(format!("user {}: {err}", row.id)))?;
    Ok(user.with_student_profile(row.registration_number, row.program))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list_faculty(&self) -> Result<Vec<FacultySummary>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .filter(users::role.eq(Role::Faculty.as_str()))
            .order(users::name.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| row_to_user(row).map(|user| FacultySummary::from(&user)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion and error mapping coverage.
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    fn row(role: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            name: "Dr. Kavita Iyer".into(),
            email: "iyer@example.edu".into(),
            password_hash: "$argon2id$stub".into(),
            role: role.into(),
            department: "Computer Science".into(),
            registration_number: None,
            program: None,
        }
    }

    #[test]
    fn row_converts_to_domain_user() {
        let user = row_to_user(row("faculty")).expect("valid row converts");
        assert_eq!(user.role(), Role::Faculty);
        assert_eq!(user.name(), "Dr. Kavita Iyer");
    }

    #[test]
    fn unknown_role_surfaces_a_query_error() {
        let err = row_to_user(row("dean")).expect_err("unknown role must fail");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    #[case(PoolError::checkout("connection refused"))]
    #[case(PoolError::build("invalid URL"))]
    fn pool_errors_map_to_connection_errors(#[case] pool_err: PoolError) {
        let repo_err = map_pool_error(pool_err);
        assert!(matches!(repo_err, UserPersistenceError::Connection { .. }));
    }

    #[test]
    fn diesel_not_found_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(repo_err, UserPersistenceError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }
}
