//! PostgreSQL-backed `GrievanceRepository` implementation using Diesel ORM.
//!
//! Listings run as two queries: one over `grievances` with the filter
//! translated into SQL predicates, then a single `eq_any` lookup over
//! `users` to join student and assignee details in process. The assignment
//! mutation is a single `UPDATE ... RETURNING` so callers observe it
//! atomically.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::filter::GrievanceFilter;
use crate::domain::grievance::{
    AssigneeDetails, Grievance, GrievanceId, GrievanceStatus, StudentDetails,
};
use crate::domain::ports::{GrievancePersistenceError, GrievanceRepository, UserPersistenceError};
use crate::domain::user::{Department, FacultySummary};

use super::diesel_user_repository::row_to_user;
use super::models::{GrievanceRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{grievances, users};

/// Diesel-backed implementation of the `GrievanceRepository` port.
#[derive(Clone)]
pub struct DieselGrievanceRepository {
    pool: DbPool,
}

impl DieselGrievanceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain grievance persistence errors.
fn map_pool_error(error: PoolError) -> GrievancePersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            GrievancePersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain grievance persistence errors.
fn map_diesel_error(error: diesel::result::Error) -> GrievancePersistenceError {
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
        DieselError::NotFound => GrievancePersistenceError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            GrievancePersistenceError::connection("database connection error")
        }
        _ => GrievancePersistenceError::query("database error"),
    }
}

type BoxedGrievanceQuery = grievances::BoxedQuery<'static, diesel::pg::Pg>;

/// Translate the validated filter into SQL predicates.
fn apply_filter(filter: &GrievanceFilter) -> BoxedGrievanceQuery {
    let mut query = grievances::table.into_boxed();

    if let Some(department) = filter.department() {
        query = query.filter(grievances::department.eq(department.as_ref().to_owned()));
    }
    if let Some(status) = filter.status() {
        query = query.filter(grievances::status.eq(status.as_str()));
    }
    if let Some(window) = filter.window() {
        query = query
            .filter(grievances::created_at.ge(window.start()))
            .filter(grievances::created_at.lt(window.end()));
    }

    query
}

fn user_persistence_to_grievance(error: UserPersistenceError) -> GrievancePersistenceError {
    match error {
        UserPersistenceError::Connection { message } => {
            GrievancePersistenceError::connection(message)
        }
        UserPersistenceError::Query { message } => GrievancePersistenceError::query(message),
    }
}

fn student_details(
    row: &GrievanceRow,
    users_by_id: &HashMap<Uuid, UserRow>,
) -> Result<StudentDetails, GrievancePersistenceError> {
    let user_row = users_by_id.get(&row.student_id).cloned().ok_or_else(|| {
        GrievancePersistenceError::query(format!(
            "grievance {} references missing student {}",
            row.id, row.student_id
        ))
    })?;
    let user = row_to_user(user_row).map_err(user_persistence_to_grievance)?;
    Ok(StudentDetails::from(&user))
}

fn assignee_details(
    row: &GrievanceRow,
    users_by_id: &HashMap<Uuid, UserRow>,
) -> Result<Option<AssigneeDetails>, GrievancePersistenceError> {
    let Some(assignee_id) = row.assigned_to else {
        return Ok(None);
    };
    let user_row = users_by_id.get(&assignee_id).cloned().ok_or_else(|| {
        GrievancePersistenceError::query(format!(
            "grievance {} references missing assignee {}",
            row.id, assignee_id
        ))
    })?;
    let user = row_to_user(user_row).map_err(user_persistence_to_grievance)?;
    Ok(Some(AssigneeDetails {
        id: *user.id(),
        name: user.name().to_owned(),
        email: user.email().to_owned(),
        department: user.department().clone(),
    }))
}

/// Compose a domain grievance from its row and the joined user rows.
fn compose_grievance(
    row: &GrievanceRow,
    users_by_id: &HashMap<Uuid, UserRow>,
) -> Result<Grievance, GrievancePersistenceError> {
    let status = row
        .status
        .parse::<GrievanceStatus>()
        .map_err(|err| GrievancePersistenceError::query(format!("grievance {}: {err}", row.id)))?;
    let department = Department::new(row.department.clone())
        .map_err(|err| GrievancePersistenceError::query(format!("grievance {}: {err}", row.id)))?;

    Grievance::try_new(
        GrievanceId::from_uuid(row.id),
        row.title.clone(),
        row.description.clone(),
        department,
        status,
        row.created_at,
        student_details(row, users_by_id)?,
        assignee_details(row, users_by_id)?,
    )
    .map_err(|err| GrievancePersistenceError::query(format!("grievance {}: {err}", row.id)))
}

fn referenced_user_ids(rows: &[GrievanceRow]) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = rows.iter().map(|row| row.student_id).collect();
    ids.extend(rows.iter().filter_map(|row| row.assigned_to));
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl DieselGrievanceRepository {
    async fn load_users(
        &self,
        ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, UserRow>, GrievancePersistenceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(ids))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(|row| (row.id, row)).collect())
    }

    async fn compose_all(
        &self,
        rows: Vec<GrievanceRow>,
    ) -> Result<Vec<Grievance>, GrievancePersistenceError> {
        let users_by_id = self.load_users(referenced_user_ids(&rows)).await?;
        rows.iter()
            .map(|row| compose_grievance(row, &users_by_id))
            .collect()
    }
}

#[async_trait]
impl GrievanceRepository for DieselGrievanceRepository {
    async fn list(
        &self,
        filter: &GrievanceFilter,
    ) -> Result<Vec<Grievance>, GrievancePersistenceError> {
        let rows: Vec<GrievanceRow> = {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            apply_filter(filter)
                .order(grievances::created_at.desc())
                .select(GrievanceRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?
        };

        self.compose_all(rows).await
    }

    async fn find_by_id(
        &self,
        id: &GrievanceId,
    ) -> Result<Option<Grievance>, GrievancePersistenceError> {
        let row: Option<GrievanceRow> = {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            grievances::table
                .filter(grievances::id.eq(id.as_uuid()))
                .select(GrievanceRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
        };

        let Some(row) = row else {
            return Ok(None);
        };
        let users_by_id = self.load_users(referenced_user_ids(std::slice::from_ref(&row))).await?;
        compose_grievance(&row, &users_by_id).map(Some)
    }

    async fn assign(
        &self,
        id: &GrievanceId,
        assignee: &FacultySummary,
    ) -> Result<Option<Grievance>, GrievancePersistenceError> {
        let updated: Option<GrievanceRow> = {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::update(grievances::table.filter(grievances::id.eq(id.as_uuid())))
                .set((
                    grievances::assigned_to.eq(Some(*assignee.id.as_uuid())),
                    grievances::status.eq(GrievanceStatus::Assigned.as_str()),
                    grievances::updated_at.eq(diesel::dsl::now),
                ))
                .returning(GrievanceRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
        };

        let Some(row) = updated else {
            return Ok(None);
        };

        // The assignee details arrived validated from the caller; only the
        // student needs a lookup.
        let users_by_id = self
            .load_users(vec![row.student_id])
            .await?;
        let student = student_details(&row, &users_by_id)?;
        let grievance = Grievance::try_new(
            GrievanceId::from_uuid(row.id),
            row.title.clone(),
            row.description.clone(),
            Department::new(row.department.clone()).map_err(|err| {
                GrievancePersistenceError::query(format!("grievance {}: {err}", row.id))
            })?,
            GrievanceStatus::Assigned,
            row.created_at,
            student,
            Some(AssigneeDetails::from(assignee)),
        )
        .map_err(|err| GrievancePersistenceError::query(format!("grievance {}: {err}", row.id)))?;

        Ok(Some(grievance))
    }
}
