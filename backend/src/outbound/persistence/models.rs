//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{grievances, users};

/// Queryable row for user accounts.
///
/// Selects only the columns the adapters read; audit timestamps stay in
/// the database.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub department: String,
    pub registration_number: Option<String>,
    pub program: Option<String>,
}

/// Queryable row for grievances.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = grievances)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GrievanceRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub department: String,
    pub status: String,
    pub student_id: Uuid,
    pub assigned_to: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
