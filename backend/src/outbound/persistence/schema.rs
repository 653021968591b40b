//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// User accounts: students, faculty, and admins.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Full name shown in rosters and listings.
        name -> Varchar,
        /// Unique contact/login email address.
        email -> Varchar,
        /// Argon2id PHC-format password hash.
        password_hash -> Varchar,
        /// Account role: student, faculty, or admin.
        role -> Varchar,
        /// Department the user belongs to.
        department -> Varchar,
        /// Registration number, populated for students only.
        registration_number -> Nullable<Varchar>,
        /// Study program, populated for students only.
        program -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Student-filed grievances.
    grievances (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Short summary entered by the student.
        title -> Varchar,
        /// Free-text body entered by the student.
        description -> Text,
        /// Department the grievance is filed against.
        department -> Varchar,
        /// Lifecycle state: open, assigned, or resolved.
        status -> Varchar,
        /// Filing student (references users.id).
        student_id -> Uuid,
        /// Assigned faculty member (references users.id), when assigned.
        assigned_to -> Nullable<Uuid>,
        /// Filing timestamp; listings sort on this descending.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, grievances);
