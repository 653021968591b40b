//! Grievance aggregate and its status lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::{Department, FacultySummary, User, UserId};

/// Validation errors returned by the grievance constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrievanceValidationError {
    EmptyId,
    InvalidId,
    EmptyTitle,
    UnknownStatus { value: String },
    AssignedWithoutAssignee,
}

impl fmt::Display for GrievanceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "grievance id must not be empty"),
            Self::InvalidId => write!(f, "grievance id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::UnknownStatus { value } => {
                write!(f, "status must be open, assigned, or resolved (got {value})")
            }
            Self::AssignedWithoutAssignee => {
                write!(f, "an assigned grievance must carry an assignee")
            }
        }
    }
}

impl std::error::Error for GrievanceValidationError {}

/// Stable grievance identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GrievanceId(Uuid);

impl GrievanceId {
    /// Validate and construct a [`GrievanceId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, GrievanceValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(GrievanceValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| GrievanceValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`GrievanceId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for GrievanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<GrievanceId> for String {
    fn from(value: GrievanceId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for GrievanceId {
    type Error = GrievanceValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Grievance lifecycle state.
///
/// Created as `Open`, moved to `Assigned` by the admin assignment
/// operation, and to `Resolved` by the faculty workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GrievanceStatus {
    Open,
    Assigned,
    Resolved,
}

impl GrievanceStatus {
    /// Stable lowercase identifier used in storage and on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Assigned => "assigned",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for GrievanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrievanceStatus {
    type Err = GrievanceValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "assigned" => Ok(Self::Assigned),
            "resolved" => Ok(Self::Resolved),
            other => Err(GrievanceValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Filing student's identity and contact fields, joined onto each listed
/// grievance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDetails {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub registration_number: Option<String>,
    pub program: Option<String>,
    pub department: Department,
}

impl From<&User> for StudentDetails {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            registration_number: user.registration_number().map(ToOwned::to_owned),
            program: user.program().map(ToOwned::to_owned),
            department: user.department().clone(),
        }
    }
}

/// Assigned faculty member's identity and contact fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeDetails {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub department: Department,
}

impl From<&FacultySummary> for AssigneeDetails {
    fn from(summary: &FacultySummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name.clone(),
            email: summary.email.clone(),
            department: summary.department.clone(),
        }
    }
}

/// A student-filed grievance, enriched with the joined user details the
/// admin listing exposes.
///
/// ## Invariants
/// - `status == Assigned` implies `assigned_to` is present.
/// - `created_at` never changes after filing; listings sort on it
///   descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grievance {
    id: GrievanceId,
    title: String,
    description: String,
    department: Department,
    status: GrievanceStatus,
    created_at: DateTime<Utc>,
    student: StudentDetails,
    assigned_to: Option<AssigneeDetails>,
}

impl Grievance {
    /// Build a grievance from validated components, enforcing the
    /// assigned-implies-assignee invariant.
    pub fn try_new(
        id: GrievanceId,
        title: impl Into<String>,
        description: impl Into<String>,
        department: Department,
        status: GrievanceStatus,
        created_at: DateTime<Utc>,
        student: StudentDetails,
        assigned_to: Option<AssigneeDetails>,
    ) -> Result<Self, GrievanceValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(GrievanceValidationError::EmptyTitle);
        }
        if status == GrievanceStatus::Assigned && assigned_to.is_none() {
            return Err(GrievanceValidationError::AssignedWithoutAssignee);
        }
        Ok(Self {
            id,
            title,
            description: description.into(),
            department,
            status,
            created_at,
            student,
            assigned_to,
        })
    }

    /// Stable grievance identifier.
    pub const fn id(&self) -> &GrievanceId {
        &self.id
    }

    /// Short summary entered by the student.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Free-text body entered by the student.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Department the grievance is filed against.
    pub const fn department(&self) -> &Department {
        &self.department
    }

    /// Current lifecycle state.
    pub const fn status(&self) -> GrievanceStatus {
        self.status
    }

    /// Filing timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Joined filing-student details.
    pub const fn student(&self) -> &StudentDetails {
        &self.student
    }

    /// Joined assignee details, when assigned.
    pub const fn assigned_to(&self) -> Option<&AssigneeDetails> {
        self.assigned_to.as_ref()
    }

    /// Apply the assignment transition: set the assignee and move the
    /// status to [`GrievanceStatus::Assigned`].
    ///
    /// Reassigning an already-assigned grievance overwrites the previous
    /// assignee; the lifecycle state stays `Assigned`.
    pub fn with_assignee(mut self, assignee: AssigneeDetails) -> Self {
        self.assigned_to = Some(assignee);
        self.status = GrievanceStatus::Assigned;
        self
    }
}
