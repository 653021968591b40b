//! User data model.
//!
//! Users are read-only in this service apart from login bookkeeping:
//! grievance filing and account management live in other services.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    UnknownRole { value: String },
    EmptyName,
    EmptyEmail,
    EmptyDepartment,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::UnknownRole { value } => {
                write!(f, "role must be student, faculty, or admin (got {value})")
            }
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyDepartment => write!(f, "department must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Role assigned to a user account.
///
/// Grievances may only be assigned to users with [`Role::Faculty`]; the
/// admin endpoints require [`Role::Admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    /// Stable lowercase identifier used in storage and on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "faculty" => Ok(Self::Faculty),
            "admin" => Ok(Self::Admin),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// Department a user belongs to or a grievance is filed against.
///
/// Stored as the department's display name ("Computer Science"); treated as
/// an opaque, non-empty label rather than a closed enum so new departments
/// need no code change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Department(String);

impl Department {
    /// Validate and construct a [`Department`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyDepartment);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for Department {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Department> for String {
    fn from(value: Department) -> Self {
        value.0
    }
}

impl TryFrom<String> for Department {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user.
///
/// ## Invariants
/// - `name` and `email` are non-empty once trimmed.
/// - `registration_number` and `program` are only meaningful for students;
///   they are carried verbatim when present and never populated for other
///   roles by this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: Role,
    department: Department,
    registration_number: Option<String>,
    program: Option<String>,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn try_new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        department: Department,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self {
            id,
            name,
            email,
            role,
            department,
            registration_number: None,
            program: None,
        })
    }

    /// Attach the student-specific enrolment fields.
    pub fn with_student_profile(
        mut self,
        registration_number: Option<String>,
        program: Option<String>,
    ) -> Self {
        self.registration_number = registration_number;
        self.program = program;
        self
    }

    /// Stable user identifier.
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Full name shown in rosters and grievance listings.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Account role.
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Department the user belongs to.
    pub const fn department(&self) -> &Department {
        &self.department
    }

    /// Student registration number, when the user is a student.
    pub fn registration_number(&self) -> Option<&str> {
        self.registration_number.as_deref()
    }

    /// Study program, when the user is a student.
    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }
}

/// Roster entry returned by the faculty listing.
///
/// Deliberately narrower than [`User`]: the roster never exposes role or
/// student enrolment fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultySummary {
    /// Identifier used as the assignment target.
    pub id: UserId,
    /// Full name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Department the faculty member belongs to.
    pub department: Department,
}

impl From<&User> for FacultySummary {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            department: user.department().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn department() -> Department {
        Department::new("Computer Science").expect("valid department")
    }

    #[rstest]
    #[case("student", Role::Student)]
    #[case("faculty", Role::Faculty)]
    #[case("admin", Role::Admin)]
    fn role_parses_stable_identifiers(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>().expect("role parses"), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[test]
    fn role_rejects_unknown_values() {
        let err = "dean".parse::<Role>().expect_err("unknown role must fail");
        assert!(matches!(err, UserValidationError::UnknownRole { .. }));
    }

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case("not-a-uuid", UserValidationError::InvalidId)]
    fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
    }

    #[test]
    fn department_rejects_blank_names() {
        assert_eq!(
            Department::new("   ").expect_err("blank department"),
            UserValidationError::EmptyDepartment
        );
    }

    #[test]
    fn user_carries_student_profile() {
        let user = User::try_new(
            UserId::random(),
            "Priya Sharma",
            "priya@example.edu",
            Role::Student,
            department(),
        )
        .expect("valid user")
        .with_student_profile(Some("CS-2021-014".into()), Some("B.Tech CSE".into()));

        assert_eq!(user.registration_number(), Some("CS-2021-014"));
        assert_eq!(user.program(), Some("B.Tech CSE"));
    }

    #[rstest]
    #[case("", "a@b.edu")]
    #[case("Priya", " ")]
    fn user_rejects_blank_name_or_email(#[case] name: &str, #[case] email: &str) {
        let result = User::try_new(UserId::random(), name, email, Role::Admin, department());
        assert!(result.is_err());
    }

    #[test]
    fn faculty_summary_narrows_user() {
        let user = User::try_new(
            UserId::random(),
            "Dr. Rao",
            "rao@example.edu",
            Role::Faculty,
            department(),
        )
        .expect("valid user");

        let summary = FacultySummary::from(&user);
        assert_eq!(summary.name, "Dr. Rao");
        assert_eq!(summary.id, *user.id());
    }
}
