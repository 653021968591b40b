//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: define the strongly typed grievance-tracking model used by the
//! API and persistence layers. Keep types immutable and document invariants
//! and serialisation contracts (serde) in each type's Rustdoc.

pub mod admin_query;
pub mod assignment;
pub mod auth;
pub mod error;
pub mod filter;
pub mod grievance;
pub mod ports;
pub mod user;

pub use self::admin_query::AdminQueryService;
pub use self::assignment::AssignmentService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::filter::{FilterError, GrievanceFilter, Month, MonthWindow, Year};
pub use self::grievance::{
    AssigneeDetails, Grievance, GrievanceId, GrievanceStatus, GrievanceValidationError,
    StudentDetails,
};
pub use self::user::{Department, FacultySummary, Role, User, UserId, UserValidationError};

/// Header carrying the request correlation identifier on every response.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient result alias for code returning domain errors.
pub type ApiResult<T> = Result<T, Error>;
