//! Admin listing filter and its date-window arithmetic.
//!
//! The filter is built from the four optional string facets the dashboard
//! sends (`department`, `status`, `month`, `year`). Construction is a total
//! function: malformed month/year/status values produce a typed
//! [`FilterError`] instead of propagating into date construction.
//!
//! A month/year pair selects the half-open window
//! `[year-month-01, start of the following month)`; a month without a year
//! (or vice versa) contributes no date restriction. That lone-facet
//! behaviour is deliberate and matches the dashboard contract.

use chrono::{DateTime, TimeZone, Utc};

use super::grievance::{Grievance, GrievanceStatus};
use super::user::Department;

/// Validation failures raised while building a [`GrievanceFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Month was non-numeric or outside 1–12.
    InvalidMonth { value: String },
    /// Year was non-numeric or outside the supported range.
    InvalidYear { value: String },
    /// Status was not one of open/assigned/resolved.
    UnknownStatus { value: String },
}

impl FilterError {
    /// Query-string field the failure refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidMonth { .. } => "month",
            Self::InvalidYear { .. } => "year",
            Self::UnknownStatus { .. } => "status",
        }
    }

    /// Offending raw value as received.
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidMonth { value }
            | Self::InvalidYear { value }
            | Self::UnknownStatus { value } => value.as_str(),
        }
    }
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth { value } => {
                write!(f, "month must be a number between 1 and 12 (got {value})")
            }
            Self::InvalidYear { value } => write!(
                f,
                "year must be a number between {YEAR_MIN} and {YEAR_MAX} (got {value})"
            ),
            Self::UnknownStatus { value } => {
                write!(f, "status must be open, assigned, or resolved (got {value})")
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// Earliest filing year the date filter accepts.
pub const YEAR_MIN: i32 = 1970;
/// Latest filing year the date filter accepts.
pub const YEAR_MAX: i32 = 9999;

/// Calendar month number, validated to 1–12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month(u32);

impl Month {
    /// Parse and range-check a raw month facet.
    pub fn parse(raw: &str) -> Result<Self, FilterError> {
        raw.trim()
            .parse::<u32>()
            .ok()
            .filter(|month| (1..=12).contains(month))
            .map(Self)
            .ok_or_else(|| FilterError::InvalidMonth {
                value: raw.to_owned(),
            })
    }

    /// 1-based month number.
    pub const fn number(self) -> u32 {
        self.0
    }
}

/// Calendar year, validated to the supported filing range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Year(i32);

impl Year {
    /// Parse and range-check a raw year facet.
    pub fn parse(raw: &str) -> Result<Self, FilterError> {
        raw.trim()
            .parse::<i32>()
            .ok()
            .filter(|year| (YEAR_MIN..=YEAR_MAX).contains(year))
            .map(Self)
            .ok_or_else(|| FilterError::InvalidYear {
                value: raw.to_owned(),
            })
    }

    /// Four-digit year number.
    pub const fn number(self) -> i32 {
        self.0
    }
}

/// Half-open calendar-month window `[start, end)` over filing timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl MonthWindow {
    /// Build the window for the given month and year, rolling the end over
    /// to January of the next year when the month is December.
    pub fn new(month: Month, year: Year) -> Self {
        let start = month_start(year.number(), month.number());
        let end = if month.number() == 12 {
            month_start(year.number() + 1, 1)
        } else {
            month_start(year.number(), month.number() + 1)
        };
        Self { start, end }
    }

    /// Inclusive start of the window.
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end of the window.
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether a filing timestamp falls inside the window.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0) {
        chrono::LocalResult::Single(start) => start,
        _ => panic!("validated month/year must denote a calendar month"),
    }
}

/// Validated admin listing filter.
///
/// An empty filter matches every grievance. The same predicate drives both
/// the SQL translation in the persistence adapter and in-process matching
/// for in-memory repositories and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrievanceFilter {
    department: Option<Department>,
    status: Option<GrievanceStatus>,
    window: Option<MonthWindow>,
}

impl GrievanceFilter {
    /// Build a filter from the raw optional query facets.
    ///
    /// Empty or missing strings contribute nothing. A month/year pair
    /// becomes a date window; a lone month or lone year is dropped.
    pub fn from_parts(
        department: Option<&str>,
        status: Option<&str>,
        month: Option<&str>,
        year: Option<&str>,
    ) -> Result<Self, FilterError> {
        // Department validation only rejects blank input, which the empty
        // filter above already removed.
        let department = department
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| Department::new(raw).ok());

        let status = status
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                raw.parse::<GrievanceStatus>()
                    .map_err(|_| FilterError::UnknownStatus {
                        value: raw.to_owned(),
                    })
            })
            .transpose()?;

        let month = month
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(Month::parse)
            .transpose()?;
        let year = year
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(Year::parse)
            .transpose()?;

        let window = match (month, year) {
            (Some(month), Some(year)) => Some(MonthWindow::new(month, year)),
            _ => None,
        };

        Ok(Self {
            department,
            status,
            window,
        })
    }

    /// Department equality facet, if set.
    pub const fn department(&self) -> Option<&Department> {
        self.department.as_ref()
    }

    /// Status equality facet, if set.
    pub const fn status(&self) -> Option<GrievanceStatus> {
        self.status
    }

    /// Filing-date window, if both month and year were supplied.
    pub const fn window(&self) -> Option<&MonthWindow> {
        self.window.as_ref()
    }

    /// Whether the filter restricts anything at all.
    pub const fn is_empty(&self) -> bool {
        self.department.is_none() && self.status.is_none() && self.window.is_none()
    }

    /// Evaluate the filter against a grievance in process.
    pub fn matches(&self, grievance: &Grievance) -> bool {
        if let Some(department) = &self.department {
            if grievance.department() != department {
                return false;
            }
        }
        if let Some(status) = self.status {
            if grievance.status() != status {
                return false;
            }
        }
        if let Some(window) = &self.window {
            if !window.contains(grievance.created_at()) {
                return false;
            }
        }
        true
    }
}
