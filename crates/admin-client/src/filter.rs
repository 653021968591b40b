//! Listing filter facets as the dashboard holds them.
//!
//! The four facets are plain strings edited one at a time; the server
//! validates them. An empty string means the facet is unset, matching the
//! select-with-empty-option the dashboard renders.

/// One of the four listing facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Department,
    Status,
    Month,
    Year,
}

/// The dashboard's filter record.
///
/// Edits replace exactly one field; [`FilterSelection::clear`] replaces the
/// whole record with four empty fields, never merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    department: String,
    status: String,
    month: String,
    year: String,
}

impl FilterSelection {
    /// Fresh selection with every facet unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a single facet, leaving the other three untouched.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Department => self.department = value,
            FilterField::Status => self.status = value,
            FilterField::Month => self.month = value,
            FilterField::Year => self.year = value,
        }
    }

    /// Current value of a facet; empty means unset.
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Department => &self.department,
            FilterField::Status => &self.status,
            FilterField::Month => &self.month,
            FilterField::Year => &self.year,
        }
    }

    /// Reset every facet to empty, regardless of prior values.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether no facet is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Non-empty facets as query-string pairs, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("department", self.department.as_str()),
            ("status", self.status.as_str()),
            ("month", self.month.as_str()),
            ("year", self.year.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}
