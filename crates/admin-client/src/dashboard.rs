//! Single-writer state container for the admin dashboard.
//!
//! All mutations flow through one owner, which rules out the classic
//! dashboard races by construction:
//!
//! - Every refresh (and every filter edit) advances a monotonic sequence;
//!   a refresh completing under a superseded sequence is discarded, so a
//!   slow stale response can never overwrite a newer one.
//! - Assignments are reconciled from the server's echoed record rather
//!   than patched optimistically, so local state only ever reflects what
//!   the server confirmed.

use tracing::debug;

use crate::api::{AdminApi, FacultyMember, GrievanceRecord};
use crate::error::ClientError;
use crate::filter::{FilterField, FilterSelection};

/// Token tying an in-flight refresh to the sequence it was started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    seq: u64,
}

/// Dashboard state: filters, fetched data, and load/error status.
#[derive(Default)]
pub struct Dashboard {
    filters: FilterSelection,
    grievances: Vec<GrievanceRecord>,
    faculty: Vec<FacultyMember>,
    loading: bool,
    last_error: Option<ClientError>,
    refresh_seq: u64,
}

impl Dashboard {
    /// Fresh dashboard with empty filters and no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current filter selection.
    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    /// Most recently applied grievance listing.
    pub fn grievances(&self) -> &[GrievanceRecord] {
        &self.grievances
    }

    /// Most recently applied faculty roster.
    pub fn faculty(&self) -> &[FacultyMember] {
        &self.faculty
    }

    /// Whether a refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error recorded by the last failed refresh or assignment, if any.
    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// Replace one filter facet.
    ///
    /// Advances the refresh sequence so any in-flight refresh started under
    /// the old selection is discarded when it completes.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.filters.set(field, value);
        self.refresh_seq += 1;
    }

    /// Reset every filter facet to empty.
    ///
    /// Like [`Dashboard::set_filter`], this invalidates in-flight refreshes.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.refresh_seq += 1;
    }

    /// Start a refresh, returning the ticket its results must carry.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.refresh_seq += 1;
        self.loading = true;
        RefreshTicket {
            seq: self.refresh_seq,
        }
    }

    /// Apply a completed refresh.
    ///
    /// Returns `false` and leaves all state untouched when the ticket is
    /// stale (a newer refresh or filter edit superseded it). Otherwise
    /// clears the loading flag and either replaces both datasets or records
    /// the failure, returning whether fresh data was applied.
    pub fn apply_refresh(
        &mut self,
        ticket: RefreshTicket,
        outcome: Result<(Vec<GrievanceRecord>, Vec<FacultyMember>), ClientError>,
    ) -> bool {
        if ticket.seq != self.refresh_seq {
            debug!(
                stale = ticket.seq,
                current = self.refresh_seq,
                "discarding out-of-order refresh"
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok((grievances, faculty)) => {
                self.grievances = grievances;
                self.faculty = faculty;
                self.last_error = None;
                true
            }
            Err(error) => {
                // Keep the previous datasets; stale data plus a visible
                // error beats an empty screen.
                self.last_error = Some(error);
                false
            }
        }
    }

    /// Fetch both datasets concurrently and apply the outcome.
    ///
    /// Returns whether fresh data was applied.
    pub async fn refresh(&mut self, api: &dyn AdminApi) -> bool {
        let ticket = self.begin_refresh();
        let filters = self.filters.clone();
        let (grievances, faculty) =
            futures_util::future::join(api.list_grievances(&filters), api.list_faculty()).await;
        let outcome = grievances.and_then(|grievances| faculty.map(|faculty| (grievances, faculty)));
        self.apply_refresh(ticket, outcome)
    }

    /// Merge a server-echoed grievance into the listing by id.
    ///
    /// A record that is no longer listed (the filter changed underneath) is
    /// dropped rather than re-inserted.
    pub fn apply_assignment(&mut self, echo: GrievanceRecord) {
        if let Some(slot) = self
            .grievances
            .iter_mut()
            .find(|grievance| grievance.id == echo.id)
        {
            *slot = echo;
        }
    }

    /// Assign a grievance and reconcile local state from the server echo.
    ///
    /// On failure the error is recorded and the listing is left untouched.
    /// Returns whether the assignment was applied.
    pub async fn assign(
        &mut self,
        api: &dyn AdminApi,
        grievance_id: &str,
        faculty_id: &str,
    ) -> bool {
        match api.assign(grievance_id, faculty_id).await {
            Ok(echo) => {
                self.apply_assignment(echo);
                self.last_error = None;
                true
            }
            Err(error) => {
                self.last_error = Some(error);
                false
            }
        }
    }
}
