//! Transport port and reqwest-backed implementation for the admin API.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ClientError;
use crate::filter::FilterSelection;

/// Student subfields joined onto a listed grievance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    pub department: String,
}

/// Assignee subfields joined onto a listed grievance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
}

/// Grievance as returned by the listing and assignment endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrievanceRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub department: String,
    pub status: String,
    pub created_at: String,
    pub student: StudentRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<AssigneeRecord>,
}

/// Faculty roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
}

/// Transport port the dashboard depends on.
///
/// The reqwest implementation talks HTTP; tests substitute deterministic
/// doubles.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Fetch grievances under the given filter selection.
    async fn list_grievances(
        &self,
        filters: &FilterSelection,
    ) -> Result<Vec<GrievanceRecord>, ClientError>;

    /// Fetch the assignable faculty roster.
    async fn list_faculty(&self) -> Result<Vec<FacultyMember>, ClientError>;

    /// Assign a grievance and return the server's updated record.
    async fn assign(
        &self,
        grievance_id: &str,
        faculty_id: &str,
    ) -> Result<GrievanceRecord, ClientError>;
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: Option<String>,
    code: Option<String>,
}

/// Reqwest-backed [`AdminApi`] implementation.
///
/// Carries the session cookie issued by [`HttpAdminApi::login`] across
/// requests via the client's cookie store.
#[derive(Clone)]
pub struct HttpAdminApi {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpAdminApi {
    /// Create a client rooted at the given base URL.
    ///
    /// # Errors
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    /// Establish a session with the given credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let url = self.endpoint("/api/login")?;
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        check(response).await.map(|_| ())
    }
}

/// Turn a non-success response into a typed API error.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let (message, code) = match response.json::<ErrorPayload>().await {
        Ok(payload) => (
            payload
                .message
                .unwrap_or_else(|| default_message(status).to_owned()),
            payload.code,
        ),
        Err(_) => (default_message(status).to_owned(), None),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
        code,
    })
}

fn default_message(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("request failed")
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn list_grievances(
        &self,
        filters: &FilterSelection,
    ) -> Result<Vec<GrievanceRecord>, ClientError> {
        let mut url = self.endpoint("/api/admin/grievances")?;
        for (name, value) in filters.query_pairs() {
            url.query_pairs_mut().append_pair(name, value);
        }
        let response = check(self.http.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn list_faculty(&self) -> Result<Vec<FacultyMember>, ClientError> {
        let url = self.endpoint("/api/admin/faculty")?;
        let response = check(self.http.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn assign(
        &self,
        grievance_id: &str,
        faculty_id: &str,
    ) -> Result<GrievanceRecord, ClientError> {
        let url = self.endpoint(&format!("/api/admin/grievances/{grievance_id}/assign"))?;
        let response = check(
            self.http
                .put(url)
                .json(&serde_json::json!({ "facultyId": faculty_id }))
                .send()
                .await?,
        )
        .await?;
        Ok(response.json().await?)
    }
}
