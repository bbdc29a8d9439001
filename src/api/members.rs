//! Member directory operations

use crate::endpoints::members as paths;
use crate::error::Result;
use crate::http::HttpClient;
use crate::models::Doctor;

/// Handle for member directory operations
pub struct MembersApi<'a> {
    http: &'a HttpClient,
}

impl<'a> MembersApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// List member doctors
    pub async fn list(&self) -> Result<Vec<Doctor>> {
        self.http.get(paths::LIST).await
    }

    /// Search doctors by name, specialty, or hospital
    pub async fn search(&self, query: &str) -> Result<Vec<Doctor>> {
        if query.is_empty() {
            return self.list().await;
        }
        self.http
            .get_query(paths::SEARCH, &[("q", query.to_string())])
            .await
    }

    /// Fetch one doctor profile
    pub async fn profile(&self, doctor_id: &str) -> Result<Doctor> {
        self.http.get(&paths::profile(doctor_id)).await
    }
}
