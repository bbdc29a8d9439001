//! Palliative-unit lookup

use crate::endpoints::units as paths;
use crate::error::Result;
use crate::http::HttpClient;
use crate::models::PalliativeUnit;

/// Handle for palliative-unit operations
pub struct UnitsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> UnitsApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// List palliative-care units
    pub async fn list(&self) -> Result<Vec<PalliativeUnit>> {
        self.http.get(paths::LIST).await
    }

    /// Search units by name or city
    pub async fn search(&self, query: &str) -> Result<Vec<PalliativeUnit>> {
        if query.is_empty() {
            return self.list().await;
        }
        self.http
            .get_query(paths::SEARCH, &[("q", query.to_string())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::session::MemorySessionStore;
    use crate::testutil;
    use crate::token::TokenManager;
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_search_hits_search_path_with_query() {
        let router = Router::new().route(
            "/palliative-units/search",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("q").map(String::as_str), Some("Leipzig"));
                Json(json!([{
                    "id": "pu-1",
                    "name": "St. Elisabeth Palliative Unit",
                    "city": "Leipzig",
                    "services": ["inpatient", "consult"]
                }]))
            }),
        );
        let base = testutil::spawn(router).await;
        let tokens = TokenManager::new(Arc::new(MemorySessionStore::new()));
        let config = ClientConfig::default().with_base_url(&base);
        let http = HttpClient::new(&config, tokens).unwrap();

        let units = UnitsApi::new(&http).search("Leipzig").await.unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].services, vec!["inpatient", "consult"]);
    }
}
