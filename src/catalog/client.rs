//! HTTP client for the upstream master-data API.
//!
//! The Solution Builder does not own offerings, activities, staffing or
//! pricing; it reads them from the catalog service. Configuration comes from
//! [`crate::config::AppConfig`] (`catalog_url`, `catalog_api_key`).

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ActivityRecord, OfferingRecord, PricingRecord, StaffingRecord};

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: catalog credentials missing or invalid")]
    Unauthorized,

    #[error("Server error: {0}")]
    Server(String),
}

/// Everything needed to build a canvas for one offering.
#[derive(Debug, Clone, Default)]
pub struct OfferingData {
    pub activities: Vec<ActivityRecord>,
    pub staffing: Vec<StaffingRecord>,
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.get(&url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        req
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        tracing::debug!(path, "Fetching from catalog");
        let response = self.request(path).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(body)),
                StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(body)),
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                _ => Err(ClientError::Server(format!("{}: {}", status, body))),
            }
        }
    }

    pub async fn get_offerings(&self) -> Result<Vec<OfferingRecord>, ClientError> {
        self.get("/offerings").await
    }

    /// Activities linked to an offering, in upstream order.
    pub async fn get_activities(&self, offering_id: Uuid) -> Result<Vec<ActivityRecord>, ClientError> {
        self.get(&format!("/activities?offering_id={}", offering_id))
            .await
    }

    /// Staffing rows for every activity of an offering.
    pub async fn get_staffing(&self, offering_id: Uuid) -> Result<Vec<StaffingRecord>, ClientError> {
        self.get(&format!("/staffing/offering/{}", offering_id))
            .await
    }

    pub async fn get_pricing(&self) -> Result<Vec<PricingRecord>, ClientError> {
        self.get("/pricing/all").await
    }

    /// Activities and staffing for an offering, fetched together.
    pub async fn get_offering_data(&self, offering_id: Uuid) -> Result<OfferingData, ClientError> {
        let (activities, staffing) = tokio::try_join!(
            self.get_activities(offering_id),
            self.get_staffing(offering_id)
        )?;
        Ok(OfferingData {
            activities,
            staffing,
        })
    }
}
