//! Backend-as-a-service (Supabase) client
//!
//! The report routes never call this client. It is kept as an optional
//! collaborator for media storage references and is probed by the health
//! endpoint when configured.

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::{CoreError, Result};

/// Thin client for a Supabase project
pub struct BackendClient {
    base_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl BackendClient {
    /// Create a client for the project at `base_url` authenticated with `api_key`
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() || api_key.is_empty() {
            return Err(CoreError::Backend(
                "Backend URL and API key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            http_client: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public URL of an object in a public storage bucket
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket,
            path.trim_start_matches('/')
        )
    }

    /// Probe the auth service health endpoint
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/auth/v1/health", self.base_url);
        debug!("Probing backend health at {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => {
                warn!("Backend health probe returned {}", status);
                Err(CoreError::Backend(format!(
                    "Health check returned {}",
                    status
                )))
            }
        }
    }
}
