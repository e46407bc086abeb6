//! PostgREST Backend Client
//!
//! Implements BackendClient against a PostgREST endpoint (as exposed by
//! Supabase at `{project_url}/rest/v1`).

use crate::domain::error::BackendError;
use crate::domain::ports::BackendClient;
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

/// Error body returned by PostgREST on failed requests.
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    code: String,
    message: String,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

/// reqwest-backed PostgREST client.
///
/// The base URL is only parsed when a request is built, so a malformed
/// endpoint surfaces as a `BackendError::InvalidUrl` at query time rather
/// than at construction.
pub struct PostgrestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestClient {
    /// Create a client for `base_url` authenticating with `api_key`.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| transport_error(&e))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `{base}/rest/v1/{resource}?select=*`.
    fn table_url(&self, resource: &str) -> Result<Url, BackendError> {
        let raw = format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), resource);
        let mut url = Url::parse(&raw).map_err(|e| BackendError::InvalidUrl(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                self.base_url
            )));
        }
        url.query_pairs_mut().append_pair("select", "*");
        Ok(url)
    }
}

fn transport_error(err: &reqwest::Error) -> BackendError {
    BackendError::Transport {
        message: err.to_string(),
        detail: format!("{:?}", err),
    }
}

#[async_trait]
impl BackendClient for PostgrestClient {
    async fn select_all(&self, resource: &str) -> Result<serde_json::Value, BackendError> {
        let url = self.table_url(resource)?;
        tracing::debug!("select * from {} via {}", resource, url);

        let resp = self
            .http
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = resp.status();
        if status.is_success() {
            return resp.json().await.map_err(|e| transport_error(&e));
        }

        let body = resp.text().await.map_err(|e| transport_error(&e))?;
        match serde_json::from_str::<PostgrestErrorBody>(&body) {
            Ok(err) => Err(BackendError::Api {
                status: status.as_u16(),
                code: err.code,
                message: err.message,
                details: err.details,
                hint: err.hint,
            }),
            Err(_) => Err(BackendError::Status {
                status: status.as_u16(),
                body,
            }),
        }
    }
}
