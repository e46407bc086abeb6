//! Backend Client Port
//!
//! Defines the single backend operation the connectivity prober needs.

use crate::domain::error::BackendError;
use async_trait::async_trait;

/// Client for a table-oriented backend service.
///
/// This is an outbound port injected into the prober at construction,
/// so tests can substitute a fake without any network.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Read every row of `resource`, returning the raw JSON body.
    async fn select_all(&self, resource: &str) -> Result<serde_json::Value, BackendError>;
}
