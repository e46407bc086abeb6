//! Connectivity Prober - Backend test use case
//!
//! Issues one deliberately invalid query against the backend and decides,
//! from the resulting error text, whether the server was reachable.

use crate::domain::ports::BackendClient;
use crate::domain::services::ErrorClassifier;
use crate::domain::value_objects::{ConnectivityState, ProbeVerdict};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Resource name that should not exist on any real backend.
pub const DEFAULT_PROBE_RESOURCE: &str = "non_existent_table";

const PROMPT: &str = "Press probe to start the connection test...";
const CANCELLED: &str = "Probe cancelled before the backend answered";

/// Outcome of a completed probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub verdict: ProbeVerdict,
    pub state: ConnectivityState,
}

/// Probe could not be started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("a probe is already in flight")]
    InFlight,
}

#[derive(Debug)]
struct ProbeStatus {
    state: ConnectivityState,
    log: Vec<String>,
}

/// Ends the in-flight probe when dropped.
///
/// A probe dropped before settling (its future cancelled mid-query) leaves
/// `Probing` for `Unreachable` with a log line, so the state never sticks.
struct InFlightGuard<'a> {
    prober: &'a ConnectivityProber,
    settled: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("probe cancelled before the backend answered");
            self.prober.update(
                Some(ConnectivityState::Unreachable),
                [CANCELLED.to_string()],
            );
        }
        self.prober.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Connectivity prober for a single backend.
///
/// Owns the connectivity state and an append-only, human-readable log.
/// At most one probe runs at a time; a concurrent `probe` call is refused.
pub struct ConnectivityProber {
    client: Arc<dyn BackendClient>,
    classifier: ErrorClassifier,
    resource: String,
    status: Mutex<ProbeStatus>,
    in_flight: AtomicBool,
}

impl ConnectivityProber {
    /// Create a prober querying `resource` through `client`.
    pub fn new(
        client: Arc<dyn BackendClient>,
        classifier: ErrorClassifier,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            client,
            classifier,
            resource: resource.into(),
            status: Mutex::new(ProbeStatus {
                state: ConnectivityState::Unknown,
                log: vec![PROMPT.to_string()],
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ConnectivityState {
        self.status.lock().state
    }

    pub fn is_probing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Snapshot of the log, oldest line first.
    pub fn log(&self) -> Vec<String> {
        self.status.lock().log.clone()
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Run one probe.
    ///
    /// Moves the state to `Probing`, queries the probe resource once and
    /// settles on `Connected` or `Unreachable`. No retry, no backoff.
    pub async fn probe(&self) -> Result<ProbeReport, ProbeError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("probe refused: already in flight");
            return Err(ProbeError::InFlight);
        }
        let mut guard = InFlightGuard {
            prober: self,
            settled: false,
        };

        self.update(Some(ConnectivityState::Probing), ["Testing connection...".to_string()]);
        tracing::info!("probing backend with resource {}", self.resource);

        let verdict = match self.client.select_all(&self.resource).await {
            Ok(_) => {
                self.append(["Connected (unexpected: the probe table exists)".to_string()]);
                ProbeVerdict::UnexpectedSuccess
            }
            Err(err) => {
                let summary = err.to_string();
                let diagnostic = err.diagnostic();
                self.append([
                    format!("Received error: {}", summary),
                    format!("Full error: {}", diagnostic),
                    String::new(),
                ]);

                let verdict = self
                    .classifier
                    .classify(&format!("{}\n{}", summary, diagnostic));
                self.append(explain(verdict, &summary));
                verdict
            }
        };

        let state = verdict.state();
        self.update(Some(state), []);
        guard.settled = true;

        match state {
            ConnectivityState::Connected => {
                tracing::info!("backend reachable ({:?})", verdict)
            }
            _ => tracing::warn!("backend unreachable ({:?})", verdict),
        }

        Ok(ProbeReport { verdict, state })
    }

    fn append<I: IntoIterator<Item = String>>(&self, lines: I) {
        self.update(None, lines);
    }

    fn update<I: IntoIterator<Item = String>>(&self, state: Option<ConnectivityState>, lines: I) {
        let mut status = self.status.lock();
        if let Some(state) = state {
            status.state = state;
        }
        status.log.extend(lines);
    }
}

/// Human-readable explanation of a verdict reached from an error.
fn explain(verdict: ProbeVerdict, summary: &str) -> Vec<String> {
    match verdict {
        ProbeVerdict::ServerResponded => vec![
            "Connected (server responded)".to_string(),
            "The database returned an error response, so the backend is reachable".to_string(),
        ],
        ProbeVerdict::TransportFailure => vec![
            "Connection failed: bad URL or no network".to_string(),
            "Check:".to_string(),
            "1. The network connection is up".to_string(),
            "2. The backend URL is correct".to_string(),
            "3. This process is allowed to use the network".to_string(),
        ],
        ProbeVerdict::Unclassified => vec![
            "Unknown error".to_string(),
            format!("Details: {}", summary),
        ],
        ProbeVerdict::UnexpectedSuccess => Vec::new(),
    }
}
