//! Application Layer
//!
//! Use cases driving the domain through its ports.

pub mod connectivity_prober;
pub mod poi_service;

pub use connectivity_prober::{
    ConnectivityProber, ProbeError, ProbeReport, DEFAULT_PROBE_RESOURCE,
};
pub use poi_service::{PoiService, DEFAULT_JITTER_RADIUS};
