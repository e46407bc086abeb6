//! POI Playground Library
//!
//! Map annotation store and backend connectivity prober, exposed for
//! integration tests and as a library.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::{ConnectivityProber, PoiService, ProbeError, ProbeReport};
pub use config::load_config;
pub use domain::entities::PointOfInterest;
pub use domain::ports::{BackendClient, PoiRepository};
pub use domain::services::{ErrorClassifier, PatternTable};
pub use domain::value_objects::{
    ConnectivityState, Coordinate, CoordinateSpan, PoiCategory, ProbeVerdict, Viewport,
};
