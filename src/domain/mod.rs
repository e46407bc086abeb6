//! Domain Layer
//!
//! Entities, value objects, ports and pure services. Nothing here performs
//! I/O.

pub mod entities;
pub mod error;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::PointOfInterest;
pub use error::{BackendError, PoiError};
pub use value_objects::{
    ConnectivityState, Coordinate, CoordinateSpan, PoiCategory, ProbeVerdict, Viewport,
};
