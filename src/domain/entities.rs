//! Domain Entities - Core business objects
//!
//! These entities have no external dependencies beyond id generation
//! and contain only business logic.

use crate::domain::value_objects::{Coordinate, PoiCategory};
use serde::{Deserialize, Serialize};

/// A named, categorised marker on the map.
///
/// Entries are immutable once created. The id is generated here and is
/// never reused, even after the store is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Display label
    pub name: String,
    /// What kind of place this is
    pub category: PoiCategory,
    /// Where it is
    pub location: Coordinate,
}

impl PointOfInterest {
    /// Create a POI with a freshly generated id.
    pub fn new(name: impl Into<String>, category: PoiCategory, location: Coordinate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            category,
            location,
        }
    }
}
