//! POI Repository Port
//!
//! Defines the interface for storing points of interest.
//! Implementations may be in-memory or persistent.

use crate::domain::entities::PointOfInterest;
use crate::domain::error::PoiError;
use async_trait::async_trait;

/// Repository holding the POIs of the current session.
///
/// This is an outbound port. The store owns the id uniqueness invariant:
/// `insert` must refuse an id that is already present.
#[async_trait]
pub trait PoiRepository: Send + Sync {
    /// Append a POI. Fails with `DuplicateId` if the id is taken.
    async fn insert(&self, poi: PointOfInterest) -> Result<(), PoiError>;

    /// Snapshot of all POIs in insertion order.
    async fn list(&self) -> Vec<PointOfInterest>;

    /// Get a POI by id.
    async fn get(&self, id: &str) -> Option<PointOfInterest>;

    /// Remove every POI, returning how many were removed.
    async fn clear(&self) -> usize;

    /// Number of POIs currently stored.
    async fn count(&self) -> usize;
}
