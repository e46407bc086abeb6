//! POI Service - Map playground use cases
//!
//! Orchestrates the POI store commands (seed, add-random, add-custom,
//! clear, list) and tracks the map viewport they operate around.

use crate::domain::entities::PointOfInterest;
use crate::domain::error::PoiError;
use crate::domain::ports::PoiRepository;
use crate::domain::services::Placement;
use crate::domain::value_objects::{Coordinate, PoiCategory, Viewport};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Default maximum random offset, in degrees, for generated POIs.
pub const DEFAULT_JITTER_RADIUS: f64 = 0.02;

/// POI service - main use case of the map view.
///
/// Store writes are serialized so a generated name always reflects the
/// store size at the moment of insertion.
pub struct PoiService {
    repo: Arc<dyn PoiRepository>,
    viewport: RwLock<Viewport>,
    jitter_radius: f64,
    writes: Mutex<()>,
}

impl PoiService {
    /// Create a new POI service.
    pub fn new(repo: Arc<dyn PoiRepository>, viewport: Viewport, jitter_radius: f64) -> Self {
        Self {
            repo,
            viewport: RwLock::new(viewport),
            jitter_radius,
            writes: Mutex::new(()),
        }
    }

    /// Append the three sample POIs. Not idempotent.
    ///
    /// # Returns
    /// The inserted POIs
    pub async fn seed_samples(&self) -> Result<Vec<PointOfInterest>, PoiError> {
        let samples = Placement::samples();
        let _writes = self.writes.lock().await;
        for poi in &samples {
            self.repo.insert(poi.clone()).await?;
        }
        tracing::debug!("seeded {} sample POIs", samples.len());
        Ok(samples)
    }

    /// Append one POI with a random category near `center`.
    ///
    /// # Arguments
    /// * `center` - Reference point for the jitter
    /// * `categories` - Candidates; empty falls back to hospital
    /// * `jitter_radius` - Max offset per axis, in degrees
    pub async fn add_random(
        &self,
        center: Coordinate,
        categories: &[PoiCategory],
        jitter_radius: f64,
    ) -> Result<PointOfInterest, PoiError> {
        let _writes = self.writes.lock().await;
        let existing = self.repo.count().await;
        // ThreadRng is !Send; keep it out of scope across awaits
        let poi = {
            let mut rng = rand::thread_rng();
            Placement::random_near(&mut rng, center, categories, jitter_radius, existing)
        }?;

        self.repo.insert(poi.clone()).await?;
        tracing::debug!("added random POI {} at {}", poi.name, poi.location);
        Ok(poi)
    }

    /// `add_random` around the current viewport centre, over every known
    /// category, with the configured jitter radius.
    pub async fn add_random_in_viewport(&self) -> Result<PointOfInterest, PoiError> {
        let center = self.viewport().center;
        self.add_random(center, &PoiCategory::ALL, self.jitter_radius)
            .await
    }

    /// Append a user-named POI at `location`.
    ///
    /// An empty name or out-of-range location is rejected and the store is
    /// left unchanged.
    pub async fn add_custom(
        &self,
        name: &str,
        category: PoiCategory,
        location: Coordinate,
    ) -> Result<PointOfInterest, PoiError> {
        if name.trim().is_empty() {
            return Err(PoiError::Validation("name must not be empty".to_string()));
        }
        if !location.is_valid() {
            return Err(PoiError::Validation(format!(
                "location {} is out of range",
                location
            )));
        }

        let poi = PointOfInterest::new(name, category, location);
        let _writes = self.writes.lock().await;
        self.repo.insert(poi.clone()).await?;
        tracing::debug!("added custom POI {} ({}) at {}", poi.name, poi.category, poi.location);
        Ok(poi)
    }

    /// Remove every POI.
    ///
    /// # Returns
    /// How many POIs were removed
    pub async fn clear(&self) -> usize {
        let _writes = self.writes.lock().await;
        let removed = self.repo.clear().await;
        tracing::debug!("cleared {} POIs", removed);
        removed
    }

    /// Snapshot of the current POIs, in insertion order.
    pub async fn list(&self) -> Vec<PointOfInterest> {
        self.repo.list().await
    }

    /// Look up a single POI.
    pub async fn get(&self, id: &str) -> Option<PointOfInterest> {
        self.repo.get(id).await
    }

    pub async fn count(&self) -> usize {
        self.repo.count().await
    }

    pub fn viewport(&self) -> Viewport {
        *self.viewport.read()
    }

    /// Replace the viewport after a pan or zoom.
    pub fn set_viewport(&self, viewport: Viewport) -> Result<(), PoiError> {
        if !viewport.is_valid() {
            return Err(PoiError::Validation(format!(
                "viewport centred at {} is invalid",
                viewport.center
            )));
        }
        *self.viewport.write() = viewport;
        Ok(())
    }

    pub fn jitter_radius(&self) -> f64 {
        self.jitter_radius
    }
}
