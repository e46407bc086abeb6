//! POI Placement Service
//!
//! Pure domain logic for generating POIs: the fixed sample set and
//! randomly jittered POIs around a reference point.

use crate::domain::entities::PointOfInterest;
use crate::domain::error::PoiError;
use crate::domain::value_objects::{Coordinate, PoiCategory};
use rand::seq::SliceRandom;
use rand::Rng;

/// Largest accepted jitter radius, in degrees: a full turn of longitude.
pub const MAX_JITTER_RADIUS: f64 = 360.0;

/// Generates POIs. Randomness is supplied by the caller.
pub struct Placement;

impl Placement {
    /// The three sample POIs shown when the map first opens, each with a
    /// fresh id.
    pub fn samples() -> Vec<PointOfInterest> {
        vec![
            PointOfInterest::new(
                "General Hospital",
                PoiCategory::Hospital,
                Coordinate::new(37.7749, -122.4194),
            ),
            PointOfInterest::new(
                "Whole Foods",
                PoiCategory::Supermarket,
                Coordinate::new(37.7849, -122.4094),
            ),
            PointOfInterest::new(
                "Tech Factory",
                PoiCategory::Factory,
                Coordinate::new(37.7649, -122.4294),
            ),
        ]
    }

    /// Generate a random POI near `center`.
    ///
    /// # Arguments
    /// * `rng` - Source of randomness
    /// * `center` - Reference point
    /// * `categories` - Candidates, picked uniformly; empty falls back to hospital
    /// * `jitter_radius` - Max offset in degrees, applied to each axis independently
    /// * `existing` - Store size before insertion, used for the name
    ///
    /// The result lies in `[lat - r, lat + r] x [lon - r, lon + r]`,
    /// clamped into the valid coordinate ranges.
    pub fn random_near<R: Rng + ?Sized>(
        rng: &mut R,
        center: Coordinate,
        categories: &[PoiCategory],
        jitter_radius: f64,
        existing: usize,
    ) -> Result<PointOfInterest, PoiError> {
        if !center.is_valid() {
            return Err(PoiError::Validation(format!(
                "center {} is out of range",
                center
            )));
        }
        if !jitter_radius.is_finite() {
            return Err(PoiError::Validation(
                "jitter radius must be finite".to_string(),
            ));
        }
        let radius = jitter_radius.abs();
        if radius > MAX_JITTER_RADIUS {
            return Err(PoiError::Validation(format!(
                "jitter radius {} exceeds {} degrees",
                jitter_radius, MAX_JITTER_RADIUS
            )));
        }

        let category = match categories.choose(rng) {
            Some(c) => c.clone(),
            None => {
                tracing::warn!("no categories supplied, falling back to {}", PoiCategory::default());
                PoiCategory::default()
            }
        };

        let location = Coordinate::new(
            center.latitude + rng.gen_range(-radius..=radius),
            center.longitude + rng.gen_range(-radius..=radius),
        )
        .clamped();

        let name = format!("{} {}", category.label(), existing + 1);

        Ok(PointOfInterest::new(name, category, location))
    }
}
