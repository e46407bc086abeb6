//! In-Memory POI Repository
//!
//! Implements PoiRepository using DashMap for lock-free concurrent access.

use crate::domain::entities::PointOfInterest;
use crate::domain::error::PoiError;
use crate::domain::ports::PoiRepository;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Stored entry: the POI plus its insertion sequence number.
#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    poi: PointOfInterest,
}

/// DashMap-backed POI repository.
///
/// Keyed by id, so the uniqueness invariant is enforced by the map itself.
/// A monotonic sequence number keeps `list` in insertion order.
pub struct InMemoryPoiRepository {
    pois: Arc<DashMap<String, Slot>>,
    next_seq: AtomicU64,
}

impl InMemoryPoiRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            pois: Arc::new(DashMap::new()),
            next_seq: AtomicU64::new(0),
        }
    }
}

impl Default for InMemoryPoiRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PoiRepository for InMemoryPoiRepository {
    async fn insert(&self, poi: PointOfInterest) -> Result<(), PoiError> {
        match self.pois.entry(poi.id.clone()) {
            Entry::Occupied(_) => Err(PoiError::DuplicateId(poi.id)),
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                slot.insert(Slot { seq, poi });
                Ok(())
            }
        }
    }

    async fn list(&self) -> Vec<PointOfInterest> {
        let mut slots: Vec<Slot> = self.pois.iter().map(|e| e.value().clone()).collect();
        slots.sort_by_key(|s| s.seq);
        slots.into_iter().map(|s| s.poi).collect()
    }

    async fn get(&self, id: &str) -> Option<PointOfInterest> {
        self.pois.get(id).map(|e| e.value().poi.clone())
    }

    async fn clear(&self) -> usize {
        // Counted per entry so a racing insert is either kept or reported
        let mut removed = 0;
        self.pois.retain(|_, _| {
            removed += 1;
            false
        });
        removed
    }

    async fn count(&self) -> usize {
        self.pois.len()
    }
}
