//! The proximity query engine.
//!
//! Resolves "which other entities are within R meters of P" against the
//! ledger in four steps:
//!
//! 1. **Validate** -- radius must be positive and the origin in range.
//!    Nothing touches the store until both pass.
//! 2. **Scan** -- read candidate rows through a [`ScanWindow`].
//! 3. **Select** -- compute the haversine distance of every row, then
//!    reduce each entity's history to one row per the [`SelectionPolicy`].
//! 4. **Filter and rank** -- drop the requesting entity and anything beyond
//!    the radius (inclusive boundary), order by distance then entity id.
//!
//! # Selection policies
//!
//! [`SelectionPolicy::MinDistance`] (default) keeps the closest row over the
//! entity's whole history; equal distances resolve to the lowest
//! observation id. Rows outside the radius can never win for an entity
//! that also has a row inside, so the scan is windowed.
//!
//! [`SelectionPolicy::MostRecent`] keeps the highest observation id and
//! only then applies the radius. The latest row may lie outside the
//! window, so this policy always scans unbounded.
//!
//! The engine performs no writes. Dropping a query future mid-flight leaves
//! no trace.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use dockify_types::{
    Coordinate, EntityId, GeoPoint, LocationObservation, NearbyEntity, ObservationId,
    SelectionPolicy,
};
use serde::Deserialize;

use crate::error::ProximityError;
use crate::haversine::haversine_meters;
use crate::store::ObservationStore;
use crate::window::ScanWindow;

/// Construction-time settings for [`ProximityEngine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// How an entity's history is reduced to one row.
    #[serde(default)]
    pub selection_policy: SelectionPolicy,
}

/// Radius queries over a borrowed store.
#[derive(Debug)]
pub struct ProximityEngine<'a, S> {
    store: &'a S,
    config: EngineConfig,
}

impl<S> Clone for ProximityEngine<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for ProximityEngine<'_, S> {}

impl<'a, S: ObservationStore> ProximityEngine<'a, S> {
    /// Create an engine bound to a store owned elsewhere.
    pub const fn new(store: &'a S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Query from raw origin degrees.
    ///
    /// Convenience for the transport layer: validates the origin and then
    /// delegates to [`ProximityEngine::nearest`].
    ///
    /// # Errors
    ///
    /// See [`ProximityEngine::nearest`]; additionally returns
    /// [`ProximityError::InvalidCoordinate`] for an out-of-range origin.
    pub async fn query(
        &self,
        origin_latitude: f64,
        origin_longitude: f64,
        radius_meters: i64,
        requesting: EntityId,
    ) -> Result<Vec<NearbyEntity>, ProximityError> {
        let radius = validate_radius(radius_meters)?;
        let origin = GeoPoint::new(origin_latitude, origin_longitude)?;
        self.resolve(origin, radius_meters, radius, requesting).await
    }

    /// Return the entities near `origin`, closest first.
    ///
    /// `exclude` never appears in the result, even at distance zero. An
    /// empty vector is a successful "zero matches" answer.
    ///
    /// # Errors
    ///
    /// Returns [`ProximityError::InvalidRadius`] for a radius `<= 0` (before
    /// any store access) and [`ProximityError::StoreUnavailable`] if the
    /// scan fails. No partial result is ever returned.
    pub async fn nearest(
        &self,
        origin: GeoPoint,
        radius_meters: i64,
        exclude: EntityId,
    ) -> Result<Vec<NearbyEntity>, ProximityError> {
        let radius = validate_radius(radius_meters)?;
        self.resolve(origin, radius_meters, radius, exclude).await
    }

    async fn resolve(
        &self,
        origin: GeoPoint,
        radius_meters: i64,
        radius: f64,
        exclude: EntityId,
    ) -> Result<Vec<NearbyEntity>, ProximityError> {
        let policy = self.config.selection_policy;
        let window = match policy {
            SelectionPolicy::MinDistance => ScanWindow::around(origin, radius),
            SelectionPolicy::MostRecent => ScanWindow::unbounded(),
        };

        let observations = self.store.scan(window).await.map_err(|e| {
            tracing::warn!(error = %e, "Observation scan failed");
            ProximityError::StoreUnavailable(e)
        })?;

        let nearby = select_nearby(&observations, origin, radius, exclude, policy);

        tracing::debug!(
            latitude = origin.latitude(),
            longitude = origin.longitude(),
            radius_meters,
            policy = ?policy,
            scanned = observations.len(),
            matched = nearby.len(),
            "Resolved radius query"
        );
        Ok(nearby)
    }
}

/// Reject non-positive radii and widen the rest to `f64`.
// Radii are far below 2^53, so the conversion is exact in practice.
#[allow(clippy::cast_precision_loss)]
fn validate_radius(radius_meters: i64) -> Result<f64, ProximityError> {
    if radius_meters <= 0 {
        return Err(ProximityError::InvalidRadius(radius_meters));
    }
    Ok(radius_meters as f64)
}

/// The row currently chosen for one entity.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    id: ObservationId,
    coordinate: Coordinate,
    distance: f64,
}

impl Candidate {
    /// Whether `self` should replace `current` under `policy`.
    fn beats(&self, current: &Self, policy: SelectionPolicy) -> bool {
        match policy {
            SelectionPolicy::MinDistance => self
                .distance
                .total_cmp(&current.distance)
                .then_with(|| self.id.cmp(&current.id))
                .is_lt(),
            SelectionPolicy::MostRecent => self.id > current.id,
        }
    }
}

/// Reduce observations to one ranked row per entity.
///
/// Pure and deterministic: the same input slice (in any order) always
/// yields the same output. `radius_meters` is compared inclusively.
pub fn select_nearby(
    observations: &[LocationObservation],
    origin: GeoPoint,
    radius_meters: f64,
    exclude: EntityId,
    policy: SelectionPolicy,
) -> Vec<NearbyEntity> {
    let mut selected: BTreeMap<EntityId, Candidate> = BTreeMap::new();

    for obs in observations {
        if obs.entity_id == exclude {
            continue;
        }
        let candidate = Candidate {
            id: obs.id,
            coordinate: obs.coordinate,
            distance: haversine_meters(origin, obs.coordinate.point()),
        };
        match selected.entry(obs.entity_id) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if candidate.beats(slot.get(), policy) {
                    slot.insert(candidate);
                }
            }
        }
    }

    let mut nearby: Vec<NearbyEntity> = selected
        .into_iter()
        .filter(|(_, c)| c.distance <= radius_meters)
        .map(|(entity_id, c)| NearbyEntity {
            entity_id,
            coordinate: c.coordinate,
            distance_meters: c.distance,
        })
        .collect();

    nearby.sort_by(|a, b| {
        a.distance_meters
            .total_cmp(&b.distance_meters)
            .then_with(|| a.entity_id.cmp(&b.entity_id))
    });
    nearby
}
