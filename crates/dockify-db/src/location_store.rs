//! `PostgreSQL` persistence for the `locations` ledger.
//!
//! Each append is a single-row `INSERT ... RETURNING id`; `BIGSERIAL`
//! supplies the monotonically increasing observation id and `now()` the
//! `recorded_at` stamp. Scans translate a [`ScanWindow`] into `BETWEEN`
//! predicates over `NUMERIC` bounds so `idx_locations_lat_lon` applies.

use chrono::{DateTime, Utc};
use dockify_proximity::{ObservationStore, ScanWindow, StoreError};
use dockify_types::{
    COORDINATE_SCALE, Coordinate, EntityId, LocationObservation, MAX_LATITUDE, MAX_LONGITUDE,
    MIN_LATITUDE, MIN_LONGITUDE, ObservationId,
};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::PgPool;

use crate::error::DbError;

/// Operations on the `locations` table.
#[derive(Debug, Clone)]
pub struct LocationStore {
    pool: PgPool,
}

impl LocationStore {
    /// Create a new location store sharing the given connection pool.
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    /// Insert one observation and return the database-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn insert(
        &self,
        entity_id: EntityId,
        coordinate: Coordinate,
    ) -> Result<ObservationId, DbError> {
        let id = sqlx::query_scalar::<_, i64>(
            r"INSERT INTO locations (user_id, latitude, longitude)
              VALUES ($1, $2, $3)
              RETURNING id",
        )
        .bind(entity_id.into_inner())
        .bind(coordinate.latitude())
        .bind(coordinate.longitude())
        .fetch_one(&self.pool)
        .await?;

        Ok(ObservationId::new(id))
    }

    /// Fetch every row inside `window`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn fetch_window(&self, window: ScanWindow) -> Result<Vec<LocationRow>, DbError> {
        let min_latitude = degree_bound(
            window.min_latitude(),
            RoundingStrategy::ToNegativeInfinity,
            MIN_LATITUDE,
        );
        let max_latitude = degree_bound(
            window.max_latitude(),
            RoundingStrategy::ToPositiveInfinity,
            MAX_LATITUDE,
        );

        let rows = match window.longitude() {
            Some((min_longitude, max_longitude)) => {
                sqlx::query_as::<_, LocationRow>(
                    r"SELECT id, user_id, latitude, longitude, recorded_at
                      FROM locations
                      WHERE latitude BETWEEN $1 AND $2
                        AND longitude BETWEEN $3 AND $4",
                )
                .bind(min_latitude)
                .bind(max_latitude)
                .bind(degree_bound(
                    min_longitude,
                    RoundingStrategy::ToNegativeInfinity,
                    MIN_LONGITUDE,
                ))
                .bind(degree_bound(
                    max_longitude,
                    RoundingStrategy::ToPositiveInfinity,
                    MAX_LONGITUDE,
                ))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, LocationRow>(
                    r"SELECT id, user_id, latitude, longitude, recorded_at
                      FROM locations
                      WHERE latitude BETWEEN $1 AND $2",
                )
                .bind(min_latitude)
                .bind(max_latitude)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }
}

impl ObservationStore for LocationStore {
    async fn append(
        &self,
        entity_id: EntityId,
        coordinate: Coordinate,
    ) -> Result<ObservationId, StoreError> {
        Ok(self.insert(entity_id, coordinate).await?)
    }

    async fn scan(&self, window: ScanWindow) -> Result<Vec<LocationObservation>, StoreError> {
        let rows = self.fetch_window(window).await?;
        let count = rows.len();
        let observations = rows
            .into_iter()
            .map(LocationObservation::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(rows = count, bounded = window.longitude().is_some(), "Scanned locations");
        Ok(observations)
    }
}

/// A row from the `locations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LocationRow {
    /// Observation id (`BIGSERIAL`).
    pub id: i64,
    /// Reporting user.
    pub user_id: i64,
    /// Latitude, six fractional digits.
    pub latitude: Decimal,
    /// Longitude, six fractional digits.
    pub longitude: Decimal,
    /// Database clock at insert.
    pub recorded_at: DateTime<Utc>,
}

impl TryFrom<LocationRow> for LocationObservation {
    type Error = StoreError;

    fn try_from(row: LocationRow) -> Result<Self, Self::Error> {
        let coordinate = Coordinate::from_decimal(row.latitude, row.longitude).map_err(|e| {
            StoreError::CorruptRow {
                id: row.id,
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            id: ObservationId::new(row.id),
            entity_id: EntityId::new(row.user_id),
            coordinate,
            recorded_at: row.recorded_at,
        })
    }
}

/// Round a window edge outward to the stored precision.
fn degree_bound(degrees: f64, strategy: RoundingStrategy, fallback: f64) -> Decimal {
    Decimal::from_f64(degrees)
        .or_else(|| Decimal::from_f64(fallback))
        .unwrap_or_default()
        .round_dp_with_strategy(COORDINATE_SCALE, strategy)
}
