use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use forecast_domain::{DomainError, DomainResult, ObservationRepository, WeatherObservation};
use tracing::{debug, info};

use crate::{client::PostgresClient, models::ObservationRow};

/// Record-store adapter backed by PostgreSQL.
///
/// One row per (location, observed_date); the upsert resolves key conflicts
/// in a single statement, so concurrent writes for the same key collapse to
/// last-write-wins without any locking in the caller.
#[derive(Clone)]
pub struct PostgresObservationRepository {
    client: PostgresClient,
}

impl PostgresObservationRepository {
    pub fn new(client: PostgresClient) -> Self {
        Self { client }
    }

    /// Fetch a single observation by key pair.
    ///
    /// Not part of the ingestion contract; used by integration tests and
    /// operational tooling to inspect what was written.
    pub async fn get_observation(
        &self,
        location: &str,
        observed_date: NaiveDate,
    ) -> DomainResult<Option<WeatherObservation>> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::Persistence)?;

        let row = conn
            .query_opt(
                "SELECT location, observed_date, temperature_c, summary
                 FROM weather_observations
                 WHERE location = $1 AND observed_date = $2",
                &[&location, &observed_date],
            )
            .await
            .map_err(|e| DomainError::Persistence(e.into()))?;

        Ok(row.map(|row| {
            ObservationRow {
                location: row.get(0),
                observed_date: row.get(1),
                temperature_c: row.get(2),
                summary: row.get(3),
            }
            .into()
        }))
    }
}

#[async_trait]
impl ObservationRepository for PostgresObservationRepository {
    async fn upsert_observation(&self, observation: &WeatherObservation) -> DomainResult<()> {
        debug!(
            location = %observation.location,
            observed_date = %observation.observed_date,
            "Upserting observation in database"
        );

        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::Persistence)?;

        let now = Utc::now();

        conn.execute(
            "INSERT INTO weather_observations
                 (location, observed_date, temperature_c, summary, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             ON CONFLICT (location, observed_date)
             DO UPDATE SET temperature_c = EXCLUDED.temperature_c,
                           summary = EXCLUDED.summary,
                           updated_at = EXCLUDED.updated_at",
            &[
                &observation.location,
                &observation.observed_date,
                &observation.temperature_c,
                &observation.summary,
                &now,
            ],
        )
        .await
        .map_err(|e| DomainError::Persistence(e.into()))?;

        info!(
            location = %observation.location,
            observed_date = %observation.observed_date,
            "Observation upserted in database"
        );

        Ok(())
    }
}
