use crate::error::DomainResult;
use crate::observation::{ObservationCreatedEvent, ObservationKey, WeatherObservation};
use crate::repository::{ObservationCreatedProducer, ObservationRepository};
use chrono::NaiveDate;
use garde::Validate;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Input for ingesting a weather observation
#[derive(Debug, Clone, Validate)]
pub struct CreateObservationInput {
    #[garde(length(min = 1))]
    pub location: String,
    #[garde(skip)]
    pub observed_date: NaiveDate,
    #[garde(skip)]
    pub temperature_c: i32,
    #[garde(skip)]
    pub summary: Option<String>,
}

/// Domain service implementing the write-then-publish contract.
///
/// Flow:
/// 1. Validate input fields; reject before any side effect
/// 2. Upsert the observation in the record store (authoritative outcome)
/// 3. Publish an ObservationCreatedEvent derived from the same data
/// 4. Return the identifying key pair once both steps completed
///
/// The two side effects are deliberately not wrapped in a cross-system
/// transaction: the store write stays authoritative, and a failed publish
/// after a successful write surfaces as `Propagation` so the caller can
/// re-ingest (the upsert is idempotent on the key pair). The publish is
/// never attempted before the write has completed.
pub struct ObservationIngestionService {
    observation_repository: Arc<dyn ObservationRepository>,
    event_producer: Arc<dyn ObservationCreatedProducer>,
}

impl ObservationIngestionService {
    pub fn new(
        observation_repository: Arc<dyn ObservationRepository>,
        event_producer: Arc<dyn ObservationCreatedProducer>,
    ) -> Self {
        Self {
            observation_repository,
            event_producer,
        }
    }

    /// Ingest one observation: validate, persist, then announce.
    ///
    /// Each call is an independent unit of work; the service holds no
    /// mutable state and does not serialize concurrent calls for the same
    /// key pair. Races on one key resolve to the store's per-key
    /// last-write-wins semantics.
    #[instrument(skip(self), fields(location = %input.location, observed_date = %input.observed_date))]
    pub async fn ingest(&self, input: CreateObservationInput) -> DomainResult<ObservationKey> {
        crate::validate::validate_struct(&input)?;

        let observation = WeatherObservation {
            location: input.location,
            observed_date: input.observed_date,
            temperature_c: input.temperature_c,
            summary: input.summary,
        };

        // Authoritative write; must complete before any announcement
        self.observation_repository
            .upsert_observation(&observation)
            .await?;

        debug!("observation persisted, publishing created event");

        let event = ObservationCreatedEvent::from(&observation);
        self.event_producer.publish(&event).await?;

        debug!("successfully ingested observation");

        Ok(observation.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use crate::repository::{MockObservationCreatedProducer, MockObservationRepository};

    fn test_input() -> CreateObservationInput {
        CreateObservationInput {
            location: "Sydney".to_string(),
            observed_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            temperature_c: 18,
            summary: Some("Cloudy".to_string()),
        }
    }

    fn service(
        repo: MockObservationRepository,
        producer: MockObservationCreatedProducer,
    ) -> ObservationIngestionService {
        ObservationIngestionService::new(Arc::new(repo), Arc::new(producer))
    }

    #[tokio::test]
    async fn test_ingest_persists_then_publishes_matching_fields() {
        let mut mock_repo = MockObservationRepository::new();
        let mut mock_producer = MockObservationCreatedProducer::new();

        mock_repo
            .expect_upsert_observation()
            .withf(|obs: &WeatherObservation| {
                obs.location == "Sydney"
                    && obs.observed_date == NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
                    && obs.temperature_c == 18
                    && obs.summary.as_deref() == Some("Cloudy")
            })
            .times(1)
            .return_once(|_| Ok(()));

        mock_producer
            .expect_publish()
            .withf(|event: &ObservationCreatedEvent| {
                event.location == "Sydney"
                    && event.observed_date == NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
                    && event.temperature_c == 18
                    && event.summary.as_deref() == Some("Cloudy")
            })
            .times(1)
            .return_once(|_| Ok(()));

        let key = service(mock_repo, mock_producer)
            .ingest(test_input())
            .await
            .unwrap();

        assert_eq!(key.location, "Sydney");
        assert_eq!(key.resource_path(), "Sydney/20240601");
    }

    #[tokio::test]
    async fn test_reingest_same_key_produces_second_event() {
        let mut mock_repo = MockObservationRepository::new();
        let mut mock_producer = MockObservationCreatedProducer::new();

        // Same key pair twice: both writes accepted, both events published
        mock_repo
            .expect_upsert_observation()
            .times(2)
            .returning(|_| Ok(()));
        mock_producer
            .expect_publish()
            .withf(|event: &ObservationCreatedEvent| {
                event.temperature_c == 18 || event.temperature_c == 21
            })
            .times(2)
            .returning(|_| Ok(()));

        let service = service(mock_repo, mock_producer);

        service.ingest(test_input()).await.unwrap();

        let mut updated = test_input();
        updated.temperature_c = 21;
        updated.summary = Some("Sunny".to_string());
        let key = service.ingest(updated).await.unwrap();

        assert_eq!(key.resource_path(), "Sydney/20240601");
    }

    #[tokio::test]
    async fn test_store_failure_publishes_nothing() {
        let mut mock_repo = MockObservationRepository::new();
        let mock_producer = MockObservationCreatedProducer::new();

        mock_repo
            .expect_upsert_observation()
            .times(1)
            .return_once(|_| {
                Err(DomainError::Persistence(anyhow::anyhow!(
                    "write throttled"
                )))
            });
        // No expectation on the producer: any publish call fails the test

        let result = service(mock_repo, mock_producer).ingest(test_input()).await;
        assert!(matches!(result, Err(DomainError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_publish_failure_after_write_reports_propagation() {
        let mut mock_repo = MockObservationRepository::new();
        let mut mock_producer = MockObservationCreatedProducer::new();

        mock_repo
            .expect_upsert_observation()
            .times(1)
            .return_once(|_| Ok(()));
        mock_producer.expect_publish().times(1).return_once(|_| {
            Err(DomainError::Propagation(anyhow::anyhow!(
                "enqueue timed out"
            )))
        });

        let result = service(mock_repo, mock_producer).ingest(test_input()).await;
        assert!(matches!(result, Err(DomainError::Propagation(_))));
    }

    #[tokio::test]
    async fn test_empty_location_rejected_before_any_side_effect() {
        // Spy collaborators: zero expected calls
        let mock_repo = MockObservationRepository::new();
        let mock_producer = MockObservationCreatedProducer::new();

        let mut input = test_input();
        input.location = "".to_string();

        let result = service(mock_repo, mock_producer).ingest(input).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
