use crate::error::DomainResult;
use crate::observation::{ObservationCreatedEvent, WeatherObservation};
use async_trait::async_trait;

/// Repository trait for the observation record store.
/// Infrastructure layer (e.g., forecast-postgres) implements this trait.
///
/// Implementations must upsert atomically per key: a write for an existing
/// (location, observed_date) pair replaces the prior row (last-write-wins).
/// The ingestion path requires no reads.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ObservationRepository: Send + Sync {
    /// Durably upsert a single observation keyed by (location, observed_date)
    ///
    /// # Returns
    /// () on success, `DomainError::Persistence` on failure
    async fn upsert_observation(&self, observation: &WeatherObservation) -> DomainResult<()>;
}

/// Trait for publishing observation-created events to the notification channel
///
/// Implementations should:
/// - Serialize the event to a self-contained payload (JSON)
/// - Publish to the pre-provisioned destination and await acknowledgment
/// - Return `DomainError::Propagation` if the publish fails
///
/// Delivery downstream is at-least-once and unordered across key pairs;
/// consumers are expected to be idempotent.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ObservationCreatedProducer: Send + Sync {
    /// Publish a single observation-created event
    async fn publish(&self, event: &ObservationCreatedEvent) -> DomainResult<()>;
}
