pub mod error;
pub mod ingestion_service;
pub mod observation;
pub mod repository;
pub mod validate;

pub use error::{DomainError, DomainResult};
pub use ingestion_service::{CreateObservationInput, ObservationIngestionService};
pub use observation::{ObservationCreatedEvent, ObservationKey, WeatherObservation};
pub use repository::{ObservationCreatedProducer, ObservationRepository};

// Re-export mocks when testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use repository::MockObservationCreatedProducer;
#[cfg(any(test, feature = "testing"))]
pub use repository::MockObservationRepository;
