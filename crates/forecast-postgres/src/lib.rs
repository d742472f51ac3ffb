mod client;
mod config;
mod models;
mod observation_repository;

pub use client::PostgresClient;
pub use config::PostgresConfig;
pub use models::ObservationRow;
pub use observation_repository::PostgresObservationRepository;
