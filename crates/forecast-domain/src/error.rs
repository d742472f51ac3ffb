use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Error taxonomy for the ingestion path.
///
/// Each variant tells the caller what side effects happened:
/// - `Validation`: nothing was written or published.
/// - `Persistence`: the store rejected the write, nothing was published.
/// - `Propagation`: the record was durably written but the created event
///   was not published. The call fails so the caller can re-ingest; the
///   upsert is idempotent on (location, observed_date).
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(#[source] anyhow::Error),

    #[error("Propagation error: {0}")]
    Propagation(#[source] anyhow::Error),
}
