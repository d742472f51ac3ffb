use anyhow::Result;
use async_trait::async_trait;

/// Trait for JetStream publisher operations
/// Abstracts the operation needed to publish messages with acknowledgment
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait JetStreamPublisher: Send + Sync {
    /// Publish a message to a subject and await acknowledgment
    async fn publish(&self, subject: String, payload: bytes::Bytes) -> Result<()>;
}
