use crate::traits::JetStreamPublisher;
use anyhow::Context;
use async_trait::async_trait;
use forecast_domain::{
    DomainError, DomainResult, ObservationCreatedEvent,
    ObservationCreatedProducer as ObservationCreatedProducerTrait,
};
use std::sync::Arc;
use tracing::{debug, info};

/// NATS JetStream producer for ObservationCreatedEvent messages.
///
/// Events are serialized as JSON and published to
/// `{base_subject}.{location token}`, awaiting the JetStream ack so a
/// reported success means the channel accepted the message (at-least-once
/// from there on). A failed or timed-out publish maps to
/// `DomainError::Propagation`.
pub struct NatsObservationCreatedProducer {
    jetstream: Arc<dyn JetStreamPublisher>,
    base_subject: String,
}

impl NatsObservationCreatedProducer {
    pub fn new(jetstream: Arc<dyn JetStreamPublisher>, base_subject: String) -> Self {
        info!(
            "Created NatsObservationCreatedProducer with base subject: {}",
            base_subject
        );
        Self {
            jetstream,
            base_subject,
        }
    }
}

/// Location text is free-form; NATS subject tokens are not. Lowercase and
/// collapse anything outside [a-z0-9-] so e.g. "New York" and "new.york"
/// both become "new-york".
fn subject_token(location: &str) -> String {
    let mut token = String::with_capacity(location.len());
    let mut last_dash = true;
    for c in location.chars() {
        if c.is_ascii_alphanumeric() {
            token.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            token.push('-');
            last_dash = true;
        }
    }
    let trimmed = token.trim_end_matches('-');
    if trimmed.is_empty() {
        "unknown".to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl ObservationCreatedProducerTrait for NatsObservationCreatedProducer {
    async fn publish(&self, event: &ObservationCreatedEvent) -> DomainResult<()> {
        let payload = serde_json::to_vec(event)
            .context("Failed to serialize ObservationCreatedEvent")
            .map_err(DomainError::Propagation)?;

        let subject = format!("{}.{}", self.base_subject, subject_token(&event.location));

        debug!(
            subject = %subject,
            location = %event.location,
            observed_date = %event.observed_date,
            size_bytes = payload.len(),
            "Publishing ObservationCreatedEvent"
        );

        self.jetstream
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish and acknowledge message")
            .map_err(DomainError::Propagation)?;

        info!(
            subject = %subject,
            location = %event.location,
            "Successfully published ObservationCreatedEvent"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockJetStreamPublisher;
    use bytes::Bytes;
    use chrono::NaiveDate;

    fn test_event() -> ObservationCreatedEvent {
        ObservationCreatedEvent {
            location: "Sydney".to_string(),
            observed_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            temperature_c: 18,
            summary: Some("Cloudy".to_string()),
        }
    }

    #[tokio::test]
    async fn test_publish_serializes_event_to_subject() {
        let mut mock_jetstream = MockJetStreamPublisher::new();

        mock_jetstream
            .expect_publish()
            .withf(|subject: &String, payload: &Bytes| {
                let value: serde_json::Value = serde_json::from_slice(payload).unwrap();
                subject == "weather_data.sydney"
                    && value["location"] == "Sydney"
                    && value["observedDate"] == "2024-06-01"
                    && value["temperatureC"] == 18
                    && value["summary"] == "Cloudy"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let producer = NatsObservationCreatedProducer::new(
            Arc::new(mock_jetstream),
            "weather_data".to_string(),
        );

        let result = producer.publish(&test_event()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_publish_failure_maps_to_propagation() {
        let mut mock_jetstream = MockJetStreamPublisher::new();

        mock_jetstream
            .expect_publish()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("NATS publish failed")));

        let producer = NatsObservationCreatedProducer::new(
            Arc::new(mock_jetstream),
            "weather_data".to_string(),
        );

        let result = producer.publish(&test_event()).await;
        assert!(matches!(result, Err(DomainError::Propagation(_))));
    }

    #[test]
    fn test_subject_token_normalizes_free_form_locations() {
        assert_eq!(subject_token("Sydney"), "sydney");
        assert_eq!(subject_token("New York"), "new-york");
        assert_eq!(subject_token("St. John's"), "st-john-s");
        assert_eq!(subject_token("***"), "unknown");
    }
}
