use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Domain entity for a weather observation.
///
/// The pair (`location`, `observed_date`) uniquely identifies a record;
/// re-ingesting the same pair overwrites it (last-write-wins, no versioning).
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub location: String,
    pub observed_date: NaiveDate,
    pub temperature_c: i32,
    pub summary: Option<String>,
}

impl WeatherObservation {
    pub fn key(&self) -> ObservationKey {
        ObservationKey {
            location: self.location.clone(),
            observed_date: self.observed_date,
        }
    }
}

/// Identifying key pair of a stored observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationKey {
    pub location: String,
    pub observed_date: NaiveDate,
}

impl ObservationKey {
    /// Resource locator segment for the created record, e.g. `Sydney/20240601`.
    ///
    /// The date uses a fixed `%Y%m%d` encoding so the locator is
    /// locale-independent.
    pub fn resource_path(&self) -> String {
        format!("{}/{}", self.location, self.observed_date.format("%Y%m%d"))
    }
}

/// Event announcing that an observation was durably recorded.
///
/// A 1:1 copy of the record at the moment of ingestion, not a reference:
/// later overwrites of the record do not change already-published events.
/// Serialized as self-contained JSON; field order carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationCreatedEvent {
    pub location: String,
    pub observed_date: NaiveDate,
    pub temperature_c: i32,
    pub summary: Option<String>,
}

impl From<&WeatherObservation> for ObservationCreatedEvent {
    fn from(observation: &WeatherObservation) -> Self {
        Self {
            location: observation.location.clone(),
            observed_date: observation.observed_date,
            temperature_c: observation.temperature_c,
            summary: observation.summary.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation() -> WeatherObservation {
        WeatherObservation {
            location: "Sydney".to_string(),
            observed_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            temperature_c: 18,
            summary: Some("Cloudy".to_string()),
        }
    }

    #[test]
    fn test_resource_path_uses_compact_date() {
        assert_eq!(observation().key().resource_path(), "Sydney/20240601");
    }

    #[test]
    fn test_event_is_field_for_field_copy() {
        let obs = observation();
        let event = ObservationCreatedEvent::from(&obs);
        assert_eq!(event.location, obs.location);
        assert_eq!(event.observed_date, obs.observed_date);
        assert_eq!(event.temperature_c, obs.temperature_c);
        assert_eq!(event.summary, obs.summary);
    }

    #[test]
    fn test_event_json_shape() {
        let event = ObservationCreatedEvent::from(&observation());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["location"], "Sydney");
        assert_eq!(json["observedDate"], "2024-06-01");
        assert_eq!(json["temperatureC"], 18);
        assert_eq!(json["summary"], "Cloudy");
    }

    #[test]
    fn test_event_deserializes_regardless_of_field_order() {
        let json = r#"{"summary":null,"temperatureC":-3,"observedDate":"2024-07-02","location":"Oslo"}"#;
        let event: ObservationCreatedEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.location, "Oslo");
        assert_eq!(event.temperature_c, -3);
        assert_eq!(event.summary, None);
    }
}
