use chrono::NaiveDate;
use forecast_domain::WeatherObservation;

/// Database row for the weather_observations table
#[derive(Debug, Clone)]
pub struct ObservationRow {
    pub location: String,
    pub observed_date: NaiveDate,
    pub temperature_c: i32,
    pub summary: Option<String>,
}

impl From<ObservationRow> for WeatherObservation {
    fn from(row: ObservationRow) -> Self {
        WeatherObservation {
            location: row.location,
            observed_date: row.observed_date,
            temperature_c: row.temperature_c,
            summary: row.summary,
        }
    }
}
