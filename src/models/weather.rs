//! Weather reading model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for one city, fetched per query and never cached
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherReading {
    /// Temperature in Celsius
    pub temperature_celsius: f64,
    /// Human-readable description of weather conditions, as returned by the API
    pub description: String,
    /// When this reading was retrieved
    pub fetched_at: DateTime<Utc>,
}

impl WeatherReading {
    #[must_use]
    pub fn new(temperature_celsius: f64, description: impl Into<String>) -> Self {
        Self {
            temperature_celsius,
            description: description.into(),
            fetched_at: Utc::now(),
        }
    }
}
