//! Reverse geocoding against a Nominatim-style service
//!
//! Converts coordinates into a city name using the service's address
//! breakdown. The first non-empty field among city/town/village wins;
//! any failure degrades to the literal "Unknown".

use crate::config::ReliefAiConfig;
use crate::models::{Coordinates, FetchOutcome};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// City name used when the service fails or returns no usable field
pub const UNKNOWN_CITY: &str = "Unknown";

#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    #[serde(default)]
    address: AddressBreakdown,
}

#[derive(Debug, Deserialize, Default)]
struct AddressBreakdown {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
}

impl AddressBreakdown {
    /// First non-empty field among city/town/village
    fn locality(self) -> Option<String> {
        [self.city, self.town, self.village]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
    }
}

/// Reverse geocoding client
pub struct ReverseGeocoder {
    client: Client,
    base_url: String,
}

impl ReverseGeocoder {
    /// Create a new client from configuration
    pub fn new(config: &ReliefAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.location.timeout_seconds.into()))
            .user_agent(concat!("ReliefAI/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.location.reverse_geocode_url.clone(),
        })
    }

    /// Resolve coordinates to a city name, degrading to "Unknown" on any
    /// failure. Never errors and never retries.
    #[instrument(skip(self))]
    pub async fn reverse(&self, position: Coordinates) -> String {
        match self.fetch(position).await {
            FetchOutcome::Success(city) => city,
            outcome => {
                debug!("Reverse geocoding degraded ({outcome:?}) for {}", position.format());
                UNKNOWN_CITY.to_string()
            }
        }
    }

    /// One lookup against the reverse-geocoding service
    async fn fetch(&self, position: Coordinates) -> FetchOutcome<String> {
        let request = self.client.get(&self.base_url).query(&[
            ("lat", position.latitude.to_string()),
            ("lon", position.longitude.to_string()),
            ("format", "jsonv2".to_string()),
            ("accept-language", "en".to_string()),
        ]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Reverse geocode request failed: {e}");
                return FetchOutcome::Unavailable;
            }
        };

        if !response.status().is_success() {
            debug!("Reverse geocode returned status {}", response.status());
            return FetchOutcome::Unavailable;
        }

        let payload: ReverseGeocodeResponse = match response.json().await {
            Ok(payload) => payload,
            Err(e) => {
                debug!("Reverse geocode response did not decode: {e}");
                return FetchOutcome::Malformed;
            }
        };

        match payload.address.locality() {
            Some(city) => FetchOutcome::Success(city),
            // A decodable answer with no usable locality still degrades
            None => FetchOutcome::Malformed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReliefAiConfig;

    #[test]
    fn test_reverse_geocode_payload_decodes() {
        let payload: ReverseGeocodeResponse = serde_json::from_str(
            r#"{"place_id": 12345, "address": {"city": "Hyderabad", "country": "India"}}"#,
        )
        .unwrap();
        assert_eq!(payload.address.locality(), Some("Hyderabad".to_string()));
    }

    #[test]
    fn test_payload_without_address_has_no_locality() {
        let payload: ReverseGeocodeResponse = serde_json::from_str(r#"{"place_id": 1}"#).unwrap();
        assert_eq!(payload.address.locality(), None);
    }

    #[test]
    fn test_locality_prefers_city() {
        let address = AddressBreakdown {
            city: Some("Hyderabad".to_string()),
            town: Some("Dundigal".to_string()),
            village: None,
        };
        assert_eq!(address.locality(), Some("Hyderabad".to_string()));
    }

    #[test]
    fn test_locality_falls_through_empty_fields() {
        let address = AddressBreakdown {
            city: Some(String::new()),
            town: None,
            village: Some("Balapur".to_string()),
        };
        assert_eq!(address.locality(), Some("Balapur".to_string()));
    }

    #[test]
    fn test_locality_none_when_absent() {
        assert_eq!(AddressBreakdown::default().locality(), None);
    }

    #[tokio::test]
    async fn test_reverse_degrades_to_unknown_when_unreachable() {
        let mut config = ReliefAiConfig::default();
        config.location.reverse_geocode_url = "http://127.0.0.1:9/reverse".to_string();
        config.location.timeout_seconds = 1;

        let geocoder = ReverseGeocoder::new(&config).unwrap();
        let city = geocoder.reverse(Coordinates::new(17.54, 78.4867)).await;
        assert_eq!(city, UNKNOWN_CITY);
    }
}
