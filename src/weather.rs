//! Weather client and advisory classification
//!
//! Fetches current conditions for a city from an OpenWeatherMap-style API
//! and classifies them into an advisory message. Classification branches
//! are mutually exclusive and strictly ordered: unavailable, heatwave,
//! flood/storm, neutral. A storm above the heatwave threshold is reported
//! as a heatwave.

use crate::config::ReliefAiConfig;
use crate::models::{FetchOutcome, WeatherReading};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Temperatures above this many degrees Celsius trigger the heatwave branch
pub const HEATWAVE_THRESHOLD_CELSIUS: f64 = 40.0;

/// Source of weather alert lines for the response engine
#[async_trait]
pub trait AlertSource: Send + Sync {
    /// Produce the alert message for a city. Infallible: service failures
    /// surface as message text.
    async fn alert(&self, city: &str) -> String;
}

/// Current-weather response: only the fields the classifier reads
#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    main: MainReadings,
    weather: Vec<ConditionEntry>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    description: String,
}

/// Weather API client
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    /// Create a new weather API client
    pub fn new(config: &ReliefAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.weather.timeout_seconds.into()))
            .user_agent(concat!("ReliefAI/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.weather.base_url.clone(),
            api_key: config.weather.api_key.clone().unwrap_or_default(),
        })
    }

    /// Fetch current conditions for a city. One request, no retries;
    /// transport and status failures map to `Unavailable`, undecodable
    /// payloads to `Malformed`.
    #[instrument(skip_all, fields(city = city))]
    pub async fn current(&self, city: &str) -> FetchOutcome<WeatherReading> {
        let url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(city),
            self.api_key
        );

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Weather request for '{city}' failed: {e}");
                return FetchOutcome::Unavailable;
            }
        };

        if !response.status().is_success() {
            warn!(
                "Weather service returned status {} for '{city}'",
                response.status()
            );
            return FetchOutcome::Unavailable;
        }

        let payload: CurrentWeatherResponse = match response.json().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Weather response for '{city}' did not decode: {e}");
                return FetchOutcome::Malformed;
            }
        };

        let Some(condition) = payload.weather.into_iter().next() else {
            warn!("Weather response for '{city}' carried no condition entry");
            return FetchOutcome::Malformed;
        };

        debug!(
            "Current weather in {city}: {} at {}°C",
            condition.description, payload.main.temp
        );

        FetchOutcome::Success(WeatherReading {
            temperature_celsius: payload.main.temp,
            description: condition.description,
            fetched_at: Utc::now(),
        })
    }
}

/// Classify a fetch outcome into the advisory message for a city.
/// Pure so the branch ordering is testable without the network.
#[must_use]
pub fn advisory_message(city: &str, outcome: FetchOutcome<WeatherReading>) -> String {
    let Some(reading) = outcome.success() else {
        return format!("Weather data unavailable for {city}.");
    };

    if reading.temperature_celsius > HEATWAVE_THRESHOLD_CELSIUS {
        format!(
            "Heatwave alert in {city}! Temperature: {}°C. Stay hydrated and avoid sunlight.",
            reading.temperature_celsius
        )
    } else if reading.description.contains("rain") || reading.description.contains("storm") {
        format!(
            "Flood/storm alert in {city}! Weather: {}. Move to safe areas.",
            reading.description
        )
    } else {
        format!(
            "Current weather in {city}: {}, Temp: {}°C.",
            reading.description, reading.temperature_celsius
        )
    }
}

/// Weather advisor backed by the live API client
pub struct WeatherAdvisor {
    client: WeatherClient,
}

impl WeatherAdvisor {
    #[must_use]
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AlertSource for WeatherAdvisor {
    async fn alert(&self, city: &str) -> String {
        advisory_message(city, self.client.current(city).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn reading(temp: f64, description: &str) -> FetchOutcome<WeatherReading> {
        FetchOutcome::Success(WeatherReading::new(temp, description))
    }

    #[test]
    fn test_current_weather_payload_decodes() {
        let payload: CurrentWeatherResponse = serde_json::from_str(
            r#"{"cod": 200, "main": {"temp": 31.5, "humidity": 60},
                "weather": [{"id": 500, "main": "Rain", "description": "light rain"}]}"#,
        )
        .unwrap();
        assert_eq!(payload.main.temp, 31.5);
        assert_eq!(payload.weather[0].description, "light rain");
    }

    #[test]
    fn test_unavailable_names_the_city() {
        for outcome in [FetchOutcome::Unavailable, FetchOutcome::Malformed] {
            let message = advisory_message("Hyderabad", outcome);
            assert_eq!(message, "Weather data unavailable for Hyderabad.");
        }
    }

    #[rstest]
    #[case(45.0, "clear sky", "Heatwave alert")]
    #[case(40.1, "scattered clouds", "Heatwave alert")]
    #[case(32.0, "light rain", "Flood/storm alert")]
    #[case(25.0, "thunderstorm", "Flood/storm alert")]
    #[case(28.0, "clear sky", "Current weather")]
    #[case(40.0, "clear sky", "Current weather")]
    fn test_classification_branches(
        #[case] temp: f64,
        #[case] description: &str,
        #[case] expected_prefix: &str,
    ) {
        let message = advisory_message("Hyderabad", reading(temp, description));
        assert!(
            message.starts_with(expected_prefix),
            "{temp}°C '{description}' produced: {message}"
        );
    }

    #[test]
    fn test_heatwave_outranks_storm() {
        let message = advisory_message("Hyderabad", reading(42.5, "heavy thunderstorm"));
        assert!(message.contains("Heatwave alert"));
        assert!(!message.contains("Flood/storm"));
        assert!(message.contains("42.5"));
    }

    #[test]
    fn test_storm_branch_includes_description() {
        let message = advisory_message("Chennai", reading(30.0, "moderate rain"));
        assert!(message.contains("moderate rain"));
        assert!(message.contains("Chennai"));
    }

    #[test]
    fn test_description_match_is_case_sensitive() {
        // The API reports lowercase descriptions; an upper-case "Rain"
        // from elsewhere does not trip the storm branch.
        let message = advisory_message("Hyderabad", reading(30.0, "Rain"));
        assert!(message.starts_with("Current weather"));
    }

    #[tokio::test]
    async fn test_advisor_reports_unavailable_when_unreachable() {
        let mut config = crate::config::ReliefAiConfig::default();
        config.weather.base_url = "http://127.0.0.1:9".to_string();
        config.weather.timeout_seconds = 1;

        let advisor = WeatherAdvisor::new(WeatherClient::new(&config).unwrap());
        let message = advisor.alert("Hyderabad").await;
        assert!(message.contains("unavailable for Hyderabad"));
    }
}
