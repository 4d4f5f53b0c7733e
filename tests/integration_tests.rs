//! Integration tests for the ReliefAI response pipeline
//!
//! Drives the response engine end to end with a stubbed weather source,
//! so every scenario runs deterministically and offline.

use async_trait::async_trait;
use reliefai::models::{Coordinates, FetchOutcome, WeatherReading};
use reliefai::weather::{AlertSource, advisory_message};
use reliefai::{ReliefAiConfig, ResponseEngine, ShelterDirectory};

/// Alert source that classifies a canned fetch outcome, mirroring what
/// the live advisor does without the HTTP hop.
struct CannedWeather {
    outcome: FetchOutcome<WeatherReading>,
}

#[async_trait]
impl AlertSource for CannedWeather {
    async fn alert(&self, city: &str) -> String {
        advisory_message(city, self.outcome.clone())
    }
}

fn engine_with(outcome: FetchOutcome<WeatherReading>) -> ResponseEngine {
    let config = ReliefAiConfig::default();
    ResponseEngine::new(
        Box::new(CannedWeather { outcome }),
        ShelterDirectory::new(config.shelters),
        config.emergency,
        config.defaults.shelter_count as usize,
    )
}

fn hyderabad() -> Coordinates {
    Coordinates::new(17.5400, 78.4867)
}

const FOOTER: &str = "Emergency Helpline: 108 (Ambulance), 100 (Police), 101 (Fire)";

#[tokio::test]
async fn scared_flood_query_with_unreachable_weather() {
    let engine = engine_with(FetchOutcome::Unavailable);
    let response = engine
        .respond("I am scared, is there a flood coming?", "Hyderabad", hyderabad())
        .await;

    assert!(response.starts_with("During floods:"));
    assert!(response.contains("unavailable for Hyderabad"));
    assert!(response.contains("You seem stressed"));
    assert!(response.ends_with(FOOTER));
}

#[tokio::test]
async fn safe_place_query_ranks_dundigal_first() {
    let engine = engine_with(FetchOutcome::Unavailable);
    let response = engine
        .respond("where can I find a safe place", "Hyderabad", hyderabad())
        .await;

    let lines: Vec<&str> = response.lines().collect();
    assert_eq!(lines[0], "Nearest shelters:");
    assert!(lines[1].starts_with("- Relief Camp - Dundigal"));

    // Exactly the nearest-3 block plus the footer, never a weather line
    let bullets = lines.iter().filter(|line| line.starts_with("- ")).count();
    assert_eq!(bullets, 3);
    assert!(!response.contains("unavailable"));
    assert!(!response.contains("Current weather"));
    assert!(response.ends_with(FOOTER));
}

#[tokio::test]
async fn heat_query_reports_heatwave_over_storm() {
    let reading = WeatherReading::new(42.0, "heavy thunderstorm with rain");
    let engine = engine_with(FetchOutcome::Success(reading));
    let response = engine.respond("heatwave tips", "Hyderabad", hyderabad()).await;

    assert!(response.contains("Heatwave alert in Hyderabad"));
    assert!(response.contains("42"));
    assert!(!response.contains("Flood/storm alert"));
}

#[tokio::test]
async fn rain_query_reports_storm_alert() {
    let reading = WeatherReading::new(28.0, "moderate rain");
    let engine = engine_with(FetchOutcome::Success(reading));
    let response = engine.respond("will it rain today", "Hyderabad", hyderabad()).await;

    assert!(response.starts_with("During floods:"));
    assert!(response.contains("Flood/storm alert in Hyderabad"));
    assert!(response.contains("moderate rain"));
}

#[tokio::test]
async fn unrecognized_query_gets_fallback_only() {
    let engine = engine_with(FetchOutcome::Unavailable);
    let response = engine.respond("hello", "Hyderabad", hyderabad()).await;

    assert!(response.starts_with("I can give tips about floods, heatwaves, or shelters."));
    assert!(!response.contains("Nearest shelters:"));
    assert!(!response.contains("unavailable"));
    assert!(response.ends_with(FOOTER));
}

#[tokio::test]
async fn malformed_weather_reads_as_unavailable_text() {
    let engine = engine_with(FetchOutcome::Malformed);
    let response = engine.respond("storm warning?", "Chennai", hyderabad()).await;
    assert!(response.contains("Weather data unavailable for Chennai."));
}

#[tokio::test]
async fn shelter_lookup_is_deterministic_across_queries() {
    let engine = engine_with(FetchOutcome::Unavailable);
    let first = engine.respond("nearest shelter", "Hyderabad", hyderabad()).await;
    let second = engine.respond("nearest shelter", "Hyderabad", hyderabad()).await;
    assert_eq!(first, second);
}
