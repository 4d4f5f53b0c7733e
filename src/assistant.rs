//! Interaction pipeline
//!
//! One user interaction runs to completion as a sequence of awaits:
//! resolve the user's position, reverse geocode it to a city, compose
//! the response, and optionally synthesize audio for non-default
//! languages. Also produces the map markers the presentation layer
//! renders (user position plus nearest shelters).

use crate::config::ReliefAiConfig;
use crate::engine::ResponseEngine;
use crate::geocode::ReverseGeocoder;
use crate::location_resolver::IpLocator;
use crate::models::{Advisory, Coordinates, Language, Marker, UserQuery};
use crate::shelters::ShelterDirectory;
use crate::speech::SpeechClient;
use crate::weather::{WeatherAdvisor, WeatherClient};
use anyhow::Result;
use tracing::{info, instrument, warn};

/// Marker label for the user's own position
const USER_MARKER_LABEL: &str = "You are here";

/// Everything one interaction produces for the presentation layer
#[derive(Debug)]
pub struct Interaction {
    /// The composed response
    pub advisory: Advisory,
    /// City the response was generated for
    pub city: String,
    /// The user's resolved position
    pub position: Coordinates,
    /// Map markers: user position plus the nearest shelters
    pub markers: Vec<Marker>,
    /// Synthesized audio, present only for non-default languages
    pub audio: Option<Vec<u8>>,
}

/// The assembled assistant: clients, directory, and response engine
pub struct Assistant {
    locator: IpLocator,
    geocoder: ReverseGeocoder,
    engine: ResponseEngine,
    speech: SpeechClient,
    shelters: ShelterDirectory,
    shelter_count: usize,
}

impl Assistant {
    /// Build the full pipeline from configuration
    pub fn new(config: &ReliefAiConfig) -> Result<Self> {
        let shelters = ShelterDirectory::new(config.shelters.clone());
        let advisor = WeatherAdvisor::new(WeatherClient::new(config)?);
        let engine = ResponseEngine::new(
            Box::new(advisor),
            shelters.clone(),
            config.emergency.clone(),
            config.defaults.shelter_count as usize,
        );

        Ok(Self {
            locator: IpLocator::new(config)?,
            geocoder: ReverseGeocoder::new(config)?,
            engine,
            speech: SpeechClient::new(config)?,
            shelters,
            shelter_count: config.defaults.shelter_count as usize,
        })
    }

    /// Handle one interaction end to end
    #[instrument(skip_all, fields(source = ?query.source, language = %language))]
    pub async fn interact(&self, query: UserQuery, language: Language) -> Interaction {
        let location = self.locator.resolve().await;
        let city = self.geocoder.reverse(location.coordinates).await;

        info!(
            "Responding for city '{city}' at {} ({:?} query)",
            location.coordinates.format(),
            query.source
        );

        let body = self
            .engine
            .respond(&query.text, &city, location.coordinates)
            .await;

        let audio = if language.is_default() {
            None
        } else {
            match self.speech.synthesize(&body, language).await {
                Ok(audio) => Some(audio),
                Err(e) => {
                    // Degrade to text-only output
                    warn!("Speech synthesis failed: {e}");
                    None
                }
            }
        };

        Interaction {
            advisory: Advisory::new(body, language),
            city,
            position: location.coordinates,
            markers: self.markers(location.coordinates),
            audio,
        }
    }

    /// Transcribe recorded audio into query text
    pub async fn transcribe(&self, audio: &[u8]) -> String {
        self.speech.transcribe(audio).await
    }

    /// Synthesize arbitrary response text (used by the speech endpoint)
    pub async fn synthesize(&self, text: &str, language: Language) -> crate::Result<Vec<u8>> {
        self.speech.synthesize(text, language).await
    }

    /// The shelter directory backing this assistant
    #[must_use]
    pub fn shelters(&self) -> &ShelterDirectory {
        &self.shelters
    }

    /// Map markers for the user position and the nearest shelters
    fn markers(&self, position: Coordinates) -> Vec<Marker> {
        let mut markers = vec![Marker::new(position, USER_MARKER_LABEL)];
        for ranked in self.shelters.nearest(position, self.shelter_count) {
            markers.push(Marker::new(
                ranked.shelter.coordinates,
                ranked.shelter.name.clone(),
            ));
        }
        markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReliefAiConfig;

    fn offline_config() -> ReliefAiConfig {
        // Point every service at a closed local port so the pipeline
        // exercises its degraded paths without touching the network.
        let mut config = ReliefAiConfig::default();
        config.location.ip_lookup_url = "http://127.0.0.1:9/json".to_string();
        config.location.reverse_geocode_url = "http://127.0.0.1:9/reverse".to_string();
        config.weather.base_url = "http://127.0.0.1:9".to_string();
        config.speech.recognition_url = "http://127.0.0.1:9/recognize".to_string();
        config.speech.synthesis_url = "http://127.0.0.1:9/tts".to_string();
        config.location.timeout_seconds = 1;
        config.weather.timeout_seconds = 1;
        config.speech.timeout_seconds = 1;
        config
    }

    #[tokio::test]
    async fn test_interaction_degrades_to_fallbacks_offline() {
        let assistant = Assistant::new(&offline_config()).unwrap();
        let interaction = assistant
            .interact(UserQuery::typed("is a storm coming?"), Language::En)
            .await;

        // Geolocation fell back to Hyderabad, geocoding to Unknown
        assert_eq!(interaction.position, Coordinates::new(17.5400, 78.4867));
        assert_eq!(interaction.city, "Unknown");

        // Weather degraded inside the message text, never as an error
        assert!(interaction.advisory.body.contains("unavailable for Unknown"));
        assert!(interaction.advisory.body.contains("Emergency Helpline"));
        assert!(interaction.audio.is_none());
    }

    #[tokio::test]
    async fn test_interaction_markers_cover_user_and_shelters() {
        let assistant = Assistant::new(&offline_config()).unwrap();
        let interaction = assistant
            .interact(UserQuery::typed("hello"), Language::En)
            .await;

        assert_eq!(interaction.markers.len(), 4);
        assert_eq!(interaction.markers[0].label, USER_MARKER_LABEL);
        assert_eq!(interaction.markers[1].label, "Relief Camp - Dundigal");
    }

    #[tokio::test]
    async fn test_non_default_language_degrades_to_text_only_offline() {
        let assistant = Assistant::new(&offline_config()).unwrap();
        let interaction = assistant
            .interact(UserQuery::typed("hello"), Language::Hi)
            .await;

        // Synthesis is unreachable, so the advisory arrives without audio
        assert!(interaction.audio.is_none());
        assert_eq!(interaction.advisory.language, Language::Hi);
    }
}
