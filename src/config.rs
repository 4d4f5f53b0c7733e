//! Configuration management for the `ReliefAI` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings. The shelter
//! list and emergency numbers are injected data, not baked into logic.

use crate::ReliefAiError;
use crate::models::{Coordinates, Language, ShelterRecord};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `ReliefAI` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliefAiConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Location service configuration
    #[serde(default)]
    pub location: LocationConfig,
    /// Speech recognition and synthesis configuration
    #[serde(default)]
    pub speech: SpeechConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Emergency helpline numbers appended to every response
    #[serde(default)]
    pub emergency: EmergencyConfig,
    /// Shelter records, fixed for the lifetime of the process
    #[serde(default = "default_shelters")]
    pub shelters: Vec<ShelterRecord>,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Weather API key
    pub api_key: Option<String>,
    /// Base URL for the current-weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Location service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// IP-geolocation endpoint
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,
    /// Reverse-geocoding endpoint
    #[serde(default = "default_reverse_geocode_url")]
    pub reverse_geocode_url: String,
    /// Fallback latitude used when geolocation fails
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,
    /// Fallback longitude used when geolocation fails
    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,
    /// Fallback city used when geolocation fails
    #[serde(default = "default_fallback_city")]
    pub fallback_city: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Speech service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Speech recognition endpoint
    #[serde(default = "default_recognition_url")]
    pub recognition_url: String,
    /// Text-to-speech endpoint
    #[serde(default = "default_synthesis_url")]
    pub synthesis_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_speech_timeout")]
    pub timeout_seconds: u32,
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the JSON API listens on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Response language
    #[serde(default = "default_language")]
    pub language: String,
    /// How many nearby shelters to return
    #[serde(default = "default_shelter_count")]
    pub shelter_count: u32,
}

/// Emergency helpline numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyConfig {
    #[serde(default = "default_ambulance")]
    pub ambulance: String,
    #[serde(default = "default_police")]
    pub police: String,
    #[serde(default = "default_fire")]
    pub fire: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_ip_lookup_url() -> String {
    "https://ipinfo.io/json".to_string()
}

fn default_reverse_geocode_url() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_string()
}

fn default_recognition_url() -> String {
    "https://speech.googleapis.com/v1/speech:recognize".to_string()
}

fn default_synthesis_url() -> String {
    "https://translate.google.com/translate_tts".to_string()
}

fn default_fallback_latitude() -> f64 {
    17.5400
}

fn default_fallback_longitude() -> f64 {
    78.4867
}

fn default_fallback_city() -> String {
    "Hyderabad".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_speech_timeout() -> u32 {
    60
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_shelter_count() -> u32 {
    3
}

fn default_ambulance() -> String {
    "108".to_string()
}

fn default_police() -> String {
    "100".to_string()
}

fn default_fire() -> String {
    "101".to_string()
}

/// The built-in shelter set used when no shelter data is configured
fn default_shelters() -> Vec<ShelterRecord> {
    vec![
        ShelterRecord {
            name: "Community Center - Balapur".to_string(),
            coordinates: Coordinates::new(17.3100, 78.5400),
            capacity: 200,
            contact: "9876543210".to_string(),
        },
        ShelterRecord {
            name: "Relief Camp - Dundigal".to_string(),
            coordinates: Coordinates::new(17.5405, 78.4870),
            capacity: 150,
            contact: "9876543211".to_string(),
        },
        ShelterRecord {
            name: "Govt School Shelter - Hyderabad".to_string(),
            coordinates: Coordinates::new(17.3850, 78.4867),
            capacity: 300,
            contact: "9876543212".to_string(),
        },
        ShelterRecord {
            name: "NGO Shelter - Miyapur".to_string(),
            coordinates: Coordinates::new(17.5000, 78.4000),
            capacity: 100,
            contact: "9876543213".to_string(),
        },
    ]
}

impl Default for ReliefAiConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            location: LocationConfig::default(),
            speech: SpeechConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            defaults: DefaultsConfig::default(),
            emergency: EmergencyConfig::default(),
            shelters: default_shelters(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            ip_lookup_url: default_ip_lookup_url(),
            reverse_geocode_url: default_reverse_geocode_url(),
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
            fallback_city: default_fallback_city(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            recognition_url: default_recognition_url(),
            synthesis_url: default_synthesis_url(),
            timeout_seconds: default_speech_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            shelter_count: default_shelter_count(),
        }
    }
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        Self {
            ambulance: default_ambulance(),
            police: default_police(),
            fire: default_fire(),
        }
    }
}

impl ReliefAiConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with RELIEFAI_ prefix
        builder = builder.add_source(
            Environment::with_prefix("RELIEFAI")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: ReliefAiConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("reliefai").join("config.toml"))
    }

    /// Fallback location used when IP geolocation fails
    #[must_use]
    pub fn fallback_position(&self) -> Coordinates {
        Coordinates::new(
            self.location.fallback_latitude,
            self.location.fallback_longitude,
        )
    }

    /// Parsed default response language
    pub fn default_language(&self) -> Result<Language> {
        Ok(self.defaults.language.parse::<Language>()?)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_shelters()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        if let Some(api_key) = &self.weather.api_key {
            if api_key.is_empty() {
                return Err(ReliefAiError::config(
                    "Weather API key cannot be empty if provided. Either remove it or provide a valid key."
                ).into());
            }

            if api_key.len() < 8 {
                return Err(ReliefAiError::config(
                    "Weather API key appears to be invalid (too short). Please check your API key."
                ).into());
            }

            if api_key.len() > 100 {
                return Err(ReliefAiError::config(
                    "Weather API key appears to be invalid (too long). Please check your API key."
                ).into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        for (name, timeout) in [
            ("Weather", self.weather.timeout_seconds),
            ("Location", self.location.timeout_seconds),
            ("Speech", self.speech.timeout_seconds),
        ] {
            if timeout == 0 || timeout > 300 {
                return Err(ReliefAiError::config(format!(
                    "{name} API timeout must be between 1 and 300 seconds"
                ))
                .into());
            }
        }

        if self.defaults.shelter_count == 0 {
            return Err(ReliefAiError::config("Shelter count must be at least 1").into());
        }

        if self.defaults.shelter_count > 100 {
            return Err(ReliefAiError::config("Shelter count cannot exceed 100").into());
        }

        if !self.fallback_position().is_valid() {
            return Err(ReliefAiError::config(
                "Fallback coordinates are outside valid latitude/longitude ranges",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ReliefAiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ReliefAiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        self.defaults
            .language
            .parse::<Language>()
            .with_context(|| "Invalid default language in configuration")?;

        for (name, url) in [
            ("Weather base URL", &self.weather.base_url),
            ("IP lookup URL", &self.location.ip_lookup_url),
            ("Reverse geocode URL", &self.location.reverse_geocode_url),
            ("Speech recognition URL", &self.speech.recognition_url),
            ("Speech synthesis URL", &self.speech.synthesis_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ReliefAiError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate the injected shelter data
    fn validate_shelters(&self) -> Result<()> {
        if self.shelters.is_empty() {
            return Err(ReliefAiError::config(
                "At least one shelter record must be configured",
            )
            .into());
        }

        for shelter in &self.shelters {
            if !shelter.coordinates.is_valid() {
                return Err(ReliefAiError::config(format!(
                    "Shelter '{}' has coordinates outside valid ranges",
                    shelter.name
                ))
                .into());
            }
        }

        Ok(())
    }
}
