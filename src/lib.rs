//! `ReliefAI` - Disaster survival assistant
//!
//! This library provides the core functionality for answering disaster-safety
//! questions: location resolution, weather alerting, shelter lookup, response
//! composition, and optional voice input/output.

pub mod api;
pub mod assistant;
pub mod config;
pub mod engine;
pub mod error;
pub mod geocode;
pub mod location_resolver;
pub mod models;
pub mod sentiment;
pub mod shelters;
pub mod speech;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use assistant::{Assistant, Interaction};
pub use config::ReliefAiConfig;
pub use engine::ResponseEngine;
pub use error::ReliefAiError;
pub use geocode::ReverseGeocoder;
pub use location_resolver::{IpLocator, ResolvedLocation};
pub use models::{
    Advisory, Coordinates, FetchOutcome, Language, Marker, QuerySource, RankedShelter,
    ShelterRecord, UserQuery, WeatherReading,
};
pub use shelters::ShelterDirectory;
pub use speech::SpeechClient;
pub use weather::{AlertSource, WeatherAdvisor, WeatherClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ReliefAiError>;
