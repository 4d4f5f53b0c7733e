//! Core data models for the `ReliefAI` assistant

pub mod location;
pub mod outcome;
pub mod query;
pub mod shelter;
pub mod weather;

pub use location::{Coordinates, Marker};
pub use outcome::FetchOutcome;
pub use query::{Advisory, Language, QuerySource, UserQuery};
pub use shelter::{RankedShelter, ShelterRecord};
pub use weather::WeatherReading;
