//! Shelter record models

use super::Coordinates;
use serde::{Deserialize, Serialize};

/// One shelter, defined at startup and never mutated
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShelterRecord {
    /// Shelter name
    pub name: String,
    /// Shelter position
    pub coordinates: Coordinates,
    /// How many people the shelter can take
    pub capacity: u32,
    /// Contact phone number
    pub contact: String,
}

/// A shelter paired with its distance from the current user position.
/// Derived per lookup, never persisted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RankedShelter {
    pub shelter: ShelterRecord,
    pub distance_km: f64,
}
