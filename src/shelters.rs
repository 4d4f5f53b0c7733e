//! Shelter directory and nearest-shelter lookup
//!
//! Holds the fixed shelter set for the lifetime of the process and ranks
//! it by geodesic distance from the user's position. Distances are
//! recomputed on every call and never cached across positions.

use crate::models::{Coordinates, RankedShelter, ShelterRecord};
use geo::{GeodesicDistance, Point};
use tracing::debug;

/// Geodesic distance between two coordinates in kilometers.
/// Ellipsoidal (Karney), not a spherical approximation.
#[must_use]
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let from = Point::new(from.longitude, from.latitude);
    let to = Point::new(to.longitude, to.latitude);
    from.geodesic_distance(&to) / 1000.0
}

/// Static, read-only shelter directory
#[derive(Debug, Clone)]
pub struct ShelterDirectory {
    shelters: Vec<ShelterRecord>,
}

impl ShelterDirectory {
    /// Create a directory over an injected shelter set
    #[must_use]
    pub fn new(shelters: Vec<ShelterRecord>) -> Self {
        Self { shelters }
    }

    /// The full shelter set
    #[must_use]
    pub fn records(&self) -> &[ShelterRecord] {
        &self.shelters
    }

    /// The `count` shelters closest to `position`, ascending by distance.
    /// Ties keep the original list order (stable sort), so repeated calls
    /// with the same position are deterministic.
    #[must_use]
    pub fn nearest(&self, position: Coordinates, count: usize) -> Vec<RankedShelter> {
        let mut ranked: Vec<RankedShelter> = self
            .shelters
            .iter()
            .map(|shelter| RankedShelter {
                shelter: shelter.clone(),
                distance_km: distance_km(position, shelter.coordinates),
            })
            .collect();

        ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        ranked.truncate(count);

        debug!(
            "Ranked {} shelters from {}; nearest: {:?}",
            self.shelters.len(),
            position.format(),
            ranked.first().map(|r| r.shelter.name.as_str())
        );

        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReliefAiConfig;

    fn directory() -> ShelterDirectory {
        ShelterDirectory::new(ReliefAiConfig::default().shelters)
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        let point = Coordinates::new(17.5400, 78.4867);
        assert!(distance_km(point, point) < 1e-9);
    }

    #[test]
    fn test_distance_known_pair() {
        // Central Hyderabad to Balapur is roughly 25-30 km
        let from = Coordinates::new(17.5400, 78.4867);
        let to = Coordinates::new(17.3100, 78.5400);
        let km = distance_km(from, to);
        assert!(km > 20.0 && km < 35.0, "unexpected distance {km}");
    }

    #[test]
    fn test_nearest_returns_at_most_count() {
        let position = Coordinates::new(17.5400, 78.4867);
        assert_eq!(directory().nearest(position, 3).len(), 3);
        assert_eq!(directory().nearest(position, 10).len(), 4);
        assert!(directory().nearest(position, 0).is_empty());
    }

    #[test]
    fn test_nearest_sorted_non_decreasing() {
        let position = Coordinates::new(17.5400, 78.4867);
        let ranked = directory().nearest(position, 4);
        for pair in ranked.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    #[test]
    fn test_nearest_is_subset_of_directory() {
        let dir = directory();
        let position = Coordinates::new(17.40, 78.45);
        for ranked in dir.nearest(position, 3) {
            assert!(dir.records().contains(&ranked.shelter));
        }
    }

    #[test]
    fn test_nearest_is_idempotent() {
        let dir = directory();
        let position = Coordinates::new(17.45, 78.46);
        assert_eq!(dir.nearest(position, 3), dir.nearest(position, 3));
    }

    #[test]
    fn test_dundigal_ranks_first_from_default_position() {
        let position = Coordinates::new(17.5400, 78.4867);
        let ranked = directory().nearest(position, 3);
        assert_eq!(ranked[0].shelter.name, "Relief Camp - Dundigal");
        // The camp sits a few hundred meters away at most
        assert!(ranked[0].distance_km < 1.0);
    }
}
