//! Geographic coordinate and map marker models

use serde::{Deserialize, Serialize};

/// A point on the Earth's surface in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Create a new coordinate pair
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether the pair lies within valid latitude/longitude ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Format as a coordinates string
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A renderable map marker handed to the presentation layer
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Marker {
    pub coordinates: Coordinates,
    pub label: String,
}

impl Marker {
    #[must_use]
    pub fn new(coordinates: Coordinates, label: impl Into<String>) -> Self {
        Self {
            coordinates,
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validity() {
        assert!(Coordinates::new(17.54, 78.4867).is_valid());
        assert!(Coordinates::new(-90.0, 180.0).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -181.0).is_valid());
    }

    #[test]
    fn test_coordinate_format() {
        let position = Coordinates::new(17.5400, 78.4867);
        assert_eq!(position.format(), "17.5400, 78.4867");
    }
}
