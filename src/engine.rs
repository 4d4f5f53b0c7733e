//! Response composition for disaster-safety queries
//!
//! Matches the query against keyword categories in a fixed priority
//! order, appends the weather alert line or the nearest-shelter block,
//! adds a reassurance line for notably negative queries, and always
//! closes with the emergency-numbers footer. External failures never
//! escape as errors; they arrive pre-rendered inside the alert text.

use crate::config::EmergencyConfig;
use crate::models::Coordinates;
use crate::sentiment;
use crate::shelters::ShelterDirectory;
use crate::weather::AlertSource;
use std::fmt::Write as _;
use tracing::{debug, instrument};

/// Keywords routed to the flood category, checked first
const FLOOD_KEYWORDS: &[&str] = &["flood", "rain", "storm"];
/// Keywords routed to the heatwave category
const HEAT_KEYWORDS: &[&str] = &["heat", "heatwave"];
/// Keywords routed to the shelter category
const SHELTER_KEYWORDS: &[&str] = &["shelter", "safe place"];

/// Queries scoring below this polarity get the reassurance line
const STRESS_THRESHOLD: f64 = -0.3;

const FLOOD_TIP: &str =
    "During floods: move to higher ground, avoid waterlogged areas, carry drinking water.";
const HEATWAVE_TIP: &str =
    "During heatwaves: stay hydrated, avoid direct sunlight, wear light clothing.";
const FALLBACK_MESSAGE: &str =
    "I can give tips about floods, heatwaves, or shelters. Try asking about them!";
const STRESS_REASSURANCE: &str =
    "You seem stressed. Stay calm and follow safety instructions.";

/// Composes the full advisory text for one query
pub struct ResponseEngine {
    alerts: Box<dyn AlertSource>,
    shelters: ShelterDirectory,
    emergency: EmergencyConfig,
    shelter_count: usize,
}

impl ResponseEngine {
    #[must_use]
    pub fn new(
        alerts: Box<dyn AlertSource>,
        shelters: ShelterDirectory,
        emergency: EmergencyConfig,
        shelter_count: usize,
    ) -> Self {
        Self {
            alerts,
            shelters,
            emergency,
            shelter_count,
        }
    }

    /// Compose the multi-line response for a query. First keyword match
    /// wins: flood, then heatwave, then shelter, then the generic
    /// fallback. Always ends with the emergency footer.
    #[instrument(skip_all, fields(city = city))]
    pub async fn respond(&self, query_text: &str, city: &str, position: Coordinates) -> String {
        let lowered = query_text.to_lowercase();

        let mut response = if contains_any(&lowered, FLOOD_KEYWORDS) {
            debug!("Query matched flood category");
            format!("{FLOOD_TIP}\n{}", self.alerts.alert(city).await)
        } else if contains_any(&lowered, HEAT_KEYWORDS) {
            debug!("Query matched heatwave category");
            format!("{HEATWAVE_TIP}\n{}", self.alerts.alert(city).await)
        } else if contains_any(&lowered, SHELTER_KEYWORDS) {
            debug!("Query matched shelter category");
            self.shelter_block(position)
        } else {
            debug!("Query matched no category, using fallback");
            FALLBACK_MESSAGE.to_string()
        };

        if sentiment::polarity(query_text) < STRESS_THRESHOLD {
            response.push('\n');
            response.push_str(STRESS_REASSURANCE);
        }

        response.push('\n');
        response.push_str(&self.emergency_footer());
        response
    }

    /// Render the nearest shelters as a bulleted block
    fn shelter_block(&self, position: Coordinates) -> String {
        let mut block = String::from("Nearest shelters:");
        for ranked in self.shelters.nearest(position, self.shelter_count) {
            let _ = write!(
                block,
                "\n- {} ({:.2} km)\n  Capacity: {}, Contact: {}",
                ranked.shelter.name,
                ranked.distance_km,
                ranked.shelter.capacity,
                ranked.shelter.contact
            );
        }
        block
    }

    fn emergency_footer(&self) -> String {
        format!(
            "Emergency Helpline: {} (Ambulance), {} (Police), {} (Fire)",
            self.emergency.ambulance, self.emergency.police, self.emergency.fire
        )
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
