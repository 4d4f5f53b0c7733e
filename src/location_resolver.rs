//! Location Resolution Module
//!
//! Resolves the user's position via an IP-geolocation lookup. On any
//! failure the configured fallback coordinate and city are returned, so
//! callers always receive a usable location.

use crate::config::ReliefAiConfig;
use crate::models::{Coordinates, FetchOutcome};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// A resolved user position with its detected city
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    pub city: String,
}

/// IP-geolocation response: `loc` is a "lat,lon" string, city is optional
#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    loc: String,
    city: Option<String>,
}

/// Service for resolving the user's position from their IP address
pub struct IpLocator {
    client: Client,
    url: String,
    fallback: ResolvedLocation,
}

impl IpLocator {
    /// Create a new locator from configuration
    pub fn new(config: &ReliefAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.location.timeout_seconds.into()))
            .user_agent(concat!("ReliefAI/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: config.location.ip_lookup_url.clone(),
            fallback: ResolvedLocation {
                coordinates: config.fallback_position(),
                city: config.location.fallback_city.clone(),
            },
        })
    }

    /// Resolve the user's position, falling back to the configured default
    /// city on any lookup failure. Never errors and never retries.
    #[instrument(skip(self))]
    pub async fn resolve(&self) -> ResolvedLocation {
        match self.fetch().await {
            FetchOutcome::Success(location) => {
                debug!(
                    "Auto-detected location: {} at {}",
                    location.city,
                    location.coordinates.format()
                );
                location
            }
            outcome => {
                warn!(
                    "IP geolocation failed ({outcome:?}), using fallback city {}",
                    self.fallback.city
                );
                self.fallback.clone()
            }
        }
    }

    /// One lookup against the geolocation service
    async fn fetch(&self) -> FetchOutcome<ResolvedLocation> {
        let response = match self.client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("IP lookup request failed: {e}");
                return FetchOutcome::Unavailable;
            }
        };

        if !response.status().is_success() {
            debug!("IP lookup returned status {}", response.status());
            return FetchOutcome::Unavailable;
        }

        let payload: IpLookupResponse = match response.json().await {
            Ok(payload) => payload,
            Err(e) => {
                debug!("IP lookup response did not decode: {e}");
                return FetchOutcome::Malformed;
            }
        };

        match parse_loc(&payload.loc) {
            Some(coordinates) => FetchOutcome::Success(ResolvedLocation {
                coordinates,
                city: payload.city.unwrap_or_else(|| "Unknown".to_string()),
            }),
            None => {
                debug!("IP lookup 'loc' field was not a lat,lon pair: {}", payload.loc);
                FetchOutcome::Malformed
            }
        }
    }
}

/// Parse a "lat,lon" string into coordinates, rejecting out-of-range values
fn parse_loc(loc: &str) -> Option<Coordinates> {
    let (lat, lon) = loc.split_once(',')?;
    let latitude: f64 = lat.trim().parse().ok()?;
    let longitude: f64 = lon.trim().parse().ok()?;

    let coordinates = Coordinates::new(latitude, longitude);
    coordinates.is_valid().then_some(coordinates)
}
