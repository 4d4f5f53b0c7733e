//! JSON API consumed by the presentation layer
//!
//! Thin axum handlers over the assistant pipeline. Rendering is out of
//! scope here; the surface hands back text, markers, shelter lists, and
//! audio bytes for whatever frontend is deployed alongside.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::assistant::Assistant;
use crate::models::{Coordinates, Language, Marker, RankedShelter, UserQuery};

/// Shared application state behind the router
pub struct AppState {
    pub assistant: Assistant,
}

#[derive(Serialize, Deserialize)]
pub struct ApiCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinates> for ApiCoordinates {
    fn from(coordinates: Coordinates) -> Self {
        Self {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiMarker {
    pub coordinates: ApiCoordinates,
    pub label: String,
}

impl From<Marker> for ApiMarker {
    fn from(marker: Marker) -> Self {
        Self {
            coordinates: marker.coordinates.into(),
            label: marker.label,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiShelter {
    pub name: String,
    pub coordinates: ApiCoordinates,
    pub capacity: u32,
    pub contact: String,
    pub distance_km: f64,
}

impl From<RankedShelter> for ApiShelter {
    fn from(ranked: RankedShelter) -> Self {
        Self {
            name: ranked.shelter.name,
            coordinates: ranked.shelter.coordinates.into(),
            capacity: ranked.shelter.capacity,
            contact: ranked.shelter.contact,
            distance_km: ranked.distance_km,
        }
    }
}

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub language: Option<String>,
    #[serde(default)]
    pub voice: bool,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub reply: String,
    pub language: Language,
    pub city: String,
    pub position: ApiCoordinates,
    pub markers: Vec<ApiMarker>,
}

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub transcript: String,
}

#[derive(Deserialize)]
pub struct SpeakParams {
    pub text: String,
    pub lang: String,
}

#[derive(Deserialize)]
pub struct SheltersParams {
    pub lat: f64,
    pub lon: f64,
    pub count: Option<usize>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/transcribe", post(transcribe))
        .route("/speak", get(speak))
        .route("/shelters", get(shelters))
        .with_state(state)
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, StatusCode> {
    if request.question.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let language = match request.language.as_deref() {
        Some(code) => code.parse::<Language>().map_err(|e| {
            warn!("Rejected ask request: {e}");
            StatusCode::BAD_REQUEST
        })?,
        None => Language::default(),
    };

    let query = if request.voice {
        UserQuery::voice(request.question)
    } else {
        UserQuery::typed(request.question)
    };

    let interaction = state.assistant.interact(query, language).await;

    Ok(Json(AskResponse {
        reply: interaction.advisory.body,
        language: interaction.advisory.language,
        city: interaction.city,
        position: interaction.position.into(),
        markers: interaction.markers.into_iter().map(ApiMarker::from).collect(),
    }))
}

async fn transcribe(
    State(state): State<Arc<AppState>>,
    audio: Bytes,
) -> Json<TranscribeResponse> {
    let transcript = state.assistant.transcribe(&audio).await;
    Json(TranscribeResponse { transcript })
}

async fn speak(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SpeakParams>,
) -> Result<impl IntoResponse, StatusCode> {
    let language = params
        .lang
        .parse::<Language>()
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    // The default language is presented as text without audio
    if language.is_default() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let audio = state
        .assistant
        .synthesize(&params.text, language)
        .await
        .map_err(|e| {
            warn!("Speech synthesis failed: {e}");
            StatusCode::BAD_GATEWAY
        })?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio))
}

async fn shelters(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SheltersParams>,
) -> Result<Json<Vec<ApiShelter>>, StatusCode> {
    let position = Coordinates::new(params.lat, params.lon);
    if !position.is_valid() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let count = params.count.unwrap_or(3);
    let ranked = state.assistant.shelters().nearest(position, count);
    Ok(Json(ranked.into_iter().map(ApiShelter::from).collect()))
}
