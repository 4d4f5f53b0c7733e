//! Speech recognition and synthesis clients
//!
//! Two independent operations: transcribing recorded audio through a
//! remote recognition service, and rendering response text to MP3 audio
//! through a translate-TTS-style endpoint. Recognition failures degrade
//! to a fixed placeholder transcript; they never fail the caller.

use crate::config::ReliefAiConfig;
use crate::error::ReliefAiError;
use crate::models::Language;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::io::Write as _;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Transcript returned when recognition fails for any reason
pub const UNRECOGNIZED_SPEECH: &str = "Sorry, could not recognize speech.";

/// The synthesis endpoint rejects long inputs; text is split into chunks
/// of at most this many characters and the audio concatenated.
const TTS_CHUNK_LIMIT: usize = 200;

#[derive(Debug, Deserialize)]
struct RecognitionResponse {
    transcript: String,
}

/// Client for the speech recognition and synthesis services
pub struct SpeechClient {
    client: Client,
    recognition_url: String,
    synthesis_url: String,
}

impl SpeechClient {
    /// Create a new speech client from configuration
    pub fn new(config: &ReliefAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.speech.timeout_seconds.into()))
            .user_agent(concat!("ReliefAI/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            recognition_url: config.speech.recognition_url.clone(),
            synthesis_url: config.speech.synthesis_url.clone(),
        })
    }

    /// Transcribe recorded audio. The audio is spooled to a temporary
    /// file (consumed immediately, never kept) and posted to the
    /// recognition service. Any failure returns the placeholder
    /// transcript instead of an error.
    #[instrument(skip_all, fields(bytes = audio.len()))]
    pub async fn transcribe(&self, audio: &[u8]) -> String {
        match self.recognize(audio).await {
            Ok(transcript) => {
                debug!("Recognized {} characters of speech", transcript.len());
                transcript
            }
            Err(e) => {
                warn!("Speech recognition failed: {e}");
                UNRECOGNIZED_SPEECH.to_string()
            }
        }
    }

    async fn recognize(&self, audio: &[u8]) -> crate::Result<String> {
        // Spool through a temp file; the recognition flow consumes the
        // recorded buffer exactly once and nothing persists afterwards.
        let mut spool = tempfile::NamedTempFile::new()?;
        spool.write_all(audio)?;

        let payload = tokio::fs::read(spool.path()).await?;

        let response = self
            .client
            .post(&self.recognition_url)
            .header(reqwest::header::CONTENT_TYPE, "audio/wav")
            .body(payload)
            .send()
            .await
            .map_err(|e| ReliefAiError::api(format!("Recognition request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ReliefAiError::api(format!(
                "Recognition service returned status {}",
                response.status()
            )));
        }

        let recognition: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| ReliefAiError::api(format!("Recognition response did not decode: {e}")))?;

        if recognition.transcript.is_empty() {
            return Err(ReliefAiError::api(
                "Recognition service returned an empty transcript",
            ));
        }

        Ok(recognition.transcript)
    }

    /// Synthesize `text` into MP3 audio in the given language. Callers
    /// only invoke this for non-default languages; the default language
    /// is presented as text without audio.
    #[instrument(skip_all, fields(language = %language, chars = text.len()))]
    pub async fn synthesize(&self, text: &str, language: Language) -> crate::Result<Vec<u8>> {
        let mut audio = Vec::new();

        for chunk in chunk_text(text, TTS_CHUNK_LIMIT) {
            let response = self
                .client
                .get(&self.synthesis_url)
                .query(&[
                    ("ie", "UTF-8"),
                    ("q", chunk.as_str()),
                    ("tl", language.code()),
                    ("client", "tw-ob"),
                ])
                .send()
                .await
                .map_err(|e| ReliefAiError::api(format!("Synthesis request failed: {e}")))?;

            if !response.status().is_success() {
                return Err(ReliefAiError::api(format!(
                    "Synthesis service returned status {}",
                    response.status()
                )));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| ReliefAiError::api(format!("Failed to read synthesis response: {e}")))?;
            audio.extend_from_slice(&bytes);
        }

        debug!("Synthesized {} bytes of audio", audio.len());
        Ok(audio)
    }
}

/// Split text into whitespace-respecting chunks of at most `limit`
/// characters. Words longer than the limit are hard-split.
fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if word.len() > limit {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(limit) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= limit {
            current.push(' ');
            current.push_str(word);
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_text_respects_limit() {
        let text = "move to higher ground and avoid waterlogged areas near the river";
        for chunk in chunk_text(text, 20) {
            assert!(chunk.len() <= 20, "chunk too long: {chunk}");
            assert!(!chunk.is_empty());
        }
    }

    #[test]
    fn test_chunk_text_preserves_words() {
        let text = "stay hydrated and avoid direct sunlight";
        let rejoined = chunk_text(text, 16).join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_chunk_text_short_input_is_one_chunk() {
        assert_eq!(chunk_text("stay calm", 200), vec!["stay calm"]);
    }

    #[test]
    fn test_chunk_text_empty_input() {
        assert!(chunk_text("", 200).is_empty());
        assert!(chunk_text("   ", 200).is_empty());
    }

    #[test]
    fn test_chunk_text_hard_splits_long_words() {
        let word = "a".repeat(45);
        let chunks = chunk_text(&word, 20);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() <= 20));
    }

    #[tokio::test]
    async fn test_transcribe_degrades_to_placeholder_when_unreachable() {
        let mut config = ReliefAiConfig::default();
        config.speech.recognition_url = "http://127.0.0.1:9/recognize".to_string();
        config.speech.timeout_seconds = 1;

        let speech = SpeechClient::new(&config).unwrap();
        let transcript = speech.transcribe(&[0u8; 16]).await;
        assert_eq!(transcript, UNRECOGNIZED_SPEECH);
    }

    #[tokio::test]
    async fn test_synthesize_errors_when_unreachable() {
        let mut config = ReliefAiConfig::default();
        config.speech.synthesis_url = "http://127.0.0.1:9/tts".to_string();
        config.speech.timeout_seconds = 1;

        let speech = SpeechClient::new(&config).unwrap();
        assert!(speech.synthesize("stay calm", Language::Hi).await.is_err());
    }
}
