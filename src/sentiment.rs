//! Lexicon-based sentiment polarity estimate
//!
//! A coarse valence score in [-1.0, 1.0] over free text, used only to
//! decide whether a query reads as notably negative. The lexicon is
//! embedded and parsed lazily on first use; words outside it contribute
//! nothing, and lexicon-free text scores 0.0.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Word valences. Hazard nouns (flood, storm, heat) are deliberately
/// absent so that topic keywords alone do not read as distress.
static LEXICON: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    HashMap::from([
        // distress and fear
        ("scared", -0.6),
        ("afraid", -0.6),
        ("terrified", -0.9),
        ("frightened", -0.7),
        ("fear", -0.6),
        ("panic", -0.7),
        ("panicking", -0.8),
        ("worried", -0.5),
        ("worry", -0.5),
        ("anxious", -0.5),
        ("stressed", -0.6),
        ("nervous", -0.4),
        ("desperate", -0.8),
        ("helpless", -0.7),
        ("hopeless", -0.8),
        ("crying", -0.6),
        ("alone", -0.3),
        // harm and danger
        ("danger", -0.6),
        ("dangerous", -0.6),
        ("unsafe", -0.6),
        ("trapped", -0.7),
        ("stranded", -0.6),
        ("stuck", -0.4),
        ("lost", -0.4),
        ("hurt", -0.6),
        ("injured", -0.6),
        ("drowning", -0.9),
        ("dying", -0.9),
        ("dead", -0.8),
        ("death", -0.8),
        // general negative
        ("bad", -0.5),
        ("terrible", -0.8),
        ("horrible", -0.8),
        ("awful", -0.7),
        ("worst", -0.8),
        ("scary", -0.6),
        ("sad", -0.5),
        ("angry", -0.5),
        ("upset", -0.5),
        // positive and reassuring
        ("safe", 0.5),
        ("good", 0.7),
        ("great", 0.8),
        ("fine", 0.4),
        ("okay", 0.5),
        ("ok", 0.5),
        ("well", 0.3),
        ("calm", 0.4),
        ("relieved", 0.6),
        ("better", 0.5),
        ("happy", 0.8),
        ("glad", 0.6),
        ("thanks", 0.6),
        ("thank", 0.6),
        ("secure", 0.5),
    ])
});

/// Estimate sentiment polarity of `text` as the mean valence of lexicon
/// words it contains. Returns 0.0 when no lexicon word appears.
#[must_use]
pub fn polarity(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let scores: Vec<f64> = lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|word| !word.is_empty())
        .filter_map(|word| LEXICON.get(word).copied())
        .collect();

    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}
