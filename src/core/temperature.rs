//! Temperature Selector: emotion + scene goal -> sampling tier
//!
//! First match wins: low (de-escalation), then high (creativity), then default.
//! Goal keywords are only consulted when an emotion signal is present.

use crate::types::{EmotionSignal, Intensity, TemperatureTier};

/// Emotions that call for a measured reply
const LOW_EMOTIONS: &[&str] = &[
    "anger", "angry", "fear", "scared", "afraid", "terrified",
    "anxiety", "anxious", "worried", "nervous", "panic", "distress",
];

/// Goal words that call for a measured reply
const LOW_GOALS: &[&str] = &["troubleshoot", "problem", "crisis", "support", "comfort", "calm"];

/// Emotions that suit playful, witty replies
const HIGH_EMOTIONS: &[&str] = &[
    "excitement", "excited", "curiosity", "curious", "joy", "happy",
    "playful", "elated", "cheerful", "enthusiastic",
];

/// Goal words that suit creative replies
const HIGH_GOALS: &[&str] = &[
    "world-building", "creative", "explore", "adventure", "fantasy", "roleplay", "story", "imagine",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct TemperatureSelector;

impl TemperatureSelector {
    pub fn new() -> Self {
        Self
    }

    pub fn select(&self, emotion: Option<&EmotionSignal>, scene_goal: &str) -> TemperatureTier {
        let Some(signal) = emotion else {
            return TemperatureTier::Default;
        };

        let emotion = signal.emotion.trim().to_lowercase();
        let emotion = if emotion.is_empty() { "neutral".to_string() } else { emotion };
        let goal = scene_goal.to_lowercase();

        if LOW_EMOTIONS.contains(&emotion.as_str()) || signal.intensity == Intensity::High {
            return TemperatureTier::Low;
        }
        if LOW_GOALS.iter().any(|w| goal.contains(w)) {
            return TemperatureTier::Low;
        }
        if HIGH_EMOTIONS.contains(&emotion.as_str()) {
            return TemperatureTier::High;
        }
        if HIGH_GOALS.iter().any(|w| goal.contains(w)) {
            return TemperatureTier::High;
        }
        TemperatureTier::Default
    }
}
