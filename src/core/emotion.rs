//! Emotion Resolver: arbitrary emotion labels -> canonical template keys
//!
//! Unknown labels resolve to "default" so every template still contributes
//! through its fallback entry.

use std::collections::BTreeSet;

use crate::core::registry::TraitRegistry;
use crate::types::DEFAULT_EMOTION_KEY;

/// Canonical emotions recognized regardless of template data
pub const BASELINE_EMOTIONS: &[&str] = &[
    "sadness", "joy", "anger", "fear", "anxiety", "love", "surprise", "grief", "neutral", "disgust",
];

/// Classifier spellings folded onto canonical keys
const EMOTION_ALIASES: &[(&str, &str)] = &[
    ("anxious", "anxiety"),
    ("worried", "anxiety"),
    ("worry", "anxiety"),
    ("nervous", "anxiety"),
    ("sad", "sadness"),
    ("sorrow", "sadness"),
    ("melancholy", "sadness"),
    ("angry", "anger"),
    ("frustrated", "anger"),
    ("irritated", "anger"),
    ("annoyed", "anger"),
    ("scared", "fear"),
    ("afraid", "fear"),
    ("terrified", "fear"),
    ("happy", "joy"),
    ("excited", "joy"),
    ("elated", "joy"),
    ("cheerful", "joy"),
    ("affection", "love"),
    ("tender", "love"),
    ("romantic", "love"),
    ("surprised", "surprise"),
    ("shocked", "surprise"),
    ("astonished", "surprise"),
    ("calm", "neutral"),
    ("content", "neutral"),
    ("disgusted", "disgust"),
    ("revolted", "disgust"),
];

/// Resolves raw labels against the recognized vocabulary
#[derive(Debug, Clone)]
pub struct EmotionResolver {
    vocabulary: BTreeSet<String>,
}

impl EmotionResolver {
    /// Vocabulary = baseline set + every emotion key in the registry
    pub fn new(registry: &TraitRegistry) -> Self {
        let mut resolver = Self::baseline();
        resolver
            .vocabulary
            .extend(registry.emotion_keys().into_iter().map(str::to_string));
        resolver
    }

    /// Baseline vocabulary only
    pub fn baseline() -> Self {
        Self {
            vocabulary: BASELINE_EMOTIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Canonical key for a raw label, or "default"
    pub fn resolve(&self, raw: &str) -> String {
        let key = raw.trim().to_lowercase();
        if self.vocabulary.contains(&key) {
            return key;
        }
        if let Some((_, canonical)) = EMOTION_ALIASES.iter().find(|(alias, _)| *alias == key) {
            return canonical.to_string();
        }
        DEFAULT_EMOTION_KEY.to_string()
    }

    /// Whether a normalized label is directly recognized
    pub fn is_known(&self, raw: &str) -> bool {
        self.vocabulary.contains(&raw.trim().to_lowercase())
    }

    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.iter().map(|s| s.as_str())
    }
}
