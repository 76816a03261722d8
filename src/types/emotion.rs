//! Per-turn emotion signal supplied by an external classifier

use serde::{Deserialize, Serialize};

/// Intensity of the detected emotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Moderate,
    High,
}

impl Intensity {
    /// Parse a label, unknown values map to moderate
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Moderate,
        }
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::Moderate
    }
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Moderate => write!(f, "moderate"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Detected user emotion for the current turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionSignal {
    pub emotion: String,
    #[serde(default)]
    pub intensity: Intensity,
}

impl EmotionSignal {
    pub fn new(emotion: impl Into<String>, intensity: Intensity) -> Self {
        Self {
            emotion: emotion.into(),
            intensity,
        }
    }

    /// Emotion label with the first letter capitalized ("sadness" -> "Sadness")
    pub fn label(&self) -> String {
        capitalize(self.emotion.trim())
    }
}

/// Uppercase the first character, lowercase the rest
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_defaults_to_moderate() {
        let signal: EmotionSignal = serde_json::from_str(r#"{"emotion": "joy"}"#).unwrap();
        assert_eq!(signal.intensity, Intensity::Moderate);
        assert_eq!(Intensity::parse("HIGH"), Intensity::High);
        assert_eq!(Intensity::parse("extreme"), Intensity::Moderate);
    }

    #[test]
    fn test_label_capitalizes() {
        assert_eq!(EmotionSignal::new(" sadness ", Intensity::Low).label(), "Sadness");
        assert_eq!(capitalize("ANGER"), "Anger");
        assert_eq!(capitalize(""), "");
    }
}
