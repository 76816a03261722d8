//! Directive buckets: the behavioral groups personality guidance is merged into

use serde::{Deserialize, Serialize};

/// One behavioral category of the synthesized dialogue style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveBucket {
    /// How feelings are expressed (Emotional Expression, warmth half of How They Care)
    EmotionalTone,
    /// How the character engages (Social Energy, Energy & Presence)
    SocialAction,
    /// How the character thinks (Thinking Style)
    CognitiveStructure,
    /// Humor, pacing and phrasing (Humor & Edge, Romantic Pacing)
    DialogueNuance,
    /// What drives the character (Core Values, loyalty half of How They Care)
    CoreMotivation,
    /// Friendship dynamic and touch limits, platonic companions only
    PlatonicBoundaries,
    /// Background flavor, never emitted as a directive line
    Context,
}

impl DirectiveBucket {
    /// Buckets that may be emitted, in output order
    pub const EMIT_ORDER: [DirectiveBucket; 6] = [
        DirectiveBucket::EmotionalTone,
        DirectiveBucket::SocialAction,
        DirectiveBucket::CognitiveStructure,
        DirectiveBucket::DialogueNuance,
        DirectiveBucket::CoreMotivation,
        DirectiveBucket::PlatonicBoundaries,
    ];

    /// Key used in template data
    pub fn key(&self) -> &'static str {
        match self {
            Self::EmotionalTone => "emotional_tone",
            Self::SocialAction => "social_action",
            Self::CognitiveStructure => "cognitive_structure",
            Self::DialogueNuance => "dialogue_nuance",
            Self::CoreMotivation => "core_motivation",
            Self::PlatonicBoundaries => "platonic_boundaries",
            Self::Context => "context",
        }
    }

    /// Heading used in the rendered prompt
    pub fn heading(&self) -> &'static str {
        match self {
            Self::EmotionalTone => "EMOTIONAL TONE",
            Self::SocialAction => "SOCIAL ACTION",
            Self::CognitiveStructure => "COGNITIVE STRUCTURE",
            Self::DialogueNuance => "DIALOGUE NUANCE",
            Self::CoreMotivation => "CORE MOTIVATION",
            Self::PlatonicBoundaries => "PLATONIC BOUNDARIES",
            Self::Context => "CONTEXT",
        }
    }
}

impl std::fmt::Display for DirectiveBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
