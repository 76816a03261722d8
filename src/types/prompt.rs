//! Prompt assembly inputs and generation outputs

use serde::{Deserialize, Serialize};

use super::{PersonalityProfile, RelationshipType, RiskLevel};

/// Character description for the CHARACTER CARD section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSheet {
    pub name: String,
    pub role: String,
    pub gender: String,
    /// Stated age, validated and clamped to the floor before rendering
    pub age: Option<StatedAge>,
    pub species: String,
    pub appearance: String,
    pub interests: String,
    pub backstory: String,
    pub boundaries: Vec<String>,
    pub avoid_words: Vec<String>,
}

/// Age as written in a character profile: a number or descriptive text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatedAge {
    Number(serde_json::Number),
    Text(String),
}

impl From<u32> for StatedAge {
    fn from(age: u32) -> Self {
        Self::Number(age.into())
    }
}

impl From<&str> for StatedAge {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl std::fmt::Display for StatedAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Player description for the PLAYER PROFILE section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSheet {
    pub name: String,
    pub gender: String,
    pub species: String,
    /// Whole-hour offset from UTC
    pub utc_offset_hours: i32,
    pub interests: String,
    pub backstory: String,
    pub major_life_events: Vec<String>,
}

/// Scene overrides; blank fields fall back to relationship-aware defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneBrief {
    pub setting: String,
    pub goal: String,
    pub status: String,
}

/// One prior message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTurn {
    /// "user", "assistant" or "character"
    pub role: String,
    pub content: String,
}

impl HistoryTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    pub fn character(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }

    /// Whether the character spoke this turn
    pub fn from_character(&self) -> bool {
        matches!(self.role.as_str(), "assistant" | "character")
    }
}

/// Everything known about a chat session except the current user message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionContext {
    pub character: CharacterSheet,
    pub player: PlayerSheet,
    pub scene: SceneBrief,
    pub relationship: RelationshipType,
    pub personality: PersonalityProfile,
    pub history: Vec<HistoryTurn>,
}

/// Request handed to the external text generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub stop_sequences: Vec<String>,
}

/// Which detector intervened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionKind {
    Age,
    Crisis,
}

impl std::fmt::Display for InterventionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Age => write!(f, "age"),
            Self::Crisis => write!(f, "crisis"),
        }
    }
}

/// Outcome of preparing one conversational turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// A detector fired; the message replaces generation entirely
    Intervention {
        kind: InterventionKind,
        risk_level: Option<RiskLevel>,
        message: String,
    },
    /// Normal path
    Generate(GenerationRequest),
}

impl TurnOutcome {
    pub fn is_intervention(&self) -> bool {
        matches!(self, Self::Intervention { .. })
    }
}
