//! Relationship type setting (romantic vs platonic)

use serde::{Deserialize, Deserializer, Serialize};

/// Which relationship the companion is configured for.
///
/// Gates romantic-only and platonic-only trait templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    Romantic,
    Platonic,
}

impl RelationshipType {
    /// Parse a free-form setting string.
    ///
    /// "friend" and "companion" are legacy spellings of platonic. Anything
    /// unrecognized fails closed to platonic.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "romantic" => Self::Romantic,
            "platonic" | "friend" | "companion" => Self::Platonic,
            other => {
                tracing::warn!(relationship = other, "unknown relationship type, using platonic");
                Self::Platonic
            }
        }
    }

    /// Label shown on the character card
    pub fn label(&self) -> &'static str {
        match self {
            Self::Romantic => "Romantic",
            Self::Platonic => "platonic",
        }
    }

    pub fn is_platonic(&self) -> bool {
        *self == Self::Platonic
    }
}

impl Default for RelationshipType {
    fn default() -> Self {
        Self::Platonic
    }
}

impl<'de> Deserialize<'de> for RelationshipType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Romantic => write!(f, "romantic"),
            Self::Platonic => write!(f, "platonic"),
        }
    }
}
