//! Trait templates: canned, emotion-parameterized guidance for one selectable tag

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DirectiveBucket, RelationshipType};

/// Key of the mandatory fallback entry in every emotion table
pub const DEFAULT_EMOTION_KEY: &str = "default";

/// Tone and action guidance for one emotion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionResponse {
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub action: String,
}

impl EmotionResponse {
    pub fn new(tone: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            tone: tone.into(),
            action: action.into(),
        }
    }

    /// True when neither tone nor action carries text
    pub fn is_empty(&self) -> bool {
        self.tone.trim().is_empty() && self.action.trim().is_empty()
    }
}

/// One trait template as stored in the template table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitTemplate {
    /// Unique identifier (also the Trait Parser's output vocabulary)
    pub id: String,
    /// Display tag shown to users
    pub tag: String,
    /// UI category the tag is listed under
    pub category: String,
    /// Directive bucket the guidance is merged into
    pub bucket: DirectiveBucket,
    /// 0-100, higher wins within a bucket
    pub priority: u8,
    /// Empty = universal
    #[serde(default)]
    pub relationship_types: Vec<RelationshipType>,
    /// Canonical emotion -> guidance, must contain "default"
    pub emotions: BTreeMap<String, EmotionResponse>,
}

impl TraitTemplate {
    /// Guidance for a canonical emotion key, falling back to "default"
    pub fn response_for(&self, emotion: &str) -> Option<&EmotionResponse> {
        self.emotions
            .get(emotion)
            .or_else(|| self.emotions.get(DEFAULT_EMOTION_KEY))
    }

    /// Whether this template may contribute under the given relationship type
    pub fn applies_to(&self, relationship: RelationshipType) -> bool {
        self.relationship_types.is_empty() || self.relationship_types.contains(&relationship)
    }
}

/// Versioned template table as persisted in `data/trait_templates.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateTable {
    pub version: String,
    pub templates: Vec<TraitTemplate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(relationship_types: Vec<RelationshipType>) -> TraitTemplate {
        let mut emotions = BTreeMap::new();
        emotions.insert("default".to_string(), EmotionResponse::new("warm", "Smile."));
        emotions.insert("joy".to_string(), EmotionResponse::new("bright", "Celebrate."));
        TraitTemplate {
            id: "t".to_string(),
            tag: "T".to_string(),
            category: "C".to_string(),
            bucket: DirectiveBucket::EmotionalTone,
            priority: 50,
            relationship_types,
            emotions,
        }
    }

    #[test]
    fn test_response_falls_back_to_default() {
        let t = template(vec![]);
        assert_eq!(t.response_for("joy").map(|r| r.tone.as_str()), Some("bright"));
        assert_eq!(t.response_for("grief").map(|r| r.tone.as_str()), Some("warm"));
    }

    #[test]
    fn test_relationship_filter() {
        assert!(template(vec![]).applies_to(RelationshipType::Romantic));
        let romantic = template(vec![RelationshipType::Romantic]);
        assert!(romantic.applies_to(RelationshipType::Romantic));
        assert!(!romantic.applies_to(RelationshipType::Platonic));
    }

    #[test]
    fn test_blank_response_is_empty() {
        assert!(EmotionResponse::new(" ", "").is_empty());
        assert!(!EmotionResponse::new("", "Act.").is_empty());
    }
}
