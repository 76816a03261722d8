//! Personality profile: selected display tags grouped by category

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Category name -> ordered selected display tags.
///
/// Category order and tag order only matter for tie-breaking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonalityProfile {
    selections: IndexMap<String, Vec<String>>,
}

impl PersonalityProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style selection of one tag
    pub fn with(mut self, category: &str, tag: &str) -> Self {
        self.select(category, tag);
        self
    }

    /// Select a tag under a category (no-op if already selected there)
    pub fn select(&mut self, category: &str, tag: &str) {
        let tags = self.selections.entry(category.to_string()).or_default();
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    /// Tags selected under one category
    pub fn tags(&self, category: &str) -> &[String] {
        self.selections
            .get(category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All (category, tag) selections in first-seen order, duplicates removed
    pub fn flatten(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = Vec::new();
        for (category, tags) in &self.selections {
            for tag in tags {
                let tag = tag.trim();
                if tag.is_empty() {
                    continue;
                }
                if !out.iter().any(|(c, t)| *c == category.as_str() && *t == tag) {
                    out.push((category.as_str(), tag));
                }
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.selections.values().all(|tags| tags.is_empty())
    }

    /// Number of distinct selections
    pub fn len(&self) -> usize {
        self.flatten().len()
    }
}

impl From<IndexMap<String, Vec<String>>> for PersonalityProfile {
    fn from(selections: IndexMap<String, Vec<String>>) -> Self {
        Self { selections }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_preserves_first_seen_order() {
        let json = r#"{"Emotional Expression": ["Warm", "Passionate", "Warm"], "Core Values": ["Loyal"]}"#;
        let profile: PersonalityProfile = serde_json::from_str(json).unwrap();
        assert_eq!(
            profile.flatten(),
            vec![
                ("Emotional Expression", "Warm"),
                ("Emotional Expression", "Passionate"),
                ("Core Values", "Loyal"),
            ]
        );
        assert_eq!(profile.len(), 3);
    }

    #[test]
    fn test_select_ignores_duplicates() {
        let profile = PersonalityProfile::new()
            .with("Humor & Edge", "Witty")
            .with("Humor & Edge", "Witty");
        assert_eq!(profile.tags("Humor & Edge").len(), 1);
        assert!(profile.tags("Unknown").is_empty());
    }

    #[test]
    fn test_blank_tags_are_skipped() {
        let profile = PersonalityProfile::new().with("Core Values", "  ");
        assert!(profile.flatten().is_empty());
    }
}
