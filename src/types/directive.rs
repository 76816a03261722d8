//! Synthesized directive: one merged instruction line per bucket

use serde::{Deserialize, Serialize};

use super::DirectiveBucket;

/// One merged, bounded line of guidance for a directive bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizedDirective {
    pub bucket: DirectiveBucket,
    /// Capitalized emotion label ("Sadness", "Neutral")
    pub emotion_label: String,
    /// Up to 3 contributing tag names, priority order
    pub traits: Vec<String>,
    /// Up to 2 distinct tones
    pub tones: Vec<String>,
    /// Highest-priority action, verbatim
    pub primary_action: Option<String>,
    /// Up to 2 continuation actions, first letter lowercased
    pub secondary_actions: Vec<String>,
}

impl SynthesizedDirective {
    /// Total number of actions on the line
    pub fn action_count(&self) -> usize {
        self.primary_action.iter().count() + self.secondary_actions.len()
    }

    /// Merged tone text ("intense, vivid and patient")
    pub fn tone_text(&self) -> String {
        self.tones.join(" and ")
    }

    /// Merged action text ("Do X. Also do y. and do z.")
    pub fn action_text(&self) -> String {
        let mut text = self.primary_action.clone().unwrap_or_default();
        if !self.secondary_actions.is_empty() {
            let rest = self.secondary_actions.join(" and ");
            if text.is_empty() {
                text = rest;
            } else {
                text = format!("{} Also {}", text, rest);
            }
        }
        text
    }

    /// Body without the bucket heading:
    /// `Warm + Kind (Sadness): soft and gentle tone. Action: ...`
    pub fn body(&self) -> String {
        let mut parts = vec![format!("{} ({}):", self.traits.join(" + "), self.emotion_label)];
        if !self.tones.is_empty() {
            parts.push(format!("{} tone.", self.tone_text()));
        }
        let actions = self.action_text();
        if !actions.is_empty() {
            parts.push(format!("Action: {}", actions));
        }
        parts.join(" ")
    }

    /// Full markdown bullet line
    pub fn render(&self) -> String {
        format!("* **{}:** {}", self.bucket.heading(), self.body())
    }
}

impl std::fmt::Display for SynthesizedDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_full_line() {
        let directive = SynthesizedDirective {
            bucket: DirectiveBucket::EmotionalTone,
            emotion_label: "Sadness".to_string(),
            traits: vec!["Warm".to_string(), "Kind".to_string()],
            tones: vec!["soft".to_string(), "gentle".to_string()],
            primary_action: Some("Offer comfort.".to_string()),
            secondary_actions: vec!["validate first.".to_string(), "stay close.".to_string()],
        };
        assert_eq!(
            directive.render(),
            "* **EMOTIONAL TONE:** Warm + Kind (Sadness): soft and gentle tone. \
             Action: Offer comfort. Also validate first. and stay close."
        );
        assert_eq!(directive.action_count(), 3);
    }

    #[test]
    fn test_render_without_tone() {
        let directive = SynthesizedDirective {
            bucket: DirectiveBucket::CoreMotivation,
            emotion_label: "Neutral".to_string(),
            traits: vec!["Loyal".to_string()],
            tones: vec![],
            primary_action: Some("Stand by them.".to_string()),
            secondary_actions: vec![],
        };
        assert_eq!(directive.body(), "Loyal (Neutral): Action: Stand by them.");
    }
}
