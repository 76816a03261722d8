//! Directive Synthesizer: selected tags + emotion + relationship -> bounded lines
//!
//! Per bucket: resolve, gate by relationship, pick the emotion response (falling
//! back to "default"), sort by priority with selection order as tie-breaker,
//! then merge into one capped line.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::emotion::EmotionResolver;
use crate::core::registry::TraitRegistry;
use crate::types::{
    capitalize, DirectiveBucket, EmotionResponse, EmotionSignal, PersonalityProfile,
    RelationshipType, SynthesizedDirective,
};
use crate::{MAX_ACTIONS_PER_LINE, MAX_TONES_PER_LINE, MAX_TRAITS_PER_LINE};

/// Section heading for the rendered directives
pub const DIALOGUE_STYLE_HEADING: &str = "# DIALOGUE STYLE: LINGUISTIC DIRECTIVES";

/// Emotion used when no signal is supplied
const NEUTRAL: &str = "neutral";

/// One template's contribution to a bucket
#[derive(Debug)]
struct Contribution<'a> {
    /// Position in the flattened selection
    order: usize,
    priority: u8,
    tag: &'a str,
    response: &'a EmotionResponse,
}

/// Merges trait templates into per-bucket directives
#[derive(Debug, Clone)]
pub struct DirectiveSynthesizer {
    registry: Arc<TraitRegistry>,
    resolver: EmotionResolver,
}

impl DirectiveSynthesizer {
    pub fn new(registry: Arc<TraitRegistry>) -> Self {
        let resolver = EmotionResolver::new(&registry);
        Self { registry, resolver }
    }

    pub fn registry(&self) -> &TraitRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &EmotionResolver {
        &self.resolver
    }

    /// Synthesize up to six directive lines in fixed bucket order
    pub fn synthesize(
        &self,
        profile: &PersonalityProfile,
        emotion: Option<&EmotionSignal>,
        relationship: RelationshipType,
    ) -> Vec<SynthesizedDirective> {
        let (emotion_key, emotion_label) = match emotion {
            Some(signal) if !signal.emotion.trim().is_empty() => {
                (self.resolver.resolve(&signal.emotion), signal.label())
            }
            _ => (NEUTRAL.to_string(), capitalize(NEUTRAL)),
        };

        let mut buckets: BTreeMap<DirectiveBucket, Vec<Contribution<'_>>> = BTreeMap::new();

        for (order, (category, tag)) in profile.flatten().into_iter().enumerate() {
            let Some(template) = self.registry.lookup(tag, Some(category)) else {
                tracing::debug!(category, tag, "unresolved tag skipped");
                continue;
            };
            if !template.applies_to(relationship) {
                continue;
            }
            if template.bucket == DirectiveBucket::Context {
                continue;
            }
            let Some(response) = template.response_for(&emotion_key) else {
                continue;
            };
            if response.is_empty() {
                continue;
            }
            buckets.entry(template.bucket).or_default().push(Contribution {
                order,
                priority: template.priority,
                tag: &template.tag,
                response,
            });
        }

        let mut directives = Vec::new();
        for bucket in DirectiveBucket::EMIT_ORDER {
            if bucket == DirectiveBucket::PlatonicBoundaries && !relationship.is_platonic() {
                continue;
            }
            let Some(mut contributions) = buckets.remove(&bucket) else {
                continue;
            };
            contributions.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.order.cmp(&b.order)));

            if let Some(directive) = merge(bucket, &emotion_label, &contributions) {
                tracing::debug!(
                    bucket = %bucket,
                    contributors = contributions.len(),
                    "directive synthesized"
                );
                directives.push(directive);
            }
        }
        directives
    }

    /// Synthesize and render the DIALOGUE STYLE section, None when empty
    pub fn render_section(
        &self,
        profile: &PersonalityProfile,
        emotion: Option<&EmotionSignal>,
        relationship: RelationshipType,
    ) -> Option<String> {
        render_directives(&self.synthesize(profile, emotion, relationship))
    }
}

/// Render directive lines under the section heading
pub fn render_directives(directives: &[SynthesizedDirective]) -> Option<String> {
    if directives.is_empty() {
        return None;
    }
    let mut lines = vec![DIALOGUE_STYLE_HEADING.to_string(), String::new()];
    lines.extend(directives.iter().map(|d| d.render()));
    Some(lines.join("\n"))
}

/// Merge sorted contributions into one capped line
fn merge(bucket: DirectiveBucket, emotion_label: &str, contributions: &[Contribution<'_>]) -> Option<SynthesizedDirective> {
    let traits: Vec<String> = contributions
        .iter()
        .take(MAX_TRAITS_PER_LINE)
        .map(|c| c.tag.to_string())
        .collect();

    let tones = distinct(contributions.iter().map(|c| c.response.tone.as_str()), MAX_TONES_PER_LINE);
    let mut actions = distinct(contributions.iter().map(|c| c.response.action.as_str()), MAX_ACTIONS_PER_LINE);

    if tones.is_empty() && actions.is_empty() {
        return None;
    }

    let primary_action = if actions.is_empty() { None } else { Some(actions.remove(0)) };
    let secondary_actions = actions.iter().map(|a| lowercase_first(a)).collect();

    Some(SynthesizedDirective {
        bucket,
        emotion_label: emotion_label.to_string(),
        traits,
        tones,
        primary_action,
        secondary_actions,
    })
}

/// First `cap` distinct non-blank values, order preserved
fn distinct<'a>(values: impl Iterator<Item = &'a str>, cap: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let value = value.trim();
        if value.is_empty() || out.iter().any(|v| v == value) {
            continue;
        }
        out.push(value.to_string());
        if out.len() == cap {
            break;
        }
    }
    out
}

/// Lowercase the first character so the action reads as a continuation
fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
