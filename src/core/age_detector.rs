//! Age Detector: screens user text for references to anyone under 25
//!
//! Keyword substrings plus structural age patterns. Matched terms go to the
//! audit log only; the user sees the fixed enforcement message.

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::rules::{
    AgeRangeRule, AGE_ENFORCEMENT_MESSAGE, AGE_PATTERNS, AGE_RANGES, UNDERAGE_KEYWORDS,
};
use crate::types::{AgeValidation, DetectionResult, SafetyReason};
use crate::MIN_CHARACTER_AGE;

lazy_static! {
    static ref RE_AGE_PATTERNS: Vec<Regex> = AGE_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

    /// First standalone integer, ASCII digits only so it always parses
    static ref RE_FIRST_NUMBER: Regex = Regex::new(r"\b([0-9]+)\b").unwrap();
}

/// Stateless age rule engine
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeDetector;

impl AgeDetector {
    /// Create new detector
    pub fn new() -> Self {
        Self
    }

    /// Screen user text
    pub fn detect(&self, text: &str) -> DetectionResult {
        if text.trim().is_empty() {
            return DetectionResult::empty();
        }

        let lower = text.to_lowercase();
        let keywords = matched_keywords(&lower);
        if !keywords.is_empty() {
            tracing::warn!(terms = ?keywords, "age restriction: underage keyword");
            return DetectionResult::violation(SafetyReason::S002_AGE_KEYWORD, None, AGE_ENFORCEMENT_MESSAGE);
        }

        let patterns = matched_patterns(text);
        if !patterns.is_empty() {
            tracing::warn!(matches = ?patterns, "age restriction: age pattern");
            return DetectionResult::violation(SafetyReason::S002_AGE_PATTERN, None, AGE_ENFORCEMENT_MESSAGE);
        }

        DetectionResult::clear()
    }

    /// Convenience: just the violation flag
    pub fn is_violation(&self, text: &str) -> bool {
        self.detect(text).violation
    }

    /// Validate a character's stated age.
    ///
    /// A standalone number wins: 25+ is valid, anything lower is invalid and
    /// reported so the caller can clamp. Without a number the descriptive range
    /// table applies; unrecognized text is invalid.
    pub fn validate_character_age(&self, age_text: &str) -> AgeValidation {
        let text = age_text.trim();
        if text.is_empty() {
            return AgeValidation::invalid(None);
        }

        if let Some(caps) = RE_FIRST_NUMBER.captures(text) {
            return match caps[1].parse::<u32>() {
                Ok(age) if age >= MIN_CHARACTER_AGE => AgeValidation::valid(age),
                Ok(age) => {
                    tracing::warn!(age, "character age below floor");
                    AgeValidation::invalid(Some(age))
                }
                // Too many digits to be an age
                Err(_) => AgeValidation::invalid(None),
            };
        }

        let lower = text.to_lowercase();
        for (range, rule) in AGE_RANGES {
            if lower.contains(range) {
                return match rule {
                    AgeRangeRule::Accept(min) => AgeValidation::valid(*min),
                    AgeRangeRule::Reject => {
                        tracing::warn!(range = *range, "character age range below floor");
                        AgeValidation::invalid(None)
                    }
                };
            }
        }

        AgeValidation::invalid(None)
    }

    /// Caller-side clamp: the validated age, or the floor when missing or invalid
    pub fn enforce_minimum(&self, validation: AgeValidation) -> u32 {
        match validation {
            AgeValidation { valid: true, age: Some(age) } => age.max(MIN_CHARACTER_AGE),
            _ => MIN_CHARACTER_AGE,
        }
    }
}

fn matched_keywords(lower: &str) -> Vec<&'static str> {
    UNDERAGE_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| lower.contains(kw))
        .collect()
}

fn matched_patterns(text: &str) -> Vec<String> {
    RE_AGE_PATTERNS
        .iter()
        .filter_map(|re| re.find(text).map(|m| m.as_str().to_string()))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
