//! Crisis Detector: self-harm and suicide indicators in user text
//!
//! Tiers:
//! - high: any high-risk keyword or planning/intent pattern
//! - medium: 3+ distinct medium-risk keywords
//!
//! Both tiers return the same fixed resources message.

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::rules::{
    CRISIS_RESOURCES, CRISIS_RESOURCES_MESSAGE, HIGH_RISK_KEYWORDS, MEDIUM_RISK_KEYWORDS,
    PLANNING_PATTERNS,
};
use crate::types::{DetectionResult, RiskLevel, SafetyReason};
use crate::MEDIUM_RISK_THRESHOLD;

lazy_static! {
    static ref RE_PLANNING: Vec<Regex> = PLANNING_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();
}

/// Stateless crisis rule engine
#[derive(Debug, Clone, Copy, Default)]
pub struct CrisisDetector;

impl CrisisDetector {
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

        let high: Vec<&str> = HIGH_RISK_KEYWORDS
            .iter()
            .copied()
            .filter(|kw| lower.contains(kw))
            .collect();
        if !high.is_empty() {
            tracing::warn!(terms = ?high, "crisis: high-risk keyword");
            return DetectionResult::violation(
                SafetyReason::S003_CRISIS_KEYWORD,
                Some(RiskLevel::High),
                CRISIS_RESOURCES_MESSAGE,
            );
        }

        if let Some(m) = RE_PLANNING.iter().find_map(|re| re.find(text)) {
            tracing::warn!(matched = m.as_str(), "crisis: planning pattern");
            return DetectionResult::violation(
                SafetyReason::S003_CRISIS_PLANNING,
                Some(RiskLevel::High),
                CRISIS_RESOURCES_MESSAGE,
            );
        }

        let medium = self.medium_risk_hits(&lower);
        if medium.len() >= MEDIUM_RISK_THRESHOLD {
            tracing::warn!(terms = ?medium, "crisis: accumulated medium-risk keywords");
            return DetectionResult::violation(
                SafetyReason::S003_CRISIS_ACCUMULATED,
                Some(RiskLevel::Medium),
                CRISIS_RESOURCES_MESSAGE,
            );
        }

        DetectionResult::clear()
    }

    /// Convenience: just the violation flag
    pub fn is_violation(&self, text: &str) -> bool {
        self.detect(text).violation
    }

    /// Distinct medium-risk keywords present in lowercased text
    fn medium_risk_hits(&self, lower: &str) -> Vec<&'static str> {
        MEDIUM_RISK_KEYWORDS
            .iter()
            .copied()
            .filter(|kw| lower.contains(kw))
            .collect()
    }

    /// Structured crisis resources as (key, text)
    pub fn resources(&self) -> &'static [(&'static str, &'static str)] {
        CRISIS_RESOURCES
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let detector = CrisisDetector::new();
        let result = detector.detect("");
        assert!(!result.violation);
        assert!(result.risk_level.is_none());
        assert!(!detector.is_violation("  "));
    }

    #[test]
    fn test_high_risk_keyword_and_timing() {
        let detector = CrisisDetector::new();
        let result = detector.detect("I want to kill myself tonight");
        assert!(result.violation);
        assert_eq!(result.risk_level, Some(RiskLevel::High));
        assert_eq!(result.message.as_deref(), Some(CRISIS_RESOURCES_MESSAGE));
    }

    #[test]
    fn test_planning_pattern_alone_is_high() {
        let detector = CrisisDetector::new();
        let result = detector.detect("I wrote a note for my family");
        assert!(result.violation);
        assert_eq!(result.risk_level, Some(RiskLevel::High));
        assert_eq!(result.reason, SafetyReason::S003_CRISIS_PLANNING);
    }

    #[test]
    fn test_three_medium_keywords() {
        let detector = CrisisDetector::new();
        let result = detector.detect("I feel hopeless and numb and empty");
        assert!(result.violation);
        assert_eq!(result.risk_level, Some(RiskLevel::Medium));
        assert_eq!(result.message.as_deref(), Some(CRISIS_RESOURCES_MESSAGE));
    }

    #[test]
    fn test_single_medium_keyword_never_triggers() {
        let detector = CrisisDetector::new();
        assert!(!detector.is_violation("My back is in a lot of pain"));
        assert!(!detector.is_violation("I feel numb and empty after the movie"));
    }

    #[test]
    fn test_clear_text() {
        let detector = CrisisDetector::new();
        let result = detector.detect("I had a great day");
        assert!(!result.violation);
        assert!(result.message.is_none());
        assert_eq!(result.reason, SafetyReason::S001_CLEAR);
    }

    #[test]
    fn test_resources_listed() {
        let detector = CrisisDetector::new();
        let keys: Vec<&str> = detector.resources().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["us_lifeline", "us_text", "international", "message"]);
    }

    #[test]
    fn test_determinism() {
        let detector = CrisisDetector::new();
        let text = "everything feels pointless and broken and I'm depressed";
        assert_eq!(detector.detect(text), detector.detect(text));
        assert_eq!(detector.detect(text).risk_level, Some(RiskLevel::Medium));
    }
}
