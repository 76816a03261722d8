//! Integration tests for Slice 2
//!
//! Tests the safety detectors: user text -> crisis / age screening -> fixed messages

use oread::core::rules::{AGE_ENFORCEMENT_MESSAGE, CRISIS_RESOURCES_MESSAGE};
use oread::core::{AgeDetector, CrisisDetector};
use oread::types::{AgeValidation, DetectionResult, RiskLevel, SafetyReason};
use pretty_assertions::assert_eq;

/// Ordinary text passes both detectors
#[test]
fn test_clean_text_passes_both() {
    let text = "Let's grab coffee at the market";
    assert_eq!(CrisisDetector::new().detect(text), DetectionResult::clear());
    assert_eq!(AgeDetector::new().detect(text), DetectionResult::clear());
}

/// Blank input is never a violation
#[test]
fn test_blank_input() {
    let crisis = CrisisDetector::new().detect("   ");
    let age = AgeDetector::new().detect("");
    assert!(!crisis.violation && !age.violation);
    assert_eq!(crisis.reason, SafetyReason::S001_EMPTY_INPUT);
    assert_eq!(age.reason, SafetyReason::S001_EMPTY_INPUT);
}

/// A single direct statement is high risk with the fixed resources message
#[test]
fn test_direct_statement_is_high_risk() {
    let result = CrisisDetector::new().detect("Honestly I want to die");
    assert!(result.violation);
    assert_eq!(result.risk_level, Some(RiskLevel::High));
    assert_eq!(result.reason, SafetyReason::S003_CRISIS_KEYWORD);
    assert_eq!(result.message.as_deref(), Some(CRISIS_RESOURCES_MESSAGE));
}

/// Planning language without a listed keyword is still high risk
#[test]
fn test_planning_language_is_high_risk() {
    let result = CrisisDetector::new().detect("I made a plan");
    assert!(result.violation);
    assert_eq!(result.risk_level, Some(RiskLevel::High));
    assert_eq!(result.reason, SafetyReason::S003_CRISIS_PLANNING);
}

/// Medium-risk words only count once they accumulate
#[test]
fn test_medium_risk_accumulates() {
    let detector = CrisisDetector::new();

    let two = detector.detect("I feel numb and empty");
    assert!(!two.violation);

    let three = detector.detect("I feel numb, worthless and empty lately");
    assert!(three.violation);
    assert_eq!(three.risk_level, Some(RiskLevel::Medium));
    assert_eq!(three.reason, SafetyReason::S003_CRISIS_ACCUMULATED);

    // Repeats of one word are a single hit
    assert!(!detector.is_violation("numb numb numb"));
}

/// Matching is case-insensitive
#[test]
fn test_crisis_case_insensitive() {
    assert!(CrisisDetector::new().is_violation("I WANT TO END MY LIFE"));
}

/// Resources are available in structured form
#[test]
fn test_crisis_resources() {
    let resources = CrisisDetector::new().resources();
    assert_eq!(resources.len(), 4);
    assert!(resources.iter().any(|(_, text)| text.contains("988")));
    assert!(resources.iter().any(|(_, text)| text.contains("741741")));
}

/// Youth keywords and numeric ages both trigger the enforcement message
#[test]
fn test_age_keyword_and_pattern() {
    let detector = AgeDetector::new();

    let keyword = detector.detect("my character is a teenager");
    assert!(keyword.violation);
    assert_eq!(keyword.reason, SafetyReason::S002_AGE_KEYWORD);
    assert_eq!(keyword.message.as_deref(), Some(AGE_ENFORCEMENT_MESSAGE));

    let pattern = detector.detect("She is 17yo");
    assert!(pattern.violation);
    assert_eq!(pattern.reason, SafetyReason::S002_AGE_PATTERN);

    let under_floor = detector.detect("I am 22");
    assert!(under_floor.violation);
    assert_eq!(under_floor.reason, SafetyReason::S002_AGE_PATTERN);
    assert_eq!(under_floor.risk_level, None);
}

/// Adult ages pass the age detector
#[test]
fn test_adult_age_passes() {
    assert!(!AgeDetector::new().is_violation("I am 34 and love hiking"));
}

/// Character age validation and the caller-side clamp
#[test]
fn test_character_age_validation() {
    let detector = AgeDetector::new();

    assert_eq!(detector.validate_character_age("30"), AgeValidation::valid(30));
    assert_eq!(detector.validate_character_age("late twenties"), AgeValidation::valid(27));
    assert_eq!(detector.validate_character_age("in her forties"), AgeValidation::valid(40));
    assert_eq!(detector.validate_character_age("mid-twenties"), AgeValidation::invalid(None));
    assert_eq!(detector.validate_character_age("19"), AgeValidation::invalid(Some(19)));
    assert_eq!(detector.validate_character_age("ageless"), AgeValidation::invalid(None));

    assert_eq!(detector.enforce_minimum(detector.validate_character_age("41")), 41);
    assert_eq!(detector.enforce_minimum(detector.validate_character_age("19")), 25);
    assert_eq!(detector.enforce_minimum(detector.validate_character_age("ageless")), 25);
}

/// Every reason code renders as "CODE: description"
#[test]
fn test_reason_display() {
    let reason = SafetyReason::S003_CRISIS_PLANNING;
    assert_eq!(reason.to_string(), format!("{}: {}", reason.code(), reason.description()));
    assert!(reason.is_violation());
    assert!(!SafetyReason::S001_CLEAR.is_violation());
}
