//! Safety detection results and reason codes

use serde::{Deserialize, Serialize};

/// Crisis risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Reason codes for detector decisions (audit log only, never shown to users)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum SafetyReason {
    // =========================================================================
    // S001: No finding
    // =========================================================================
    /// Text screened, nothing found
    S001_CLEAR,
    /// Empty or whitespace-only input
    S001_EMPTY_INPUT,

    // =========================================================================
    // S002: Age
    // =========================================================================
    /// Underage-reference keyword present
    S002_AGE_KEYWORD,
    /// Age pattern matched (numeric age, school reference)
    S002_AGE_PATTERN,

    // =========================================================================
    // S003: Crisis
    // =========================================================================
    /// High-risk keyword present
    S003_CRISIS_KEYWORD,
    /// Planning or intent pattern matched
    S003_CRISIS_PLANNING,
    /// Three or more distinct medium-risk keywords
    S003_CRISIS_ACCUMULATED,
}

impl SafetyReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::S001_CLEAR => "S001_CLEAR",
            Self::S001_EMPTY_INPUT => "S001_EMPTY_INPUT",
            Self::S002_AGE_KEYWORD => "S002_AGE_KEYWORD",
            Self::S002_AGE_PATTERN => "S002_AGE_PATTERN",
            Self::S003_CRISIS_KEYWORD => "S003_CRISIS_KEYWORD",
            Self::S003_CRISIS_PLANNING => "S003_CRISIS_PLANNING",
            Self::S003_CRISIS_ACCUMULATED => "S003_CRISIS_ACCUMULATED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::S001_CLEAR => "No safety finding",
            Self::S001_EMPTY_INPUT => "Empty input",
            Self::S002_AGE_KEYWORD => "Underage reference keyword",
            Self::S002_AGE_PATTERN => "Underage age pattern",
            Self::S003_CRISIS_KEYWORD => "High-risk crisis keyword",
            Self::S003_CRISIS_PLANNING => "Crisis planning language",
            Self::S003_CRISIS_ACCUMULATED => "Accumulated medium-risk indicators",
        }
    }

    /// Whether this reason represents a violation
    pub fn is_violation(&self) -> bool {
        !matches!(self, Self::S001_CLEAR | Self::S001_EMPTY_INPUT)
    }
}

impl std::fmt::Display for SafetyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Outcome of one detector pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub violation: bool,
    /// Crisis detector only
    pub risk_level: Option<RiskLevel>,
    /// Fixed intervention message, present on violation
    pub message: Option<String>,
    pub reason: SafetyReason,
}

impl DetectionResult {
    /// No finding
    pub fn clear() -> Self {
        Self::with_reason(SafetyReason::S001_CLEAR)
    }

    /// Empty input, no finding
    pub fn empty() -> Self {
        Self::with_reason(SafetyReason::S001_EMPTY_INPUT)
    }

    /// Violation carrying a fixed message
    pub fn violation(reason: SafetyReason, risk_level: Option<RiskLevel>, message: &str) -> Self {
        Self {
            violation: true,
            risk_level,
            message: Some(message.to_string()),
            reason,
        }
    }

    fn with_reason(reason: SafetyReason) -> Self {
        Self {
            violation: false,
            risk_level: None,
            message: None,
            reason,
        }
    }
}

/// Result of validating a character's stated age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeValidation {
    pub valid: bool,
    /// Parsed age (or range minimum), if any
    pub age: Option<u32>,
}

impl AgeValidation {
    pub fn valid(age: u32) -> Self {
        Self { valid: true, age: Some(age) }
    }

    pub fn invalid(age: Option<u32>) -> Self {
        Self { valid: false, age }
    }
}
