//! Oread: personality directive synthesis and safety screening
//!
//! Turns a character's selected personality tags, the user's detected emotion and
//! a relationship-type setting into deterministic prompt directives, and screens
//! user input for underage references and crisis indicators before generation.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use error::{OreadError, Result};

// =============================================================================
// SAFETY FLOORS
// =============================================================================

/// Minimum age for any character in any scenario
pub const MIN_CHARACTER_AGE: u32 = 25;

/// Distinct medium-risk keywords needed for a medium crisis finding
pub const MEDIUM_RISK_THRESHOLD: usize = 3;

// =============================================================================
// SYNTHESIS CAPS
// =============================================================================

/// Trait names per directive line
pub const MAX_TRAITS_PER_LINE: usize = 3;

/// Distinct tones per directive line
pub const MAX_TONES_PER_LINE: usize = 2;

/// Actions per directive line (one primary + two secondary)
pub const MAX_ACTIONS_PER_LINE: usize = 3;

// =============================================================================
// SAMPLING
// =============================================================================

/// De-escalation temperature
pub const TEMPERATURE_LOW: f32 = 0.7;

/// Balanced roleplay temperature
pub const TEMPERATURE_DEFAULT: f32 = 0.9;

/// Playful / creative temperature
pub const TEMPERATURE_HIGH: f32 = 1.1;

pub const DEFAULT_MAX_TOKENS: u32 = 400;

/// Conversation starters are short openers
pub const STARTER_MAX_TOKENS: u32 = 120;
pub const STARTER_TEMPERATURE: f32 = 0.85;

/// Wellness character starters: calmer and slightly longer
pub const WELLNESS_STARTER_MAX_TOKENS: u32 = 150;
pub const WELLNESS_STARTER_TEMPERATURE: f32 = 0.75;

/// User text containing this marker requests a conversation starter
pub const STARTER_MARKER: &str = "[System: Generate a brief, natural conversation starter";

// =============================================================================
// PROMPT WINDOW
// =============================================================================

/// Recent messages included in the prompt (4 exchanges)
pub const HISTORY_WINDOW: usize = 8;

/// Character backstory is truncated to this many characters
pub const BACKSTORY_LIMIT: usize = 1000;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
