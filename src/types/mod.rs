//! Core types for Oread

mod bucket;
mod relationship;
mod template;
mod profile;
mod emotion;
mod directive;
mod detection;
mod temperature;
mod prompt;

pub use bucket::DirectiveBucket;
pub use relationship::RelationshipType;
pub use template::{EmotionResponse, TraitTemplate, TemplateTable, DEFAULT_EMOTION_KEY};
pub use profile::PersonalityProfile;
pub use emotion::{EmotionSignal, Intensity, capitalize};
pub use directive::SynthesizedDirective;
pub use detection::{DetectionResult, RiskLevel, SafetyReason, AgeValidation};
pub use temperature::TemperatureTier;
pub use prompt::{
    CharacterSheet, StatedAge, PlayerSheet, SceneBrief, HistoryTurn, SessionContext,
    GenerationRequest, InterventionKind, TurnOutcome,
};
