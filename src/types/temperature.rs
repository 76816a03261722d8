//! Sampling temperature tiers

use serde::{Deserialize, Serialize};

use crate::{TEMPERATURE_DEFAULT, TEMPERATURE_HIGH, TEMPERATURE_LOW};

/// One of the three fixed sampling temperatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureTier {
    /// De-escalation: negative or intense emotion, support-oriented goal
    Low,
    Default,
    /// Positive or creative context
    High,
}

impl TemperatureTier {
    pub fn value(&self) -> f32 {
        match self {
            Self::Low => TEMPERATURE_LOW,
            Self::Default => TEMPERATURE_DEFAULT,
            Self::High => TEMPERATURE_HIGH,
        }
    }
}

impl std::fmt::Display for TemperatureTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low ({})", self.value()),
            Self::Default => write!(f, "default ({})", self.value()),
            Self::High => write!(f, "high ({})", self.value()),
        }
    }
}
