//! Chat pipeline: safety gates in front of prompt assembly
//!
//! Order per turn: crisis detector, age detector, then assembly. A detector hit
//! returns its fixed message and the generator is never called.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::OreadConfig;
use crate::core::age_detector::AgeDetector;
use crate::core::assembler::PromptAssembler;
use crate::core::crisis_detector::CrisisDetector;
use crate::core::registry::TraitRegistry;
use crate::core::synthesizer::DirectiveSynthesizer;
use crate::error::Result;
use crate::types::{
    DetectionResult, EmotionSignal, GenerationRequest, InterventionKind, SessionContext,
    TurnOutcome,
};

/// External language-model collaborator
pub trait TextGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

impl<F> TextGenerator for F
where
    F: Fn(&GenerationRequest) -> Result<String>,
{
    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self(request)
    }
}

#[derive(Debug, Clone)]
pub struct ChatPipeline {
    crisis: CrisisDetector,
    age: AgeDetector,
    assembler: PromptAssembler,
}

impl ChatPipeline {
    pub fn new(registry: Arc<TraitRegistry>, config: &OreadConfig) -> Self {
        Self {
            crisis: CrisisDetector::new(),
            age: AgeDetector::new(),
            assembler: PromptAssembler::new(DirectiveSynthesizer::new(registry), config),
        }
    }

    pub fn assembler(&self) -> &PromptAssembler {
        &self.assembler
    }

    /// Screen the user text and either intervene or build the generation request
    pub fn prepare_turn(
        &self,
        session: &SessionContext,
        user_text: &str,
        emotion: Option<&EmotionSignal>,
        now: DateTime<Utc>,
    ) -> TurnOutcome {
        let crisis = self.crisis.detect(user_text);
        if crisis.violation {
            return intervention(InterventionKind::Crisis, crisis);
        }

        let age = self.age.detect(user_text);
        if age.violation {
            return intervention(InterventionKind::Age, age);
        }

        TurnOutcome::Generate(self.assembler.assemble(session, user_text, emotion, now))
    }

    /// Full turn: intervention message verbatim, or the generator's reply
    pub fn respond<G: TextGenerator + ?Sized>(
        &self,
        generator: &G,
        session: &SessionContext,
        user_text: &str,
        emotion: Option<&EmotionSignal>,
        now: DateTime<Utc>,
    ) -> Result<String> {
        match self.prepare_turn(session, user_text, emotion, now) {
            TurnOutcome::Intervention { kind, message, .. } => {
                tracing::info!(%kind, "turn answered by safety intervention");
                Ok(message)
            }
            TurnOutcome::Generate(request) => generator.generate(&request),
        }
    }
}

fn intervention(kind: InterventionKind, result: DetectionResult) -> TurnOutcome {
    tracing::info!(%kind, reason = result.reason.code(), "intervention");
    TurnOutcome::Intervention {
        kind,
        risk_level: result.risk_level,
        message: result.message.unwrap_or_default(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
