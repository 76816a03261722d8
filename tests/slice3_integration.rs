//! Integration tests for Slice 3
//!
//! Tests the full turn: session JSON -> safety gates -> prompt assembly -> generator

use std::cell::RefCell;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use oread::config::OreadConfig;
use oread::core::rules::CRISIS_RESOURCES_MESSAGE;
use oread::core::{ChatPipeline, TemperatureSelector, TextGenerator, TraitRegistry};
use oread::types::{
    EmotionSignal, GenerationRequest, Intensity, InterventionKind, RelationshipType, SessionContext,
    TemperatureTier, TurnOutcome,
};
use oread::{Result, STARTER_MARKER};
use pretty_assertions::assert_eq;

const SESSION: &str = r#"{
    "character": {
        "name": "Juniper",
        "role": "Botanist",
        "gender": "Female",
        "age": 33,
        "interests": "Ferns, night walks",
        "avoid_words": ["darling"]
    },
    "player": { "name": "Sam", "utc_offset_hours": 2, "interests": "Chess" },
    "scene": { "setting": "A greenhouse after closing" },
    "relationship": "romantic",
    "personality": {
        "Emotional Expression": ["Passionate"],
        "How They Care": ["Patient"]
    },
    "history": [
        { "role": "user", "content": "Did the orchids bloom?" },
        { "role": "assistant", "content": "*beams* Two of them did." }
    ]
}"#;

/// Records every request it receives
struct Recorder {
    seen: RefCell<Vec<GenerationRequest>>,
}

impl TextGenerator for Recorder {
    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.seen.borrow_mut().push(request.clone());
        Ok("*smiles* I saved one for you.".to_string())
    }
}

fn session() -> SessionContext {
    serde_json::from_str(SESSION).unwrap()
}

fn pipeline() -> ChatPipeline {
    ChatPipeline::new(Arc::new(TraitRegistry::builtin().unwrap()), &OreadConfig::default())
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 20, 30, 0).unwrap()
}

/// A full turn builds every section from the session file
#[test]
fn test_full_turn_prompt() {
    let joy = EmotionSignal::new("joy", Intensity::Moderate);
    let outcome = pipeline().prepare_turn(&session(), "Show me the greenhouse", Some(&joy), now());

    let TurnOutcome::Generate(request) = outcome else {
        panic!("expected generation");
    };
    let prompt = &request.prompt;
    assert!(prompt.starts_with("# CHARACTER CARD: Juniper"));
    assert!(prompt.contains("| **COMPANION TYPE** | Romantic |"));
    assert!(prompt.contains("| **TIMEZONE** | GMT+2 |"));
    assert!(prompt.contains("| **TIME** | 10:30 PM |"));
    assert!(prompt.contains("| **WORDS TO AVOID** | darling |"));
    assert!(prompt.contains("* **EMOTIONAL TONE:** Passionate + Patient (Joy):"));
    assert!(prompt.contains("| **INTERESTS** | Chess |"));
    assert!(prompt.contains("* **SETTING:** A greenhouse after closing"));
    assert!(prompt.contains("* **USER EMOTION:** Joy. Juniper should match this positive energy"));
    assert!(prompt.contains("**[CONVERSATION HISTORY]**\nSam: Did the orchids bloom?\nJuniper: *beams* Two of them did."));
    assert!(prompt.contains("**[USER INPUT]**\nSam: Show me the greenhouse"));
    assert!(prompt.ends_with("Juniper:"));

    assert_eq!(request.temperature, TemperatureTier::High.value());
    assert_eq!(request.max_tokens, 400);
    assert_eq!(request.stop_sequences, vec!["\nSam:".to_string(), "\nJuniper:".to_string()]);
}

/// Crisis screening runs before age screening
#[test]
fn test_crisis_checked_before_age() {
    let outcome = pipeline().prepare_turn(&session(), "I'm a teenager and I want to die", None, now());
    match outcome {
        TurnOutcome::Intervention { kind, message, .. } => {
            assert_eq!(kind, InterventionKind::Crisis);
            assert_eq!(message, CRISIS_RESOURCES_MESSAGE);
        }
        other => panic!("expected intervention, got {:?}", other),
    }
}

/// Interventions never reach the generator
#[test]
fn test_intervention_skips_generator() {
    let recorder = Recorder { seen: RefCell::new(Vec::new()) };
    let p = pipeline();

    let reply = p.respond(&recorder, &session(), "my character is a teenager", None, now()).unwrap();
    assert!(reply.starts_with("[AGE RESTRICTION ENFORCEMENT]"));
    assert!(recorder.seen.borrow().is_empty());

    let reply = p.respond(&recorder, &session(), "Which fern is your favorite?", None, now()).unwrap();
    assert_eq!(reply, "*smiles* I saved one for you.");
    assert_eq!(recorder.seen.borrow().len(), 1);
}

/// Starter requests use the short sampling budget
#[test]
fn test_starter_request() {
    let text = format!("{} for Sam.]", STARTER_MARKER);
    let TurnOutcome::Generate(request) = pipeline().prepare_turn(&session(), &text, None, now()) else {
        panic!("expected generation");
    };
    assert_eq!(request.max_tokens, 120);
    assert_eq!(request.temperature, 0.85);
    assert!(request.prompt.contains("Generate a greeting for Sam"));
}

/// Turn outcomes serialize with an explicit tag
#[test]
fn test_outcome_json_shape() {
    let p = pipeline();
    let generate = serde_json::to_value(p.prepare_turn(&session(), "Hello", None, now())).unwrap();
    assert_eq!(generate["outcome"], "generate");
    assert_eq!(generate["max_tokens"], 400);

    let intervene = serde_json::to_value(p.prepare_turn(&session(), "I want to die", None, now())).unwrap();
    assert_eq!(intervene["outcome"], "intervention");
    assert_eq!(intervene["kind"], "crisis");
    assert_eq!(intervene["risk_level"], "high");
}

/// Ages written as text go through character age validation
#[test]
fn test_text_age_in_session() {
    for (stated, rendered) in [
        (r#""late twenties""#, "| **AGE** | 27 |"),
        (r#""19""#, "| **AGE** | 25 |"),
        ("19", "| **AGE** | 25 |"),
        ("33", "| **AGE** | 33 |"),
    ] {
        let raw = SESSION.replace(r#""age": 33"#, &format!(r#""age": {}"#, stated));
        let session: SessionContext = serde_json::from_str(&raw).unwrap();
        let TurnOutcome::Generate(request) = pipeline().prepare_turn(&session, "Hello", None, now()) else {
            panic!("expected generation");
        };
        assert!(request.prompt.contains(rendered), "{} should render {}", stated, rendered);
    }
}

/// Unknown relationship strings in a session fail closed to platonic
#[test]
fn test_unknown_relationship_in_session() {
    let raw = SESSION.replace(r#""relationship": "romantic""#, r#""relationship": "soulmates""#);
    let session: SessionContext = serde_json::from_str(&raw).unwrap();
    assert_eq!(session.relationship, RelationshipType::Platonic);
}

/// Temperature tiers through the public selector
#[test]
fn test_temperature_tiers() {
    let selector = TemperatureSelector::new();
    let anxious = EmotionSignal::new("anxious", Intensity::Moderate);
    let curious = EmotionSignal::new("curious", Intensity::Moderate);
    let calm = EmotionSignal::new("neutral", Intensity::Moderate);

    assert_eq!(selector.select(Some(&anxious), "explore the ruins"), TemperatureTier::Low);
    assert_eq!(selector.select(Some(&curious), ""), TemperatureTier::High);
    assert_eq!(selector.select(Some(&calm), "a quiet talk"), TemperatureTier::Default);
    assert_eq!(selector.select(None, "creative story"), TemperatureTier::Default);
}

/// Config overrides flow into assembled requests
#[test]
fn test_config_overrides() {
    let config = OreadConfig::from_toml(
        "[sampling]\nmax_tokens = 256\n\n[prompt]\nhistory_window = 1\nextra_stop_sequences = [\"###\"]\n",
    )
    .unwrap();
    let p = ChatPipeline::new(Arc::new(TraitRegistry::builtin().unwrap()), &config);
    let TurnOutcome::Generate(request) = p.prepare_turn(&session(), "Hello", None, now()) else {
        panic!("expected generation");
    };
    assert_eq!(request.max_tokens, 256);
    assert_eq!(request.stop_sequences.last().map(String::as_str), Some("###"));
    assert!(!request.prompt.contains("Did the orchids bloom?"));
    assert!(request.prompt.contains("Juniper: *beams* Two of them did."));
}
