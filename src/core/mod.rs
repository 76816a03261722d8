//! Core engines for Oread

pub mod rules;
pub mod registry;
pub mod emotion;
pub mod synthesizer;
pub mod temperature;
pub mod assembler;
pub mod age_detector;
pub mod crisis_detector;
pub mod trait_parser;
pub mod pipeline;

pub use registry::TraitRegistry;
pub use emotion::EmotionResolver;
pub use synthesizer::{render_directives, DirectiveSynthesizer};
pub use temperature::TemperatureSelector;
pub use assembler::{character_variant, is_starter_request, PromptAssembler};
pub use age_detector::AgeDetector;
pub use crisis_detector::CrisisDetector;
pub use trait_parser::{TraitFields, TraitParser, TraitTable};
pub use pipeline::{ChatPipeline, TextGenerator};
