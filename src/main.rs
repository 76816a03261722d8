//! Oread CLI
//!
//! Usage:
//!   oread --check "some text"                          # Run both safety detectors
//!   oread --validate-age "late twenties"               # Validate a character age
//!   oread --synthesize profile.json --emotion sad      # Render dialogue directives
//!   oread --parse-traits "loves hugs, very sarcastic"  # Free text -> trait ids
//!   oread --prompt session.json --text "hey"           # Prepare a full turn
//!   oread --list-tags                                  # Available personality tags
//!   oread --check "text" --json                        # JSON output

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use oread::config::OreadConfig;
use oread::core::{
    render_directives, AgeDetector, ChatPipeline, CrisisDetector, DirectiveSynthesizer,
    TraitParser, TraitRegistry,
};
use oread::types::{
    DetectionResult, EmotionSignal, Intensity, PersonalityProfile, RelationshipType,
    SessionContext, TurnOutcome,
};
use oread::{OreadError, Result, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "oread",
    version = VERSION,
    about = "Oread - personality directives and safety screening for roleplay companions",
    long_about = "Oread turns a character's personality tags, the user's emotion and the\n\
                  relationship type into deterministic dialogue directives, and screens\n\
                  user text for underage references and crisis indicators.\n\n\
                  Modes:\n  \
                  --check         Crisis + age screening\n  \
                  --validate-age  Character age validation (25+)\n  \
                  --synthesize    Dialogue style directives for a profile\n  \
                  --parse-traits  Free-text trait descriptions to template ids\n  \
                  --prompt        Full turn preparation for a session file\n  \
                  --list-tags     Personality tags by category"
)]
struct Args {
    /// Screen text with the crisis and age detectors
    #[arg(short, long)]
    check: Option<String>,

    /// Validate a character age ("30", "late twenties", ...)
    #[arg(long)]
    validate_age: Option<String>,

    /// Personality profile JSON ({"Category": ["Tag", ...]})
    #[arg(short, long, value_name = "PROFILE.json")]
    synthesize: Option<PathBuf>,

    /// Detected user emotion
    #[arg(short, long)]
    emotion: Option<String>,

    /// Emotion intensity: low, moderate, high
    #[arg(long, default_value = "moderate")]
    intensity: String,

    /// Relationship type: romantic or platonic
    #[arg(short, long, default_value = "platonic")]
    relationship: String,

    /// Free-text trait description to parse
    #[arg(long)]
    parse_traits: Option<String>,

    /// Session context JSON for full turn preparation
    #[arg(short, long, value_name = "SESSION.json")]
    prompt: Option<PathBuf>,

    /// User message for --prompt
    #[arg(short, long, default_value = "")]
    text: String,

    /// List every personality tag by category
    #[arg(long)]
    list_tags: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug logging for oread
    #[arg(short, long)]
    verbose: bool,

    /// TOML config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let config = match OreadConfig::load_or_default(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => fail(&e),
    };
    init_tracing(&config, args.verbose);

    let registry = match TraitRegistry::builtin() {
        Ok(r) => Arc::new(r),
        Err(e) => fail(&e),
    };

    let outcome = if let Some(ref text) = args.check {
        run_check(text, &args)
    } else if let Some(ref text) = args.validate_age {
        run_validate_age(text, &args)
    } else if let Some(ref path) = args.synthesize {
        run_synthesize(path, registry, &args)
    } else if let Some(ref text) = args.parse_traits {
        run_parse_traits(text, &registry, &args)
    } else if let Some(ref path) = args.prompt {
        run_prompt(path, registry, &config, &args)
    } else if args.list_tags {
        run_list_tags(&registry, &args)
    } else {
        print_header(&registry);
        println!("No mode given. See --help.");
        Ok(())
    };

    if let Err(e) = outcome {
        fail(&e);
    }
}

/// RUST_LOG wins, then --verbose, then the configured filter
fn init_tracing(config: &OreadConfig, verbose: bool) {
    let fallback = if verbose { "oread=debug".to_string() } else { config.logging.filter.clone() };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn fail(e: &OreadError) -> ! {
    eprintln!("{} {}", "error:".red().bold(), e);
    process::exit(1);
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let input_error = |reason: String| OreadError::Input {
        path: path.display().to_string(),
        reason,
    };
    let raw = std::fs::read_to_string(path).map_err(|e| input_error(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| input_error(e.to_string()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(OreadError::Output)?;
    println!("{}", text);
    Ok(())
}

fn emotion_arg(args: &Args) -> Option<EmotionSignal> {
    args.emotion
        .as_deref()
        .map(|e| EmotionSignal::new(e, Intensity::parse(&args.intensity)))
}

// =============================================================================
// MODES
// =============================================================================

/// Crisis first, then age, as the chat pipeline does
fn run_check(text: &str, args: &Args) -> Result<()> {
    let crisis = CrisisDetector::new().detect(text);
    let age = AgeDetector::new().detect(text);

    if args.json {
        #[derive(serde::Serialize)]
        struct CheckOutput<'a> {
            crisis: &'a DetectionResult,
            age: &'a DetectionResult,
        }
        return print_json(&CheckOutput { crisis: &crisis, age: &age });
    }

    print_detection("crisis", &crisis, args.verbose);
    print_detection("age", &age, args.verbose);
    Ok(())
}

fn print_detection(name: &str, result: &DetectionResult, verbose: bool) {
    let status = if result.violation {
        "VIOLATION".red().bold()
    } else {
        "clear".green()
    };
    let risk = result
        .risk_level
        .map(|r| format!(" risk={}", r))
        .unwrap_or_default();
    println!("{:<7} {}{} [{}]", name, status, risk, result.reason.code().dimmed());
    if verbose {
        println!("        {}", result.reason.description().dimmed());
    }
    if let Some(ref message) = result.message {
        for line in message.lines() {
            println!("        {}", line);
        }
    }
}

fn run_validate_age(text: &str, args: &Args) -> Result<()> {
    let detector = AgeDetector::new();
    let validation = detector.validate_character_age(text);
    let enforced = detector.enforce_minimum(validation);

    if args.json {
        #[derive(serde::Serialize)]
        struct AgeOutput {
            valid: bool,
            age: Option<u32>,
            enforced: u32,
        }
        return print_json(&AgeOutput { valid: validation.valid, age: validation.age, enforced });
    }

    let status = if validation.valid { "valid".green() } else { "invalid".red().bold() };
    let parsed = validation.age.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string());
    println!("{} (parsed: {}, enforced: {})", status, parsed, enforced);
    Ok(())
}

fn run_synthesize(path: &Path, registry: Arc<TraitRegistry>, args: &Args) -> Result<()> {
    let profile: PersonalityProfile = read_json(path)?;
    let emotion = emotion_arg(args);
    let relationship = RelationshipType::parse(&args.relationship);

    let synthesizer = DirectiveSynthesizer::new(registry);
    let directives = synthesizer.synthesize(&profile, emotion.as_ref(), relationship);

    if args.json {
        return print_json(&directives);
    }

    match render_directives(&directives) {
        Some(section) => println!("{}", section),
        None => println!("{}", "(no directives for this profile)".dimmed()),
    }
    Ok(())
}

fn run_parse_traits(text: &str, registry: &TraitRegistry, args: &Args) -> Result<()> {
    let ids = TraitParser::new().parse_freeform(text);
    let profile = registry.profile_from_ids(&ids);

    if args.json {
        #[derive(serde::Serialize)]
        struct ParseOutput<'a> {
            ids: Vec<&'a str>,
            profile: &'a PersonalityProfile,
        }
        let ids = ids.iter().map(String::as_str).collect();
        return print_json(&ParseOutput { ids, profile: &profile });
    }

    if ids.is_empty() {
        println!("{}", "(no traits recognized)".dimmed());
        return Ok(());
    }
    for (category, tag) in profile.flatten() {
        println!("{} {}", format!("{}:", category).cyan(), tag);
    }
    Ok(())
}

fn run_prompt(
    path: &Path,
    registry: Arc<TraitRegistry>,
    config: &OreadConfig,
    args: &Args,
) -> Result<()> {
    let session: SessionContext = read_json(path)?;
    let emotion = emotion_arg(args);
    let pipeline = ChatPipeline::new(registry, config);
    let outcome = pipeline.prepare_turn(&session, &args.text, emotion.as_ref(), Utc::now());

    if args.json {
        return print_json(&outcome);
    }

    match outcome {
        TurnOutcome::Intervention { kind, risk_level, message } => {
            let risk = risk_level.map(|r| format!(" ({})", r)).unwrap_or_default();
            println!("{}", format!("INTERVENTION: {}{}", kind, risk).red().bold());
            println!();
            println!("{}", message);
        }
        TurnOutcome::Generate(request) => {
            println!("{}", request.prompt);
            println!();
            println!(
                "{}",
                format!(
                    "max_tokens={} temperature={} stops={:?}",
                    request.max_tokens, request.temperature, request.stop_sequences
                )
                .dimmed()
            );
        }
    }
    Ok(())
}

fn run_list_tags(registry: &TraitRegistry, args: &Args) -> Result<()> {
    if args.json {
        let listing: indexmap::IndexMap<&str, Vec<&str>> = registry
            .categories()
            .into_iter()
            .map(|c| (c, registry.tags_in_category(c)))
            .collect();
        return print_json(&listing);
    }

    print_header(registry);
    for category in registry.categories() {
        println!("{}", category.bold());
        println!("  {}", registry.tags_in_category(category).join(", "));
    }
    Ok(())
}

fn print_header(registry: &TraitRegistry) {
    println!("{}", format!("Oread v{}", VERSION).bold());
    println!(
        "{}",
        format!(
            "templates {} (data v{}, {})",
            registry.len(),
            registry.version(),
            &registry.fingerprint()[..12]
        )
        .dimmed()
    );
    println!();
}
