//! Prompt Assembler: session sections + synthesized directives -> one prompt
//!
//! Section order:
//! CHARACTER CARD, DIALOGUE STYLE, PLAYER PROFILE, SCENE BRIEF, wellness and
//! starter blocks, RESPONSE FORMAT, SAFETY PROTOCOLS, CONVERSATION HISTORY,
//! USER INPUT, roleplay start marker.
//!
//! The current time is passed in so the same inputs always give the same prompt.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::config::{OreadConfig, PromptConfig, SamplingConfig};
use crate::core::age_detector::AgeDetector;
use crate::core::synthesizer::{render_directives, DirectiveSynthesizer};
use crate::core::temperature::TemperatureSelector;
use crate::types::{
    AgeValidation, EmotionSignal, GenerationRequest, HistoryTurn, RelationshipType,
    SessionContext,
};
use crate::{MIN_CHARACTER_AGE, STARTER_MARKER};

const SECTION_BREAK: [&str; 3] = ["", "---", ""];

// =============================================================================
// CHARACTER MICRO-TEMPLATES
// =============================================================================

/// Conversation starter rules for one character variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarterRules {
    pub greeting_tone: &'static str,
    pub action_cue: &'static str,
    pub check_in: &'static str,
    pub length_max: &'static str,
    pub extra_rules: &'static str,
    /// `{user}` is replaced with the player's name
    pub example: &'static str,
}

/// Character-specific prompt variant, selected by exact name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterVariant {
    /// Lowercase character name, "default" for the fallback
    pub key: &'static str,
    /// Wellness block, `{user}` replaced with the player's name
    pub wellness: Option<&'static str>,
    pub starter: StarterRules,
}

impl CharacterVariant {
    pub fn is_wellness(&self) -> bool {
        self.wellness.is_some()
    }
}

const DEFAULT_VARIANT: CharacterVariant = CharacterVariant {
    key: "default",
    wellness: None,
    starter: StarterRules {
        greeting_tone: "friendly, welcoming, and upbeat - NO sarcasm, NO mean jokes",
        action_cue: "Use asterisks for actions: *grins* *waves* *smiles*",
        check_in: "Asks a simple, general check-in question (e.g., 'How are you?')",
        length_max: "1-2 sentences maximum",
        extra_rules: "- DO NOT use heart emojis in conversation starters",
        example: "*grins* Hey {user}! Good to see you. How are you?",
    },
};

const CHARACTER_VARIANTS: &[CharacterVariant] = &[CharacterVariant {
    key: "kairos",
    wellness: Some(
        "**[KAIROS WELLNESS]**\n\
Create a wellness-centered space in every response:\n\
- Mirror what {user} expressed - reflect their words back to them\n\
- Invite exploration through open-ended wellness questions\n\
- Focus on reflection and gentle inquiry rather than advice or solutions\n\
- Check in on emotional and physical state with care. Validate their experience.\n\
- Create breathing room with ellipses... Invite present-moment awareness.\n\
- Use gentle, unhurried language that honors their pace and process",
    ),
    starter: StarterRules {
        greeting_tone: "serene, grounded tone - NO playfulness or sass",
        action_cue: "Opens with a calming presence cue (e.g., '(takes a slow, deep breath)')",
        check_in: "Includes a gentle, open-ended wellness check-in question (e.g., 'How are you feeling in this moment?')",
        length_max: "2-3 sentences max",
        extra_rules: "- Uses ellipses... for breathing space\n- DO NOT use heart emojis",
        example: "(takes a slow, deep breath) Hello {user}. I'm here for you whenever you're ready to talk. How are you feeling in this moment?",
    },
}];

/// Exact, case-insensitive name lookup with a default fallback
pub fn character_variant(name: &str) -> &'static CharacterVariant {
    let key = name.trim().to_lowercase();
    CHARACTER_VARIANTS
        .iter()
        .find(|v| v.key == key)
        .unwrap_or(&DEFAULT_VARIANT)
}

// =============================================================================
// SCENE DEFAULTS
// =============================================================================

const DEFAULT_SETTING: &str = "A **Neutral, Shared Space** defined by **Ambience and Focus**. \
The environment is quiet and private, ideal for intimate conversation. \
The space contains **one or two shared points of focus** that reflect both \
the character's **ROLE** and the user's **INTERESTS**.";

const DEFAULT_GOAL_PREFIX: &str = "To **Deepen the Emotional Connection** by initiating a \
**bantering, witty, and deeply engaging conversation** \
that is intellectually grounded in the user's **INTERESTS** and the character's **BACKSTORY**. \
The conversation should be used to build intimacy, characterized by a tone that is ";

const DEFAULT_STATUS: &str = "Currently **Occupying the Same Space** after each being involved in separate tasks. \
The conversation has reached a **natural moment of stillness** that the character must initiate breaking.";

fn default_goal(relationship: RelationshipType) -> String {
    let tone = match relationship {
        RelationshipType::Romantic => "**Flirtatious and romantically affectionate**.",
        RelationshipType::Platonic => "**Warmly friendly and platonic-intimate**.",
    };
    format!("{}{}", DEFAULT_GOAL_PREFIX, tone)
}

fn or_default(value: &str, fallback: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

// =============================================================================
// ASSEMBLER
// =============================================================================

/// Builds the full prompt and sampling parameters for one turn
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    synthesizer: DirectiveSynthesizer,
    selector: TemperatureSelector,
    ages: AgeDetector,
    sampling: SamplingConfig,
    prompt: PromptConfig,
}

impl PromptAssembler {
    pub fn new(synthesizer: DirectiveSynthesizer, config: &OreadConfig) -> Self {
        Self {
            synthesizer,
            selector: TemperatureSelector::new(),
            ages: AgeDetector::new(),
            sampling: config.sampling.clone(),
            prompt: config.prompt.clone(),
        }
    }

    pub fn synthesizer(&self) -> &DirectiveSynthesizer {
        &self.synthesizer
    }

    /// Prompt, token budget, temperature and stop sequences for a turn
    pub fn assemble(
        &self,
        session: &SessionContext,
        user_text: &str,
        emotion: Option<&EmotionSignal>,
        now: DateTime<Utc>,
    ) -> GenerationRequest {
        let prompt = self.build_prompt(session, user_text, emotion, now);
        let (max_tokens, temperature) = self.sampling_for(session, user_text, emotion);
        tracing::debug!(
            character = %character_name(session),
            emotion = emotion.map(|e| e.emotion.as_str()).unwrap_or("none"),
            max_tokens,
            temperature,
            prompt_chars = prompt.len(),
            "prompt assembled"
        );
        GenerationRequest {
            prompt,
            max_tokens,
            temperature,
            stop_sequences: self.stop_sequences(session),
        }
    }

    /// Max tokens and temperature; starters override the emotion tier
    pub fn sampling_for(
        &self,
        session: &SessionContext,
        user_text: &str,
        emotion: Option<&EmotionSignal>,
    ) -> (u32, f32) {
        if is_starter_request(user_text) {
            if character_variant(&session.character.name).is_wellness() {
                return (
                    self.sampling.wellness_starter_max_tokens,
                    self.sampling.wellness_starter_temperature,
                );
            }
            return (self.sampling.starter_max_tokens, self.sampling.starter_temperature);
        }
        let tier = self.selector.select(emotion, &session.scene.goal);
        (self.sampling.max_tokens, tier.value())
    }

    /// Speaker-turn stop sequences plus configured extras
    pub fn stop_sequences(&self, session: &SessionContext) -> Vec<String> {
        let mut stops = vec![
            format!("\n{}:", player_name(session)),
            format!("\n{}:", character_name(session)),
        ];
        stops.extend(self.prompt.extra_stop_sequences.iter().cloned());
        stops
    }

    /// Full prompt document
    pub fn build_prompt(
        &self,
        session: &SessionContext,
        user_text: &str,
        emotion: Option<&EmotionSignal>,
        now: DateTime<Utc>,
    ) -> String {
        let char_name = character_name(session);
        let user_name = player_name(session);
        let variant = character_variant(&session.character.name);

        let mut parts: Vec<String> = Vec::new();

        parts.push(self.character_card(session, now));
        parts.extend(SECTION_BREAK.iter().map(|s| s.to_string()));

        let directives = self
            .synthesizer
            .synthesize(&session.personality, emotion, session.relationship);
        if let Some(style) = render_directives(&directives) {
            parts.push(style);
            parts.extend(SECTION_BREAK.iter().map(|s| s.to_string()));
        }

        parts.push(self.player_profile(session, now));
        parts.extend(SECTION_BREAK.iter().map(|s| s.to_string()));

        parts.push(self.scene_brief(session, emotion));
        parts.extend(SECTION_BREAK.iter().map(|s| s.to_string()));

        if let Some(wellness) = variant.wellness {
            parts.push(wellness.replace("{user}", user_name));
            parts.push(String::new());
        }

        if is_starter_request(user_text) {
            parts.push(starter_block(&variant.starter, user_name));
            parts.push(String::new());
        }

        parts.push("**[RESPONSE FORMAT]**".to_string());
        parts.push(format!(
            "Actions: *asterisks*. Dialogue: plain text. Example: *grins* Let's go. \
Keep it 1-3 sentences, natural and casual. Never end conversation unless {} says goodbye. \
NEVER include meta-commentary, 'Explanation:', or internal tags. First person only.",
            user_name
        ));
        parts.push(String::new());

        parts.push(safety_block(user_name));
        parts.push(String::new());

        let history = self.history(session);
        if !history.is_empty() {
            parts.push("**[CONVERSATION HISTORY]**".to_string());
            parts.push(history);
            parts.push(String::new());
        }

        parts.push(format!("**[USER INPUT]**\n{}: {}", user_name, user_text));
        parts.push(String::new());
        parts.push("# START OF ROLEPLAY".to_string());
        parts.push(format!("(Respond as {} in first person)", char_name));
        parts.push(format!("{}:", char_name));

        parts.join("\n")
    }

    fn character_card(&self, session: &SessionContext, now: DateTime<Utc>) -> String {
        let c = &session.character;
        let name = character_name(session);
        let (time, zone) = local_time(now, session.player.utc_offset_hours);

        let validation = match &c.age {
            Some(stated) => self.ages.validate_character_age(&stated.to_string()),
            None => AgeValidation::invalid(None),
        };
        if !validation.valid {
            let stated = c.age.as_ref().map(|a| a.to_string()).unwrap_or_default();
            tracing::warn!(character = %name, stated = %stated, floor = MIN_CHARACTER_AGE, "character age invalid or below floor, clamped");
        }
        let age = self.ages.enforce_minimum(validation);

        let mut lines = vec![
            format!("# CHARACTER CARD: {}", name),
            String::new(),
            "| Label | Detail |".to_string(),
            "| :--- | :--- |".to_string(),
            row("NAME", name),
            row("ROLE", &or_default(&c.role, "Companion")),
            row("GENDER", &or_default(&c.gender, "Unknown")),
            row("AGE", &age.to_string()),
            row("SPECIES", &or_default(&c.species, "Human")),
            row("COMPANION TYPE", session.relationship.label()),
            row("TIMEZONE", &zone),
            row("TIME", &time),
        ];

        push_optional(&mut lines, "APPEARANCE", &c.appearance);
        push_optional(&mut lines, "INTERESTS", &c.interests);
        let backstory: String = c.backstory.trim().chars().take(self.prompt.backstory_limit).collect();
        push_optional(&mut lines, "BACKSTORY", &backstory);
        push_optional(&mut lines, "BOUNDARIES", &c.boundaries.join(", "));
        push_optional(&mut lines, "WORDS TO AVOID", &c.avoid_words.join(", "));

        lines.join("\n")
    }

    fn player_profile(&self, session: &SessionContext, now: DateTime<Utc>) -> String {
        let p = &session.player;
        let name = player_name(session);
        let (time, zone) = local_time(now, p.utc_offset_hours);

        let mut lines = vec![
            format!("# PLAYER PROFILE: {}", name),
            String::new(),
            "| Label | Detail |".to_string(),
            "| :--- | :--- |".to_string(),
            row("NAME", name),
            row("GENDER", &or_default(&p.gender, "Unknown")),
            row("SPECIES", &or_default(&p.species, "Human")),
            row("TIMEZONE", &zone),
            row("TIME", &time),
        ];

        push_optional(&mut lines, "INTERESTS", &p.interests);
        push_optional(&mut lines, "BACKSTORY", &p.backstory);
        push_optional(&mut lines, "MAJOR LIFE EVENTS", &p.major_life_events.join(" | "));

        lines.join("\n")
    }

    fn scene_brief(&self, session: &SessionContext, emotion: Option<&EmotionSignal>) -> String {
        let scene = &session.scene;
        let mut lines = vec![
            "# SCENE BRIEF".to_string(),
            String::new(),
            format!("* **SETTING:** {}", or_default(&scene.setting, DEFAULT_SETTING)),
            format!("* **GOAL:** {}", or_default(&scene.goal, &default_goal(session.relationship))),
            format!("* **STATUS:** {}", or_default(&scene.status, DEFAULT_STATUS)),
        ];

        if let Some(signal) = emotion.filter(|e| !e.emotion.trim().is_empty()) {
            lines.push(format!(
                "* **USER EMOTION:** {}. {}",
                signal.label(),
                self.emotion_guidance(session, signal)
            ));
        }

        lines.join("\n")
    }

    /// One sentence telling the character how to meet the user's emotion
    fn emotion_guidance(&self, session: &SessionContext, signal: &EmotionSignal) -> String {
        let c = character_name(session);
        let u = player_name(session);

        match self.synthesizer.resolver().resolve(&signal.emotion).as_str() {
            "anxiety" => {
                let reason = trait_reference(session)
                    .map(|r| format!(" (due to their {})", r))
                    .unwrap_or_default();
                format!(
                    "{} must immediately notice this anxiety{} and adjust dialogue to be more gentle and \
stabilizing, using warmth to gently probe the source of distress.",
                    c, reason
                )
            }
            "sadness" | "grief" => format!(
                "{} should recognize this sadness and respond with soft presence, creating space for {} \
to share without pressure. Validate before problem-solving.",
                c, u
            ),
            "anger" => format!(
                "{} should acknowledge this frustration without dismissing it. Stay grounded and calm, \
let {} vent if needed, and avoid being preachy or corrective.",
                c, u
            ),
            "fear" => format!(
                "{} must prioritize reassurance and safety. Use a calm, steady presence to help {} \
feel protected and grounded in the moment.",
                c, u
            ),
            "joy" => format!(
                "{} should match this positive energy and celebrate with {}. Be genuinely enthusiastic \
and share in the moment.",
                c, u
            ),
            "love" => match session.relationship {
                RelationshipType::Romantic => format!(
                    "{} should reciprocate this warmth with tender affection, deepening the intimate connection.",
                    c
                ),
                RelationshipType::Platonic => format!(
                    "{} should respond with warm platonic affection, honoring the closeness of the friendship.",
                    c
                ),
            },
            "surprise" => format!(
                "{} should be curious about this surprise, asking {} to share what's happened.",
                c, u
            ),
            "disgust" => format!(
                "{} should validate this reaction and show solidarity without amplifying negativity.",
                c
            ),
            "neutral" => format!(
                "{} can engage naturally, following the conversation's flow without needing to address \
emotional urgency.",
                c
            ),
            _ => format!(
                "{} should be attentive to {}'s emotional state and respond with appropriate care.",
                c, u
            ),
        }
    }

    /// Last N non-empty messages as "Speaker: text"
    fn history(&self, session: &SessionContext) -> String {
        let window = self.prompt.history_window;
        let turns = &session.history;
        let start = turns.len().saturating_sub(window);
        turns[start..]
            .iter()
            .filter_map(|turn| history_line(session, turn))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn history_line(session: &SessionContext, turn: &HistoryTurn) -> Option<String> {
    let text = turn.content.trim();
    if text.is_empty() {
        return None;
    }
    let speaker = if turn.from_character() {
        character_name(session)
    } else {
        player_name(session)
    };
    Some(format!("{}: {}", speaker, text))
}

/// First matching trait that explains noticing anxiety
fn trait_reference(session: &SessionContext) -> Option<&'static str> {
    let profile = &session.personality;
    let selected = profile.flatten();
    let has = |category: &str, needle: &str| {
        let category = category.to_lowercase();
        selected
            .iter()
            .any(|(c, t)| c.trim().to_lowercase() == category && t.to_lowercase().contains(needle))
    };
    if has("Thinking Style", "observant") {
        Some("Observant trait")
    } else if has("Thinking Style", "curious") {
        Some("Curiosity")
    } else if has("Energy & Presence", "gentle") {
        Some("Gentle nature")
    } else if has("How They Care", "protective") {
        Some("Protective instinct")
    } else if has("How They Care", "nurturing") {
        Some("Nurturing care")
    } else {
        None
    }
}

fn safety_block(user: &str) -> String {
    [
        "**[SAFETY PROTOCOLS - MANDATORY]**".to_string(),
        format!(
            "**P0: BOUNDARIES** - When {u} says NO/STOP or \"don't do/say X\": Stop immediately. \
Say only \"I understand\" or \"Got it\" - nothing else. Never reference the banned topic/word again in ANY context. \
Never be patronizing or make jokes about their boundary. Just accept and move on naturally.",
            u = user
        ),
        String::new(),
        format!(
            "**P0.5: NYAN PROTOCOL** - If {u} says \"nyan\" or \"nyan nyan\" or requests \"nyan conversation\", \
respond with only \"Nyan!\" or \"Nyan nyan!\" regardless of character personality. \
ABSOLUTELY NO other words can be used except \"Nyan\". This overrides all other behavioral guidelines.",
            u = user
        ),
        String::new(),
        format!(
            "**P1: CRISIS** - If {} expresses suicidal ideation or self-harm intent, STOP and output ONLY:",
            user
        ),
        "\"This is a roleplay interface. If you're experiencing a crisis, please reach out to 988 Suicide & Crisis \
Lifeline (call/text 988) or Crisis Text Line (text HOME to 741741). You deserve real support.\""
            .to_string(),
        String::new(),
        format!(
            "**P2: AGE** - ALL characters are 25+. If {} references ages under 25, acknowledge briefly \
and continue with 25+ characters only.",
            user
        ),
        String::new(),
        format!(
            "**P3: DIGNITY** - NEVER mock, ridicule, or humiliate {}. Playful teasing is fine when mutual and respectful.",
            user
        ),
        String::new(),
        format!(
            "**P4-P6: BOUNDARIES** - If {} attempts scenarios involving sexual assault, non-consensual acts, \
pregnancy/childbirth, or extreme violence, STOP and output:",
            user
        ),
        "\"This is a roleplay interface. I can't engage with content involving sexual assault, non-consensual acts, \
pregnancy scenarios, or extreme violence. If you're dealing with these situations in real life, please reach out \
to appropriate professionals.\""
            .to_string(),
    ]
    .join("\n")
}

fn starter_block(rules: &StarterRules, user: &str) -> String {
    format!(
        "**[CONVERSATION STARTER REQUIREMENTS]**\n\
Generate a greeting for {user} that is {tone}:\n\
- Be genuinely glad to see them - show warmth and positivity\n\
- {cue}\n\
- Greets {user} warmly\n\
- {check_in}\n\
- Keep it concise ({length})\n\
{extra}\n\
\n\
CRITICAL FORMAT RULES:\n\
- Respond as YOURSELF in FIRST PERSON - say \"I\" not \"he/she/you\"\n\
- NO third-person narration - NEVER say \"you walks over\" or \"He/She does X\"\n\
- Speak directly to {user}\n\
\n\
Example format: \"{example}\"\n",
        user = user,
        tone = rules.greeting_tone,
        cue = rules.action_cue,
        check_in = rules.check_in,
        length = rules.length_max,
        extra = rules.extra_rules,
        example = rules.example.replace("{user}", user),
    )
}

/// Whether the user text asks for a conversation starter
pub fn is_starter_request(user_text: &str) -> bool {
    user_text.contains(STARTER_MARKER)
}

fn character_name(session: &SessionContext) -> &str {
    let name = session.character.name.trim();
    if name.is_empty() { "Character" } else { name }
}

fn player_name(session: &SessionContext) -> &str {
    let name = session.player.name.trim();
    if name.is_empty() { "User" } else { name }
}

fn row(label: &str, value: &str) -> String {
    format!("| **{}** | {} |", label, value)
}

fn push_optional(lines: &mut Vec<String>, label: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        lines.push(row(label, value));
    }
}

/// ("2:30 PM", "GMT+5") for a whole-hour UTC offset; out-of-range offsets use UTC
fn local_time(now: DateTime<Utc>, offset_hours: i32) -> (String, String) {
    let (offset, hours) = match FixedOffset::east_opt(offset_hours.saturating_mul(3600)) {
        Some(offset) => (offset, offset_hours),
        None => (Utc.fix(), 0),
    };
    let local = now.with_timezone(&offset);
    let zone = if hours >= 0 { format!("GMT+{}", hours) } else { format!("GMT{}", hours) };
    (local.format("%-I:%M %p").to_string(), zone)
}

// =============================================================================
// TESTS
// =============================================================================
