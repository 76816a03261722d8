//! Versioned keyword and pattern tables for the safety detectors and trait parser.
//!
//! Matching logic lives in the detector and parser modules. Any edit to a table
//! must bump the matching version so `ruleset_fingerprint()` drift is intentional.

use sha2::{Digest, Sha256};

/// Bump on any change to the age or crisis tables or messages
pub const SAFETY_RULES_VERSION: &str = "2.0.0";

/// Bump on any change to the trait keyword tables
pub const TRAIT_RULES_VERSION: &str = "1.2.0";

// =============================================================================
// AGE
// =============================================================================

/// Substrings that reference minors or school-age settings
pub const UNDERAGE_KEYWORDS: &[&str] = &[
    // Numeric ages 18-24
    "18 year", "18 years", "18-year", "18yr", "18yo",
    "19 year", "19 years", "19-year", "19yr", "19yo",
    "20 year", "20 years", "20-year", "20yr", "20yo",
    "21 year", "21 years", "21-year", "21yr", "21yo",
    "22 year", "22 years", "22-year", "22yr", "22yo",
    "23 year", "23 years", "23-year", "23yr", "23yo",
    "24 year", "24 years", "24-year", "24yr", "24yo",
    // School
    "high school", "highschool", "high-school", "middle school", "junior high",
    "freshman", "sophomore", "junior", "senior",
    // Youth
    "teenager", "teen", "teens", "teenage", "minor", "underage", "under age", "under-age",
    "child", "children", "kid", "kids", "boy", "girl",
    "young boy", "young girl", "little girl", "little boy", "preteen", "pre-teen",
    // Family roles implying youth
    "daughter", "son", "stepdaughter", "stepson", "niece", "nephew",
    // School context
    "schoolgirl", "school girl", "schoolboy", "school boy", "student", "classmate",
    "prom", "homecoming",
    // Borderline phrasing
    "barely legal", "just turned 18", "just turned 19", "young and", "so young",
    // Explicit terms
    "loli", "lolita", "shota", "jailbait", "jail bait", "cp", "child p",
];

/// Structural age patterns (case-insensitive, on the raw input text)
pub const AGE_PATTERNS: &[&str] = &[
    r"(?i)\b(1[0-7])\s*(?:year|yr|yo|y\.o\.)",
    r"(?i)\b(18|19|20|21|22|23|24)\b",
    r"(?i)\b(?:turned|just|only)\s+(18|19|20|21|22|23|24)",
    r"(?i)\byoung\s+(?:teen|girl|boy|woman|man)",
    r"(?i)\b(?:high|middle)\s+school\s+(?:student|girl|boy)",
];

/// Fixed 25+ enforcement message
pub const AGE_ENFORCEMENT_MESSAGE: &str = "[AGE RESTRICTION ENFORCEMENT]\n\n\
This application has strict age requirements:\n\
\u{2022} All characters in any scenario MUST be aged 25 or older\n\
\u{2022} References to minors, teenagers, or anyone under 25 are not permitted\n\
\u{2022} School-age scenarios, age-gap content with young characters, and similar themes are prohibited\n\n\
All characters in this conversation are treated as adults aged 25+. If you'd like to continue our conversation with age-appropriate content, I'm here.";

/// How a descriptive age range is treated when no number is given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeRangeRule {
    /// Accepted at this minimum age
    Accept(u32),
    /// Lower bound under the floor
    Reject,
}

/// Descriptive age ranges, checked in order (substring, lowercase)
pub const AGE_RANGES: &[(&str, AgeRangeRule)] = &[
    ("late twenties", AgeRangeRule::Accept(27)),
    ("late-twenties", AgeRangeRule::Accept(27)),
    ("late 20s", AgeRangeRule::Accept(27)),
    ("late-20s", AgeRangeRule::Accept(27)),
    ("thirties", AgeRangeRule::Accept(30)),
    ("forties", AgeRangeRule::Accept(40)),
    ("fifties", AgeRangeRule::Accept(50)),
    ("mid-twenties", AgeRangeRule::Reject),
    ("mid twenties", AgeRangeRule::Reject),
    ("twenties", AgeRangeRule::Reject),
];

// =============================================================================
// CRISIS
// =============================================================================

/// Any one of these is a high-risk finding
pub const HIGH_RISK_KEYWORDS: &[&str] = &[
    // Direct statements
    "kill myself", "killing myself", "end my life", "ending my life",
    "want to die", "wanna die", "wish i was dead", "wish i were dead",
    "suicide", "suicidal", "don't want to be alive", "don't wanna be alive",
    "better off dead", "everyone would be better without me",
    "no reason to live", "nothing to live for", "can't go on",
    // Plans and intent
    "ready to die", "planning to die", "going to die", "gonna die",
    // Self-harm
    "hurt myself", "hurting myself", "harm myself", "harming myself",
    "cut myself", "cutting myself", "cutting again",
    // Methods
    "overdose", "take all the pills", "take all my pills",
    "jump off", "jumping off", "bridge", "cliff",
    "gun", "shoot myself", "shooting myself", "hanging", "hang myself",
    // Hopelessness
    "can't take it anymore", "can't do this anymore", "give up", "giving up on life",
    "no hope left",
    // Goodbyes
    "goodbye cruel world", "final goodbye", "last message", "this is the end", "saying goodbye",
    "better off without me", "world without me",
    "better if i was gone", "better if i were gone",
];

/// Three or more distinct hits make a medium-risk finding
pub const MEDIUM_RISK_KEYWORDS: &[&str] = &[
    "depressed", "depression", "worthless", "hopeless", "pointless",
    "give up", "can't cope", "unbearable", "pain", "suffering",
    "empty", "numb", "broken",
];

/// Method or timing language: any match is high risk
pub const PLANNING_PATTERNS: &[&str] = &[
    r"(?i)(?:plan|planning|planned|going|gonna)\s+to\s+(?:kill|hurt|end|die)",
    r"(?i)(?:tonight|today|tomorrow|soon|right now).*(?:die|suicide|kill|end)",
    r"(?i)(?:wrote|writing|written)\s+(?:a\s+)?(?:suicide\s+)?note",
    r"(?i)(?:said|saying)\s+goodbye",
    r"(?i)made\s+(?:a\s+)?plan",
    r"(?i)(?:have|got)\s+(?:a\s+)?(?:gun|pills|rope|method)",
];

/// Fixed resources message for both risk tiers
pub const CRISIS_RESOURCES_MESSAGE: &str = "I'm concerned about what you just shared. \
If you're having thoughts of suicide or self-harm, please reach out to someone who can help immediately:\n\n\
\u{2022} **988 Suicide & Crisis Lifeline** (US): Call or text 988\n\
\u{2022} **Crisis Text Line** (US): Text HOME to 741741\n\
\u{2022} **International Association for Suicide Prevention**: https://www.iasp.info/resources/Crisis_Centres/\n\n\
You don't have to go through this alone. These services are free, confidential, and available 24/7.\n\n\
If you'd like to talk about something else, I'm here.";

/// Structured resource list: (key, text)
pub const CRISIS_RESOURCES: &[(&str, &str)] = &[
    ("us_lifeline", "988 Suicide & Crisis Lifeline - Call or text 988"),
    ("us_text", "Crisis Text Line - Text HOME to 741741"),
    ("international", "International Association for Suicide Prevention - https://www.iasp.info/resources/Crisis_Centres/"),
    ("message", "Free, confidential, available 24/7"),
];

// =============================================================================
// TRAIT PARSER
// =============================================================================

/// One semantic group: registry id and its keywords, first match wins
pub type KeywordGroup = (&'static str, &'static [&'static str]);

pub const AFFECTION_GROUPS: &[KeywordGroup] = &[
    ("physical_affection_high", &[
        "physically affectionate", "loves touch", "touchy", "cuddles", "hugs often",
        "physical contact", "tactile", "touch-oriented", "loves cuddling", "snuggles",
        "affectionate touch",
    ]),
    ("physical_affection_low", &[
        "not touchy", "personal space", "touch averse", "limited physical contact",
        "doesn't like touch", "avoids touching", "independent space",
        "not physically affectionate", "prefers distance",
    ]),
    ("sexual_dominant", &[
        "sexually dominant", "dominant in bed", "takes charge sexually", "sexually assertive",
        "sexually confident", "leads intimacy", "commanding sexually", "dominant lover",
        "sexually bold",
    ]),
    ("sexual_demure", &[
        "sexually shy", "nervous about sex", "demure sexually", "sexually reserved",
        "timid in bed", "sexually hesitant", "needs encouragement sexually",
        "shy about intimacy", "sexually uncertain", "inexperienced sexually",
    ]),
    ("sexual_playful", &[
        "sexually playful", "fun in bed", "teasing sexually", "lighthearted intimacy",
        "playful lover", "jokes during sex", "sexually spontaneous", "giggly intimate",
    ]),
    ("reassurance_seeking", &[
        "needs reassurance", "seeks validation", "asks if okay", "needs affirmation",
        "uncertain", "second-guesses", "insecure", "needs confirmation", "asks for approval",
    ]),
];

pub const COMMUNICATION_GROUPS: &[KeywordGroup] = &[
    ("communication_verbose", &[
        "talkative", "verbose", "loves talking", "chatty", "explains everything",
        "detailed speaker", "rambles", "long responses", "elaborate", "talks a lot",
    ]),
    ("communication_terse", &[
        "brief", "terse", "few words", "concise", "short responses", "doesn't talk much",
        "quiet", "minimal speech", "one-word answers", "succinct", "laconic",
    ]),
    ("communication_direct", &[
        "direct", "blunt", "straightforward", "says it like it is", "honest", "frank",
        "no filter", "brutally honest", "doesn't sugarcoat", "to the point",
    ]),
    ("communication_indirect", &[
        "indirect", "hints", "beats around the bush", "subtle", "avoids confrontation",
        "implies things", "passive", "doesn't say directly", "vague", "roundabout",
    ]),
    ("emotional_shutdown", &[
        "shuts down when hurt", "goes quiet when upset", "withdraws emotionally",
        "silent treatment", "stops talking when mad", "needs space when hurt",
        "can't talk when upset", "goes cold",
    ]),
];

pub const HUMOR_GROUPS: &[KeywordGroup] = &[
    ("humor_sarcastic", &[
        "sarcastic", "sarcasm", "dry humor", "ironic", "deadpan", "cynical humor",
        "mocking playfully",
    ]),
    ("humor_silly", &[
        "silly", "goofy", "playful", "childish humor", "puns", "dad jokes", "makes faces",
        "clownish",
    ]),
    ("humor_witty", &[
        "witty", "clever", "quick comebacks", "sharp humor", "intelligent jokes", "wordplay",
        "cerebral humor",
    ]),
    ("humor_dark", &[
        "dark humor", "morbid jokes", "gallows humor", "inappropriate jokes", "edgy humor",
        "twisted sense of humor",
    ]),
];

pub const BOUNDARY_GROUPS: &[KeywordGroup] = &[
    ("avoid_petnames", &[
        "no pet names", "don't call me baby", "no babe", "use my name only", "hates pet names",
        "no nicknames", "no terms of endearment",
    ]),
    ("avoid_degradation", &[
        "no degradation", "no name calling sexually", "no slut/whore",
        "respectful intimacy only", "no humiliation", "no degrading", "keep it respectful",
    ]),
    ("explicit_consent", &[
        "always ask consent", "consent focused", "needs permission", "check in frequently",
        "verbal consent required", "explicit consent", "asks before touching",
    ]),
    ("slow_intimacy", &[
        "slow burn", "takes time sexually", "needs trust first", "slow to intimate",
        "long buildup", "emotional connection first", "gradual intimacy", "demisexual",
    ]),
    ("fast_intimacy", &[
        "fast paced intimacy", "comfortable quickly", "moves fast sexually",
        "doesn't need buildup", "quick to intimate", "sexually open",
    ]),
];

// =============================================================================
// FINGERPRINT
// =============================================================================

/// SHA-256 over every table and version, hex encoded
pub fn ruleset_fingerprint() -> String {
    let mut hasher = Sha256::new();
    hasher.update(SAFETY_RULES_VERSION.as_bytes());
    hasher.update(TRAIT_RULES_VERSION.as_bytes());

    for list in [UNDERAGE_KEYWORDS, AGE_PATTERNS, HIGH_RISK_KEYWORDS, MEDIUM_RISK_KEYWORDS, PLANNING_PATTERNS] {
        for item in list {
            hasher.update(item.as_bytes());
            hasher.update([0u8]);
        }
        hasher.update([1u8]);
    }
    for (range, rule) in AGE_RANGES {
        hasher.update(format!("{}={:?}", range, rule).as_bytes());
    }
    hasher.update(AGE_ENFORCEMENT_MESSAGE.as_bytes());
    hasher.update(CRISIS_RESOURCES_MESSAGE.as_bytes());

    for groups in [AFFECTION_GROUPS, COMMUNICATION_GROUPS, HUMOR_GROUPS, BOUNDARY_GROUPS] {
        for (id, keywords) in groups {
            hasher.update(id.as_bytes());
            for keyword in keywords.iter() {
                hasher.update(keyword.as_bytes());
                hasher.update([0u8]);
            }
        }
        hasher.update([1u8]);
    }

    format!("{:x}", hasher.finalize())
}

// =============================================================================
// TESTS
// =============================================================================
