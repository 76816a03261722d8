//! Trait Parser: free-text trait descriptions -> registry template ids
//!
//! Each field is scanned against its own keyword table. Within a group the
//! first matching keyword wins; a field may satisfy several groups.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::rules::{
    KeywordGroup, AFFECTION_GROUPS, BOUNDARY_GROUPS, COMMUNICATION_GROUPS, HUMOR_GROUPS,
};

/// A group compiled to word-boundary regexes, keyword order preserved
struct CompiledGroup {
    id: &'static str,
    patterns: Vec<(&'static str, Regex)>,
}

fn compile(groups: &'static [KeywordGroup]) -> Vec<CompiledGroup> {
    groups
        .iter()
        .map(|(id, keywords)| CompiledGroup {
            id: *id,
            patterns: keywords
                .iter()
                .map(|kw| (*kw, Regex::new(&format!(r"\b{}\b", regex::escape(kw))).unwrap()))
                .collect(),
        })
        .collect()
}

lazy_static! {
    static ref AFFECTION: Vec<CompiledGroup> = compile(AFFECTION_GROUPS);
    static ref COMMUNICATION: Vec<CompiledGroup> = compile(COMMUNICATION_GROUPS);
    static ref HUMOR: Vec<CompiledGroup> = compile(HUMOR_GROUPS);
    static ref BOUNDARY: Vec<CompiledGroup> = compile(BOUNDARY_GROUPS);
}

/// Which keyword table to scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitTable {
    Affection,
    Communication,
    Humor,
    Boundary,
}

impl TraitTable {
    pub const ALL: [TraitTable; 4] = [
        TraitTable::Affection,
        TraitTable::Communication,
        TraitTable::Humor,
        TraitTable::Boundary,
    ];

    fn groups(&self) -> &'static [CompiledGroup] {
        match self {
            Self::Affection => AFFECTION.as_slice(),
            Self::Communication => COMMUNICATION.as_slice(),
            Self::Humor => HUMOR.as_slice(),
            Self::Boundary => BOUNDARY.as_slice(),
        }
    }

    fn raw(&self) -> &'static [KeywordGroup] {
        match self {
            Self::Affection => AFFECTION_GROUPS,
            Self::Communication => COMMUNICATION_GROUPS,
            Self::Humor => HUMOR_GROUPS,
            Self::Boundary => BOUNDARY_GROUPS,
        }
    }

    /// Parse a table name ("affection", "communication", "humor", "boundaries")
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "affection" | "affection_style" => Some(Self::Affection),
            "communication" | "communication_style" => Some(Self::Communication),
            "humor" | "humor_style" => Some(Self::Humor),
            "boundary" | "boundaries" => Some(Self::Boundary),
            _ => None,
        }
    }
}

/// Free-text trait fields from a character profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitFields {
    pub affection_style: String,
    pub communication_style: String,
    pub humor_style: String,
    pub boundaries: String,
}

/// Stateless keyword parser
#[derive(Debug, Clone, Copy, Default)]
pub struct TraitParser;

impl TraitParser {
    /// Create new parser
    pub fn new() -> Self {
        Self
    }

    /// Scan every field against its own table
    pub fn parse(&self, fields: &TraitFields) -> BTreeSet<String> {
        let mut tags = BTreeSet::new();
        tags.extend(self.parse_affection(&fields.affection_style));
        tags.extend(self.parse_communication(&fields.communication_style));
        tags.extend(self.parse_humor(&fields.humor_style));
        tags.extend(self.parse_boundaries(&fields.boundaries));
        tags
    }

    /// Scan one blob of text against every table
    pub fn parse_freeform(&self, text: &str) -> BTreeSet<String> {
        TraitTable::ALL
            .iter()
            .flat_map(|table| self.scan(*table, text))
            .collect()
    }

    pub fn parse_affection(&self, text: &str) -> BTreeSet<String> {
        self.scan(TraitTable::Affection, text)
    }

    pub fn parse_communication(&self, text: &str) -> BTreeSet<String> {
        self.scan(TraitTable::Communication, text)
    }

    pub fn parse_humor(&self, text: &str) -> BTreeSet<String> {
        self.scan(TraitTable::Humor, text)
    }

    pub fn parse_boundaries(&self, text: &str) -> BTreeSet<String> {
        self.scan(TraitTable::Boundary, text)
    }

    /// Sorted, de-duplicated vocabulary of one table
    pub fn suggest_keywords(&self, table: TraitTable) -> Vec<&'static str> {
        let set: BTreeSet<&'static str> = table
            .raw()
            .iter()
            .flat_map(|(_, keywords)| keywords.iter().copied())
            .collect();
        set.into_iter().collect()
    }

    fn scan(&self, table: TraitTable, text: &str) -> BTreeSet<String> {
        let mut tags = BTreeSet::new();
        if text.trim().is_empty() {
            return tags;
        }
        let lower = text.to_lowercase();
        for group in table.groups() {
            if let Some((keyword, _)) = group.patterns.iter().find(|(_, re)| re.is_match(&lower)) {
                tracing::debug!(tag = group.id, keyword = *keyword, "trait keyword matched");
                tags.insert(group.id.to_string());
            }
        }
        tags
    }
}

// =============================================================================
// TESTS
// =============================================================================
