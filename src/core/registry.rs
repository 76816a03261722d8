//! Trait Registry: the immutable template table, built once at startup
//!
//! Lookups are keyed by (category, tag). A tag without a category hint only
//! resolves when it is unique across the whole table.

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use sha2::{Digest, Sha256};

use crate::error::{OreadError, Result};
use crate::types::{DirectiveBucket, PersonalityProfile, TemplateTable, TraitTemplate, DEFAULT_EMOTION_KEY};

/// Built-in template table
const BUILTIN_TEMPLATES: &str = include_str!("../../data/trait_templates.json");

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Read-only template registry
#[derive(Debug, Clone)]
pub struct TraitRegistry {
    version: String,
    fingerprint: String,
    templates: Vec<TraitTemplate>,
    by_id: HashMap<String, usize>,
    /// (category, tag), normalized
    by_key: HashMap<(String, String), usize>,
    /// tag, normalized -> every template carrying it
    by_tag: HashMap<String, Vec<usize>>,
    /// Display category -> template indices, first-seen order
    categories: IndexMap<String, Vec<usize>>,
}

impl TraitRegistry {
    /// Build from the table embedded in the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_TEMPLATES)
    }

    /// Build from raw JSON; the fingerprint covers the exact bytes given
    pub fn from_json(raw: &str) -> Result<Self> {
        let table: TemplateTable = serde_json::from_str(raw)?;
        Self::build(table, sha256_hex(raw.as_bytes()))
    }

    /// Build from an already parsed table
    pub fn from_table(table: TemplateTable) -> Result<Self> {
        let canonical = serde_json::to_string(&table)?;
        Self::build(table, sha256_hex(canonical.as_bytes()))
    }

    fn build(table: TemplateTable, fingerprint: String) -> Result<Self> {
        let mut by_id = HashMap::new();
        let mut by_key = HashMap::new();
        let mut by_tag: HashMap<String, Vec<usize>> = HashMap::new();
        let mut categories: IndexMap<String, Vec<usize>> = IndexMap::new();

        for (index, template) in table.templates.iter().enumerate() {
            validate(template)?;

            if by_id.insert(template.id.clone(), index).is_some() {
                return Err(OreadError::DuplicateId(template.id.clone()));
            }

            let key = (normalize(&template.category), normalize(&template.tag));
            if by_key.insert(key, index).is_some() {
                return Err(OreadError::DuplicateTag {
                    category: template.category.clone(),
                    tag: template.tag.clone(),
                });
            }

            by_tag.entry(normalize(&template.tag)).or_default().push(index);
            categories.entry(template.category.clone()).or_default().push(index);
        }

        tracing::info!(
            templates = table.templates.len(),
            version = %table.version,
            fingerprint = %fingerprint,
            "trait registry built"
        );

        Ok(Self {
            version: table.version,
            fingerprint,
            templates: table.templates,
            by_id,
            by_key,
            by_tag,
            categories,
        })
    }

    /// Data version string from the table
    pub fn version(&self) -> &str {
        &self.version
    }

    /// SHA-256 hex of the table data
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// All templates in table order
    pub fn templates(&self) -> &[TraitTemplate] {
        &self.templates
    }

    /// Template by identifier
    pub fn get(&self, id: &str) -> Option<&TraitTemplate> {
        self.by_id.get(id).map(|&i| &self.templates[i])
    }

    /// Resolve a display tag.
    ///
    /// With a category the match is exact (case-insensitive). Without one the tag
    /// must be unique across categories; ambiguous tags resolve to nothing.
    pub fn lookup(&self, tag: &str, category: Option<&str>) -> Option<&TraitTemplate> {
        let tag_key = normalize(tag);
        match category {
            Some(category) => self
                .by_key
                .get(&(normalize(category), tag_key))
                .map(|&i| &self.templates[i]),
            None => match self.by_tag.get(&tag_key).map(|v| v.as_slice()) {
                Some([only]) => Some(&self.templates[*only]),
                Some(many) if many.len() > 1 => {
                    tracing::warn!(tag, candidates = many.len(), "ambiguous tag lookup without category");
                    None
                }
                _ => None,
            },
        }
    }

    /// Templates routed to one bucket, table order
    pub fn templates_in_bucket(&self, bucket: DirectiveBucket) -> Vec<&TraitTemplate> {
        self.templates.iter().filter(|t| t.bucket == bucket).collect()
    }

    /// Display categories, first-seen order
    pub fn categories(&self) -> Vec<&str> {
        self.categories.keys().map(|k| k.as_str()).collect()
    }

    /// Display tags listed under a category
    pub fn tags_in_category(&self, category: &str) -> Vec<&str> {
        let wanted = normalize(category);
        self.categories
            .iter()
            .find(|(name, _)| normalize(name) == wanted)
            .map(|(_, indices)| indices.iter().map(|&i| self.templates[i].tag.as_str()).collect())
            .unwrap_or_default()
    }

    /// Every emotion key used by any template (including "default")
    pub fn emotion_keys(&self) -> BTreeSet<&str> {
        self.templates
            .iter()
            .flat_map(|t| t.emotions.keys().map(|k| k.as_str()))
            .collect()
    }

    /// Turn template identifiers (e.g. Trait Parser output) into a profile.
    /// Unknown identifiers are skipped.
    pub fn profile_from_ids<I, S>(&self, ids: I) -> PersonalityProfile
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut profile = PersonalityProfile::new();
        for id in ids {
            match self.get(id.as_ref()) {
                Some(t) => profile.select(&t.category, &t.tag),
                None => tracing::debug!(id = id.as_ref(), "unknown template id skipped"),
            }
        }
        profile
    }
}

fn validate(template: &TraitTemplate) -> Result<()> {
    if template.priority > 100 {
        return Err(OreadError::PriorityOutOfRange {
            id: template.id.clone(),
            priority: template.priority,
        });
    }
    if !template.emotions.contains_key(DEFAULT_EMOTION_KEY) {
        return Err(OreadError::MissingDefault(template.id.clone()));
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry() -> TraitRegistry {
        TraitRegistry::builtin().unwrap()
    }

    fn one_template(id: &str, tag: &str, category: &str, priority: u8, default: bool) -> String {
        let emotions = if default {
            r#"{"default": {"tone": "t", "action": "a"}}"#
        } else {
            r#"{"joy": {"tone": "t", "action": "a"}}"#
        };
        format!(
            r#"{{"id": "{}", "tag": "{}", "category": "{}", "bucket": "emotional_tone", "priority": {}, "emotions": {}}}"#,
            id, tag, category, priority, emotions
        )
    }

    fn table(entries: &[String]) -> String {
        format!(r#"{{"version": "test", "templates": [{}]}}"#, entries.join(","))
    }

    #[test]
    fn test_builtin_loads() {
        let reg = registry();
        assert!(reg.len() > 100);
        assert_eq!(reg.version(), "3.1.0");
        assert_eq!(reg.fingerprint().len(), 64);
    }

    #[test]
    fn test_every_template_has_default() {
        let reg = registry();
        for t in reg.templates() {
            assert!(t.emotions.contains_key("default"), "{} lacks default", t.id);
            assert!(t.priority <= 100);
        }
    }

    #[test]
    fn test_lookup_with_category() {
        let reg = registry();
        let t = reg.lookup("Reserved", Some("Platonic Touch")).unwrap();
        assert_eq!(t.bucket, DirectiveBucket::PlatonicBoundaries);
        let t = reg.lookup("reserved", Some("emotional expression")).unwrap();
        assert_eq!(t.bucket, DirectiveBucket::EmotionalTone);
    }

    #[test]
    fn test_ambiguous_lookup_without_category_is_none() {
        let reg = registry();
        assert!(reg.lookup("Reserved", None).is_none());
        assert!(reg.lookup("Friendly", None).is_none());
        assert!(reg.lookup("Passionate", None).is_none());
    }

    #[test]
    fn test_unique_lookup_without_category() {
        let reg = registry();
        assert_eq!(reg.lookup("Patient", None).map(|t| t.id.as_str()), Some("htc_patient"));
        assert!(reg.lookup("Nonexistent", None).is_none());
        assert!(reg.lookup("Patient", Some("Core Values")).is_none());
    }

    #[test]
    fn test_get_by_id() {
        let reg = registry();
        assert_eq!(reg.get("ee_passionate").map(|t| t.priority), Some(90));
        assert!(reg.get("missing").is_none());
    }

    #[test]
    fn test_parser_vocabulary_is_registered() {
        let reg = registry();
        for id in [
            "physical_affection_high", "communication_direct", "humor_dark",
            "avoid_petnames", "explicit_consent", "slow_intimacy", "emotional_shutdown",
        ] {
            assert!(reg.get(id).is_some(), "missing {}", id);
        }
    }

    #[test]
    fn test_categories_and_tags() {
        let reg = registry();
        let cats = reg.categories();
        assert_eq!(cats[0], "Emotional Expression");
        assert!(cats.contains(&"Platonic Touch"));
        assert_eq!(
            reg.tags_in_category("platonic touch"),
            vec!["No Touch", "Reserved", "Friendly", "Affectionate"]
        );
        assert!(reg.tags_in_category("Nope").is_empty());
    }

    #[test]
    fn test_context_bucket_populated() {
        let reg = registry();
        assert!(!reg.templates_in_bucket(DirectiveBucket::Context).is_empty());
        assert!(reg.emotion_keys().contains("default"));
    }

    #[test]
    fn test_profile_from_ids() {
        let reg = registry();
        let profile = reg.profile_from_ids(["communication_direct", "bogus", "physical_affection_high"]);
        assert_eq!(
            profile.flatten(),
            vec![("Communication Style", "Direct"), ("Affection Style", "Physically Affectionate")]
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let raw = table(&[
            one_template("a", "A", "Cat", 50, true),
            one_template("a", "B", "Cat", 50, true),
        ]);
        assert!(matches!(TraitRegistry::from_json(&raw), Err(OreadError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_duplicate_tag_in_category_rejected() {
        let raw = table(&[
            one_template("a", "Warm", "Cat", 50, true),
            one_template("b", "warm", "cat", 50, true),
        ]);
        assert!(matches!(TraitRegistry::from_json(&raw), Err(OreadError::DuplicateTag { .. })));
    }

    #[test]
    fn test_missing_default_rejected() {
        let raw = table(&[one_template("a", "A", "Cat", 50, false)]);
        assert!(matches!(TraitRegistry::from_json(&raw), Err(OreadError::MissingDefault(_))));
    }

    #[test]
    fn test_priority_out_of_range_rejected() {
        let raw = table(&[one_template("a", "A", "Cat", 101, true)]);
        assert!(matches!(
            TraitRegistry::from_json(&raw),
            Err(OreadError::PriorityOutOfRange { priority: 101, .. })
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(TraitRegistry::from_json("{not json"), Err(OreadError::TemplateData(_))));
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = TraitRegistry::from_json(&table(&[one_template("a", "A", "Cat", 50, true)])).unwrap();
        let b = TraitRegistry::from_json(&table(&[one_template("a", "A", "Cat", 60, true)])).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), TraitRegistry::from_json(&table(&[one_template("a", "A", "Cat", 50, true)])).unwrap().fingerprint());
    }
}
