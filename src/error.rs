//! Crate errors.
//!
//! Only startup paths fail: building the trait registry and loading configuration.
//! Synthesis, detection and assembly never return errors.

use thiserror::Error;

/// Errors raised while loading data or configuration, or reported by a generator.
#[derive(Debug, Error)]
pub enum OreadError {
    /// Template table is not valid JSON or does not match the schema.
    #[error("template data error: {0}")]
    TemplateData(#[from] serde_json::Error),

    /// Two templates share an identifier.
    #[error("duplicate template id: {0}")]
    DuplicateId(String),

    /// Two templates share a display tag within one category.
    #[error("duplicate tag '{tag}' in category '{category}'")]
    DuplicateTag { category: String, tag: String },

    /// A template lacks a usable "default" emotion entry.
    #[error("template '{0}' has no default emotion response")]
    MissingDefault(String),

    /// Priority outside 0-100.
    #[error("template '{id}' priority {priority} out of range 0-100")]
    PriorityOutOfRange { id: String, priority: u8 },

    /// Config file could not be read.
    #[error("config IO error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Config file is not valid TOML.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A session or profile file given on the command line could not be used.
    #[error("invalid input file {path}: {reason}")]
    Input { path: String, reason: String },

    /// A result could not be written as JSON.
    #[error("could not serialize output: {0}")]
    Output(#[source] serde_json::Error),

    /// The external text generator failed.
    #[error("generation failed: {0}")]
    Generation(String),
}

pub type Result<T> = std::result::Result<T, OreadError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn test_output_error_is_not_template_error() {
        // Non-string map keys cannot be written as JSON
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "x");
        let err = serde_json::to_string(&map).unwrap_err();
        let out = OreadError::Output(err);
        assert!(out.to_string().starts_with("could not serialize output: "));
        assert!(!out.to_string().contains("template data"));
    }

    #[test]
    fn test_json_errors_convert_to_template_data() {
        let err: OreadError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, OreadError::TemplateData(_)));
        assert_eq!(
            OreadError::Input { path: "s.json".to_string(), reason: "missing".to_string() }.to_string(),
            "invalid input file s.json: missing"
        );
    }
}
