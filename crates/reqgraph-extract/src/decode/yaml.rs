use serde::{Deserialize, Deserializer};

use crate::error::DecodeError;

/// Top-level keys of the categorized document, in canonical order
pub const CATEGORY_KEYS: [&str; 3] = ["requirements", "constraints", "implicit_knowledge"];

/// The categorized YAML intermediate form.
///
/// ```yaml
/// requirements:
///   - id: R1
///     text: Respond within 1s
///     related_to:
///       - id: C1
///         relation: constrained_by
/// constraints:
///   - id: C1
///     text: Use the existing auth system
/// implicit_knowledge: []
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RequirementDocument {
    #[serde(default, deserialize_with = "nullable_sequence")]
    pub requirements: Vec<DocumentEntry>,

    #[serde(default, deserialize_with = "nullable_sequence")]
    pub constraints: Vec<DocumentEntry>,

    #[serde(default, deserialize_with = "nullable_sequence")]
    pub implicit_knowledge: Vec<DocumentEntry>,
}

/// One entry of a category
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentEntry {
    pub id: String,

    pub text: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Outbound relations from this entry
    #[serde(default, deserialize_with = "nullable_sequence")]
    pub related_to: Vec<Relation>,
}

/// An outbound relation to another entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Relation {
    /// Id of the related entry
    pub id: String,

    /// Relation tag, becomes the link label
    pub relation: String,
}

impl RequirementDocument {
    /// Total number of entries across all categories
    pub fn entry_count(&self) -> usize {
        self.requirements.len() + self.constraints.len() + self.implicit_knowledge.len()
    }
}

// `key:` with nothing after it is an empty category, not a type error
fn nullable_sequence<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a scanned YAML block into a categorized document.
///
/// At least one of [`CATEGORY_KEYS`] must be present; absent categories are
/// empty.
pub fn decode_yaml_document(block: &str) -> Result<RequirementDocument, DecodeError> {
    let value: serde_yaml::Value = serde_yaml::from_str(block)?;

    let mapping = value.as_mapping().ok_or_else(|| {
        DecodeError::UnexpectedShape("expected a YAML mapping at the top level".to_string())
    })?;

    if !CATEGORY_KEYS.iter().any(|key| mapping.contains_key(*key)) {
        return Err(DecodeError::NoRecognizedCategories);
    }

    Ok(serde_yaml::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_full_document() {
        let yaml = r#"
requirements:
  - id: R1
    text: Respond within 1s
    description: p99 latency of the login endpoint
    related_to:
      - id: C1
        relation: constrained_by
constraints:
  - id: C1
    text: Use existing auth
implicit_knowledge:
  - id: I1
    text: Users are on mobile networks
"#;

        let document = decode_yaml_document(yaml).unwrap();
        assert_eq!(document.entry_count(), 3);
        assert_eq!(
            document.requirements[0],
            DocumentEntry {
                id: "R1".to_string(),
                text: "Respond within 1s".to_string(),
                description: Some("p99 latency of the login endpoint".to_string()),
                related_to: vec![Relation {
                    id: "C1".to_string(),
                    relation: "constrained_by".to_string(),
                }],
            }
        );
        assert!(document.constraints[0].related_to.is_empty());
        assert_eq!(document.implicit_knowledge[0].description, None);
    }

    #[test]
    fn test_missing_categories_are_empty() {
        let document = decode_yaml_document("constraints:\n  - id: C1\n    text: x\n").unwrap();
        assert!(document.requirements.is_empty());
        assert!(document.implicit_knowledge.is_empty());
        assert_eq!(document.constraints.len(), 1);
    }

    #[test]
    fn test_null_category_and_relations_are_empty() {
        let document = decode_yaml_document(
            "requirements:\n  - id: R1\n    text: x\n    related_to:\nimplicit_knowledge:\n",
        )
        .unwrap();
        assert_eq!(document.entry_count(), 1);
        assert!(document.requirements[0].related_to.is_empty());
    }

    #[test]
    fn test_no_recognized_categories() {
        let err = decode_yaml_document("goals:\n  - id: G1\n    text: x\n").unwrap_err();
        assert!(matches!(err, DecodeError::NoRecognizedCategories));
    }

    #[test]
    fn test_non_mapping_document() {
        let err = decode_yaml_document("- just\n- a list\n").unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedShape(_)));

        let err = decode_yaml_document("plain prose without structure").unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedShape(_)));
    }

    #[test]
    fn test_entry_missing_text() {
        let err = decode_yaml_document("requirements:\n  - id: R1\n").unwrap_err();
        match err {
            DecodeError::Yaml(inner) => assert!(inner.to_string().contains("missing field `text`")),
            err => panic!("Expected Yaml error, got {:?}", err),
        }
    }

    #[test]
    fn test_invalid_yaml_syntax() {
        let err = decode_yaml_document("requirements: [\n  - id: R1\n").unwrap_err();
        assert!(matches!(err, DecodeError::Yaml(_)));
    }
}
