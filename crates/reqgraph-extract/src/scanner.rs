//! Locates the structured block inside free-form model output.
//!
//! Search order:
//! 1. a fenced block tagged with the target language (```` ```json ```` or
//!    ```` ```yaml ````), interior only
//! 2. JSON: the span from the first `{` to the last `}`
//! 3. YAML: everything from the first top-level category key to the end
//!
//! Only one candidate is produced. The scanner does not check that the
//! candidate parses; a wrong guess surfaces later as a decode or validation
//! error.

use lazy_static::lazy_static;
use regex::Regex;

use crate::decode::DecodeStrategy;
use crate::error::ExtractError;

lazy_static! {
    // Fenced block tagged json; the interior is captured lazily up to the closing fence
    static ref JSON_FENCE_REGEX: Regex = Regex::new(
        r"(?s)```[ \t]*(?i:json)[ \t]*\r?\n(.*?)```"
    ).unwrap();

    // Fenced block tagged yaml or yml
    static ref YAML_FENCE_REGEX: Regex = Regex::new(
        r"(?s)```[ \t]*(?i:ya?ml)[ \t]*\r?\n(.*?)```"
    ).unwrap();

    // Greedy outer braces
    static ref JSON_OBJECT_REGEX: Regex = Regex::new(r"(?s)\{.*\}").unwrap();

    // A category key at the start of a line
    static ref YAML_TOP_LEVEL_KEY_REGEX: Regex = Regex::new(
        r"(?m)^(?:requirements|constraints|implicit_knowledge)[ \t]*:"
    ).unwrap();

    // Any fence line, tagged or bare
    static ref FENCE_LINE_REGEX: Regex = Regex::new(r"(?m)^[ \t]*```").unwrap();
}

/// How a block was located
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOrigin {
    /// Interior of a language-tagged code fence
    Fenced,
    /// First `{` through last `}`
    BraceSpan,
    /// From a top-level category key to the next fence line or the end of the text
    TopLevelKey,
}

/// A candidate block, borrowed from the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedBlock<'a> {
    pub content: &'a str,
    pub origin: BlockOrigin,
}

/// Locate the block for `strategy`, or fail with `NoStructuredBlock`.
pub fn scan(text: &str, strategy: DecodeStrategy) -> Result<ScannedBlock<'_>, ExtractError> {
    let block = match strategy {
        DecodeStrategy::Json => scan_json_block(text),
        DecodeStrategy::Yaml => scan_yaml_block(text),
    };

    block.ok_or(ExtractError::NoStructuredBlock(strategy))
}

/// Find a JSON object candidate
pub fn scan_json_block(text: &str) -> Option<ScannedBlock<'_>> {
    fenced_block(text, &JSON_FENCE_REGEX).or_else(|| {
        JSON_OBJECT_REGEX.find(text).map(|m| ScannedBlock {
            content: m.as_str(),
            origin: BlockOrigin::BraceSpan,
        })
    })
}

/// Find a YAML document candidate
pub fn scan_yaml_block(text: &str) -> Option<ScannedBlock<'_>> {
    fenced_block(text, &YAML_FENCE_REGEX).or_else(|| {
        YAML_TOP_LEVEL_KEY_REGEX.find(text).map(|m| {
            let rest = &text[m.start()..];
            let end = FENCE_LINE_REGEX.find(rest).map_or(rest.len(), |fence| fence.start());
            ScannedBlock {
                content: rest[..end].trim_end(),
                origin: BlockOrigin::TopLevelKey,
            }
        })
    })
}

fn fenced_block<'a>(text: &'a str, fence: &Regex) -> Option<ScannedBlock<'a>> {
    fence
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|interior| ScannedBlock {
            content: interior.as_str().trim(),
            origin: BlockOrigin::Fenced,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_fence_interior() {
        let text = "Here is the graph:\n```json\n{\"nodes\": [], \"links\": []}\n```\n\
                    Hope this helps {:}";
        let block = scan_json_block(text).unwrap();

        assert_eq!(block.content, "{\"nodes\": [], \"links\": []}");
        assert_eq!(block.origin, BlockOrigin::Fenced);
    }

    #[test]
    fn test_json_fence_tag_is_case_insensitive() {
        let block = scan_json_block("```JSON\n{}\n```").unwrap();
        assert_eq!(block.origin, BlockOrigin::Fenced);
    }

    #[test]
    fn test_unfenced_json_uses_outer_braces() {
        let text = "Sure! {\"nodes\": [{\"id\": \"R1\"}], \"links\": []} Let me know.";
        let block = scan_json_block(text).unwrap();

        assert_eq!(block.content, "{\"nodes\": [{\"id\": \"R1\"}], \"links\": []}");
        assert_eq!(block.origin, BlockOrigin::BraceSpan);
    }

    #[test]
    fn test_brace_span_is_greedy() {
        // Two independent objects are swallowed into one candidate
        let block = scan_json_block("{\"a\": 1} and {\"b\": 2}").unwrap();
        assert_eq!(block.content, "{\"a\": 1} and {\"b\": 2}");
    }

    #[test]
    fn test_untagged_fence_falls_back_to_braces() {
        let block = scan_json_block("```\n{\"nodes\": []}\n```").unwrap();
        assert_eq!(block.origin, BlockOrigin::BraceSpan);
        assert_eq!(block.content, "{\"nodes\": []}");
    }

    #[test]
    fn test_no_json_block() {
        assert!(scan_json_block("Requirement: respond within 1s.").is_none());
        assert!(scan_json_block("only a closing } brace").is_none());

        let err = scan("no structure here", DecodeStrategy::Json).unwrap_err();
        assert!(matches!(err, ExtractError::NoStructuredBlock(DecodeStrategy::Json)));
    }

    #[test]
    fn test_yaml_fence_interior() {
        let text = "Result:\n```yaml\nrequirements:\n  - id: R1\n    text: x\n```\nDone.";
        let block = scan_yaml_block(text).unwrap();

        assert_eq!(block.content, "requirements:\n  - id: R1\n    text: x");
        assert_eq!(block.origin, BlockOrigin::Fenced);

        let block = scan_yaml_block("```yml\nconstraints: []\n```").unwrap();
        assert_eq!(block.content, "constraints: []");
    }

    #[test]
    fn test_unfenced_yaml_starts_at_first_category_key() {
        let text = "Here you go.\nconstraints:\n  - id: C1\n    text: x\nrequirements: []\n";
        let block = scan_yaml_block(text).unwrap();

        assert_eq!(block.content, "constraints:\n  - id: C1\n    text: x\nrequirements: []");
        assert_eq!(block.origin, BlockOrigin::TopLevelKey);
    }

    #[test]
    fn test_indented_or_inline_keys_are_not_top_level() {
        assert!(scan_yaml_block("The requirements: are listed below").is_none());
        assert!(scan_yaml_block("  requirements:\n  - id: R1").is_none());
        assert!(scan_yaml_block("Requirement: respond within 1s.").is_none());

        let err = scan("nothing", DecodeStrategy::Yaml).unwrap_err();
        assert!(matches!(err, ExtractError::NoStructuredBlock(DecodeStrategy::Yaml)));
    }

    #[test]
    fn test_unclosed_yaml_fence_falls_back_to_key() {
        let block = scan_yaml_block("```yaml\nrequirements:\n  - id: R1\n    text: x\n").unwrap();
        assert_eq!(block.origin, BlockOrigin::TopLevelKey);
        assert_eq!(block.content, "requirements:\n  - id: R1\n    text: x");
    }

    #[test]
    fn test_untagged_yaml_fence_stops_at_closing_fence() {
        let text = "Here:\n```\nrequirements:\n  - id: R1\n    text: x\n```\nAnything else?";
        let block = scan_yaml_block(text).unwrap();

        assert_eq!(block.origin, BlockOrigin::TopLevelKey);
        assert_eq!(block.content, "requirements:\n  - id: R1\n    text: x");
    }
}
