//! Recovers the JSON object from a model's free-form reply.
//!
//! Models do not reliably honor the requested fencing, so extraction is an
//! ordered chain of strategies. The first strategy that yields a candidate
//! wins; later strategies never run once an earlier one matched.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::errors::AnalysisError;

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fence pattern is valid"));

/// A single way of locating a JSON object inside model output.
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the candidate substring, or `None` if this strategy does not apply.
    fn extract<'a>(&self, text: &'a str) -> Option<&'a str>;
}

/// Body of the first ```` ```json ```` fenced block. Whitespace hugging the fences is dropped.
pub struct FencedJsonBlock;

impl ExtractionStrategy for FencedJsonBlock {
    fn name(&self) -> &'static str {
        "fenced_json_block"
    }

    fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        JSON_FENCE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|body| !body.is_empty())
    }
}

/// Inclusive span from the first `{` to the last `}` in the whole text.
pub struct BraceSpan;

impl ExtractionStrategy for BraceSpan {
    fn name(&self) -> &'static str {
        "brace_span"
    }

    fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        (start < end).then(|| &text[start..=end])
    }
}

/// Strategies in priority order.
pub static STRATEGIES: &[&dyn ExtractionStrategy] = &[&FencedJsonBlock, &BraceSpan];

/// Runs the strategy chain over `text`.
pub fn extract_json_candidate(text: &str) -> Result<&str, AnalysisError> {
    for strategy in STRATEGIES {
        if let Some(candidate) = strategy.extract(text) {
            debug!(
                strategy = strategy.name(),
                candidate_len = candidate.len(),
                "Extracted JSON candidate from model reply"
            );
            return Ok(candidate);
        }
    }
    Err(AnalysisError::Extraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_block_is_returned_exactly() {
        let reply = "Here you go:\n```json\n{\"userScore\": 75,\n  \"x\": [1, 2]}\n```\nGood luck!";
        assert_eq!(
            extract_json_candidate(reply).unwrap(),
            "{\"userScore\": 75,\n  \"x\": [1, 2]}"
        );
    }

    #[test]
    fn test_fence_wins_over_braces_elsewhere() {
        let reply = "Note {this} first.\n```json\n{\"a\": 1}\n```\nand {that} after.";
        assert_eq!(extract_json_candidate(reply).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_first_fence_is_used() {
        let reply = "```json\n{\"a\": 1}\n```\n```json\n{\"b\": 2}\n```";
        assert_eq!(extract_json_candidate(reply).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_fence_without_newlines() {
        assert_eq!(
            extract_json_candidate("```json{\"a\":1}```").unwrap(),
            "{\"a\":1}"
        );
    }

    #[test]
    fn test_json_prefixed_tags_match_the_fence() {
        // ```jsonc is treated as a json fence; the tag suffix stays in the body.
        assert_eq!(
            extract_json_candidate("```jsonc\n{\"a\": 1}\n```").unwrap(),
            "c\n{\"a\": 1}"
        );
    }

    #[test]
    fn test_brace_span_when_no_fence() {
        let reply = "Sure! Here is the analysis: { \"userScore\": 10, \"nested\": {\"k\": 1} } Hope it helps.";
        assert_eq!(
            extract_json_candidate(reply).unwrap(),
            "{ \"userScore\": 10, \"nested\": {\"k\": 1} }"
        );
    }

    #[test]
    fn test_untagged_fence_falls_back_to_braces() {
        let reply = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json_candidate(reply).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_empty_fence_falls_back_to_braces() {
        let reply = "```json\n```\nanyway: {\"a\": 1}";
        assert_eq!(extract_json_candidate(reply).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_no_braces_fails() {
        let err = extract_json_candidate("I cannot evaluate this profile.").unwrap_err();
        assert!(matches!(err, AnalysisError::Extraction));
    }

    #[test]
    fn test_only_opening_brace_fails() {
        assert!(extract_json_candidate("partial { output").is_err());
    }

    #[test]
    fn test_reversed_braces_fail() {
        assert!(extract_json_candidate("} backwards {").is_err());
    }

    #[test]
    fn test_empty_reply_fails() {
        assert!(extract_json_candidate("").is_err());
    }

    #[test]
    fn test_strategy_order() {
        let names: Vec<&str> = STRATEGIES.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["fenced_json_block", "brace_span"]);
    }
}
