//! Deterministic parsing of oracle output. The oracle is asked for strict
//! JSON but routinely wraps it in a markdown code fence; strip one fence
//! (with or without a language tag) before parsing. A reply that still does
//! not parse becomes an [`ErrorJudgment`] carrying the parse error and a
//! bounded snippet of the raw text.

use crate::model::ErrorJudgment;
use serde::de::DeserializeOwned;

const RAW_SNIPPET_LEN: usize = 500;

pub(crate) fn parse_judgment<T: DeserializeOwned>(raw: &str) -> Result<T, ErrorJudgment> {
    let stripped = strip_code_fence(raw);
    serde_json::from_str(stripped).map_err(|e| {
        tracing::warn!(error = %e, "judge output failed to parse as JSON");
        ErrorJudgment {
            error: e.to_string(),
            raw: snippet(stripped),
        }
    })
}

/// Extract the fenced body when present, otherwise return the trimmed input.
/// An unterminated fence keeps everything after the opening marker.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    if let Some(start) = text.find("```json") {
        let rest = &text[start + "```json".len()..];
        let end = rest.find("```").unwrap_or(rest.len());
        return rest[..end].trim();
    }
    if let Some(start) = text.find("```") {
        let rest = &text[start + "```".len()..];
        let end = rest.find("```").unwrap_or(rest.len());
        return rest[..end].trim();
    }
    text
}

fn snippet(text: &str) -> String {
    let mut end = RAW_SNIPPET_LEN.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JudgmentResult;

    const JUDGMENT: &str = r#"{
        "contextual_understanding": 1,
        "mechanistic_reasoning": 1,
        "novel_insight": 0,
        "authentic_engagement": 1,
        "total_score": 3,
        "brief_reasoning": "solid"
    }"#;

    #[test]
    fn parses_bare_json() {
        let j: JudgmentResult = parse_judgment(JUDGMENT).unwrap();
        assert_eq!(j.total_score, 3);
    }

    #[test]
    fn strips_fence_with_language_tag() {
        let wrapped = format!("```json\n{JUDGMENT}\n```");
        let j: JudgmentResult = parse_judgment(&wrapped).unwrap();
        assert_eq!(j.total_score, 3);
    }

    #[test]
    fn strips_fence_without_language_tag() {
        let wrapped = format!("```\n{JUDGMENT}\n```");
        let j: JudgmentResult = parse_judgment(&wrapped).unwrap();
        assert_eq!(j.brief_reasoning, "solid");
    }

    #[test]
    fn strips_fence_with_leading_prose() {
        let wrapped = format!("Here is my verdict:\n```json\n{JUDGMENT}\n```\nDone.");
        let j: JudgmentResult = parse_judgment(&wrapped).unwrap();
        assert_eq!(j.total_score, 3);
    }

    #[test]
    fn unterminated_fence_still_parses() {
        let wrapped = format!("```json\n{JUDGMENT}");
        let j: JudgmentResult = parse_judgment(&wrapped).unwrap();
        assert_eq!(j.total_score, 3);
    }

    #[test]
    fn parse_failure_truncates_raw_to_snippet() {
        let garbage = "x".repeat(2000);
        let err = parse_judgment::<JudgmentResult>(&garbage).unwrap_err();
        assert_eq!(err.raw.len(), 500);
        assert!(!err.error.is_empty());
    }

    #[test]
    fn snippet_respects_char_boundaries() {
        let garbage = "é".repeat(400); // 800 bytes, boundary at 500 splits a char
        let err = parse_judgment::<JudgmentResult>(&garbage).unwrap_err();
        assert!(err.raw.len() <= 500);
        assert!(err.raw.chars().all(|c| c == 'é'));
    }
}
