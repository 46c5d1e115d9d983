//! Score response parsing for rubric evaluation.
//!
//! Models are asked to return a bare JSON object but frequently wrap it in
//! code fences or surround it with prose. These functions are pure domain
//! logic: no I/O, just tolerant extraction followed by strict decoding.
//!
//! # Functions
//!
//! | Function | Use Case |
//! |----------|----------|
//! | [`extract_json_object`] | Slice the outermost `{ ... }` out of free text |
//! | [`parse_evaluation`] | Decode + validate a `{category, score, feedback}` object |

use crate::evaluation::entities::EvaluationResult;
use crate::rubric::spec::RubricSpec;
use serde::Deserialize;
use thiserror::Error;

/// Errors produced while turning a raw model response into a result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Score {score} for {category} is outside 0..={max}")]
    ScoreOutOfRange {
        category: String,
        score: i64,
        max: u32,
    },
}

/// The object shape the rubric prompt asks for.
#[derive(Debug, Deserialize)]
struct RawEvaluation {
    // Required by the contract; the configured category name wins.
    #[serde(rename = "category")]
    _category: String,
    score: i64,
    feedback: String,
}

/// Locate the first `{` and the last `}` and return the slice between them.
///
/// This drops code-fence markers (```` ```json ````) and any leading or
/// trailing prose in one step.
///
/// # Examples
///
/// ```
/// use judge_domain::rubric::parsing::extract_json_object;
///
/// let raw = "```json\n{\"score\": 3}\n```";
/// assert_eq!(extract_json_object(raw).unwrap(), "{\"score\": 3}");
/// assert!(extract_json_object("no braces here").is_err());
/// ```
pub fn extract_json_object(raw: &str) -> Result<&str, ParseError> {
    let start = raw
        .find('{')
        .ok_or_else(|| ParseError::MalformedResponse("no JSON object found".to_string()))?;
    let end = raw
        .rfind('}')
        .ok_or_else(|| ParseError::MalformedResponse("no JSON object found".to_string()))?;
    if end < start {
        return Err(ParseError::MalformedResponse(
            "closing brace precedes opening brace".to_string(),
        ));
    }
    Ok(&raw[start..=end])
}

/// Parse a raw model response into an [`EvaluationResult`] for `rubric`.
///
/// The returned result always carries the rubric's configured category
/// name, so report keys stay stable even when the model paraphrases it.
/// Scores outside `0..=rubric.max_score` are rejected, never clamped.
pub fn parse_evaluation(raw: &str, rubric: &RubricSpec) -> Result<EvaluationResult, ParseError> {
    let json = extract_json_object(raw)?;
    let decoded: RawEvaluation = serde_json::from_str(json)
        .map_err(|e| ParseError::MalformedResponse(e.to_string()))?;

    if !rubric.accepts(decoded.score) {
        return Err(ParseError::ScoreOutOfRange {
            category: rubric.category.clone(),
            score: decoded.score,
            max: rubric.max_score,
        });
    }

    // accepts() bounds the score to 0..=u32::MAX
    let score = u32::try_from(decoded.score).unwrap_or_default();
    Ok(EvaluationResult::new(
        rubric.category.clone(),
        score,
        decoded.feedback,
    ))
}
