use crate::rubric::parsing::{ParseError, extract_json_object};
use crate::rubric::spec::RubricSpec;
use serde::Deserialize;

/// How many strengths / improvements make it into the feedback.
const TOP_ITEMS: usize = 3;

/// Points available per video criterion.
pub const CRITERION_MAX: u32 = 3;

/// Score for a single video criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CriterionScore {
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub feedback: String,
}

/// The five criteria, in display order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CriteriaScores {
    pub clarity_communication: Option<CriterionScore>,
    pub structure_organization: Option<CriterionScore>,
    pub delivery_presentation: Option<CriterionScore>,
    pub content_substance: Option<CriterionScore>,
    pub visual_production: Option<CriterionScore>,
}

impl CriteriaScores {
    fn entries(&self) -> impl Iterator<Item = (&'static str, &CriterionScore)> {
        [
            ("Clarity & Communication", &self.clarity_communication),
            ("Structure & Organization", &self.structure_organization),
            ("Delivery & Presentation", &self.delivery_presentation),
            ("Content & Substance", &self.content_substance),
            ("Visual Aids & Production", &self.visual_production),
        ]
        .into_iter()
        .filter_map(|(name, score)| score.as_ref().map(|s| (name, s)))
    }
}

/// Structured answer to the video evaluation prompt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoAssessment {
    pub total_score: Option<i64>,
    pub criteria_scores: CriteriaScores,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub overall_feedback: String,
    pub recommendations: Vec<String>,
}

impl VideoAssessment {
    /// Decode the assessment out of a raw model response.
    pub fn from_response(raw: &str) -> Result<Self, ParseError> {
        let json = extract_json_object(raw)?;
        serde_json::from_str(json).map_err(|e| ParseError::MalformedResponse(e.to_string()))
    }

    /// Reported total, or the sum of criteria when the model left it out.
    pub fn total(&self) -> i64 {
        self.total_score
            .unwrap_or_else(|| self.criteria_scores.entries().map(|(_, c)| c.score).sum())
    }

    /// Human-readable feedback: overall summary, breakdown, top strengths
    /// and top improvement areas.
    pub fn feedback(&self) -> String {
        let mut sections = Vec::new();

        if !self.overall_feedback.trim().is_empty() {
            sections.push(format!("Overall: {}", self.overall_feedback.trim()));
        }

        let breakdown: Vec<String> = self
            .criteria_scores
            .entries()
            .map(|(name, c)| format!("- {}: {}/{}", name, c.score, CRITERION_MAX))
            .collect();
        if !breakdown.is_empty() {
            sections.push(format!("Breakdown:\n{}", breakdown.join("\n")));
        }

        if let Some(list) = bullet_list(&self.strengths) {
            sections.push(format!("Strengths:\n{}", list));
        }
        if let Some(list) = bullet_list(&self.areas_for_improvement) {
            sections.push(format!("Areas for Improvement:\n{}", list));
        }

        if sections.is_empty() {
            "Evaluation completed.".to_string()
        } else {
            sections.join("\n\n")
        }
    }
}

fn bullet_list(items: &[String]) -> Option<String> {
    let lines: Vec<String> = items
        .iter()
        .filter(|s| !s.trim().is_empty())
        .take(TOP_ITEMS)
        .map(|s| format!("- {}", s.trim()))
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Convert a raw video assessment into the rubric response contract.
///
/// The score is passed through unclamped; range validation is left to
/// [`parse_evaluation`](crate::rubric::parsing::parse_evaluation).
pub fn summarize_assessment(raw: &str, rubric: &RubricSpec) -> Result<String, ParseError> {
    let assessment = VideoAssessment::from_response(raw)?;
    Ok(serde_json::json!({
        "category": rubric.category,
        "score": assessment.total(),
        "feedback": assessment.feedback(),
    })
    .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rubric::parsing::parse_evaluation;
    use crate::rubric::spec::video_rubric;

    const SAMPLE: &str = r#"Here you go:
```json
{
    "total_score": 11,
    "criteria_scores": {
        "clarity_communication": {"score": 3, "feedback": "Clear voice"},
        "structure_organization": {"score": 2, "feedback": "Good flow"},
        "delivery_presentation": {"score": 2, "feedback": "Confident"},
        "content_substance": {"score": 2, "feedback": "Solid"},
        "visual_production": {"score": 2, "feedback": "Decent slides"}
    },
    "strengths": ["Clear demo", "Good pacing", "Strong opening", "Nice visuals"],
    "areas_for_improvement": ["More data"],
    "overall_feedback": "A well-rounded pitch.",
    "recommendations": ["Practice the ending"]
}
```"#;

    #[test]
    fn test_from_response_fenced() {
        let assessment = VideoAssessment::from_response(SAMPLE).unwrap();
        assert_eq!(assessment.total(), 11);
        assert_eq!(assessment.strengths.len(), 4);
    }

    #[test]
    fn test_feedback_sections() {
        let feedback = VideoAssessment::from_response(SAMPLE).unwrap().feedback();
        assert!(feedback.starts_with("Overall: A well-rounded pitch."));
        assert!(feedback.contains("- Clarity & Communication: 3/3"));
        assert!(feedback.contains("Strengths:\n- Clear demo\n- Good pacing\n- Strong opening"));
        assert!(!feedback.contains("Nice visuals"));
        assert!(feedback.contains("Areas for Improvement:\n- More data"));
    }

    #[test]
    fn test_total_falls_back_to_criteria_sum() {
        let raw = r#"{"criteria_scores": {"clarity_communication": {"score": 2}, "content_substance": {"score": 3}}}"#;
        assert_eq!(VideoAssessment::from_response(raw).unwrap().total(), 5);
    }

    #[test]
    fn test_empty_assessment_feedback() {
        let assessment = VideoAssessment::from_response("{}").unwrap();
        assert_eq!(assessment.total(), 0);
        assert_eq!(assessment.feedback(), "Evaluation completed.");
    }

    #[test]
    fn test_summarize_feeds_rubric_parser() {
        let rubric = video_rubric();
        let summary = summarize_assessment(SAMPLE, &rubric).unwrap();
        let result = parse_evaluation(&summary, &rubric).unwrap();
        assert_eq!(result.category, rubric.category);
        assert_eq!(result.score, 11);
    }

    #[test]
    fn test_summarize_out_of_range_total_rejected_by_parser() {
        let rubric = video_rubric();
        let summary = summarize_assessment(r#"{"total_score": 40}"#, &rubric).unwrap();
        assert!(matches!(
            parse_evaluation(&summary, &rubric),
            Err(ParseError::ScoreOutOfRange { score: 40, .. })
        ));
    }

    #[test]
    fn test_summarize_not_json() {
        assert!(summarize_assessment("the video was nice", &video_rubric()).is_err());
    }
}
