//! Prompt templates for rubric and video evaluation

use crate::rubric::spec::RubricSpec;

/// Templates for generating evaluation prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt shared by all rubric evaluators
    pub fn rubric_system() -> &'static str {
        r#"You are an expert hackathon evaluator.
You judge exactly one category at a time and answer with strict JSON only.
Base every judgement on the repository content you are given and cite files where possible."#
    }

    /// User prompt for one rubric over the fetched repository content
    pub fn rubric_prompt(rubric: &RubricSpec, repo_content: &str) -> String {
        format!(
            r#"You are responsible for the category: **{title}**

Evaluate ONLY this category for the provided GitHub repository content.

Criteria Description:
{criteria}

Return ONLY valid JSON, nothing else, like this:

{{
  "category": "{category}",
  "score": <integer between 0 and {max}>,
  "feedback": "<your brief feedback with code citations>"
}}

Rules:
1. Do NOT include any extra text or explanation
2. Do NOT wrap the answer in markdown
3. The answer must be a single valid JSON object

Repository content:
{content}"#,
            title = rubric.title,
            criteria = rubric.criteria,
            category = rubric.category,
            max = rubric.max_score,
            content = repo_content,
        )
    }

    /// Prompt sent alongside the presentation video
    pub fn video_prompt() -> &'static str {
        r#"Evaluate this presentation video and provide a detailed assessment with scores.

SCORING RUBRIC (Total: 15 points):

1. CLARITY & COMMUNICATION (0-3 points)
   - Voice clarity and articulation
   - Pace and rhythm of speech
   - Audio quality
   - Language proficiency

2. STRUCTURE & ORGANIZATION (0-3 points)
   - Logical flow and structure
   - Introduction, body, conclusion
   - Time management
   - Smooth transitions

3. DELIVERY & PRESENTATION SKILLS (0-3 points)
   - Confidence and presence
   - Eye contact and body language
   - Enthusiasm and engagement
   - Professional appearance

4. CONTENT & SUBSTANCE (0-3 points)
   - Depth of content
   - Relevance and accuracy
   - Problem-solution clarity
   - Innovation and creativity

5. VISUAL AIDS & PRODUCTION (0-3 points)
   - Slide quality and design
   - Visual demonstrations
   - Video production quality
   - Use of supporting materials

EVALUATION FORMAT - Return ONLY valid JSON:

{
    "total_score": [0-15],
    "criteria_scores": {
        "clarity_communication": {"score": [0-3], "feedback": "Detailed feedback"},
        "structure_organization": {"score": [0-3], "feedback": "Detailed feedback"},
        "delivery_presentation": {"score": [0-3], "feedback": "Detailed feedback"},
        "content_substance": {"score": [0-3], "feedback": "Detailed feedback"},
        "visual_production": {"score": [0-3], "feedback": "Detailed feedback"}
    },
    "strengths": ["List 3-5 key strengths"],
    "areas_for_improvement": ["List 3-5 areas for improvement"],
    "overall_feedback": "Comprehensive summary",
    "recommendations": ["Specific actionable recommendations"]
}

Be objective and thorough. Provide specific examples from the video."#
    }
}
