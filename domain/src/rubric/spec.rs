//! Rubric definitions: what a category is worth and how it is judged.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named scoring category with a point ceiling and natural-language criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricSpec {
    /// Short category name, used as the report key (e.g. "Technical")
    pub category: String,
    /// Longer title shown to the model (e.g. "Technical Depth & Code Quality")
    pub title: String,
    /// Maximum points this category can award
    pub max_score: u32,
    /// Criteria description embedded in the prompt
    pub criteria: String,
}

impl RubricSpec {
    /// Create a validated rubric.
    ///
    /// Rejects an empty category name and a zero point ceiling.
    pub fn new(
        category: impl Into<String>,
        title: impl Into<String>,
        max_score: u32,
        criteria: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(DomainError::InvalidRubric(
                "category name must not be empty".to_string(),
            ));
        }
        if max_score == 0 {
            return Err(DomainError::InvalidRubric(format!(
                "{}: max_score must be positive",
                category
            )));
        }
        let mut title = title.into();
        if title.trim().is_empty() {
            title = category.clone();
        }
        Ok(Self {
            category,
            title,
            max_score,
            criteria: criteria.into(),
        })
    }

    /// Whether `score` lies inside `0..=max_score`.
    pub fn accepts(&self, score: i64) -> bool {
        (0..=i64::from(self.max_score)).contains(&score)
    }
}

/// Ordered, validated collection of rubrics for one evaluation run.
///
/// Invariants: at least one rubric, and category names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RubricSet(Vec<RubricSpec>);

impl RubricSet {
    pub fn new(rubrics: Vec<RubricSpec>) -> Result<Self, DomainError> {
        if rubrics.is_empty() {
            return Err(DomainError::NoRubrics);
        }
        let mut seen = HashSet::new();
        for rubric in &rubrics {
            if !seen.insert(rubric.category.as_str()) {
                return Err(DomainError::DuplicateCategory(rubric.category.clone()));
            }
        }
        Ok(Self(rubrics))
    }

    /// The five hackathon categories (maxes 25/25/20/15/15, total 100).
    pub fn hackathon_defaults() -> Self {
        Self(default_rubrics())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RubricSpec> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<&RubricSpec> {
        self.0.iter().find(|r| r.category == category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    /// Sum of all point ceilings.
    pub fn total_max(&self) -> u32 {
        self.0.iter().map(|r| r.max_score).sum()
    }

    pub fn categories(&self) -> Vec<String> {
        self.0.iter().map(|r| r.category.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a RubricSet {
    type Item = &'a RubricSpec;
    type IntoIter = std::slice::Iter<'a, RubricSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn rubric(category: &str, title: &str, max_score: u32, criteria: &str) -> RubricSpec {
    RubricSpec {
        category: category.to_string(),
        title: title.to_string(),
        max_score,
        criteria: criteria.to_string(),
    }
}

/// Built-in rubrics, in report order.
pub fn default_rubrics() -> Vec<RubricSpec> {
    vec![
        rubric(
            "Innovation",
            "Innovation & Problem Understanding",
            25,
            r#"How novel, creative, and well-understood the problem statement is.
Content to look for:
- README clarity: does it describe the problem clearly?
- Problem statement: is the problem real-world, challenging, and relevant?
- Approach novelty: are they using creative methods or standard solutions?
- Differentiation: how is this solution different from existing solutions?

Scoring guidelines:
| 21-25 | Novel solution, deep understanding of the problem, clearly identified need. |
| 16-20 | Some originality, understands the problem, limited novelty.                 |
| 11-15 | Basic understanding of the problem, incremental innovation.                 |
| 6-10  | Minimal understanding; solution is mostly generic or obvious.              |
| 0-5   | No clear understanding or innovation present.                              |"#,
        ),
        rubric(
            "Technical",
            "Technical Depth & Code Quality",
            25,
            r#"Assess algorithmic depth, documentation, architecture, and coding best practices.
Content to look for:
- Code quality: style compliance, readable names, modularity.
- Implementation correctness: does the code follow the proposed approach?
- Dependencies: appropriate libraries and a clean setup (requirements, lock files).
- Error handling and testing: are there tests or exception handling?

Scoring guidelines:
| 21-25 | Well-structured, efficient, readable; documented with error handling. |
| 16-20 | Works correctly and is readable; minor structural issues.            |
| 11-15 | Functions but has noticeable readability or structural issues.      |
| 6-10  | Major issues; partially works or is hard to read.                    |
| 0-5   | Does not work or is unstructured and unreadable.                     |"#,
        ),
        rubric(
            "Feasibility",
            "Feasibility & Completeness",
            20,
            r#"Assess if the project is functional, complete, and deployable.
Content to look for:
- Working prototype: does the code run without major errors?
- Scope coverage: are all parts of the problem addressed?
- Data availability: are datasets included or clearly referenced?
- Instructions: clear setup instructions in the README.

Scoring guidelines:
| 16-20 | Fully implementable, features complete, constraints addressed. |
| 11-15 | Mostly feasible; minor gaps or missing features.              |
| 6-10  | Partially feasible; several features incomplete.             |
| 0-5   | Not feasible; major features missing or impractical.         |"#,
        ),
        rubric(
            "Impact",
            "Impact & Scalability",
            15,
            r#"Evaluate societal or business impact, target audience, and scalability.
Content to look for:
- Practical applicability: who benefits from this solution?
- Data/model scalability: can it handle larger datasets?
- Extendibility: can others build upon it?
- Future potential: does it open opportunities for improvement?

Scoring guidelines:
| 13-15 | High potential impact, scales effectively, deployable broadly. |
| 9-12  | Moderate impact; some scalability limitations.                 |
| 5-8   | Limited impact or scalability.                                 |
| 0-4   | No clear impact or scalability.                                |"#,
        ),
        rubric(
            "Presentation",
            "Presentation & Communication",
            15,
            r#"Assess how well the project communicates its idea through the repository.
Content to look for:
- README structure: overview, motivation, usage, results.
- Visual aids: diagrams, screenshots, demo links or notebooks with outputs.
- Narrative: is the problem-solution story easy to follow for a judge?
- Polish: consistent formatting, no placeholder text, credits and license.

Scoring guidelines:
| 13-15 | Clear, engaging, well-organized material with supporting visuals. |
| 9-12  | Understandable with minor gaps in structure or visuals.          |
| 5-8   | Hard to follow; key information is missing.                      |
| 0-4   | No meaningful presentation of the project.                       |"#,
        ),
    ]
}

/// Rubric applied to the presentation video analysis.
///
/// Five criteria scored 0-3 each, so the ceiling is 15.
pub fn video_rubric() -> RubricSpec {
    rubric(
        "Video Presentation Analysis",
        "Video Presentation Analysis",
        15,
        "Clarity & communication, structure & organization, delivery & presentation skills, \
         content & substance, visual aids & production (0-3 points each).",
    )
}
