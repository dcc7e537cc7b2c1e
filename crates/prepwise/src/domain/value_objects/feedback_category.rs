//! FeedbackCategory - The fixed evaluation categories of an interview

use serde::{Deserialize, Serialize};

/// Evaluation category the feedback model must score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    CommunicationSkills,
    TechnicalKnowledge,
    ProblemSolving,
    CulturalRoleFit,
    ConfidenceClarity,
}

impl FeedbackCategory {
    /// Every category, in the order the prompt lists them
    pub const ALL: [FeedbackCategory; 5] = [
        FeedbackCategory::CommunicationSkills,
        FeedbackCategory::TechnicalKnowledge,
        FeedbackCategory::ProblemSolving,
        FeedbackCategory::CulturalRoleFit,
        FeedbackCategory::ConfidenceClarity,
    ];

    /// Human-readable name used in the prompt and in persisted scores
    pub fn display_name(&self) -> &'static str {
        match self {
            FeedbackCategory::CommunicationSkills => "Communication Skills",
            FeedbackCategory::TechnicalKnowledge => "Technical Knowledge",
            FeedbackCategory::ProblemSolving => "Problem-Solving",
            FeedbackCategory::CulturalRoleFit => "Cultural & Role Fit",
            FeedbackCategory::ConfidenceClarity => "Confidence & Clarity",
        }
    }

    /// What the category measures
    pub fn description(&self) -> &'static str {
        match self {
            FeedbackCategory::CommunicationSkills => {
                "Clarity, articulation, structured responses."
            }
            FeedbackCategory::TechnicalKnowledge => {
                "Understanding of key concepts for the role."
            }
            FeedbackCategory::ProblemSolving => {
                "Ability to analyze problems and propose solutions."
            }
            FeedbackCategory::CulturalRoleFit => {
                "Alignment with company values and job role."
            }
            FeedbackCategory::ConfidenceClarity => {
                "Confidence in responses, engagement, and clarity."
            }
        }
    }

    /// Resolve a category from a model-produced name.
    ///
    /// Matching ignores case, whitespace and punctuation, so
    /// "problem solving" and "**Problem-Solving**" both resolve.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        Self::ALL
            .into_iter()
            .find(|category| normalize(category.display_name()) == wanted)
    }
}

impl std::fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
