use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier assigned to each evaluated posting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

/// A scraped or imported job posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub scraped_at: Option<DateTime<Utc>>,
}

/// Candidate seniority bracket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    #[default]
    Mid,
    Senior,
}

/// What the candidate is looking for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPreferences {
    #[serde(default)]
    pub job_titles: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub min_salary: Option<f64>,
}

/// Candidate CV content plus search preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub cv_content: String,
    pub preferences: SearchPreferences,
}

/// Lifecycle of an evaluated posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    /// Scored below the match threshold; terminal.
    BelowThreshold,
    /// Cleared the threshold, critique not yet applied.
    Matched,
    /// Critique approved the match.
    Approved,
    /// Critique rejected the match.
    Rejected,
}

impl EvaluationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationStatus::BelowThreshold => "below_threshold",
            EvaluationStatus::Matched => "matched",
            EvaluationStatus::Approved => "approved",
            EvaluationStatus::Rejected => "rejected",
        }
    }
}
