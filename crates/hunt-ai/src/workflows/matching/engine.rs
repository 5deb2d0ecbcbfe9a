use std::sync::Arc;

use tracing::warn;

use crate::config::PipelineSettings;

use super::assessment::{parse_assessment, AssessmentRecord};
use super::assessor::JobAssessor;
use super::domain::{CandidateProfile, JobPosting};
use super::rules;

/// Knobs for the matching pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSettings {
    pub min_match_score: f64,
    pub strict_validation: bool,
    pub max_matches_per_run: usize,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            min_match_score: 0.7,
            strict_validation: false,
            max_matches_per_run: 10,
        }
    }
}

impl From<&PipelineSettings> for MatchSettings {
    fn from(settings: &PipelineSettings) -> Self {
        Self {
            min_match_score: settings.min_match_score,
            strict_validation: settings.strict_validation,
            max_matches_per_run: settings.max_matches_per_run,
        }
    }
}

/// Scores and critiques a single posting against a candidate profile.
///
/// When an assessor is configured its free-text judgment is primary; any
/// assessor failure falls back to the deterministic rules so a pipeline run
/// never depends on upstream availability.
pub struct MatchEngine {
    settings: MatchSettings,
    assessor: Option<Arc<dyn JobAssessor>>,
}

impl MatchEngine {
    pub fn new(settings: MatchSettings) -> Self {
        Self {
            settings,
            assessor: None,
        }
    }

    pub fn with_assessor(settings: MatchSettings, assessor: Arc<dyn JobAssessor>) -> Self {
        Self {
            settings,
            assessor: Some(assessor),
        }
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Score a posting against the profile.
    pub fn score(&self, posting: &JobPosting, profile: &CandidateProfile) -> AssessmentRecord {
        if let Some(assessor) = &self.assessor {
            match assessor.assess_match(posting, profile) {
                Ok(response) => return parse_assessment(&response),
                Err(error) => {
                    warn!(job_title = %posting.title, %error, "assessor failed, scoring by rules");
                }
            }
        }

        rules::score_posting(posting, profile)
    }

    /// Critique a scored posting.
    ///
    /// The returned record always carries an approval verdict, whichever
    /// path produced it.
    pub fn critique(
        &self,
        posting: &JobPosting,
        profile: &CandidateProfile,
        assessment: &AssessmentRecord,
    ) -> AssessmentRecord {
        if let Some(assessor) = &self.assessor {
            match assessor.critique_match(posting, profile, assessment) {
                Ok(response) => {
                    let mut critique = parse_assessment(&response);
                    critique.approved = Some(critique.approved.unwrap_or(false));
                    return critique;
                }
                Err(error) => {
                    warn!(job_title = %posting.title, %error, "assessor failed, critiquing by rules");
                }
            }
        }

        rules::critique_posting(posting, assessment, self.settings.strict_validation)
    }

    /// Whether a scored posting clears the match threshold.
    pub fn is_match(&self, assessment: &AssessmentRecord) -> bool {
        assessment.score >= self.settings.min_match_score
    }
}
