use super::assessment::AssessmentRecord;
use super::domain::{CandidateProfile, JobPosting};

/// External judgment provider for postings, typically an LLM gateway.
///
/// Implementations return free-text responses in the line protocol consumed
/// by [`parse_assessment`](super::assessment::parse_assessment). Any error is
/// treated as unavailability and the caller falls back to rule-based scoring.
pub trait JobAssessor: Send + Sync {
    /// Judge how well a posting fits the candidate.
    fn assess_match(
        &self,
        posting: &JobPosting,
        profile: &CandidateProfile,
    ) -> Result<String, AssessorError>;

    /// Second-pass critique of an already scored posting.
    fn critique_match(
        &self,
        posting: &JobPosting,
        profile: &CandidateProfile,
        assessment: &AssessmentRecord,
    ) -> Result<String, AssessorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AssessorError {
    #[error("assessor unavailable: {0}")]
    Unavailable(String),
    #[error("assessor returned an empty response")]
    EmptyResponse,
}
