//! Match evaluation pipeline.
//!
//! Postings flow through scoring, a threshold gate, and a critique pass;
//! every evaluated posting is recorded and approved matches are published
//! to the notification hook.

pub mod assessment;
pub mod assessor;
pub mod domain;
pub mod engine;
pub mod repository;
pub mod router;
pub(crate) mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use assessment::{parse_assessment, AssessmentRecord};
pub use assessor::{AssessorError, JobAssessor};
pub use domain::{
    CandidateProfile, EvaluationId, EvaluationStatus, ExperienceLevel, JobPosting,
    SearchPreferences,
};
pub use engine::{MatchEngine, MatchSettings};
pub use repository::{
    EvaluationRecord, EvaluationRepository, EvaluationStatusView, MatchNotification,
    NotificationError, NotificationPublisher, RepositoryError,
};
pub use router::{matching_router, MatchRunRequest};
pub use service::{JobMatchingService, PipelineRunReport, PipelineServiceError};
