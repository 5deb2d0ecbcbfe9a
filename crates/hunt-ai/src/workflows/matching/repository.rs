use serde::{Deserialize, Serialize};

use super::assessment::AssessmentRecord;
use super::domain::{EvaluationId, EvaluationStatus, JobPosting};

/// Everything the pipeline recorded about one posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: EvaluationId,
    pub posting: JobPosting,
    pub status: EvaluationStatus,
    pub assessment: AssessmentRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critique: Option<AssessmentRecord>,
}

impl EvaluationRecord {
    /// Human-readable reason behind the current status.
    pub fn decision_rationale(&self) -> String {
        match &self.critique {
            Some(critique) => critique
                .feedback
                .first()
                .cloned()
                .unwrap_or_else(|| "critique recorded".to_string()),
            None => match self.status {
                EvaluationStatus::BelowThreshold => "score below match threshold".to_string(),
                _ => "pending critique".to_string(),
            },
        }
    }

    /// Sanitized view for API consumers.
    pub fn status_view(&self) -> EvaluationStatusView {
        EvaluationStatusView {
            evaluation_id: self.id.clone(),
            job_title: self.posting.title.clone(),
            company: self.posting.company.clone(),
            status: self.status.label(),
            match_score: self.assessment.score,
            decision_rationale: self.decision_rationale(),
        }
    }
}

/// Status view exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationStatusView {
    pub evaluation_id: EvaluationId,
    pub job_title: String,
    pub company: String,
    pub status: &'static str,
    pub match_score: f64,
    pub decision_rationale: String,
}

/// Storage abstraction for evaluation records.
pub trait EvaluationRepository: Send + Sync {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError>;
    fn update(&self, record: EvaluationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError>;
    fn recent(&self, limit: usize) -> Result<Vec<EvaluationRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification hook for approved matches.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: MatchNotification) -> Result<(), NotificationError>;
}

/// Payload describing one approved match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchNotification {
    pub evaluation_id: EvaluationId,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub match_score: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
