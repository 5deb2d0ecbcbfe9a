use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{CandidateProfile, EvaluationId, EvaluationStatus, JobPosting};
use super::engine::MatchEngine;
use super::repository::{
    EvaluationRecord, EvaluationRepository, MatchNotification, NotificationPublisher,
    RepositoryError,
};

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

/// Counts and records from one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRunReport {
    pub scraped: usize,
    pub matched: usize,
    pub approved: usize,
    pub rejected: usize,
    pub evaluations: Vec<EvaluationRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Orchestrates scoring, critique, persistence, and notifications.
pub struct JobMatchingService<R, N> {
    repository: Arc<R>,
    notifications: Arc<N>,
    engine: Arc<MatchEngine>,
}

impl<R, N> JobMatchingService<R, N>
where
    R: EvaluationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>, engine: MatchEngine) -> Self {
        Self {
            repository,
            notifications,
            engine: Arc::new(engine),
        }
    }

    /// Run the full decision pipeline over a batch of postings.
    ///
    /// Every posting is scored and recorded. Postings clearing the match
    /// threshold are capped to the configured per-run maximum, best scores
    /// first, then critiqued; approved matches are published. Notification
    /// failures degrade to a warning and never fail the run.
    pub fn run(
        &self,
        postings: Vec<JobPosting>,
        profile: &CandidateProfile,
    ) -> Result<PipelineRunReport, PipelineServiceError> {
        let scraped = postings.len();
        info!(jobs = scraped, "scoring postings against profile");

        let mut below = Vec::new();
        let mut matched = Vec::new();
        for posting in postings {
            let assessment = self.engine.score(&posting, profile);
            if self.engine.is_match(&assessment) {
                matched.push((posting, assessment));
            } else {
                below.push((posting, assessment));
            }
        }

        let matched_total = matched.len();
        info!(
            matched = matched_total,
            threshold = self.engine.settings().min_match_score,
            "matching complete"
        );

        let mut evaluations = Vec::with_capacity(scraped);

        for (posting, assessment) in below {
            let record = EvaluationRecord {
                id: next_evaluation_id(),
                posting,
                status: EvaluationStatus::BelowThreshold,
                assessment,
                critique: None,
            };
            evaluations.push(self.repository.insert(record)?);
        }

        // The critique workload is capped per run; the stable sort keeps
        // equally scored postings in arrival order.
        matched.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));
        let cap = self.engine.settings().max_matches_per_run;
        let overflow = matched.split_off(cap.min(matched.len()));

        let mut approved_count = 0;
        let mut rejected_count = 0;

        for (posting, assessment) in matched {
            let mut record = EvaluationRecord {
                id: next_evaluation_id(),
                posting,
                status: EvaluationStatus::Matched,
                assessment,
                critique: None,
            };

            let critique = self.engine.critique(&record.posting, profile, &record.assessment);
            let approved = critique.approved.unwrap_or(false);
            record.status = if approved {
                EvaluationStatus::Approved
            } else {
                EvaluationStatus::Rejected
            };
            record.critique = Some(critique);

            let stored = self.repository.insert(record)?;
            if approved {
                approved_count += 1;
                self.notify(&stored);
            } else {
                rejected_count += 1;
            }
            evaluations.push(stored);
        }

        for (posting, assessment) in overflow {
            let record = EvaluationRecord {
                id: next_evaluation_id(),
                posting,
                status: EvaluationStatus::Matched,
                assessment,
                critique: None,
            };
            evaluations.push(self.repository.insert(record)?);
        }

        info!(
            approved = approved_count,
            rejected = rejected_count,
            "critique complete"
        );

        Ok(PipelineRunReport {
            scraped,
            matched: matched_total,
            approved: approved_count,
            rejected: rejected_count,
            evaluations,
        })
    }

    /// Fetch a stored evaluation.
    pub fn get(&self, id: &EvaluationId) -> Result<EvaluationRecord, PipelineServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Most recently stored evaluations, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<EvaluationRecord>, PipelineServiceError> {
        Ok(self.repository.recent(limit)?)
    }

    fn notify(&self, record: &EvaluationRecord) {
        let notification = MatchNotification {
            evaluation_id: record.id.clone(),
            job_title: record.posting.title.clone(),
            company: record.posting.company.clone(),
            location: record.posting.location.clone(),
            url: record.posting.url.clone(),
            match_score: record.assessment.score,
        };

        if let Err(error) = self.notifications.publish(notification) {
            warn!(evaluation = %record.id.0, %error, "notification failed for approved match");
        }
    }
}
