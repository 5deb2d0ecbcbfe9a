use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::matching::assessment::AssessmentRecord;
use crate::workflows::matching::assessor::{AssessorError, JobAssessor};
use crate::workflows::matching::domain::{
    CandidateProfile, EvaluationId, ExperienceLevel, JobPosting, SearchPreferences,
};
use crate::workflows::matching::repository::{
    EvaluationRecord, EvaluationRepository, MatchNotification, NotificationError,
    NotificationPublisher, RepositoryError,
};
use crate::workflows::matching::{JobMatchingService, MatchEngine, MatchSettings};

pub(super) fn python_posting() -> JobPosting {
    JobPosting {
        title: "Python Developer".to_string(),
        company: "Tech Company".to_string(),
        location: "Bratislava".to_string(),
        description: "We are looking for a Python developer with Django experience".to_string(),
        requirements: "Python, Django, REST APIs, PostgreSQL".to_string(),
        salary_range: Some("3000-4000 EUR".to_string()),
        url: "https://example.com/jobs/python-developer".to_string(),
        source: "profesia.sk".to_string(),
        scraped_at: None,
    }
}

pub(super) fn unrelated_posting() -> JobPosting {
    JobPosting {
        title: "Warehouse Operative".to_string(),
        company: "Logistics SK".to_string(),
        location: "Nitra".to_string(),
        description: "Forklift work in a distribution centre".to_string(),
        requirements: "Forklift licence".to_string(),
        salary_range: None,
        url: "https://example.com/jobs/warehouse".to_string(),
        source: "profesia.sk".to_string(),
        scraped_at: None,
    }
}

pub(super) fn preferences() -> SearchPreferences {
    SearchPreferences {
        job_titles: vec![
            "Python Developer".to_string(),
            "Backend Developer".to_string(),
        ],
        locations: vec!["Bratislava".to_string(), "Remote".to_string()],
        required_skills: vec!["Python".to_string(), "Django".to_string()],
        preferred_skills: vec!["Docker".to_string(), "AWS".to_string()],
        experience_level: ExperienceLevel::Mid,
        min_salary: Some(3000.0),
    }
}

pub(super) fn profile() -> CandidateProfile {
    CandidateProfile {
        cv_content: "Python developer with five years of Django and REST API work".to_string(),
        preferences: preferences(),
    }
}

pub(super) fn engine() -> MatchEngine {
    MatchEngine::new(MatchSettings::default())
}

pub(super) fn build_service() -> (
    JobMatchingService<MemoryRepository, MemoryNotifications>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = JobMatchingService::new(
        repository.clone(),
        notifications.clone(),
        MatchEngine::new(MatchSettings::default()),
    );
    (service, repository, notifications)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<EvaluationId, EvaluationRecord>>>,
}

impl EvaluationRepository for MemoryRepository {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: EvaluationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, _limit: usize) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    events: Arc<Mutex<Vec<MatchNotification>>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<MatchNotification> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notification: MatchNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct FailingNotifications;

impl NotificationPublisher for FailingNotifications {
    fn publish(&self, _notification: MatchNotification) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl EvaluationRepository for UnavailableRepository {
    fn insert(&self, _record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: EvaluationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Assessor double returning scripted protocol responses.
pub(super) struct ScriptedAssessor {
    pub(super) match_response: String,
    pub(super) critique_response: String,
}

impl JobAssessor for ScriptedAssessor {
    fn assess_match(
        &self,
        _posting: &JobPosting,
        _profile: &CandidateProfile,
    ) -> Result<String, AssessorError> {
        Ok(self.match_response.clone())
    }

    fn critique_match(
        &self,
        _posting: &JobPosting,
        _profile: &CandidateProfile,
        _assessment: &AssessmentRecord,
    ) -> Result<String, AssessorError> {
        Ok(self.critique_response.clone())
    }
}

pub(super) struct OfflineAssessor;

impl JobAssessor for OfflineAssessor {
    fn assess_match(
        &self,
        _posting: &JobPosting,
        _profile: &CandidateProfile,
    ) -> Result<String, AssessorError> {
        Err(AssessorError::Unavailable("no api credentials".to_string()))
    }

    fn critique_match(
        &self,
        _posting: &JobPosting,
        _profile: &CandidateProfile,
        _assessment: &AssessmentRecord,
    ) -> Result<String, AssessorError> {
        Err(AssessorError::Unavailable("no api credentials".to_string()))
    }
}

pub(super) fn matching_router_with_service(
    service: JobMatchingService<MemoryRepository, MemoryNotifications>,
) -> axum::Router {
    crate::workflows::matching::matching_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
