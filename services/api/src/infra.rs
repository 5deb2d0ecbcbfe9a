use hunt_ai::workflows::matching::{
    EvaluationId, EvaluationRecord, EvaluationRepository, MatchNotification, NotificationError,
    NotificationPublisher, RepositoryError,
};
use hunt_ai::workflows::negotiation::CompanySize;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEvaluationRepository {
    records: Arc<Mutex<Vec<EvaluationRecord>>>,
}

impl EvaluationRepository for InMemoryEvaluationRepository {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: EvaluationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| record.id == *id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct LoggingNotificationPublisher {
    events: Arc<Mutex<Vec<MatchNotification>>>,
}

impl NotificationPublisher for LoggingNotificationPublisher {
    fn publish(&self, notification: MatchNotification) -> Result<(), NotificationError> {
        info!(
            evaluation = %notification.evaluation_id.0,
            job_title = %notification.job_title,
            company = %notification.company,
            score = notification.match_score,
            "approved match notification dispatched"
        );
        let mut guard = self.events.lock().expect("notification mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl LoggingNotificationPublisher {
    pub(crate) fn events(&self) -> Vec<MatchNotification> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

pub(crate) fn parse_company_size(raw: &str) -> Result<CompanySize, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "startup" => Ok(CompanySize::Startup),
        "scaleup" => Ok(CompanySize::Scaleup),
        "enterprise" => Ok(CompanySize::Enterprise),
        other => Err(format!(
            "unknown company size '{other}' (expected startup, scaleup, or enterprise)"
        )),
    }
}
