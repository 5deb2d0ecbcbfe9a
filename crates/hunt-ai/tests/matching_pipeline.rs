//! Integration specifications for the posting match pipeline.
//!
//! Scenarios drive the public service facade and HTTP router end to end so
//! scoring, critique, persistence, and notification behavior stay covered
//! without reaching into private modules.

mod common {
    use std::sync::{Arc, Mutex};

    use hunt_ai::workflows::matching::{
        CandidateProfile, EvaluationId, EvaluationRecord, EvaluationRepository,
        JobMatchingService, JobPosting, MatchEngine, MatchNotification, MatchSettings,
        NotificationError, NotificationPublisher, RepositoryError, SearchPreferences,
    };

    pub(super) fn python_posting() -> JobPosting {
        JobPosting {
            title: "Python Developer".to_string(),
            company: "Tech Company".to_string(),
            location: "Bratislava".to_string(),
            description: "We are looking for a Python developer with Django experience"
                .to_string(),
            requirements: "Python, Django, REST APIs, PostgreSQL".to_string(),
            salary_range: Some("3000-4000 EUR".to_string()),
            url: "https://example.test/jobs/python-developer".to_string(),
            source: "profesia.sk".to_string(),
            scraped_at: None,
        }
    }

    pub(super) fn backend_posting() -> JobPosting {
        JobPosting {
            title: "Backend Developer".to_string(),
            company: "Acme s.r.o.".to_string(),
            location: "Bratislava".to_string(),
            description: "Backend services team".to_string(),
            requirements: "Python, Django, Docker".to_string(),
            salary_range: Some("3500-4500 EUR".to_string()),
            url: "https://example.test/jobs/backend-developer".to_string(),
            source: "profesia.sk".to_string(),
            scraped_at: None,
        }
    }

    pub(super) fn warehouse_posting() -> JobPosting {
        JobPosting {
            title: "Warehouse Operative".to_string(),
            company: "Logistics Co".to_string(),
            location: "Nitra".to_string(),
            description: "Forklift certified shift work".to_string(),
            requirements: "Forklift license".to_string(),
            salary_range: None,
            url: "https://example.test/jobs/warehouse".to_string(),
            source: "profesia.sk".to_string(),
            scraped_at: None,
        }
    }

    pub(super) fn profile() -> CandidateProfile {
        CandidateProfile {
            cv_content: "Python developer with five years of Django and REST API work"
                .to_string(),
            preferences: SearchPreferences {
                job_titles: vec!["Python Developer".to_string(), "Backend Developer".to_string()],
                locations: vec!["Bratislava".to_string(), "Remote".to_string()],
                required_skills: vec!["Python".to_string(), "Django".to_string()],
                preferred_skills: vec!["Docker".to_string(), "AWS".to_string()],
                experience_level: Default::default(),
                min_salary: Some(3000.0),
            },
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<Vec<EvaluationRecord>>>,
    }

    impl MemoryRepository {
        pub(super) fn records(&self) -> Vec<EvaluationRecord> {
            self.records.lock().expect("lock").clone()
        }
    }

    impl EvaluationRepository for MemoryRepository {
        fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.iter().any(|existing| existing.id == record.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.push(record.clone());
            Ok(record)
        }

        fn update(&self, record: EvaluationRecord) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            match guard.iter_mut().find(|existing| existing.id == record.id) {
                Some(existing) => {
                    *existing = record;
                    Ok(())
                }
                None => Err(RepositoryError::NotFound),
            }
        }

        fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.iter().find(|record| &record.id == id).cloned())
        }

        fn recent(&self, limit: usize) -> Result<Vec<EvaluationRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.iter().rev().take(limit).cloned().collect())
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryNotifications {
        events: Arc<Mutex<Vec<MatchNotification>>>,
    }

    impl MemoryNotifications {
        pub(super) fn events(&self) -> Vec<MatchNotification> {
            self.events.lock().expect("lock").clone()
        }
    }

    impl NotificationPublisher for MemoryNotifications {
        fn publish(&self, notification: MatchNotification) -> Result<(), NotificationError> {
            self.events.lock().expect("lock").push(notification);
            Ok(())
        }
    }

    pub(super) fn build_service_with(
        settings: MatchSettings,
    ) -> (
        JobMatchingService<MemoryRepository, MemoryNotifications>,
        Arc<MemoryRepository>,
        Arc<MemoryNotifications>,
    ) {
        let repository = Arc::new(MemoryRepository::default());
        let notifications = Arc::new(MemoryNotifications::default());
        let service = JobMatchingService::new(
            repository.clone(),
            notifications.clone(),
            MatchEngine::new(settings),
        );
        (service, repository, notifications)
    }

    pub(super) fn build_service() -> (
        JobMatchingService<MemoryRepository, MemoryNotifications>,
        Arc<MemoryRepository>,
        Arc<MemoryNotifications>,
    ) {
        build_service_with(MatchSettings::default())
    }
}

mod pipeline {
    use super::common::*;
    use hunt_ai::workflows::matching::{EvaluationStatus, MatchSettings};

    #[test]
    fn full_run_records_scores_and_notifies() {
        let (service, repository, notifications) = build_service();

        let report = service
            .run(vec![python_posting(), warehouse_posting()], &profile())
            .expect("pipeline run succeeds");

        assert_eq!(report.scraped, 2);
        assert_eq!(report.matched, 1);
        assert_eq!(report.approved, 1);
        assert_eq!(report.rejected, 0);

        let records = repository.records();
        assert_eq!(records.len(), 2);

        let events = notifications.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].job_title, "Python Developer");
        assert_eq!(events[0].match_score, 0.75);
    }

    #[test]
    fn below_threshold_postings_are_kept_for_audit() {
        let (service, repository, notifications) = build_service();

        service
            .run(vec![warehouse_posting()], &profile())
            .expect("pipeline run succeeds");

        let records = repository.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, EvaluationStatus::BelowThreshold);
        assert_eq!(records[0].decision_rationale(), "score below match threshold");
        assert!(notifications.events().is_empty());
    }

    #[test]
    fn critique_cap_leaves_overflow_matches_uncritiqued() {
        let settings = MatchSettings {
            max_matches_per_run: 1,
            ..MatchSettings::default()
        };
        let (service, repository, notifications) = build_service_with(settings);

        let report = service
            .run(vec![python_posting(), backend_posting()], &profile())
            .expect("pipeline run succeeds");

        // Both clear the threshold but only the stronger match is critiqued.
        assert_eq!(report.matched, 2);
        assert_eq!(report.approved, 1);

        let records = repository.records();
        let critiqued = records
            .iter()
            .find(|record| record.posting.title == "Backend Developer")
            .expect("backend record");
        assert_eq!(critiqued.status, EvaluationStatus::Approved);
        assert!(critiqued.critique.is_some());

        let overflow = records
            .iter()
            .find(|record| record.posting.title == "Python Developer")
            .expect("python record");
        assert_eq!(overflow.status, EvaluationStatus::Matched);
        assert!(overflow.critique.is_none());

        assert_eq!(notifications.events().len(), 1);
    }

    #[test]
    fn evaluations_surface_through_get_and_recent() {
        let (service, _, _) = build_service();

        let report = service
            .run(vec![python_posting()], &profile())
            .expect("pipeline run succeeds");
        let id = report.evaluations[0].id.clone();

        let fetched = service.get(&id).expect("stored evaluation");
        assert_eq!(fetched.status, EvaluationStatus::Approved);
        assert_eq!(fetched.assessment.score, 0.75);

        let recent = service.recent(5).expect("recent evaluations");
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, id);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use hunt_ai::workflows::matching::matching_router;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn build_router() -> axum::Router {
        let (service, _, _) = build_service();
        matching_router(Arc::new(service))
    }

    #[tokio::test]
    async fn post_matches_runs_the_pipeline() {
        let router = build_router();
        let payload = json!({
            "postings": [python_posting(), warehouse_posting()],
            "profile": profile(),
        });

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/hunt/matches")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&payload).expect("serialize payload"),
            ))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let report: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(report.get("scraped").and_then(Value::as_u64), Some(2));
        assert_eq!(report.get("matched").and_then(Value::as_u64), Some(1));
        assert_eq!(report.get("approved").and_then(Value::as_u64), Some(1));
        assert_eq!(
            report
                .get("evaluations")
                .and_then(Value::as_array)
                .map(Vec::len),
            Some(2)
        );
    }

    #[tokio::test]
    async fn get_unknown_evaluation_reads_as_pending() {
        let router = build_router();

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/hunt/evaluations/eval-999999")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload.get("status"), Some(&json!("pending")));
        assert_eq!(payload.get("match_score"), Some(&Value::Null));
    }
}
