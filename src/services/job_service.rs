use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::dto::job_dto::CreateJobPayload;
use crate::error::{Advisory, Error, Result};
use crate::models::job::{Job, JobStatus};
use crate::store::JobStore;
use crate::utils::time::now;

#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn JobStore>,
}

impl JobService {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        match self.store.get_job(id).await {
            Ok(Some(job)) => Ok(job),
            Ok(None) => Err(job_not_found()),
            Err(err) => {
                tracing::warn!(job_id = %id, error = %err, "failed to fetch job");
                Err(job_not_found())
            }
        }
    }

    /// Creates a draft copy of an existing job under a new id and posting id.
    ///
    /// Posting-id allocation is best effort: if the allocator fails the copy is
    /// still written, just without a posting id. Nothing guards against two
    /// concurrent duplications of the same source; both produce a copy.
    pub async fn duplicate(&self, id: Uuid) -> Result<Job> {
        let original = self.get_by_id(id).await?;

        let posting_id = self.allocate_posting_id().await.into_option("posting_id");
        let copy = original.draft_copy(Uuid::new_v4(), posting_id, now());

        self.store.create_job(&copy).await.map_err(|err| {
            tracing::error!(source_job_id = %id, error = %err, "failed to persist duplicated job");
            Error::upstream(&err, "Failed to duplicate job")
        })?;

        tracing::info!(
            source_job_id = %id,
            job_id = %copy.id,
            posting_id = ?copy.posting_id,
            "duplicated job"
        );
        Ok(copy)
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let posting_id = self.allocate_posting_id().await.into_option("posting_id");
        let job = Job {
            id: Uuid::new_v4(),
            posting_id,
            title: payload.title.trim().to_string(),
            status: JobStatus::Draft,
            company: payload.company,
            location: payload.location,
            employment_type: payload.employment_type,
            description: payload.description,
            requirements: payload.requirements,
            salary_min: payload.salary_min,
            salary_max: payload.salary_max,
            currency: payload.currency,
            metadata: payload.metadata.unwrap_or_else(|| json!({})),
            applications_count: 0,
            notification_sent_at: None,
            created_at: now(),
            updated_at: None,
        };

        self.store.create_job(&job).await.map_err(|err| {
            tracing::error!(error = %err, "failed to persist job");
            Error::upstream(&err, "Failed to create job")
        })?;

        tracing::info!(job_id = %job.id, posting_id = ?job.posting_id, "created job");
        Ok(job)
    }

    async fn allocate_posting_id(&self) -> Advisory<i64> {
        Advisory::from_result(self.store.next_posting_id().await)
    }
}

fn job_not_found() -> Error {
    Error::NotFound("Job not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockJobStore, StoreError};
    use chrono::Utc;

    fn engineer() -> Job {
        Job {
            id: Uuid::new_v4(),
            posting_id: Some(10),
            title: "Engineer".into(),
            status: JobStatus::Posted,
            company: Some("Acme".into()),
            location: None,
            employment_type: None,
            description: Some("Ship it".into()),
            requirements: None,
            salary_min: None,
            salary_max: None,
            currency: None,
            metadata: json!({}),
            applications_count: 5,
            notification_sent_at: Some(Utc::now()),
            created_at: Utc::now(),
            updated_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn duplicate_writes_a_draft_copy() {
        let source = engineer();
        let source_id = source.id;
        let mut store = MockJobStore::new();
        store
            .expect_get_job()
            .withf(move |id| *id == source_id)
            .returning(move |_| Ok(Some(source.clone())));
        store.expect_next_posting_id().times(1).returning(|| Ok(11));
        store
            .expect_create_job()
            .times(1)
            .withf(move |job| job.id != source_id && job.posting_id == Some(11))
            .returning(|_| Ok(()));

        let copy = JobService::new(Arc::new(store)).duplicate(source_id).await.unwrap();
        assert_ne!(copy.id, source_id);
        assert_eq!(copy.title, "Engineer (Copy)");
        assert_eq!(copy.status, JobStatus::Draft);
        assert_eq!(copy.applications_count, 0);
        assert_eq!(copy.company.as_deref(), Some("Acme"));
    }

    #[tokio::test]
    async fn duplicate_of_missing_job_never_writes() {
        let mut store = MockJobStore::new();
        store.expect_get_job().returning(|_| Ok(None));
        store.expect_next_posting_id().never();
        store.expect_create_job().never();

        let err = JobService::new(Arc::new(store))
            .duplicate(Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(msg) if msg == "Job not found"));
    }

    #[tokio::test]
    async fn failed_fetch_is_reported_as_not_found() {
        let mut store = MockJobStore::new();
        store
            .expect_get_job()
            .returning(|_| Err(StoreError::Decode("unexpected item shape".into())));
        store.expect_create_job().never();

        let err = JobService::new(Arc::new(store))
            .duplicate(Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn posting_id_failure_does_not_block_duplicate() {
        let source = engineer();
        let mut store = MockJobStore::new();
        store
            .expect_get_job()
            .returning(move |_| Ok(Some(source.clone())));
        store
            .expect_next_posting_id()
            .returning(|| Err(StoreError::Rejected("sequence offline".into())));
        store
            .expect_create_job()
            .times(1)
            .withf(|job| job.posting_id.is_none())
            .returning(|_| Ok(()));

        let copy = JobService::new(Arc::new(store))
            .duplicate(Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(copy.posting_id, None);
    }

    #[tokio::test]
    async fn create_failure_surfaces_store_reason() {
        let source = engineer();
        let mut store = MockJobStore::new();
        store
            .expect_get_job()
            .returning(move |_| Ok(Some(source.clone())));
        store.expect_next_posting_id().returning(|| Ok(3));
        store
            .expect_create_job()
            .returning(|_| Err(StoreError::Rejected("throughput exceeded".into())));

        let err = JobService::new(Arc::new(store))
            .duplicate(Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream { reason } if reason == "throughput exceeded"));
    }

    #[tokio::test]
    async fn create_failure_without_reason_is_generic() {
        let source = engineer();
        let mut store = MockJobStore::new();
        store
            .expect_get_job()
            .returning(move |_| Ok(Some(source.clone())));
        store.expect_next_posting_id().returning(|| Ok(3));
        store
            .expect_create_job()
            .returning(|_| Err(StoreError::Decode("unexpected item shape".into())));

        let err = JobService::new(Arc::new(store))
            .duplicate(Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream { reason } if reason == "Failed to duplicate job"));
    }

    #[tokio::test]
    async fn create_starts_as_draft_without_applications() {
        let mut store = MockJobStore::new();
        store.expect_next_posting_id().returning(|| Ok(1));
        store.expect_create_job().times(1).returning(|_| Ok(()));

        let payload = CreateJobPayload {
            title: "  Designer ".into(),
            company: None,
            location: None,
            employment_type: None,
            description: None,
            requirements: None,
            salary_min: None,
            salary_max: None,
            currency: None,
            metadata: None,
        };
        let job = JobService::new(Arc::new(store)).create(payload).await.unwrap();
        assert_eq!(job.title, "Designer");
        assert_eq!(job.status, JobStatus::Draft);
        assert_eq!(job.applications_count, 0);
        assert_eq!(job.posting_id, Some(1));
        assert_eq!(job.metadata, json!({}));
    }
}
