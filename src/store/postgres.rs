use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{JobStore, StoreError};
use crate::models::job::Job;

#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn get_job(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, posting_id, title, status, company, location, employment_type,
                   description, requirements, salary_min, salary_max, currency, metadata,
                   applications_count, notification_sent_at, created_at, updated_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }

    async fn create_job(&self, job: &Job) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO jobs (
                id, posting_id, title, status, company, location, employment_type,
                description, requirements, salary_min, salary_max, currency, metadata,
                applications_count, notification_sent_at, created_at, updated_at
            ) VALUES (
                $1,$2,$3,$4,$5,$6,$7,
                $8,$9,$10,$11,$12,$13,
                $14,$15,$16,$17
            )
            "#,
        )
        .bind(job.id)
        .bind(job.posting_id)
        .bind(&job.title)
        .bind(job.status)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.employment_type)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(job.salary_min)
        .bind(job.salary_max)
        .bind(&job.currency)
        .bind(&job.metadata)
        .bind(job.applications_count)
        .bind(job.notification_sent_at)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn next_posting_id(&self) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>("SELECT nextval('job_posting_id_seq')")
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }
}
