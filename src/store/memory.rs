use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use super::{JobStore, StoreError, UserDirectory, UserPage, UserPageRequest};
use crate::models::job::Job;
use crate::models::user::User;

#[derive(Default)]
struct JobTable {
    jobs: RwLock<HashMap<Uuid, Job>>,
    posting_seq: AtomicI64,
    writes: AtomicUsize,
    fail_posting_ids: AtomicBool,
    reject_creates: Mutex<Option<String>>,
}

/// Job store kept in process memory. Clones share the same table.
#[derive(Clone, Default)]
pub struct InMemoryJobStore {
    inner: Arc<JobTable>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: impl IntoIterator<Item = Job>) -> Self {
        let store = Self::new();
        {
            let mut table = store.inner.jobs.write().unwrap_or_else(|e| e.into_inner());
            for job in jobs {
                table.insert(job.id, job);
            }
        }
        store
    }

    /// Makes every posting-id allocation fail until turned off again.
    pub fn fail_posting_ids(&self, fail: bool) {
        self.inner.fail_posting_ids.store(fail, Ordering::SeqCst);
    }

    /// Makes every create fail with `reason`, or succeed again with `None`.
    pub fn reject_creates(&self, reason: Option<String>) {
        *self.inner.reject_creates.lock().unwrap_or_else(|e| e.into_inner()) = reason;
    }

    /// Number of successful or attempted writes.
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.inner.jobs.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn get_job(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let table = self.inner.jobs.read().unwrap_or_else(|e| e.into_inner());
        Ok(table.get(&id).cloned())
    }

    async fn create_job(&self, job: &Job) -> Result<(), StoreError> {
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self
            .inner
            .reject_creates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Err(StoreError::Rejected(reason));
        }

        let mut table = self.inner.jobs.write().unwrap_or_else(|e| e.into_inner());
        if table.contains_key(&job.id) {
            return Err(StoreError::Rejected(format!("Job {} already exists", job.id)));
        }
        table.insert(job.id, job.clone());
        Ok(())
    }

    async fn next_posting_id(&self) -> Result<i64, StoreError> {
        if self.inner.fail_posting_ids.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("posting id sequence unavailable".into()));
        }
        Ok(self.inner.posting_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[derive(Default)]
struct UserTable {
    users: Vec<User>,
    failure: Mutex<Option<StoreError>>,
    last_request: Mutex<Option<UserPageRequest>>,
}

/// User directory backed by a fixed list. Continuation tokens are the
/// stringified offset of the next page.
#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    inner: Arc<UserTable>,
}

impl InMemoryUserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            inner: Arc::new(UserTable {
                users,
                ..Default::default()
            }),
        }
    }

    /// Makes the next listing fail with `err`.
    pub fn fail_next(&self, err: StoreError) {
        *self.inner.failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(err);
    }

    pub fn last_request(&self) -> Option<UserPageRequest> {
        self.inner
            .last_request
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn list_users(&self, request: UserPageRequest) -> Result<UserPage, StoreError> {
        *self.inner.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(request.clone());

        if let Some(err) = self.inner.failure.lock().unwrap_or_else(|e| e.into_inner()).take() {
            return Err(err);
        }

        let start = match request.pagination_token.as_deref() {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| StoreError::Rejected("Invalid pagination token".into()))?,
            None => 0,
        };
        let end = start
            .saturating_add(request.limit as usize)
            .min(self.inner.users.len());
        let users = self.inner.users.get(start..end).map(<[User]>::to_vec).unwrap_or_default();
        let next_token = (end < self.inner.users.len()).then(|| end.to_string());

        Ok(UserPage { users, next_token })
    }
}
