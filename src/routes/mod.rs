pub mod health;
pub mod job;
pub mod layout;
pub mod user;

use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::Error;
use crate::middleware::auth::{require_admin, require_bearer_auth, AuthState};
use crate::AppState;

/// Every API route. With `auth` set, job routes need a bearer token and the
/// user listing needs an admin one.
pub fn router(state: AppState, auth: Option<AuthState>) -> Router {
    let mut jobs = Router::new()
        .route("/api/jobs", post(job::create_job))
        .route("/api/jobs/:id", get(job::get_job))
        .route("/api/jobs/:id/duplicate", post(job::duplicate_job));

    let mut users = Router::new().route("/api/users", get(user::list_users));

    if let Some(auth) = auth {
        jobs = jobs.layer(axum::middleware::from_fn_with_state(
            auth.clone(),
            require_bearer_auth,
        ));
        users = users.layer(axum::middleware::from_fn_with_state(auth, require_admin));
    }

    Router::new()
        .route("/health", get(health::health))
        .route("/api/layout", get(layout::resolve_layout))
        .merge(jobs)
        .merge(users)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic payload".to_string());
    tracing::error!(panic = %detail, "request handler panicked");
    Error::Internal(format!("handler panicked: {}", detail)).into_response()
}
