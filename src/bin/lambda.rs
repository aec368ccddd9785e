//! Serverless entry point: the same router, driven by the Lambda HTTP runtime.

use job_board_backend::{
    config::{get_config, init_config},
    middleware::auth::AuthState,
    routes, AppState,
};
use lambda_http::{run, Error};
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .without_time()
        .init();

    init_config().map_err(|e| Error::from(e.to_string()))?;
    let config = get_config().map_err(|e| Error::from(e.to_string()))?;

    let state = AppState::from_config(config)
        .await
        .map_err(|e| Error::from(format!("App initialization error: {}", e)))?;

    let auth = config.jwt_secret.as_deref().map(AuthState::new);
    let app = routes::router(state, auth).layer(TraceLayer::new_for_http());

    info!("Job board Lambda ready to serve requests");
    run(app).await
}
