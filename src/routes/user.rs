use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::user_dto::{UserListQuery, UserListResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/users",
    params(
        ("role" = Option<String>, Query, description = "Only users with this role; `all` disables the filter"),
        ("status" = Option<String>, Query, description = "Only users with this status; `all` disables the filter"),
        ("limit" = Option<u32>, Query, description = "Page size requested from the directory, default 60"),
        ("nextToken" = Option<String>, Query, description = "Continuation token from a previous response")
    ),
    responses(
        (status = 200, description = "One page of users, newest first", body = Json<UserListResponse>),
        (status = 500, description = "Identity service failure")
    )
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.user_service.list(query).await?;
    Ok(Json(UserListResponse::from(result)))
}
