use axum::{extract::Query, response::IntoResponse, Json};

use crate::{
    dto::layout_dto::{LayoutQuery, LayoutResponse},
    layout,
};

#[utoipa::path(
    get,
    path = "/api/layout",
    params(
        ("path" = Option<String>, Query, description = "Route path to classify, default `/`")
    ),
    responses(
        (status = 200, description = "Layout decoration for the route", body = Json<LayoutResponse>)
    )
)]
pub async fn resolve_layout(Query(query): Query<LayoutQuery>) -> impl IntoResponse {
    let path = query.path.as_deref().unwrap_or("/");
    Json(LayoutResponse::from(layout::classify(path)))
}
