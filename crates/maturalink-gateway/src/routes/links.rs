//! Link endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use maturalink_core::{LinkDetail, LinkElement, LinkRepository};
use tracing::info;

use super::parse_id;
use crate::error::AppError;
use crate::json::{LinkBody, MessageResponse};
use crate::AppState;

/// Link routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/links", get(list_links).post(create_link))
        .route(
            "/api/links/:id",
            get(get_link).put(update_link).delete(delete_link),
        )
}

async fn list_links(State(state): State<AppState>) -> Result<Json<Vec<LinkDetail>>, AppError> {
    let links = state
        .run(|db| db.with_conn(|conn| LinkRepository::new(conn).list()))
        .await?;
    Ok(Json(links))
}

async fn create_link(
    State(state): State<AppState>,
    payload: Result<Json<LinkBody>, JsonRejection>,
) -> Result<Json<LinkElement>, AppError> {
    let Json(body) = payload?;
    let input = body.into_new()?;
    let link = state
        .run(move |db| db.with_conn(|conn| LinkRepository::new(conn).create(&input)))
        .await?;
    info!(id = link.id, argument_id = link.argument_id, "link created");
    Ok(Json(link))
}

async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LinkDetail>, AppError> {
    let id = parse_id(&id)?;
    let link = state
        .run(move |db| db.with_conn(|conn| LinkRepository::new(conn).require(id)))
        .await?;
    Ok(Json(link))
}

async fn update_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<LinkBody>, JsonRejection>,
) -> Result<Json<LinkDetail>, AppError> {
    let id = parse_id(&id)?;
    let Json(body) = payload?;
    let patch = body.into_patch()?;
    let link = state
        .run(move |db| db.with_conn(|conn| LinkRepository::new(conn).update(id, &patch)))
        .await?;
    Ok(Json(link))
}

async fn delete_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    state
        .run(move |db| db.with_conn(|conn| LinkRepository::new(conn).delete(id)))
        .await?;
    info!(id, "link deleted");
    Ok(Json(MessageResponse::new("Link deleted")))
}
