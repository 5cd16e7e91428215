//! Argument link endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use maturalink_core::{ArgumentLink, ArgumentLinkDetail, ArgumentLinkRepository};
use tracing::info;

use super::parse_id;
use crate::error::AppError;
use crate::json::{ArgumentLinkBody, MessageResponse};
use crate::AppState;

/// Argument link routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/argumentlinks",
            get(list_argument_links).post(create_argument_link),
        )
        .route(
            "/api/argumentlinks/:id",
            get(get_argument_link)
                .put(update_argument_link)
                .delete(delete_argument_link),
        )
}

async fn list_argument_links(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArgumentLinkDetail>>, AppError> {
    let links = state
        .run(|db| db.with_conn(|conn| ArgumentLinkRepository::new(conn).list_details()))
        .await?;
    Ok(Json(links))
}

async fn create_argument_link(
    State(state): State<AppState>,
    payload: Result<Json<ArgumentLinkBody>, JsonRejection>,
) -> Result<Json<ArgumentLink>, AppError> {
    let Json(body) = payload?;
    let input = body.into_new()?;
    let link = state
        .run(move |db| db.with_conn(|conn| ArgumentLinkRepository::new(conn).create(&input)))
        .await?;
    info!(
        id = link.id,
        from = link.from_argument_id,
        to = link.to_argument_id,
        "argument link created"
    );
    Ok(Json(link))
}

async fn get_argument_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ArgumentLink>, AppError> {
    let id = parse_id(&id)?;
    let link = state
        .run(move |db| db.with_conn(|conn| ArgumentLinkRepository::new(conn).require(id)))
        .await?;
    Ok(Json(link))
}

async fn update_argument_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ArgumentLinkBody>, JsonRejection>,
) -> Result<Json<ArgumentLink>, AppError> {
    let id = parse_id(&id)?;
    let Json(body) = payload?;
    let patch = body.into_patch()?;
    let link = state
        .run(move |db| {
            db.with_conn(|conn| ArgumentLinkRepository::new(conn).update(id, &patch))
        })
        .await?;
    Ok(Json(link))
}

async fn delete_argument_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    state
        .run(move |db| db.with_conn(|conn| ArgumentLinkRepository::new(conn).delete(id)))
        .await?;
    info!(id, "argument link deleted");
    Ok(Json(MessageResponse::new("Argument link deleted")))
}
