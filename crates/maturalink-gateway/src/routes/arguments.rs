//! Argument endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use maturalink_core::{ArgumentDetail, ArgumentElement, ArgumentRepository};
use tracing::info;

use super::parse_id;
use crate::error::AppError;
use crate::json::{ArgumentBody, MessageResponse};
use crate::AppState;

/// Argument routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/arguments", get(list_arguments).post(create_argument))
        .route(
            "/api/arguments/:id",
            get(get_argument).put(update_argument).delete(delete_argument),
        )
}

async fn list_arguments(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArgumentDetail>>, AppError> {
    let arguments = state
        .run(|db| db.with_conn(|conn| ArgumentRepository::new(conn).list_details()))
        .await?;
    Ok(Json(arguments))
}

async fn create_argument(
    State(state): State<AppState>,
    payload: Result<Json<ArgumentBody>, JsonRejection>,
) -> Result<Json<ArgumentElement>, AppError> {
    let Json(body) = payload?;
    let input = body.into_new()?;
    let argument = state
        .run(move |db| db.with_conn(|conn| ArgumentRepository::new(conn).create(&input)))
        .await?;
    info!(id = argument.id, subject_id = argument.subject_id, "argument created");
    Ok(Json(argument))
}

async fn get_argument(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ArgumentDetail>, AppError> {
    let id = parse_id(&id)?;
    let detail = state
        .run(move |db| db.with_conn(|conn| ArgumentRepository::new(conn).require_detail(id)))
        .await?;
    Ok(Json(detail))
}

async fn update_argument(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ArgumentBody>, JsonRejection>,
) -> Result<Json<ArgumentDetail>, AppError> {
    let id = parse_id(&id)?;
    let Json(body) = payload?;
    let patch = body.into_patch()?;
    let detail = state
        .run(move |db| {
            db.with_transaction(|tx| {
                let repo = ArgumentRepository::new(tx);
                repo.update(id, &patch)?;
                repo.require_detail(id)
            })
        })
        .await?;
    Ok(Json(detail))
}

async fn delete_argument(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    let outcome = state
        .run(move |db| db.with_transaction(|tx| ArgumentRepository::new(tx).delete(id)))
        .await?;
    info!(id, affected = outcome.affected_count(), "argument deleted");
    Ok(Json(MessageResponse::new("Argument deleted")))
}
