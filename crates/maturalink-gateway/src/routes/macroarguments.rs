//! Macroargument endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use maturalink_core::{Macroargument, MacroargumentRepository};
use tracing::info;

use super::parse_id;
use crate::error::AppError;
use crate::json::{MacroargumentBody, SuccessResponse};
use crate::AppState;

/// Macroargument routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/macroarguments",
            get(list_macroarguments).post(create_macroargument),
        )
        .route(
            "/api/macroarguments/:id",
            get(get_macroargument)
                .put(rename_macroargument)
                .delete(delete_macroargument),
        )
}

async fn list_macroarguments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Macroargument>>, AppError> {
    let macros = state
        .run(|db| db.with_conn(|conn| MacroargumentRepository::new(conn).list()))
        .await?;
    Ok(Json(macros))
}

async fn create_macroargument(
    State(state): State<AppState>,
    payload: Result<Json<MacroargumentBody>, JsonRejection>,
) -> Result<Json<Macroargument>, AppError> {
    let Json(body) = payload?;
    let input = body.into_new()?;
    let created = state
        .run(move |db| db.with_conn(|conn| MacroargumentRepository::new(conn).create(&input)))
        .await?;
    info!(id = created.id, name = %created.name, "macroargument created");
    Ok(Json(created))
}

async fn get_macroargument(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Macroargument>, AppError> {
    let id = parse_id(&id)?;
    let found = state
        .run(move |db| db.with_conn(|conn| MacroargumentRepository::new(conn).require(id)))
        .await?;
    Ok(Json(found))
}

async fn rename_macroargument(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MacroargumentBody>, JsonRejection>,
) -> Result<Json<Macroargument>, AppError> {
    let id = parse_id(&id)?;
    let Json(body) = payload?;
    let input = body.into_new()?;
    let renamed = state
        .run(move |db| {
            db.with_conn(|conn| MacroargumentRepository::new(conn).rename(id, &input))
        })
        .await?;
    Ok(Json(renamed))
}

async fn delete_macroargument(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let id = parse_id(&id)?;
    let outcome = state
        .run(move |db| db.with_transaction(|tx| MacroargumentRepository::new(tx).delete(id)))
        .await?;
    info!(id, detached = outcome.detached, "macroargument deleted");
    Ok(Json(SuccessResponse::ok()))
}
