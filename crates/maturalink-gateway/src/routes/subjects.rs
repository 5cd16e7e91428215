//! Subject endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use maturalink_core::{Subject, SubjectRepository};
use tracing::info;

use super::parse_id;
use crate::error::AppError;
use crate::json::{MessageResponse, SubjectBody};
use crate::AppState;

/// Subject routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/subjects", get(list_subjects).post(create_subject))
        .route(
            "/api/subjects/:id",
            get(get_subject).patch(update_subject).delete(delete_subject),
        )
}

async fn list_subjects(State(state): State<AppState>) -> Result<Json<Vec<Subject>>, AppError> {
    let subjects = state
        .run(|db| db.with_conn(|conn| SubjectRepository::new(conn).list()))
        .await?;
    Ok(Json(subjects))
}

async fn create_subject(
    State(state): State<AppState>,
    payload: Result<Json<SubjectBody>, JsonRejection>,
) -> Result<Json<Subject>, AppError> {
    let Json(body) = payload?;
    let input = body.into_new()?;
    let subject = state
        .run(move |db| db.with_conn(|conn| SubjectRepository::new(conn).create(&input)))
        .await?;
    info!(id = subject.id, name = %subject.name, "subject created");
    Ok(Json(subject))
}

async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Subject>, AppError> {
    let id = parse_id(&id)?;
    let subject = state
        .run(move |db| db.with_conn(|conn| SubjectRepository::new(conn).require(id)))
        .await?;
    Ok(Json(subject))
}

async fn update_subject(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SubjectBody>, JsonRejection>,
) -> Result<Json<Subject>, AppError> {
    let id = parse_id(&id)?;
    let Json(body) = payload?;
    let patch = body.into_patch();
    let subject = state
        .run(move |db| db.with_conn(|conn| SubjectRepository::new(conn).update(id, &patch)))
        .await?;
    Ok(Json(subject))
}

async fn delete_subject(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    state
        .run(move |db| db.with_transaction(|tx| SubjectRepository::new(tx).delete(id)))
        .await?;
    info!(id, "subject deleted");
    Ok(Json(MessageResponse::new("Subject deleted")))
}
