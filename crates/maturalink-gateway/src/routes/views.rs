//! Read-only grouped and graph views.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use maturalink_core::{
    build_graph, group_arguments, ArgumentRepository, Graph, GroupMode, GroupedView,
    SubjectRepository,
};

use crate::error::AppError;
use crate::json::GroupedQuery;
use crate::AppState;

/// View routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/views/grouped", get(grouped_view))
        .route("/api/views/graph", get(graph_view))
}

async fn grouped_view(
    State(state): State<AppState>,
    query: Result<Query<GroupedQuery>, QueryRejection>,
) -> Result<Json<GroupedView>, AppError> {
    let Query(query) = query?;
    let mode = match query.by.as_deref() {
        Some(raw) => raw.parse::<GroupMode>()?,
        None => GroupMode::default(),
    };
    let arguments = state
        .run(|db| db.with_conn(|conn| ArgumentRepository::new(conn).list_details()))
        .await?;
    Ok(Json(group_arguments(&arguments, mode)))
}

async fn graph_view(State(state): State<AppState>) -> Result<Json<Graph>, AppError> {
    let graph = state
        .run(|db| {
            db.with_conn(|conn| {
                let subjects = SubjectRepository::new(conn).list()?;
                let arguments = ArgumentRepository::new(conn).list_details()?;
                Ok(build_graph(&subjects, &arguments))
            })
        })
        .await?;
    Ok(Json(graph))
}
