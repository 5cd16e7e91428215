//! MaturaLink HTTP/JSON gateway.
//!
//! Exposes subjects, arguments, macroarguments, links and argument links as
//! REST resources over a single SQLite database, plus read-only grouped and
//! graph views.

pub mod config;
pub mod error;
pub mod json;
pub mod routes;

pub use config::{Args, GatewayConfig};
pub use error::AppError;

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use maturalink_core::{BoundedDatabase, Database};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Arc<Database>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, config: GatewayConfig) -> Self {
        Self {
            db: Arc::new(db),
            config,
        }
    }

    /// Run storage work on the blocking pool, bounded by the request timeout.
    ///
    /// The work sees the database through a deadline, so anything that has
    /// not started or committed when the timeout fires is never persisted.
    pub async fn run<T, F>(&self, work: F) -> Result<T, AppError>
    where
        F: FnOnce(&BoundedDatabase<'_>) -> maturalink_core::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let timeout = self.config.request_timeout;
        let deadline = Instant::now() + timeout;
        let task = tokio::task::spawn_blocking(move || work(&db.until(deadline)));

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(Err(maturalink_core::Error::DeadlineExceeded))) | Err(_) => {
                Err(AppError::timed_out(timeout))
            }
            Ok(Ok(result)) => result.map_err(AppError::from),
            Ok(Err(join_err)) => Err(AppError::Internal(format!(
                "storage task failed: {join_err}"
            ))),
        }
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::subjects::routes())
        .merge(routes::arguments::routes())
        .merge(routes::macroarguments::routes())
        .merge(routes::links::routes())
        .merge(routes::argument_links::routes())
        .merge(routes::views::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;

    fn state() -> AppState {
        let db = Database::open_in_memory().unwrap();
        AppState::new(db, GatewayConfig::default())
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let response = create_router(state())
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_run_times_out() {
        let mut state = state();
        state.config = state.config.with_request_timeout(Duration::from_millis(10));

        let result = state
            .run(|_| {
                std::thread::sleep(Duration::from_millis(200));
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(AppError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_timed_out_write_is_not_persisted() {
        let mut state = state();
        state.config = state.config.with_request_timeout(Duration::from_millis(10));

        let result = state
            .run(|db| {
                std::thread::sleep(Duration::from_millis(100));
                db.with_conn(|conn| {
                    maturalink_core::SubjectRepository::new(conn)
                        .create(&maturalink_core::NewSubject::new("Latino"))
                })
            })
            .await;
        assert!(matches!(result, Err(AppError::Timeout(_))));

        // Let the blocking task finish before inspecting the database.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(state.db.stats().unwrap().subjects, 0);
    }

    #[tokio::test]
    async fn test_run_maps_core_errors() {
        let result = state()
            .run(|db| db.with_conn(|conn| maturalink_core::SubjectRepository::new(conn).require(1)))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
