use axum::Router;
use axum::response::Json;
use axum::routing::{get, post};
use migration::MigratorTrait;
use sea_orm::Database;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config;
use crate::task::{self, TaskState};

pub mod api;

#[derive(OpenApi)]
#[openapi(
    paths(
        task::api::greet_handler,
        task::api::get_tasks_handler,
        task::api::add_task_handler,
        task::api::update_task_handler,
        task::api::delete_task_handler,
    ),
    components(schemas(task::api::TaskJson, task::api::TaskPayload, api::ServerErrorResponse)),
    tags((name = "Tasks", description = "Task management endpoints"))
)]
struct ApiDoc;

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: config::Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let db = Database::connect(&config.db_url).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let task_state = TaskState { db: Arc::new(db) };
    let app = create_app(task_state);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the application router over an established database connection.
///
/// The `/api` surface is cross-origin for any caller, mirroring the frontend
/// this API was written for.
pub fn create_app(task_state: TaskState) -> Router {
    let task_router = task::api::create_api_router(Arc::new(task_state));

    Router::new()
        .nest("/api", task_router)
        // axum serves the nested "/" at "/api" without a trailing slash; the
        // literal "/api/" needs its own route on the outer router.
        .route("/api/", post(task::api::greet_handler))
        .route("/health", get(health_check_handler))
        .route("/api-docs/openapi.json", get(openapi_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

#[tracing::instrument]
async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
