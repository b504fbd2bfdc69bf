pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post, put};
use axum::Router;
use gtd_core::Services;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(services: Services) -> Router {
    let app_state = state::AppState::new(services);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Actions
        .route(
            "/api/actions",
            get(routes::actions::list_actions).post(routes::actions::save_action),
        )
        .route(
            "/api/actions/{id}",
            get(routes::actions::get_action)
                .put(routes::actions::update_action)
                .delete(routes::actions::delete_action),
        )
        .route(
            "/api/actions/{id}/complete",
            post(routes::actions::complete_action),
        )
        .route("/api/actions/{id}/list", put(routes::actions::move_to_list))
        .route(
            "/api/actions/{id}/project",
            put(routes::actions::assign_to_project),
        )
        // Lists
        .route(
            "/api/lists",
            get(routes::lists::list_lists).post(routes::lists::save_list),
        )
        .route(
            "/api/lists/{id}",
            get(routes::lists::get_list).delete(routes::lists::delete_list),
        )
        .route("/api/lists/{id}/actions", get(routes::lists::list_actions))
        // Projects
        .route(
            "/api/projects",
            get(routes::projects::list_projects).post(routes::projects::save_project),
        )
        .route(
            "/api/projects/{id}",
            get(routes::projects::get_project).delete(routes::projects::delete_project),
        )
        .route(
            "/api/projects/{id}/actions",
            get(routes::projects::list_actions),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the GTD API server on `0.0.0.0:{port}`.
pub async fn serve(services: Services, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(services, listener).await
}

/// Start the GTD API server on a pre-bound listener.
///
/// The caller can read the actual port before starting, which matters when
/// binding to port 0.
pub async fn serve_on(services: Services, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(services);

    tracing::info!("GTD API listening on http://localhost:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
