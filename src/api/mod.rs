//! Web API module for Taskboard

pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, patch},
    Router,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::error::Result;
use state::AppState;

/// Create the API router
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/version", get(handlers::health::get_version))
        // Tasks API
        .route(
            "/tasks",
            get(handlers::tasks::list_tasks)
                .post(handlers::tasks::create_task)
                .delete(handlers::tasks::clear_tasks),
        )
        .route("/tasks/stats", get(handlers::tasks::get_stats))
        .route(
            "/tasks/{id}",
            get(handlers::tasks::get_task)
                .patch(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
        .route("/tasks/{id}/toggle", patch(handlers::tasks::toggle_task))
}

/// Create the full router with static file serving
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .nest("/api", create_api_router())
        .with_state(state);

    // Non-API paths fall through to the frontend bundle, then to index.html
    let router = match static_dir {
        Some(dir) => {
            let index_file = dir.join("index.html");
            let serve_dir = ServeDir::new(dir).fallback(ServeFile::new(index_file));
            router.fallback_service(serve_dir)
        }
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).layer(cors)
}

/// Find the frontend dist directory
pub fn find_static_dir() -> Option<PathBuf> {
    // Try relative to current executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let dist_path = exe_dir.join("frontend").join("dist");
            if dist_path.exists() {
                return Some(dist_path);
            }
        }
    }

    // Try relative to current working directory
    let cwd_dist = PathBuf::from("frontend/dist");
    if cwd_dist.exists() {
        return Some(cwd_dist);
    }

    None
}

/// Start the web server (API + optional static files); returns after Ctrl+C.
pub async fn start_server(
    addr: SocketAddr,
    state: AppState,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    let app = create_router(state, static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    match &static_dir {
        Some(dir) => {
            tracing::info!(%local, static_dir = %dir.display(), "Task Board UI + API listening")
        }
        None => tracing::info!(%local, "Task Board API listening (API only mode)"),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
