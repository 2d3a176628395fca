//! HTTP server setup and routing

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio_util::io::ReaderStream;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::context::{ServerConfig, SharedContext, ThemeContext};
use crate::error::{Error, Result};

pub const RESOURCE_NOT_FOUND: &str = "The resource was not found.";

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    theme: Option<String>,
    registered: usize,
}

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Health check endpoint
async fn health(State(ctx): State<SharedContext>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok",
        theme: ctx.provider().provide_theme().map(|t| t.key().to_string()),
        registered: ctx.manager().registry().len(),
    };
    Json(response)
}

/// `GET /_theme_typed/{type}/{name}/resources/{*resource}`
async fn typed_theme_resource(
    State(ctx): State<SharedContext>,
    Path((theme_type, name, resource)): Path<(String, String, String)>,
) -> Response {
    serve_resource(&ctx, &name, Some(&theme_type), &resource).await
}

/// `GET /_theme/{name}/resources/{*resource}`
async fn theme_resource(
    State(ctx): State<SharedContext>,
    Path((name, resource)): Path<(String, String)>,
) -> Response {
    serve_resource(&ctx, &name, None, &resource).await
}

/// Resolve a theme resource and stream it.
///
/// The file is opened once and moved into the response body, so the handle
/// is released when the body finishes or the client goes away.
async fn serve_resource(
    ctx: &ThemeContext,
    name: &str,
    theme_type: Option<&str>,
    resource: &str,
) -> Response {
    let theme = match ctx.manager().find_theme_by_name(name, theme_type) {
        Ok(theme) => theme,
        Err(e) if e.is_not_found() => {
            debug!(theme = name, theme_type, "Request for unknown theme");
            return not_found_response(&e.to_string());
        }
        Err(e) => return error_response(&e),
    };

    let Some(path) = theme.public_resource_path(resource) else {
        debug!(theme = name, resource, "Rejected resource path outside the public directory");
        return not_found_response(RESOURCE_NOT_FOUND);
    };

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => {
            debug!(path = %path.display(), "Theme resource not found");
            return not_found_response(RESOURCE_NOT_FOUND);
        }
    };

    let content_type = ctx.content_types().determine(&path).await;

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return not_found_response(RESOURCE_NOT_FOUND);
        }
        Err(e) => return error_response(&Error::Io(e)),
    };

    debug!(
        path = %path.display(),
        content_type = %content_type,
        len = metadata.len(),
        "Streaming theme resource"
    );

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_LENGTH, metadata.len().to_string()),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response()
}

fn not_found_response(message: &str) -> Response {
    (StatusCode::NOT_FOUND, message.to_string()).into_response()
}

fn error_response(e: &Error) -> Response {
    error!(error = %e, "Failed to serve theme resource");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

/// 404 handler
async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Build the axum router
pub fn build_router(ctx: SharedContext) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/_theme_typed/{type}/{name}/resources/{*resource}",
            get(typed_theme_resource),
        )
        .route("/_theme/{name}/resources/{*resource}", get(theme_resource))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Run the theme server.
///
/// This function blocks until the server is shut down.
pub async fn run_server(ctx: ThemeContext, config: ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    let router = build_router(Arc::new(ctx));

    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Theme server listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| Error::Server(e.to_string()))?;

    Ok(())
}
