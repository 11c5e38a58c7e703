//! HTTP surface: one page, returned as JSON for the renderer.

use crate::config::Config;
use crate::error::WebstatusError;
use crate::page::PageContext;
use crate::params::{RequestParams, StatusQuery};
use crate::webstatus::Webstatus;
use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::{header::ACCEPT_LANGUAGE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Error returned when the status data cannot be loaded.
#[derive(Debug)]
pub struct AppError(WebstatusError);

impl From<WebstatusError> for AppError {
    fn from(err: WebstatusError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(main_view))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Main view: per-locale or per-product status table.
async fn main_view(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
    headers: HeaderMap,
) -> Result<Json<PageContext>, AppError> {
    let config = &state.config;

    // Snapshot is reloaded on every request
    let webstatus = Webstatus::load(&config.webstatus_file, &config.sources_file).await?;

    let accept_language = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    let params = RequestParams::resolve(
        &query,
        accept_language,
        webstatus.available_locales(),
        &config.default_locale,
    );

    Ok(Json(PageContext::build(config, &webstatus, &params)))
}

/// Bind the configured port and serve until the process stops.
pub async fn serve(config: Config) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let state = AppState {
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, build_router(state))
        .await
        .context("Server error")?;

    Ok(())
}
