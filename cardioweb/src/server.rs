//! Web server module for the heart failure records viewer.
//!
//! Serves the four read-only pages: the landing page, the field
//! glossary, the tabular data view, and the proxied global
//! statistics. Each request that touches the database opens its own
//! connection on the blocking pool; there is no shared mutable state
//! and no caching between requests.
//!
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use cardiodata::{
    record::FlagError,
    store::{self, DataError},
};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{config::CONFIG, html, stats};

/// Read-only request context shared by the handlers.
pub(crate) struct AppState {
    /// Location of the SQLite database produced by the loader
    pub(crate) db_path: PathBuf,
    /// Maximum number of rows the tabular view renders
    pub(crate) row_limit: usize,
    /// Upstream statistics API endpoint
    pub(crate) stats_url: String,
}

/// Errors surfaced to the client as a 500 page with the error text.
#[derive(Error, Debug)]
pub(crate) enum AppError {
    #[error("{0}")]
    Data(#[from] DataError),
    #[error("{0}")]
    Format(#[from] FlagError),
    #[error("database worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("An error occurred: {self}"),
        )
            .into_response()
    }
}

/// Start the web server on the configured port
pub async fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let state = Arc::new(AppState {
        db_path: PathBuf::from(&CONFIG.db_path),
        row_limit: CONFIG.row_limit,
        stats_url: CONFIG.stats_url.clone(),
    });

    let addr = format!("0.0.0.0:{}", CONFIG.web_port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("bind web listener");
    info!(%addr, db = %CONFIG.db_path, "web server ready");

    axum::serve(listener, router(state))
        .await
        .expect("serve web app");
}

/// The four GET routes over the shared state.
pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/about", get(about_page))
        .route("/data", get(data_page))
        .route("/global-stats", get(global_stats_page))
        .with_state(state)
}

/// Display the landing page
async fn index_page() -> Html<&'static str> {
    Html(html::INDEX_PAGE)
}

/// Display the field glossary
async fn about_page() -> Html<String> {
    Html(html::render_about())
}

/// Read up to `row_limit` records and render them as an HTML table.
/// Any read or formatting error becomes a 500 with the error text.
async fn data_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let db_path = state.db_path.clone();
    let limit = state.row_limit;
    let records = tokio::task::spawn_blocking(move || {
        let conn = store::open_read_only(&db_path)?;
        store::fetch(&conn, limit)
    })
    .await??;

    let mut rows = Vec::with_capacity(records.len());
    for record in &records {
        rows.push(record.display_row()?);
    }
    Ok(Html(html::render_data(&rows)))
}

/// Proxy the public statistics API and render the outcome. Upstream
/// failures render as a message, not as an error status.
async fn global_stats_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let outcome = stats::fetch_global_stats(&state.stats_url).await;
    Html(html::render_global_stats(&outcome))
}
