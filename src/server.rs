//! HTTP surface: a streamed author-filter route plus listing and health.

use crate::config::Config;
use crate::corpus;
use crate::filter::Predicate;
use crate::pump;
use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

/// HTTP server for the chat-log corpus.
pub struct LogServer {
    config: Config,
}

impl LogServer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Bind and serve until the process exits.
    pub async fn start(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.config.port);
        let app = self.build_router();

        info!("Starting log server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Build the router. Separate from `start` so tests can drive it on
    /// an ephemeral listener.
    pub fn build_router(self) -> Router {
        let shared_state = Arc::new(AppState {
            config: self.config,
        });

        Router::new()
            .route("/health", get(health_check))
            .route("/logs", get(list_corpus))
            .route("/logs/{name}", get(stream_author_lines))
            .layer(CorsLayer::permissive())
            .with_state(shared_state)
    }
}

/// Shared request state.
struct AppState {
    config: Config,
}

async fn health_check() -> &'static str {
    "ok"
}

/// Corpus file names, in enumeration order.
async fn list_corpus(State(state): State<Arc<AppState>>) -> Response {
    match corpus::enumerate(&state.config.logs_dir).await {
        Ok(entries) => {
            let names: Vec<String> = entries.into_iter().map(|e| e.name).collect();
            Json(names).into_response()
        }
        Err(err) => {
            warn!("failed to list corpus: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// Stream every line authored by `{name}` across the whole corpus, in
/// enumeration order, as one incrementally written body.
async fn stream_author_lines(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    // Enumerate before writing anything, so an unreadable directory still
    // maps to a clean 500.
    let corpus = match corpus::enumerate(&state.config.logs_dir).await {
        Ok(corpus) => corpus,
        Err(err) => {
            warn!("failed to enumerate corpus: {}", err);
            return (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response();
        }
    };

    debug!("streaming {} files for author {:?}", corpus.len(), name);

    let predicate = Predicate::new(name.into_bytes());
    let (tx, rx) = mpsc::channel(pump::CHANNEL_CAPACITY);
    tokio::spawn(pump::run(corpus, predicate, tx));

    let body = Body::from_stream(ReceiverStream::new(rx).map(Ok::<_, std::convert::Infallible>));

    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}
