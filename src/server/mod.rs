//! Static asset server for the browser build of the toy.
//!
//! Every GET is answered from the public root; there is no other state.

pub mod assets;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::Uri;
use axum::response::Response;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::{info, warn};

pub use assets::{AssetResponse, content_type_for, load_asset, resolve};

#[derive(Clone, Debug)]
struct ServeState {
    root: Arc<PathBuf>,
}

async fn serve_asset(State(state): State<ServeState>, uri: Uri) -> Response {
    load_asset(&state.root, uri.path()).await.into_response()
}

pub fn router(root: PathBuf) -> Router {
    let state = ServeState {
        root: Arc::new(root),
    };

    Router::new()
        .route("/", get(serve_asset))
        .route("/*path", get(serve_asset))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

pub async fn run(addr: SocketAddr, root: PathBuf) -> Result<()> {
    if !root.join(assets::DEFAULT_DOCUMENT).is_file() {
        warn!(root = %root.display(), "public root has no {}", assets::DEFAULT_DOCUMENT);
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr()?;
    info!(root = %root.display(), "server running at http://{local}/");

    axum::serve(listener, router(root))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}
