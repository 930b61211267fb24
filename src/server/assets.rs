use std::io;
use std::path::{Component, Path, PathBuf};

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

pub const DEFAULT_DOCUMENT: &str = "index.html";

const CONTENT_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("js", "text/javascript"),
    ("css", "text/css"),
    ("wav", "audio/wav"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
];

pub fn content_type_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| {
            CONTENT_TYPES
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(ext))
                .map(|(_, ty)| *ty)
        })
        .unwrap_or("text/plain")
}

/// Maps a request path onto a file below `root`. `/` becomes the default
/// document. Paths that would leave `root` resolve to `None`.
pub fn resolve(root: &Path, url_path: &str) -> Option<PathBuf> {
    let path = url_path.split(['?', '#']).next().unwrap_or_default();
    let relative = path.trim_start_matches('/');
    if relative.is_empty() {
        return Some(root.join(DEFAULT_DOCUMENT));
    }

    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}

#[derive(Debug)]
pub enum AssetResponse {
    Found {
        content_type: &'static str,
        bytes: Vec<u8>,
    },
    NotFound,
    Failed(io::ErrorKind),
}

impl AssetResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            AssetResponse::Found { .. } => StatusCode::OK,
            AssetResponse::NotFound => StatusCode::NOT_FOUND,
            AssetResponse::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub async fn load_asset(root: &Path, url_path: &str) -> AssetResponse {
    let Some(path) = resolve(root, url_path) else {
        debug!(url_path, "refusing path outside public root");
        return AssetResponse::NotFound;
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => AssetResponse::Found {
            content_type: content_type_for(&path),
            bytes,
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "asset not found");
            AssetResponse::NotFound
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read asset");
            AssetResponse::Failed(err.kind())
        }
    }
}

impl IntoResponse for AssetResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AssetResponse::Found {
                content_type,
                bytes,
            } => (status, [(header::CONTENT_TYPE, content_type)], bytes).into_response(),
            AssetResponse::NotFound => (
                status,
                [(header::CONTENT_TYPE, "text/plain")],
                "File not found",
            )
                .into_response(),
            AssetResponse::Failed(kind) => (
                status,
                [(header::CONTENT_TYPE, "text/plain")],
                format!("Server error: {kind:?}"),
            )
                .into_response(),
        }
    }
}
