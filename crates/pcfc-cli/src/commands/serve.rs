//! Serve command - HTTP extraction service.
//!
//! - `GET  /`: service information
//! - `POST /extract-json`: multipart PDF upload (field `file`), returns the
//!   extraction result as JSON

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Args;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use pcfc_core::{ExtractionConfig, ExtractionResult, FormExtractor, PcfcConfig};

use super::config::load_config;
use super::is_pdf_filename;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides config and PCFC_BIND)
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on (overrides config and PCFC_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory for in-flight uploads
    #[arg(long)]
    upload_dir: Option<PathBuf>,

    /// Match text concepts when a PDF declares no form fields
    #[arg(long)]
    text_fallback: bool,
}

// ── Server state ──────────────────────────────────────────────────────────

struct ServerState {
    config: PcfcConfig,
}

// ── Response types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ServiceInfo {
    message: String,
    version: String,
    endpoints: serde_json::Value,
    supported_formats: Vec<String>,
    max_file_size: String,
}

/// Failures reported to the client instead of an extraction result.
#[derive(Debug)]
enum ApiError {
    /// The request itself is unusable.
    BadRequest(String),
    /// The multipart body could not be read, including over-limit uploads.
    Multipart(MultipartError),
    /// Storing the upload or running the extractor failed.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "detail": detail })),
            )
                .into_response(),
            ApiError::Multipart(e) => {
                debug!("Rejected upload: {}", e.body_text());
                e.into_response()
            }
            ApiError::Internal(message) => {
                warn!("Extraction failed: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": format!("Extraction failed: {}", message) })),
                )
                    .into_response()
            }
        }
    }
}

struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn root(State(state): State<Arc<ServerState>>) -> Json<ServiceInfo> {
    Json(service_info(state.config.server.max_upload_bytes))
}

fn service_info(max_upload_bytes: usize) -> ServiceInfo {
    ServiceInfo {
        message: "PDF Form Extractor API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: serde_json::json!({
            "/extract-json": "Extract form fields from PDF",
        }),
        supported_formats: vec!["PDF".to_string()],
        max_file_size: format!("{}MB", max_upload_bytes / (1024 * 1024)),
    }
}

async fn extract_json(
    State(state): State<Arc<ServerState>>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResult>, ApiError> {
    let upload = read_upload(&mut multipart).await?;
    info!(
        "Received {} ({} bytes)",
        upload.file_name,
        upload.bytes.len()
    );

    let upload_dir = state.config.server.upload_dir.clone();
    let extraction = state.config.extraction.clone();

    let result = tokio::task::spawn_blocking(move || {
        extract_upload(&upload_dir, &extraction, &upload.bytes)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(result))
}

/// Pull the `file` part out of the multipart body.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(ApiError::Multipart)?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !is_pdf_filename(&file_name) {
            return Err(ApiError::BadRequest("Please upload a PDF file.".to_string()));
        }

        let bytes = field.bytes().await.map_err(ApiError::Multipart)?;

        return Ok(Upload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::BadRequest("No file uploaded.".to_string()))
}

/// Store the upload in `upload_dir`, extract it, and remove it again.
fn extract_upload(
    upload_dir: &Path,
    extraction: &ExtractionConfig,
    bytes: &[u8],
) -> std::io::Result<ExtractionResult> {
    std::fs::create_dir_all(upload_dir)?;

    let mut file = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(".pdf")
        .tempfile_in(upload_dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    debug!("Stored upload at {}", file.path().display());

    let result = FormExtractor::from_config(extraction).extract_file(file.path());

    if let Err(e) = file.close() {
        warn!("Failed to remove upload: {}", e);
    }

    Ok(result)
}

fn router(state: Arc<ServerState>) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/", get(root))
        .route("/extract-json", post(extract_json))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Main ──────────────────────────────────────────────────────────────────

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;

    if let Ok(bind) = std::env::var("PCFC_BIND") {
        config.server.bind = bind;
    }
    if let Ok(port) = std::env::var("PCFC_PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| anyhow::anyhow!("PCFC_PORT must be a valid port, got {:?}", port))?;
    }
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(upload_dir) = args.upload_dir {
        config.server.upload_dir = upload_dir;
    }
    if args.text_fallback {
        config.extraction.text_fallback = true;
    }

    std::fs::create_dir_all(&config.server.upload_dir)?;

    let addr = config.server.addr();
    let app = router(Arc::new(ServerState { config }));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("pcfc listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("pcfc shutting down");
}
