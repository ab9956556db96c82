use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::pipeline::{AudioUpload, PipelineRequest, PipelineResult};
use crate::state::AppState;

const DEFAULT_AUDIO_FILENAME: &str = "audio.webm";
const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/transcribe/", post(transcribe_and_translate))
        .route("/api/transcribe", post(transcribe_and_translate))
}

/// Full application router with middleware and state applied.
pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;

    let mut router = create_routes()
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    if server.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let openai = match &state.openai_service {
        Some(service) => Some(service.health_check().await.unwrap_or(false)),
        None => None,
    };
    Json(json!({
        "status": "ok",
        "openai": openai
    }))
}

async fn transcribe_and_translate(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PipelineResult>, ApiError> {
    let default_lang = &state.config.pipeline.default_source_lang;
    let request = match multipart {
        Ok(mut multipart) => read_pipeline_request(&mut multipart, default_lang).await?,
        // A body that is not multipart carries no audio part.
        Err(rejection) => {
            debug!("Request is not multipart: {}", rejection);
            empty_request(default_lang)
        }
    };

    let result = state.pipeline.run(request).await?;
    Ok(Json(result))
}

fn empty_request(default_lang: &str) -> PipelineRequest {
    PipelineRequest {
        audio: None,
        source_language: default_lang.to_string(),
        system_prompt: String::new(),
        translate_prompt_template: String::new(),
    }
}

async fn read_pipeline_request(
    multipart: &mut Multipart,
    default_lang: &str,
) -> Result<PipelineRequest, ApiError> {
    let mut request = empty_request(default_lang);

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" => {
                let filename = field
                    .file_name()
                    .unwrap_or(DEFAULT_AUDIO_FILENAME)
                    .to_string();
                let media_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_MEDIA_TYPE)
                    .to_string();
                let bytes = field.bytes().await.map_err(upload_error)?;
                debug!(
                    filename = %filename,
                    media_type = %media_type,
                    bytes = bytes.len(),
                    "Received audio part"
                );
                request.audio = Some(AudioUpload {
                    bytes: bytes.to_vec(),
                    filename,
                    media_type,
                });
            }
            "source_lang" => request.source_language = field.text().await.map_err(upload_error)?,
            "system_prompt" => request.system_prompt = field.text().await.map_err(upload_error)?,
            "translate_prompt" => {
                request.translate_prompt_template = field.text().await.map_err(upload_error)?
            }
            other => debug!("Ignoring multipart field: {}", other),
        }
    }

    Ok(request)
}

fn upload_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    warn!("Failed to read multipart body: {}", err);
    let status = match err.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };
    ApiError::Upload {
        status,
        message: format!("Failed to read multipart: {}", err.body_text()),
    }
}
