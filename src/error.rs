use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription request failed: {0}")]
    ApiRequestFailed(String),
    #[error("transcription service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid transcription response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    ApiRequestFailed(String),
    #[error("translation service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid translation response: {0}")]
    InvalidResponse(String),
    #[error("translation response contained no completion")]
    EmptyCompletion,
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("speech request failed: {0}")]
    ApiRequestFailed(String),
    #[error("speech service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to write synthesized audio: {0}")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to create audio artifact in {dir}: {source}")]
    Create {
        dir: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write audio artifact: {0}")]
    Write(#[source] std::io::Error),
    #[error("failed to read audio artifact: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to remove audio artifact: {0}")]
    Remove(#[source] std::io::Error),
}

/// Failure of a whole pipeline run. Only `MissingInput` is the caller's
/// fault; every stage failure surfaces as a 500.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("No audio file provided")]
    MissingInput,
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error(transparent)]
    Translation(#[from] TranslationError),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl PipelineError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PipelineError::MissingInput => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::MissingInput => "input",
            PipelineError::Transcription(_) => "transcription",
            PipelineError::Translation(_) => "translation",
            PipelineError::Synthesis(_) => "synthesis",
            PipelineError::Artifact(_) => "artifact",
        }
    }
}

/// Errors returned by the HTTP layer as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// The multipart body itself could not be read.
    Upload { status: StatusCode, message: String },
    Pipeline(PipelineError),
}

impl From<PipelineError> for ApiError {
    fn from(error: PipelineError) -> Self {
        ApiError::Pipeline(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Upload { status, message } => (status, message),
            ApiError::Pipeline(error) => (error.status_code(), error.to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_input_is_a_client_error() {
        assert_eq!(PipelineError::MissingInput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            PipelineError::from(TranslationError::EmptyCompletion).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            PipelineError::from(ArtifactError::Read(std::io::Error::other("gone"))).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn stage_errors_keep_their_message() {
        let err = PipelineError::from(TranscriptionError::Status {
            status: 429,
            body: "quota exceeded".to_string(),
        });
        assert_eq!(err.stage(), "transcription");
        assert_eq!(
            err.to_string(),
            "transcription service returned status 429: quota exceeded"
        );
    }

    #[test]
    fn missing_input_message_is_fixed() {
        assert_eq!(PipelineError::MissingInput.to_string(), "No audio file provided");
    }
}
