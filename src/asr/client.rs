use async_trait::async_trait;
use reqwest::multipart;
use std::sync::Arc;
use tracing::{debug, info};

use super::interface::{TranscriptionCapability, TranscriptionRequest, TranscriptionResult};
use crate::error::TranscriptionError;
use crate::openai_service::{error_parts, OpenAIServiceClient, TranscriptionResponse};

/// Whisper transcription over the shared OpenAI client
pub struct WhisperClient {
    service: Arc<OpenAIServiceClient>,
    model: String,
}

impl WhisperClient {
    pub fn new(service: Arc<OpenAIServiceClient>, model: String) -> Self {
        Self { service, model }
    }
}

#[async_trait]
impl TranscriptionCapability for WhisperClient {
    async fn transcribe(
        &self,
        request: TranscriptionRequest<'_>,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let file_part = multipart::Part::bytes(request.audio.to_vec())
            .file_name(request.filename.to_string())
            .mime_str(request.media_type)
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "json")
            .part("file", file_part);

        if let Some(language) = request.language_hint {
            form = form.text("language", language.to_string());
        }

        debug!(
            model = %self.model,
            filename = %request.filename,
            language = ?request.language_hint,
            bytes = request.audio.len(),
            "Sending audio to Whisper"
        );

        let response = self
            .service
            .post_multipart("audio/transcriptions", form)
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let (status, body) = error_parts(response).await;
            return Err(TranscriptionError::Status { status, body });
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("body: {}", e)))?;

        info!(chars = parsed.text.len(), "Whisper transcription completed");

        Ok(TranscriptionResult {
            text: parsed.text,
            language: parsed
                .language
                .or_else(|| request.language_hint.map(str::to_string)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> WhisperClient {
        let service =
            OpenAIServiceClient::new(server.uri(), "sk-test".to_string(), Duration::from_secs(5))
                .unwrap();
        WhisperClient::new(Arc::new(service), "whisper-1".to_string())
    }

    fn request(hint: Option<&'static str>) -> TranscriptionRequest<'static> {
        TranscriptionRequest {
            audio: b"\x00\x01",
            filename: "a.wav",
            media_type: "audio/wav",
            language_hint: hint,
        }
    }

    #[tokio::test]
    async fn sends_language_hint_as_form_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "Bonjour"})),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).await.transcribe(request(Some("fr"))).await.unwrap();
        assert_eq!(result.text, "Bonjour");
        assert_eq!(result.language.as_deref(), Some("fr"));

        let received = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&received[0].body);
        assert!(body.contains("name=\"language\""));
        assert!(body.contains("name=\"model\""));
        assert!(body.contains("whisper-1"));
        assert!(body.contains("filename=\"a.wav\""));
    }

    #[tokio::test]
    async fn omits_language_field_for_auto_detect() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "sabaidee"})),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).await.transcribe(request(None)).await.unwrap();
        assert_eq!(result.text, "sabaidee");
        assert_eq!(result.language, None);

        let received = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&received[0].body);
        assert!(!body.contains("name=\"language\""));
    }

    #[tokio::test]
    async fn maps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.transcribe(request(Some("fr"))).await.unwrap_err();
        match err {
            TranscriptionError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.transcribe(request(Some("fr"))).await.unwrap_err();
        assert!(matches!(err, TranscriptionError::InvalidResponse(_)));
    }
}
