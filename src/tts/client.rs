use async_trait::async_trait;
use reqwest::Response;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error};

use super::interface::{SpeechDelivery, SynthesisCapability, VoiceConfig};
use crate::error::SynthesisError;
use crate::openai_service::{error_parts, OpenAIServiceClient, SpeechRequest};

/// OpenAI speech synthesis client
pub struct SpeechClient {
    service: Arc<OpenAIServiceClient>,
    delivery: SpeechDelivery,
}

impl SpeechClient {
    pub fn new(service: Arc<OpenAIServiceClient>, delivery: SpeechDelivery) -> Self {
        Self { service, delivery }
    }

    async fn request_speech(
        &self,
        text: &str,
        voice: &VoiceConfig,
    ) -> Result<Response, SynthesisError> {
        let request = SpeechRequest {
            model: voice.model.clone(),
            voice: voice.voice.clone(),
            input: text.to_string(),
            response_format: voice.format.clone(),
        };

        debug!(
            model = %voice.model,
            voice = %voice.voice,
            chars = text.len(),
            "Sending speech request"
        );

        let response = self
            .service
            .post_json("audio/speech", &request)
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let (status, body) = error_parts(response).await;
            error!(status, "Speech synthesis failed");
            return Err(SynthesisError::Status { status, body });
        }

        Ok(response)
    }
}

#[async_trait]
impl SynthesisCapability for SpeechClient {
    fn delivery(&self) -> SpeechDelivery {
        self.delivery
    }

    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> Result<Vec<u8>, SynthesisError> {
        let response = self.request_speech(text, voice).await?;
        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("body: {}", e)))?;
        debug!(bytes = audio.len(), "Speech synthesis buffered");
        Ok(audio.to_vec())
    }

    async fn synthesize_to(
        &self,
        text: &str,
        voice: &VoiceConfig,
        destination: &Path,
    ) -> Result<(), SynthesisError> {
        let mut response = self.request_speech(text, voice).await?;
        let mut file = tokio::fs::File::create(destination)
            .await
            .map_err(SynthesisError::Write)?;

        let mut written = 0usize;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("body: {}", e)))?
        {
            file.write_all(&chunk).await.map_err(SynthesisError::Write)?;
            written += chunk.len();
        }
        file.flush().await.map_err(SynthesisError::Write)?;

        debug!(bytes = written, path = %destination.display(), "Speech streamed to file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_speech(server: &MockServer, audio: &[u8]) {
        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .and(body_json(serde_json::json!({
                "model": "tts-1",
                "voice": "alloy",
                "input": "Hello",
                "response_format": "mp3"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(audio.to_vec()))
            .mount(server)
            .await;
    }

    fn client_for(server: &MockServer, delivery: SpeechDelivery) -> SpeechClient {
        let service =
            OpenAIServiceClient::new(server.uri(), "sk-test".to_string(), Duration::from_secs(5))
                .unwrap();
        SpeechClient::new(Arc::new(service), delivery)
    }

    #[tokio::test]
    async fn buffers_speech_in_memory() {
        let server = MockServer::start().await;
        mock_speech(&server, b"\xFF\xD8").await;

        let client = client_for(&server, SpeechDelivery::InMemory);
        let audio = client.synthesize("Hello", &VoiceConfig::default()).await.unwrap();
        assert_eq!(audio, b"\xFF\xD8".to_vec());
    }

    #[tokio::test]
    async fn streams_speech_into_destination() {
        let server = MockServer::start().await;
        let payload: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
        mock_speech(&server, &payload).await;

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("speech_test.mp3");
        std::fs::write(&destination, b"stale contents that are longer").unwrap();

        let client = client_for(&server, SpeechDelivery::ToLocation);
        client
            .synthesize_to("Hello", &VoiceConfig::default(), &destination)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&destination).unwrap(), payload);
    }

    #[tokio::test]
    async fn error_status_does_not_create_destination() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("speech_err.mp3");
        let client = client_for(&server, SpeechDelivery::ToLocation);
        let err = client
            .synthesize_to("Hello", &VoiceConfig::default(), &destination)
            .await
            .unwrap_err();

        assert!(matches!(err, SynthesisError::Status { status: 500, .. }));
        assert!(!destination.exists());
    }
}
