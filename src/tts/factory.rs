use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use super::client::SpeechClient;
use super::interface::{SpeechDelivery, SynthesisCapability, VoiceConfig};
use crate::config::OpenAIConfig;
use crate::openai_service::OpenAIServiceClient;

const SUPPORTED_FORMATS: &[&str] = &["mp3", "opus", "aac", "flac", "wav", "pcm"];

/// Factory for the speech synthesis adapter and its voice settings
pub struct TTSFactory;

impl TTSFactory {
    pub fn create_tts(
        config: &OpenAIConfig,
        service: Arc<OpenAIServiceClient>,
    ) -> Result<Arc<dyn SynthesisCapability>> {
        let delivery = if config.stream_speech_to_file {
            SpeechDelivery::ToLocation
        } else {
            SpeechDelivery::InMemory
        };

        info!(
            "Initializing TTS engine: model={}, delivery={:?}",
            config.speech_model, delivery
        );

        Ok(Arc::new(SpeechClient::new(service, delivery)))
    }

    /// Voice settings for every synthesis call
    pub fn voice_config(config: &OpenAIConfig) -> Result<VoiceConfig> {
        if config.voice.trim().is_empty() {
            anyhow::bail!("openai.voice must not be empty");
        }
        let format = config.speech_format.to_lowercase();
        if !SUPPORTED_FORMATS.contains(&format.as_str()) {
            anyhow::bail!(
                "Unsupported speech format: {} (expected one of {:?})",
                config.speech_format,
                SUPPORTED_FORMATS
            );
        }

        Ok(VoiceConfig {
            model: config.speech_model.clone(),
            voice: config.voice.clone(),
            format,
        })
    }
}
