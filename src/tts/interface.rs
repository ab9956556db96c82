use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SynthesisError;

/// Voice and model selection for speech synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub model: String,
    pub voice: String,
    /// Container format requested from the service, e.g. `mp3`.
    pub format: String,
}

impl VoiceConfig {
    pub fn media_type(&self) -> &'static str {
        media_type_for(&self.format)
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            format: "mp3".to_string(),
        }
    }
}

pub fn media_type_for(format: &str) -> &'static str {
    match format {
        "mp3" => "audio/mpeg",
        "opus" => "audio/opus",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        "wav" => "audio/wav",
        "pcm" => "audio/pcm",
        _ => "application/octet-stream",
    }
}

/// How a synthesis adapter hands back its audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechDelivery {
    /// `synthesize` returns the whole clip.
    InMemory,
    /// `synthesize_to` streams the clip into a caller-provided file.
    ToLocation,
}

/// Text-to-speech capability
#[async_trait]
pub trait SynthesisCapability: Send + Sync {
    fn delivery(&self) -> SpeechDelivery {
        SpeechDelivery::InMemory
    }

    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> Result<Vec<u8>, SynthesisError>;

    /// Write the synthesized clip to `destination`, replacing its contents.
    async fn synthesize_to(
        &self,
        text: &str,
        voice: &VoiceConfig,
        destination: &Path,
    ) -> Result<(), SynthesisError> {
        let audio = self.synthesize(text, voice).await?;
        tokio::fs::write(destination, audio)
            .await
            .map_err(SynthesisError::Write)
    }
}
