use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::prompt::{fill_prompt, language_hint};
use super::types::{PipelineRequest, PipelineResult, SynthesizedAudio};
use crate::asr::{TranscriptionCapability, TranscriptionRequest};
use crate::error::PipelineError;
use crate::translate::TranslationCapability;
use crate::tts::{SpeechDelivery, SynthesisCapability, VoiceConfig};
use crate::utils::{encode_audio_base64, ArtifactStore};

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub placeholder: String,
    pub auto_detect_languages: Vec<String>,
    pub voice: VoiceConfig,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            placeholder: "__TEXT__".to_string(),
            auto_detect_languages: vec!["lo".to_string()],
            voice: VoiceConfig::default(),
        }
    }
}

/// Speech-to-speech translation: transcribe, translate, synthesize.
///
/// Stages run strictly in order and the first failure aborts the run; there
/// is no partial result. Adapters are injected so the same pipeline runs
/// against the remote service or against fakes.
pub struct TranslationPipeline {
    transcriber: Arc<dyn TranscriptionCapability>,
    translator: Arc<dyn TranslationCapability>,
    synthesizer: Arc<dyn SynthesisCapability>,
    artifacts: ArtifactStore,
    settings: PipelineSettings,
}

impl TranslationPipeline {
    pub fn new(
        transcriber: Arc<dyn TranscriptionCapability>,
        translator: Arc<dyn TranslationCapability>,
        synthesizer: Arc<dyn SynthesisCapability>,
        artifacts: ArtifactStore,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            transcriber,
            translator,
            synthesizer,
            artifacts,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub async fn run(&self, request: PipelineRequest) -> Result<PipelineResult, PipelineError> {
        let span = info_span!(
            "translation_pipeline",
            request_id = %Uuid::new_v4(),
            source_lang = %request.source_language,
            audio_bytes = request.audio.as_ref().map(|a| a.bytes.len()).unwrap_or(0),
        );

        async move {
            let outcome = self.execute(request).await;
            match &outcome {
                Ok(_) => info!("Pipeline completed"),
                Err(PipelineError::MissingInput) => warn!("Rejected request without audio"),
                Err(e) => error!(stage = e.stage(), error = %e, detail = ?e, "Pipeline failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, request: PipelineRequest) -> Result<PipelineResult, PipelineError> {
        let audio = request
            .audio
            .filter(|audio| !audio.bytes.is_empty())
            .ok_or(PipelineError::MissingInput)?;

        let hint = language_hint(&request.source_language, &self.settings.auto_detect_languages);
        let transcription = self
            .transcriber
            .transcribe(TranscriptionRequest {
                audio: &audio.bytes,
                filename: &audio.filename,
                media_type: &audio.media_type,
                language_hint: hint,
            })
            .await?;
        info!(
            chars = transcription.text.len(),
            auto_detect = hint.is_none(),
            "Transcription stage done"
        );

        let prompt = fill_prompt(
            &request.translate_prompt_template,
            &self.settings.placeholder,
            &transcription.text,
        );
        let translation = self
            .translator
            .complete(&request.system_prompt, &prompt)
            .await?;
        info!(chars = translation.text.len(), "Translation stage done");

        let speech = self.synthesize(&translation.text).await?;
        info!(
            bytes = speech.bytes.len(),
            media_type = %speech.media_type,
            "Synthesis stage done"
        );

        Ok(PipelineResult {
            transcription: transcription.text,
            translation: translation.text,
            audio_base64: encode_audio_base64(&speech.bytes),
            success: true,
        })
    }

    async fn synthesize(&self, text: &str) -> Result<SynthesizedAudio, PipelineError> {
        let voice = &self.settings.voice;
        let bytes = match self.synthesizer.delivery() {
            SpeechDelivery::InMemory => self.synthesizer.synthesize(text, voice).await?,
            SpeechDelivery::ToLocation => {
                // Dropping the artifact on an early return removes the file.
                let artifact = self.artifacts.acquire()?;
                self.synthesizer
                    .synthesize_to(text, voice, artifact.path())
                    .await?;
                artifact.read_and_release()?
            }
        };

        Ok(SynthesizedAudio {
            bytes,
            media_type: voice.media_type().to_string(),
        })
    }
}
