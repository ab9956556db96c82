use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::asr::WhisperClient;
use crate::config::Config;
use crate::openai_service::OpenAIServiceClient;
use crate::pipeline::{PipelineSettings, TranslationPipeline};
use crate::translate::ChatTranslator;
use crate::tts::TTSFactory;
use crate::utils::ArtifactStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: Arc<TranslationPipeline>,
    /// Absent when the pipeline runs on injected adapters.
    pub openai_service: Option<Arc<OpenAIServiceClient>>,
}

impl AppState {
    /// Build the shared OpenAI client once and wire it into all three stages.
    pub fn new(config: Config) -> Result<Self> {
        let service = Arc::new(OpenAIServiceClient::from_config(&config.openai)?);

        let transcriber = Arc::new(WhisperClient::new(
            service.clone(),
            config.openai.transcription_model.clone(),
        ));
        let translator = Arc::new(ChatTranslator::new(
            service.clone(),
            config.openai.translation_model.clone(),
        ));
        let synthesizer = TTSFactory::create_tts(&config.openai, service.clone())?;
        let voice = TTSFactory::voice_config(&config.openai)?;

        let artifacts = ArtifactStore::new(
            config.pipeline.artifact_dir(),
            config.pipeline.artifact_prefix.clone(),
            &voice.format,
        );
        info!("Audio artifacts stored in {}", artifacts.dir().display());

        let settings = PipelineSettings {
            placeholder: config.pipeline.placeholder.clone(),
            auto_detect_languages: config.pipeline.auto_detect_languages.clone(),
            voice,
        };

        let pipeline = TranslationPipeline::new(
            transcriber,
            translator,
            synthesizer,
            artifacts,
            settings,
        );

        Ok(Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            openai_service: Some(service),
        })
    }

    pub fn with_pipeline(config: Config, pipeline: TranslationPipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            openai_service: None,
        }
    }
}
