pub mod types;
pub mod prompt;
pub mod orchestrator;

pub use types::{AudioUpload, PipelineRequest, PipelineResult, SynthesizedAudio};
pub use prompt::{fill_prompt, language_hint};
pub use orchestrator::{PipelineSettings, TranslationPipeline};
