use serde::{Deserialize, Serialize};

/// Uploaded clip as received from the client
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub media_type: String,
}

#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub audio: Option<AudioUpload>,
    pub source_language: String,
    pub system_prompt: String,
    /// May contain the placeholder token any number of times, including zero.
    pub translate_prompt_template: String,
}

/// Synthesized speech, kept only until it is encoded for the response.
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub transcription: String,
    pub translation: String,
    pub audio_base64: String,
    pub success: bool,
}
