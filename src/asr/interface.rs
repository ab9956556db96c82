use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TranscriptionError;

/// One uploaded clip plus the optional language hint for the remote service.
#[derive(Debug, Clone, Copy)]
pub struct TranscriptionRequest<'a> {
    pub audio: &'a [u8],
    pub filename: &'a str,
    pub media_type: &'a str,
    /// `None` asks the service to auto-detect the spoken language.
    pub language_hint: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
    pub language: Option<String>,
}

/// Speech-to-text capability
#[async_trait]
pub trait TranscriptionCapability: Send + Sync {
    async fn transcribe(
        &self,
        request: TranscriptionRequest<'_>,
    ) -> Result<TranscriptionResult, TranscriptionError>;
}
