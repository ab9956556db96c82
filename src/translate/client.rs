use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use super::interface::{TranslationCapability, TranslationResult};
use crate::error::TranslationError;
use crate::openai_service::{
    error_parts, ChatCompletionRequest, ChatCompletionResponse, Message, OpenAIServiceClient,
};

/// Chat completion translator over the shared OpenAI client
pub struct ChatTranslator {
    service: Arc<OpenAIServiceClient>,
    model: String,
}

impl ChatTranslator {
    pub fn new(service: Arc<OpenAIServiceClient>, model: String) -> Self {
        info!("Initialized ChatTranslator: model={}", model);
        Self { service, model }
    }
}

#[async_trait]
impl TranslationCapability for ChatTranslator {
    async fn complete(
        &self,
        system_message: &str,
        user_message: &str,
    ) -> Result<TranslationResult, TranslationError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::system(system_message), Message::user(user_message)],
        };

        debug!(model = %self.model, prompt_chars = user_message.len(), "Requesting translation");

        let response = self
            .service
            .post_json("chat/completions", &request)
            .await
            .map_err(|e| TranslationError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let (status, body) = error_parts(response).await;
            return Err(TranslationError::Status { status, body });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(format!("body: {}", e)))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(TranslationError::EmptyCompletion)?;

        info!(chars = text.len(), "Translation completed");
        Ok(TranslationResult { text })
    }
}
