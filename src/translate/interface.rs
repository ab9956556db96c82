use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TranslationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub text: String,
}

/// Chat-style completion used as a translator. Receives a system turn and a
/// user turn and returns the primary completion.
#[async_trait]
pub trait TranslationCapability: Send + Sync {
    async fn complete(
        &self,
        system_message: &str,
        user_message: &str,
    ) -> Result<TranslationResult, TranslationError>;
}
