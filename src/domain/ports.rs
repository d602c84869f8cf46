use crate::utils::error::GenerationError;
use async_trait::async_trait;

/// Where the client gets its credential and model settings from.
pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> Option<&str>;
    fn api_key_env(&self) -> &str;
    fn model(&self) -> &str;
    fn api_base_url(&self) -> &str;
}

/// A single prompt-in, text-out call to a hosted model.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
    ) -> std::result::Result<String, GenerationError>;
}
