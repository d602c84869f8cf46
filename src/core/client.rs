use crate::adapters::gemini::GeminiHttpGenerator;
use crate::core::prompt::{build_recipe_prompt, CONNECTION_TEST_PROMPT};
use crate::core::{ConfigProvider, ConnectionTest, ContentGenerator, Ingredient};
use crate::utils::error::{RecipeError, Result};
use std::fmt;

pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const CONNECTION_TEST_MESSAGE: &str = "Gemini API test successful";

/// Client for asking Gemini for recipe ideas.
///
/// The credential is captured once when the client is built. Every call
/// checks for it before touching the generator, so a missing key never
/// results in a network request.
pub struct GeminiClient<G: ContentGenerator = GeminiHttpGenerator> {
    generator: G,
    api_key: Option<String>,
    api_key_env: String,
    model: String,
}

impl GeminiClient<GeminiHttpGenerator> {
    /// Builds a client that talks to the real Gemini HTTP API.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let api_key = config
            .api_key()
            .filter(|key| !key.is_empty())
            .map(str::to_string);
        let generator = GeminiHttpGenerator::new(
            config.api_base_url(),
            api_key.clone().unwrap_or_default(),
        );
        Self {
            generator,
            api_key,
            api_key_env: config.api_key_env().to_string(),
            model: config.model().to_string(),
        }
    }
}

impl<G: ContentGenerator> GeminiClient<G> {
    pub fn new(generator: G, api_key: Option<String>) -> Self {
        Self {
            generator,
            api_key: api_key.filter(|key| !key.is_empty()),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key_env(mut self, env_var: impl Into<String>) -> Self {
        self.api_key_env = env_var.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn ensure_api_key(&self) -> Result<()> {
        if self.api_key.is_none() {
            return Err(RecipeError::MissingApiKey {
                env_var: self.api_key_env.clone(),
            });
        }
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Sending {} byte prompt to model {}", prompt.len(), self.model);

        self.generator
            .generate_content(&self.model, prompt)
            .await
            .map_err(|e| {
                tracing::error!("Gemini API call failed: {}", e);
                RecipeError::remote(e)
            })
    }

    /// Asks the model for three recipes that fit `ingredients` and
    /// `preferences`, returning the model's text untouched.
    pub async fn get_recipe_recommendations(
        &self,
        ingredients: &[Ingredient],
        preferences: Option<&str>,
    ) -> Result<String> {
        self.ensure_api_key()?;

        tracing::info!(
            "Requesting recipe recommendations for {} ingredients",
            ingredients.len()
        );
        let prompt = build_recipe_prompt(ingredients, preferences);
        let text = self.generate(&prompt).await?;

        tracing::info!("Received recipe recommendations ({} chars)", text.len());
        Ok(text)
    }

    /// Sends a canned prompt to check the key and model are usable.
    pub async fn test_connection(&self) -> Result<ConnectionTest> {
        self.ensure_api_key()?;

        tracing::info!("Testing Gemini API connection");
        let response = self.generate(CONNECTION_TEST_PROMPT).await?;

        Ok(ConnectionTest {
            message: CONNECTION_TEST_MESSAGE.to_string(),
            response,
        })
    }
}

impl<G: ContentGenerator> fmt::Debug for GeminiClient<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("api_key_env", &self.api_key_env)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
