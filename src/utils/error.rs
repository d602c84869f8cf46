use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("{env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("Error calling Gemini API: {message}")]
    RemoteCall { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid ingredient '{input}': {reason}")]
    InvalidIngredient { input: String, reason: String },
}

impl RecipeError {
    pub fn remote(source: impl std::fmt::Display) -> Self {
        RecipeError::RemoteCall {
            message: source.to_string(),
        }
    }

    /// 是否為設定類錯誤（在任何網路請求之前發生）
    pub fn is_config_error(&self) -> bool {
        !matches!(self, RecipeError::RemoteCall { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RecipeError::MissingApiKey { env_var } => {
                format!("Error: {} environment variable is not set", env_var)
            }
            RecipeError::RemoteCall { .. } => self.to_string(),
            RecipeError::IoError(e) => format!("Could not read input file: {}", e),
            RecipeError::SerializationError(e) => format!("Malformed JSON input: {}", e),
            RecipeError::ConfigError { message } => format!("Configuration problem: {}", message),
            RecipeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            RecipeError::InvalidIngredient { input, reason } => {
                format!("Could not understand ingredient '{}': {}", input, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RecipeError::MissingApiKey { .. } => {
                "Export your Gemini API key, e.g. `export GEMINI_API_KEY=...`, or pass --api-key"
            }
            RecipeError::RemoteCall { .. } => {
                "Check network connectivity, the API key and the model name, then try again"
            }
            RecipeError::IoError(_) => "Make sure the file exists and is readable",
            RecipeError::SerializationError(_) => {
                "Ingredient files must be a JSON array of {name, quantity, unit, location} objects"
            }
            RecipeError::ConfigError { .. } | RecipeError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags"
            }
            RecipeError::InvalidIngredient { .. } => {
                "Use the form NAME[:QUANTITY[:UNIT[:LOCATION]]], e.g. Rice:1:cup:Pantry"
            }
        }
    }
}

/// Failures of the underlying text-generation call. The client wraps every
/// one of these into [`RecipeError::RemoteCall`].
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no text content in response")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, RecipeError>;
