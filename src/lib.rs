pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::gemini::GeminiHttpGenerator;
pub use crate::config::Settings;
pub use crate::core::client::GeminiClient;
pub use crate::domain::model::{ConnectionTest, Ingredient, RecipeRequest};
pub use crate::utils::error::{GenerationError, RecipeError, Result};
