use crate::domain::model::Ingredient;
use crate::utils::error::{RecipeError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    pub request: Option<RequestConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub model: Option<String>,
    pub api_base_url: Option<String>,
    pub api_key_env: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestConfig {
    pub preferences: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RecipeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RecipeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RecipeError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        self.request
            .as_ref()
            .map(|r| r.ingredients.as_slice())
            .unwrap_or_default()
    }

    pub fn preferences(&self) -> Option<&str> {
        self.request.as_ref().and_then(|r| r.preferences.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.gemini.api_base_url {
            validate_url("gemini.api_base_url", url)?;
        }
        if let Some(model) = &self.gemini.model {
            validate_non_empty_string("gemini.model", model)?;
        }
        if let Some(env_var) = &self.gemini.api_key_env {
            validate_non_empty_string("gemini.api_key_env", env_var)?;
        }
        for ingredient in self.ingredients() {
            validate_non_empty_string("request.ingredients.name", &ingredient.name)?;
        }
        Ok(())
    }
}
