pub mod ingredient_file;
pub mod toml_config;

use crate::adapters::gemini::DEFAULT_API_BASE_URL;
use crate::core::client::{DEFAULT_API_KEY_ENV, DEFAULT_MODEL};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use std::fmt;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::domain::model::{Ingredient, RecipeRequest};
#[cfg(feature = "cli")]
use crate::utils::error::RecipeError;
#[cfg(feature = "cli")]
use clap::Parser;

/// Resolved client settings. The credential is read from the environment
/// once, when the settings are built.
#[derive(Clone)]
pub struct Settings {
    api_key: Option<String>,
    api_key_env: String,
    model: String,
    api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// Defaults plus the key from `GEMINI_API_KEY`.
    pub fn from_env() -> Self {
        let settings = Self::default();
        let api_key = read_key(&settings.api_key_env);
        Self { api_key, ..settings }
    }

    pub fn from_toml(config: &TomlConfig) -> Self {
        let gemini = &config.gemini;
        let api_key_env = gemini
            .api_key_env
            .clone()
            .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());

        // 未被替換的 ${VAR} 佔位符視為沒有提供金鑰
        let api_key = gemini
            .api_key
            .clone()
            .filter(|key| !key.is_empty() && !key.starts_with("${"))
            .or_else(|| read_key(&api_key_env));

        Self {
            api_key,
            api_key_env,
            model: gemini
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base_url: gemini
                .api_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key: String = api_key.into();
        self.api_key = Some(api_key).filter(|key| !key.is_empty());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

fn read_key(env_var: &str) -> Option<String> {
    std::env::var(env_var).ok().filter(|key| !key.is_empty())
}

impl ConfigProvider for Settings {
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn api_key_env(&self) -> &str {
        &self.api_key_env
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_non_empty_string("model", &self.model)?;
        validate_non_empty_string("api_key_env", &self.api_key_env)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_key_env", &self.api_key_env)
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

#[cfg(feature = "cli")]
#[derive(Clone, Parser)]
#[command(name = "pantry-chef")]
#[command(about = "Suggest recipes from the ingredients you have, using Google Gemini")]
pub struct CliConfig {
    #[arg(long, help = "API key; overrides the key read from the configured environment variable")]
    pub api_key: Option<String>,

    #[arg(long, help = "Model name, e.g. gemini-1.5-pro-latest")]
    pub model: Option<String>,

    #[arg(long)]
    pub api_base_url: Option<String>,

    #[arg(long, help = "TOML config file with [gemini] and [request] sections")]
    pub config: Option<String>,

    #[arg(
        long = "ingredient",
        value_name = "NAME[:QTY[:UNIT[:LOCATION]]]",
        help = "Ingredient on hand, repeatable"
    )]
    pub ingredients: Vec<Ingredient>,

    #[arg(long, help = "JSON or TOML file with a list of ingredients")]
    pub ingredients_file: Option<String>,

    #[arg(long, help = "Dietary preferences or restrictions")]
    pub preferences: Option<String>,

    #[arg(long, help = "Only check that the API key and model work")]
    pub test_connection: bool,

    #[arg(long, help = "Print results as JSON")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Merges the config file, ingredient file and flags. Flags win over
    /// the file; ingredients from all sources are concatenated.
    pub fn resolve(&self) -> Result<(Settings, RecipeRequest)> {
        let file_config = match &self.config {
            Some(path) => {
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Some(config)
            }
            None => None,
        };

        let mut settings = file_config
            .as_ref()
            .map(Settings::from_toml)
            .unwrap_or_else(Settings::from_env);
        if let Some(key) = &self.api_key {
            settings = settings.with_api_key(key.clone());
        }
        if let Some(model) = &self.model {
            settings = settings.with_model(model.clone());
        }
        if let Some(url) = &self.api_base_url {
            settings = settings.with_api_base_url(url.clone());
        }
        settings.validate()?;

        let mut ingredients: Vec<Ingredient> = file_config
            .as_ref()
            .map(|c| c.ingredients().to_vec())
            .unwrap_or_default();
        if let Some(path) = &self.ingredients_file {
            ingredients.extend(ingredient_file::load_ingredients(path)?);
        }
        ingredients.extend(self.ingredients.iter().cloned());

        let preferences = self
            .preferences
            .clone()
            .or_else(|| file_config.as_ref().and_then(|c| c.preferences().map(str::to_string)));

        let request = RecipeRequest {
            ingredients,
            preferences,
        };
        if !self.test_connection {
            request.validate()?;
            if request.ingredients.is_empty() {
                return Err(RecipeError::ConfigError {
                    message: "no ingredients given; use --ingredient, --ingredients-file or [request] in --config".to_string(),
                });
            }
        }

        Ok((settings, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// 設定環境變數並在結束時還原原值
    fn with_env<T>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> T) -> T {
        let saved: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(name, _)| (name.to_string(), std::env::var(name).ok()))
            .collect();
        for (name, value) in vars {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }

        let result = f();

        for (name, value) in saved {
            match value {
                Some(value) => std::env::set_var(&name, value),
                None => std::env::remove_var(&name),
            }
        }
        result
    }

    #[test]
    #[serial]
    fn test_settings_from_toml_defaults() {
        let config = TomlConfig::from_toml_str(
            "[gemini]\napi_key_env = \"PANTRY_CHEF_TEST_NEVER_SET\"\n",
        )
        .unwrap();

        let settings = Settings::from_toml(&config);

        assert_eq!(settings.model(), "gemini-1.5-pro-latest");
        assert_eq!(
            settings.api_base_url(),
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(settings.api_key_env(), "PANTRY_CHEF_TEST_NEVER_SET");
        assert!(settings.api_key().is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_settings_reads_key_from_configured_env_var() {
        let config =
            TomlConfig::from_toml_str("[gemini]\napi_key_env = \"PANTRY_CHEF_TEST_KEY_VAR\"\n")
                .unwrap();

        let settings = with_env(&[("PANTRY_CHEF_TEST_KEY_VAR", Some("from-env"))], || {
            Settings::from_toml(&config)
        });

        assert_eq!(settings.api_key(), Some("from-env"));
    }

    #[test]
    #[serial]
    fn test_unresolved_placeholder_is_not_a_key() {
        let config = TomlConfig::from_toml_str(
            "[gemini]\napi_key = \"${PANTRY_CHEF_TEST_UNSET_KEY}\"\napi_key_env = \"PANTRY_CHEF_TEST_UNSET_KEY\"\n",
        )
        .unwrap();

        assert!(Settings::from_toml(&config).api_key().is_none());
    }

    #[test]
    fn test_settings_overrides_and_redaction() {
        let settings = Settings::default()
            .with_api_key("super-secret")
            .with_model("gemini-1.5-flash")
            .with_api_base_url("http://localhost:9000");

        assert_eq!(settings.api_key(), Some("super-secret"));
        assert_eq!(settings.model(), "gemini-1.5-flash");
        assert!(!format!("{:?}", settings).contains("super-secret"));

        assert!(Settings::default().with_api_key("").api_key().is_none());
        assert!(Settings::default()
            .with_api_base_url("not a url")
            .validate()
            .is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    #[serial]
    fn test_cli_resolve_merges_sources() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(
            br#"
[gemini]
model = "gemini-from-file"
api_key_env = "PANTRY_CHEF_TEST_NEVER_SET"

[request]
preferences = "Spicy"

[[request.ingredients]]
name = "Tofu"
"#,
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "pantry-chef",
            "--api-key",
            "flag-key",
            "--config",
            file.path().to_str().unwrap(),
            "--ingredient",
            "Rice:1:cup:Pantry",
        ]);

        let (settings, request) = cli.resolve().unwrap();

        assert_eq!(settings.api_key(), Some("flag-key"));
        assert_eq!(settings.model(), "gemini-from-file");
        assert_eq!(request.preferences.as_deref(), Some("Spicy"));
        assert_eq!(request.ingredients.len(), 2);
        assert_eq!(request.ingredients[0].name, "Tofu");
        assert_eq!(request.ingredients[1].unit.as_deref(), Some("cup"));
    }

    #[cfg(feature = "cli")]
    #[test]
    #[serial]
    fn test_cli_requires_ingredients_unless_testing_connection() {
        let cli = CliConfig::parse_from(["pantry-chef", "--api-key", "k"]);
        assert!(matches!(cli.resolve(), Err(RecipeError::ConfigError { .. })));

        let cli = CliConfig::parse_from(["pantry-chef", "--api-key", "k", "--test-connection"]);
        assert!(cli.resolve().is_ok());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_rejects_malformed_ingredient() {
        let result = CliConfig::try_parse_from(["pantry-chef", "--ingredient", ":2:cups"]);
        assert!(result.is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    #[serial]
    fn test_configured_key_env_wins_over_default_variable() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[gemini]\napi_key_env = \"PANTRY_CHEF_TEST_CONFIGURED_KEY\"\n")
            .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let (settings, _) = with_env(
            &[
                ("GEMINI_API_KEY", Some("stale-default-key")),
                ("PANTRY_CHEF_TEST_CONFIGURED_KEY", Some("configured-key")),
            ],
            || {
                CliConfig::parse_from(["pantry-chef", "--test-connection", "--config", path.as_str()])
                    .resolve()
                    .unwrap()
            },
        );
        assert_eq!(settings.api_key(), Some("configured-key"));
        assert_eq!(settings.api_key_env(), "PANTRY_CHEF_TEST_CONFIGURED_KEY");

        // 指定的變數未設定時，不可退回 GEMINI_API_KEY
        let (settings, _) = with_env(
            &[
                ("GEMINI_API_KEY", Some("stale-default-key")),
                ("PANTRY_CHEF_TEST_CONFIGURED_KEY", None),
            ],
            || {
                CliConfig::parse_from(["pantry-chef", "--test-connection", "--config", path.as_str()])
                    .resolve()
                    .unwrap()
            },
        );
        assert!(settings.api_key().is_none());

        // 明確的 --api-key 旗標仍然優先
        let (settings, _) = with_env(
            &[("PANTRY_CHEF_TEST_CONFIGURED_KEY", Some("configured-key"))],
            || {
                CliConfig::parse_from([
                    "pantry-chef",
                    "--test-connection",
                    "--api-key",
                    "flag-key",
                    "--config",
                    path.as_str(),
                ])
                .resolve()
                .unwrap()
            },
        );
        assert_eq!(settings.api_key(), Some("flag-key"));
    }
}
