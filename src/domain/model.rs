use crate::utils::error::RecipeError;
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_LOCATION: &str = "Kitchen";

/// An ingredient the user has on hand. Only `name` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit: None,
            location: None,
        }
    }

    pub fn with_quantity(mut self, quantity: impl Into<String>, unit: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self.unit = Some(unit.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn quantity_or_empty(&self) -> &str {
        self.quantity.as_deref().unwrap_or("")
    }

    pub fn unit_or_empty(&self) -> &str {
        self.unit.as_deref().unwrap_or("")
    }

    pub fn location_or_default(&self) -> &str {
        self.location.as_deref().unwrap_or(DEFAULT_LOCATION)
    }
}

/// 解析 `NAME[:QUANTITY[:UNIT[:LOCATION]]]`，空白欄位視為未提供
impl FromStr for Ingredient {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(4, ':').map(str::trim);

        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(RecipeError::InvalidIngredient {
                input: s.to_string(),
                reason: "name cannot be empty".to_string(),
            });
        }

        let mut optional = || {
            parts
                .next()
                .filter(|part| !part.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            name: name.to_string(),
            quantity: optional(),
            unit: optional(),
            location: optional(),
        })
    }
}

/// What to ask for: the ingredients on hand and optional free-text preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub ingredients: Vec<Ingredient>,
    pub preferences: Option<String>,
}

impl Validate for RecipeRequest {
    fn validate(&self) -> crate::utils::error::Result<()> {
        for ingredient in &self.ingredients {
            validate_non_empty_string("ingredient.name", &ingredient.name)?;
        }
        Ok(())
    }
}

/// Result of [`crate::GeminiClient::test_connection`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionTest {
    pub message: String,
    pub response: String,
}
