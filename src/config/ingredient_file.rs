use crate::domain::model::Ingredient;
use crate::utils::error::{RecipeError, Result};
use crate::utils::validation::validate_file_extension;
use serde::Deserialize;
use std::path::Path;

const SUPPORTED_EXTENSIONS: &[&str] = &["json", "toml"];

#[derive(Debug, Deserialize)]
struct TomlIngredientFile {
    #[serde(default)]
    ingredients: Vec<Ingredient>,
}

/// Loads an ingredient list. JSON files hold a bare array of ingredient
/// objects; TOML files use `[[ingredients]]` tables.
pub fn load_ingredients<P: AsRef<Path>>(path: P) -> Result<Vec<Ingredient>> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();
    validate_file_extension("ingredients_file", &path_str, SUPPORTED_EXTENSIONS)?;

    let content = std::fs::read_to_string(path)?;
    let ingredients = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => {
            toml::from_str::<TomlIngredientFile>(&content)
                .map_err(|e| RecipeError::ConfigError {
                    message: format!("{}: {}", path_str, e),
                })?
                .ingredients
        }
        _ => serde_json::from_str::<Vec<Ingredient>>(&content)?,
    };

    tracing::debug!("Loaded {} ingredients from {}", ingredients.len(), path_str);
    Ok(ingredients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_json_ingredients() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pantry.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "Chicken", "quantity": "2", "unit": "breasts", "location": "Fridge"},
                {"name": "Salt"}
            ]"#,
        )
        .unwrap();

        let ingredients = load_ingredients(&path).unwrap();

        assert_eq!(ingredients.len(), 2);
        assert_eq!(ingredients[0].unit.as_deref(), Some("breasts"));
        assert_eq!(ingredients[1], Ingredient::new("Salt"));
    }

    #[test]
    fn test_load_toml_ingredients() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pantry.toml");
        std::fs::write(
            &path,
            "[[ingredients]]\nname = \"Rice\"\nquantity = \"1\"\nunit = \"cup\"\nlocation = \"Pantry\"\n",
        )
        .unwrap();

        let ingredients = load_ingredients(&path).unwrap();

        assert_eq!(
            ingredients,
            vec![Ingredient::new("Rice")
                .with_quantity("1", "cup")
                .with_location("Pantry")]
        );
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pantry.csv");
        std::fs::write(&path, "name\nRice\n").unwrap();

        assert!(matches!(
            load_ingredients(&path),
            Err(RecipeError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pantry.json");
        std::fs::write(&path, r#"[{"quantity": "2"}]"#).unwrap();

        assert!(matches!(
            load_ingredients(&path),
            Err(RecipeError::SerializationError(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_ingredients(dir.path().join("missing.json")),
            Err(RecipeError::IoError(_))
        ));
    }
}
