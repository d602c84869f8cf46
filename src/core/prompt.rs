use crate::domain::model::Ingredient;

pub const CONNECTION_TEST_PROMPT: &str =
    "Hello! Please respond with a simple test recipe for cookies.";

pub const NO_PREFERENCES: &str = "No specific preferences";

const RECIPE_FORMAT: &str = "\
Based on these ingredients and preferences, suggest 3 recipes I can make.

Format each recipe as follows:
RECIPE NAME: [name]
CUISINE: [cuisine type]
DIETARY INFO: [vegetarian, vegan, gluten-free, etc.]
PREP TIME: [minutes]
COOK TIME: [minutes]
SERVINGS: [number]
INGREDIENTS:
- [ingredient with quantity]
- [ingredient with quantity]
...
INSTRUCTIONS:
1. [step]
2. [step]
...

Only include recipes that I can make with the provided ingredients, with minimal additional ingredients. Follow the user preferences strictly.
";

/// `Chicken (2 breasts, stored in Fridge)`
pub fn format_ingredient(ingredient: &Ingredient) -> String {
    format!(
        "{} ({} {}, stored in {})",
        ingredient.name,
        ingredient.quantity_or_empty(),
        ingredient.unit_or_empty(),
        ingredient.location_or_default()
    )
}

/// Builds the recipe request sent to the model. Output depends only on the
/// arguments, so the same inputs always produce the same prompt.
pub fn build_recipe_prompt(ingredients: &[Ingredient], preferences: Option<&str>) -> String {
    let ingredient_list = ingredients
        .iter()
        .map(format_ingredient)
        .collect::<Vec<_>>()
        .join("\n");

    // 空字串與未提供同樣處理
    let preferences = preferences
        .filter(|p| !p.is_empty())
        .unwrap_or(NO_PREFERENCES);

    format!(
        "\nI have the following ingredients:\n{}\n\nUser preferences: {}\n\n{}",
        ingredient_list, preferences, RECIPE_FORMAT
    )
}
