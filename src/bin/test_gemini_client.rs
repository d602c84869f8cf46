//! Manual smoke test against the live Gemini API. Needs `GEMINI_API_KEY`.

use pantry_chef::utils::logger;
use pantry_chef::{GeminiClient, Ingredient, Settings};

const PREFERENCES: &str = "Healthy recipes with low sodium";

fn sample_ingredients() -> Vec<Ingredient> {
    vec![
        Ingredient::new("Chicken")
            .with_quantity("2", "breasts")
            .with_location("Fridge"),
        Ingredient::new("Rice")
            .with_quantity("1", "cup")
            .with_location("Pantry"),
        Ingredient::new("Broccoli")
            .with_quantity("1", "head")
            .with_location("Fridge"),
        Ingredient::new("Garlic")
            .with_quantity("3", "cloves")
            .with_location("Pantry"),
        Ingredient::new("Soy Sauce")
            .with_quantity("1/4", "cup")
            .with_location("Fridge"),
    ]
}

async fn run(client: &GeminiClient) -> pantry_chef::Result<()> {
    println!("Testing Gemini API connection...");
    let test_result = client.test_connection().await?;
    println!("Connection test successful!");
    println!("Response: {}", test_result.response);

    println!("\nTesting recipe recommendations...");
    let response = client
        .get_recipe_recommendations(&sample_ingredients(), Some(PREFERENCES))
        .await?;
    println!("Recipe recommendations received!");
    println!("\nResponse:");
    println!("{}", response);

    Ok(())
}

#[tokio::main]
async fn main() {
    logger::init_cli_logger(false);

    let settings = Settings::from_env();
    let client = GeminiClient::from_config(&settings);

    if !client.has_api_key() {
        println!("Error: GEMINI_API_KEY environment variable is not set");
        std::process::exit(1);
    }

    if let Err(e) = run(&client).await {
        println!("Error testing Gemini API: {}", e);
        std::process::exit(1);
    }
}
