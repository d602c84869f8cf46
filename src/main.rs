use clap::Parser;
use pantry_chef::utils::logger;
use pantry_chef::{CliConfig, GeminiClient, RecipeError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.json);

    tracing::info!("Starting pantry-chef CLI");

    let (settings, request) = match config.resolve() {
        Ok(resolved) => resolved,
        Err(e) => exit_with(&e),
    };
    tracing::debug!("Settings: {:?}", settings);

    let client = GeminiClient::from_config(&settings);

    if config.test_connection {
        match client.test_connection().await {
            Ok(result) => {
                if config.json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    println!("✅ {}", result.message);
                    println!("Response: {}", result.response);
                }
            }
            Err(e) => exit_with(&e),
        }
        return Ok(());
    }

    match client
        .get_recipe_recommendations(&request.ingredients, request.preferences.as_deref())
        .await
    {
        Ok(recipes) => {
            if config.json {
                let output = serde_json::json!({
                    "model": client.model(),
                    "request": request,
                    "recipes": recipes,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", recipes);
            }
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn exit_with(e: &RecipeError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 設定錯誤在任何網路請求前就會發生
    let exit_code = if e.is_config_error() { 2 } else { 1 };
    std::process::exit(exit_code);
}
