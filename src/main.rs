//! Fridge Chef - recipes and cooking Q&A from a photo of your refrigerator
//!
//! Usage: `fridge-chef [IMAGE_PATH]`. Without an argument the image path is
//! asked for interactively.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use fridge_chef::{cli, console::StdConsole, Config, FridgeChef};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with prompts
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fridge_chef=warn".into()),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    info!(url = %config.ollama_url, model = %config.model.model, "Configuration loaded");

    let chef = FridgeChef::new(&config)?;
    let image = std::env::args_os().nth(1).map(PathBuf::from);

    let mut console = StdConsole::new();
    let summary = cli::run(&mut console, &chef, image.as_deref()).await?;

    info!(
        ingredients = summary.ingredients.len(),
        questions = summary.questions_answered,
        "Fridge Chef finished"
    );
    Ok(())
}
