//! Fridge Chef - recipes and cooking Q&A from a photo of your refrigerator
//!
//! The pipeline has three stages sharing one model gateway: ingredient
//! extraction from an image, recipe generation, and grounded Q&A over the
//! generated recipe.

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod gateway;
pub mod ingredients;
pub mod qa;
pub mod recipe;

use std::sync::Arc;

use anyhow::Result;

pub use crate::config::{Config, ModelSettings};
pub use crate::error::{AppError, AppResult, ErrorKind};
pub use crate::gateway::{ModelGateway, OllamaGateway};
pub use crate::ingredients::{Extraction, IngredientExtractor, IngredientList};
pub use crate::qa::{QaAssistant, Session};
pub use crate::recipe::{Recipe, RecipeGenerator};

/// The three pipeline components wired to one gateway
pub struct FridgeChef {
    pub extractor: IngredientExtractor,
    pub generator: RecipeGenerator,
    pub assistant: QaAssistant,
}

impl FridgeChef {
    /// Create the pipeline against the configured Ollama server
    pub fn new(config: &Config) -> Result<Self> {
        // No timeout unless configured; a slow model simply blocks the caller
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let gateway: Arc<dyn ModelGateway> = Arc::new(OllamaGateway::new(http_client, config));
        Ok(Self::with_gateway(gateway, config.model.clone()))
    }

    /// Create the pipeline over an arbitrary gateway
    pub fn with_gateway(gateway: Arc<dyn ModelGateway>, settings: ModelSettings) -> Self {
        Self {
            extractor: IngredientExtractor::new(gateway.clone(), settings.clone()),
            generator: RecipeGenerator::new(gateway.clone(), settings.clone()),
            assistant: QaAssistant::new(gateway, settings),
        }
    }
}
