//! Ingredient extraction from a refrigerator photo
//!
//! `IngredientExtractor::extract` never fails: every problem degrades to an
//! empty list with the error attached as a diagnostic. `try_extract` exposes
//! the same work as a typed result.

pub mod normalize;

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    config::ModelSettings,
    error::{AppError, AppResult},
    gateway::{ConversationRequest, Message, ModelGateway, SamplingOptions},
};

pub use normalize::{parse_ingredients, IngredientList, PreambleRule, PreambleRules};

/// Fixed instruction sent with the image
pub const VISION_PROMPT: &str = "What ingredients are shown in this picture? \
List them only, separated by commas, like 'onion, potato, carrot'.";

/// Outcome of an extraction: the list plus an optional diagnostic
#[derive(Debug)]
pub struct Extraction {
    pub ingredients: IngredientList,
    pub diagnostic: Option<AppError>,
}

impl Extraction {
    /// True when nothing was recognized, for whatever reason
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

impl From<AppResult<IngredientList>> for Extraction {
    fn from(result: AppResult<IngredientList>) -> Self {
        match result {
            Ok(ingredients) => Self {
                ingredients,
                diagnostic: None,
            },
            Err(err) => Self {
                ingredients: IngredientList::new(),
                diagnostic: Some(err),
            },
        }
    }
}

/// Asks a vision model for the ingredients in an image
pub struct IngredientExtractor {
    gateway: Arc<dyn ModelGateway>,
    settings: ModelSettings,
    rules: PreambleRules,
}

impl IngredientExtractor {
    pub fn new(gateway: Arc<dyn ModelGateway>, settings: ModelSettings) -> Self {
        Self {
            gateway,
            settings,
            rules: PreambleRules::default(),
        }
    }

    /// Replace the preamble-stripping table
    pub fn with_rules(mut self, rules: PreambleRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &PreambleRules {
        &self.rules
    }

    /// Extract ingredients, degrading every failure to an empty list
    pub async fn extract(&self, image: &Path) -> Extraction {
        let extraction = Extraction::from(self.try_extract(image).await);
        if let Some(err) = &extraction.diagnostic {
            warn!(kind = %err.kind(), error = %err, "Ingredient extraction failed");
        }
        extraction
    }

    /// Extract ingredients as a typed result
    #[instrument(skip(self, image), fields(image = %image.display(), gateway = self.gateway.name()))]
    pub async fn try_extract(&self, image: &Path) -> AppResult<IngredientList> {
        if !image.is_file() {
            return Err(AppError::ResourceNotFound(image.to_path_buf()));
        }

        let request = ConversationRequest::new(
            self.settings.model.as_str(),
            vec![Message::user(VISION_PROMPT).with_image(image)],
            SamplingOptions::with_temperature(self.settings.extraction_temperature),
        )?;

        info!("Sending image to vision model");
        let response = self.gateway.invoke(&request).await?;
        debug!(raw = %response.content, "Raw vision response");

        let ingredients = parse_ingredients(&response.content, &self.rules);
        info!(count = ingredients.len(), "Parsed ingredients");
        Ok(ingredients)
    }
}
