//! Recipe generation from a list of ingredients
//!
//! The model is asked for a fixed five-section layout. The text is passed
//! through as-is; nothing here checks that the model followed the layout.

use std::fmt;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    config::ModelSettings,
    error::{AppResult, ErrorKind},
    gateway::{ConversationRequest, Message, ModelGateway, SamplingOptions},
    ingredients::IngredientList,
};

/// Build the recipe request prompt for a comma-joined ingredient list
pub fn recipe_prompt(ingredients: &IngredientList) -> String {
    format!(
        "Ingredients in the refrigerator: {}

Recommend one dish that can be made with the ingredients above.
Always present the result in exactly the following format:

[Dish Name]
(the name of the dish)

[Additional Ingredients Needed]
- list any ingredients the dish needs that are not available
- if none are needed, write \"No additional ingredients needed\"

[Estimated Cooking Time]
Total time including preparation and cooking

[Cooking Steps]
1. First step
2. Second step
...

[Cooking Tips]
Important tips or advice for making this dish taste great",
        ingredients
    )
}

/// Generated recipe text
///
/// When generation failed the text is a readable error message and `failure`
/// records what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    text: String,
    failure: Option<ErrorKind>,
}

impl Recipe {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failure: None,
        }
    }

    /// Placeholder recipe describing a failed generation
    pub fn failed(kind: ErrorKind, description: impl fmt::Display) -> Self {
        Self {
            text: format!("An error occurred while generating the recipe: {}", description),
            failure: Some(kind),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn failure(&self) -> Option<ErrorKind> {
        self.failure
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Asks the model for a recipe built from the recognized ingredients
pub struct RecipeGenerator {
    gateway: Arc<dyn ModelGateway>,
    settings: ModelSettings,
}

impl RecipeGenerator {
    pub fn new(gateway: Arc<dyn ModelGateway>, settings: ModelSettings) -> Self {
        Self { gateway, settings }
    }

    /// Generate a recipe; failures come back as placeholder text
    pub async fn generate(&self, ingredients: &IngredientList) -> Recipe {
        match self.try_generate(ingredients).await {
            Ok(recipe) => recipe,
            Err(err) => {
                warn!(kind = %err.kind(), error = %err, "Recipe generation failed");
                Recipe::failed(err.kind(), &err)
            }
        }
    }

    #[instrument(skip(self, ingredients), fields(ingredients = ingredients.len()))]
    pub async fn try_generate(&self, ingredients: &IngredientList) -> AppResult<Recipe> {
        let request = ConversationRequest::new(
            self.settings.model.as_str(),
            vec![Message::user(recipe_prompt(ingredients))],
            SamplingOptions::with_temperature(self.settings.recipe_temperature),
        )?;

        info!("Requesting recipe");
        let response = self.gateway.invoke(&request).await?;
        Ok(Recipe::new(response.content.trim()))
    }
}
