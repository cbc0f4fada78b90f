//! Interactive flow: photo -> ingredients -> recipe -> Q&A
//!
//! This is the only place that turns diagnostics into console text. An empty
//! question ends the Q&A loop.

use std::path::Path;

use tracing::info;

use crate::{
    console::Console,
    error::AppResult,
    ingredients::IngredientList,
    qa::Session,
    recipe::Recipe,
    FridgeChef,
};

/// What a completed run produced
#[derive(Debug, Default)]
pub struct RunSummary {
    pub ingredients: IngredientList,
    pub recipe: Option<Recipe>,
    pub questions_answered: usize,
}

/// Drive one full interactive session
///
/// When `image` is `None` the path is read from the console.
pub async fn run<C: Console + ?Sized>(
    console: &mut C,
    chef: &FridgeChef,
    image: Option<&Path>,
) -> AppResult<RunSummary> {
    console.print_line("Welcome to Fridge Chef!").await?;

    let image_path = match image {
        Some(path) => path.to_path_buf(),
        None => console
            .prompt_line("Enter the path of the refrigerator image to analyze: ")
            .await?
            .trim()
            .into(),
    };

    console.print_line("").await?;
    console.print_line("Recognizing ingredients...").await?;
    let extraction = chef.extractor.extract(&image_path).await;

    if let Some(err) = &extraction.diagnostic {
        console.print_line(&format!("Error: {}", err)).await?;
        console.print_line(&format!("Hint: {}", err.hint())).await?;
    }
    if extraction.is_empty() {
        console
            .print_line("Could not recognize any ingredients. Please check the image and try again.")
            .await?;
        return Ok(RunSummary::default());
    }

    let ingredients = extraction.ingredients;
    console
        .print_line(&format!("Recognized ingredients: {}", ingredients))
        .await?;

    console.print_line("").await?;
    console
        .print_line("Generating a recipe... please wait a moment.")
        .await?;
    let recipe = chef.generator.generate(&ingredients).await;
    console.print_line("").await?;
    console.print_line("Generated recipe:").await?;
    console.print_line("").await?;
    console.print_line(recipe.text()).await?;

    console.print_line("").await?;
    console
        .print_line("Ask anything about the dish (press Enter on an empty line to quit).")
        .await?;

    let mut session = Session::new(recipe.clone());
    loop {
        console.print_line("").await?;
        let question = console.prompt_line("Question: ").await?;
        let question = question.trim();
        if question.is_empty() {
            console.print_line("Goodbye! Enjoy your cooking!").await?;
            break;
        }

        let answer = chef.assistant.ask(&mut session, question).await;
        console.print_line(&format!("Answer: {}", answer)).await?;
    }

    info!(
        session_id = %session.id(),
        turns = session.turn_count(),
        "Q&A session ended"
    );

    Ok(RunSummary {
        ingredients,
        recipe: Some(recipe),
        questions_answered: session.turn_count(),
    })
}
