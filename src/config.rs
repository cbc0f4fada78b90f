//! Configuration management for Fridge Chef
//!
//! Configuration is loaded from environment variables. Components never read
//! the environment themselves; they receive `ModelSettings` at construction.

use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

/// Model identifier and per-stage sampling temperatures
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    /// Multimodal model used for every stage
    pub model: String,
    /// Temperature for ingredient extraction (kept low for stable lists)
    pub extraction_temperature: f32,
    /// Temperature for recipe generation
    pub recipe_temperature: f32,
    /// Temperature for follow-up answers
    pub answer_temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: "gemma3:4b".to_string(),
            extraction_temperature: 0.1,
            recipe_temperature: 0.7,
            answer_temperature: 0.2,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the Ollama server
    pub ollama_url: String,
    /// Optional client-side timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Model and sampling settings handed to each component
    pub model: ModelSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            request_timeout: None,
            model: ModelSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ModelSettings::default();

        let request_timeout = match lookup("FRIDGE_CHEF_REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => Some(Duration::from_secs(
                raw.trim()
                    .parse()
                    .context("Invalid FRIDGE_CHEF_REQUEST_TIMEOUT_SECONDS")?,
            )),
            None => None,
        };

        Ok(Self {
            ollama_url: lookup("OLLAMA_URL")
                .unwrap_or_else(|| "http://localhost:11434".to_string())
                .trim_end_matches('/')
                .to_string(),
            request_timeout,
            model: ModelSettings {
                model: lookup("FRIDGE_CHEF_MODEL").unwrap_or(defaults.model),
                extraction_temperature: temperature(
                    &lookup,
                    "FRIDGE_CHEF_EXTRACT_TEMPERATURE",
                    defaults.extraction_temperature,
                )?,
                recipe_temperature: temperature(
                    &lookup,
                    "FRIDGE_CHEF_RECIPE_TEMPERATURE",
                    defaults.recipe_temperature,
                )?,
                answer_temperature: temperature(
                    &lookup,
                    "FRIDGE_CHEF_ANSWER_TEMPERATURE",
                    defaults.answer_temperature,
                )?,
            },
        })
    }
}

fn temperature<F>(lookup: &F, key: &str, default: f32) -> Result<f32>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value: f32 = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid {}", key))?;
    if !(0.0..=1.0).contains(&value) {
        bail!("{} must be between 0 and 1, got {}", key, value);
    }
    Ok(value)
}
