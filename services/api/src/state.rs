//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the shared,
//! clonable service clients, and builds it from the loaded configuration.

use crate::config::{Config, Provider};
use anyhow::Context;
use async_openai::config::OpenAIConfig;
use interview_core::{
    llm_client::{GEMINI_API_BASE, OPENAI_API_BASE, OpenAICompatibleClient},
    prompts::PromptLibrary,
    service::{InterviewService, LLMInterviewService, MockInterviewService},
};
use std::sync::Arc;
use tracing::info;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub interview_service: Arc<dyn InterviewService>,
}

impl AppState {
    /// Builds the interview service for the configured provider.
    ///
    /// Prompt templates are loaded for every provider, so a missing template
    /// fails startup even when the mock provider would not use it.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let prompts = PromptLibrary::load_dir(&config.prompts_path).with_context(|| {
            format!(
                "Failed to load prompts from {}",
                config.prompts_path.display()
            )
        })?;

        let (api_key, api_base) = match config.provider {
            Provider::Mock => {
                info!("Using mock provider.");
                return Ok(Self {
                    interview_service: Arc::new(MockInterviewService::new(config.limits)),
                });
            }
            Provider::OpenAI => {
                info!("Using OpenAI provider.");
                (config.openai_api_key.as_deref(), OPENAI_API_BASE)
            }
            Provider::Gemini => {
                info!("Using Gemini provider.");
                (config.gemini_api_key.as_deref(), GEMINI_API_BASE)
            }
        };
        let api_key = api_key.context("API key for the selected provider is not set")?;

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        let client = Arc::new(OpenAICompatibleClient::new(
            openai_config,
            config.chat_model.clone(),
        ));

        Ok(Self {
            interview_service: Arc::new(LLMInterviewService::new(client, prompts, config.limits)),
        })
    }
}
