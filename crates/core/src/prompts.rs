//! Prompt Templates
//!
//! System instructions live in markdown files, one per template, keyed by
//! file stem. Placeholders are written as `{name}` and substituted verbatim.

use std::{collections::HashMap, fs, path::Path};

pub const PLAN_PROMPT: &str = "generate_interview_plan";
pub const TURN_PROMPT: &str = "conduct_interview_turn";

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Missing prompt template: '{0}'")]
    Missing(String),
    #[error("Failed to read prompts from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The set of prompt templates required by the interview service.
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    templates: HashMap<String, String>,
}

impl PromptLibrary {
    /// Wraps an existing template map, checking that every required template is present.
    pub fn from_map(templates: HashMap<String, String>) -> Result<Self, PromptError> {
        for key in [PLAN_PROMPT, TURN_PROMPT] {
            if !templates.contains_key(key) {
                return Err(PromptError::Missing(key.to_string()));
            }
        }
        Ok(Self { templates })
    }

    /// Loads every `*.md` file in `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, PromptError> {
        let io_err = |source| PromptError::Io {
            path: dir.display().to_string(),
            source,
        };
        let mut templates = HashMap::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("md") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let content = fs::read_to_string(&path).map_err(io_err)?;
            templates.insert(key.to_string(), content);
        }
        Self::from_map(templates)
    }

    /// Renders template `key`, replacing each `{name}` with its value.
    pub fn render(&self, key: &str, vars: &[(&str, String)]) -> Result<String, PromptError> {
        let template = self
            .templates
            .get(key)
            .ok_or_else(|| PromptError::Missing(key.to_string()))?;
        Ok(vars.iter().fold(template.clone(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        }))
    }
}
