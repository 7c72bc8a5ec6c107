use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;
use ventabot_core::Value;

const PLACEHOLDER_PATTERN: &str = r"\{\{\s*(\w+)\s*\}\}";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("invalid placeholder pattern: {0}")]
    InvalidPattern(String),
}

/// Text template with `{{name}}` placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Placeholder names in order of appearance, duplicates included.
    pub fn placeholders(&self) -> Result<Vec<String>, PromptError> {
        let pattern = placeholder_regex()?;
        Ok(pattern
            .captures_iter(&self.template)
            .map(|caps| caps[1].to_string())
            .collect())
    }

    /// Substitutes each placeholder with its value. String values are
    /// inserted verbatim, other values via their JSON form, and names
    /// absent from `vars` render as the empty string.
    pub fn render(&self, vars: &HashMap<String, Value>) -> Result<String, PromptError> {
        let pattern = placeholder_regex()?;
        let rendered = pattern.replace_all(&self.template, |caps: &regex::Captures| {
            let key = &caps[1];
            match vars.get(key) {
                Some(value) => value
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| value.to_string()),
                None => String::new(),
            }
        });
        Ok(rendered.to_string())
    }
}

fn placeholder_regex() -> Result<Regex, PromptError> {
    Regex::new(PLACEHOLDER_PATTERN).map_err(|e| PromptError::InvalidPattern(e.to_string()))
}
