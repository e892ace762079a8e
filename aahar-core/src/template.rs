use std::collections::HashMap;

use regex::Regex;

use crate::AaharError;

/// Prompt template with `{{name}}` placeholders and a declared variable
/// list. Rendering fails if any declared variable is missing from the
/// provided values, so a half-substituted prompt can never reach a model.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>, variables: &[&str]) -> Self {
        Self {
            template: template.into(),
            variables: variables.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn render(&self, vars: &HashMap<&str, String>) -> Result<String, AaharError> {
        for name in &self.variables {
            if !vars.contains_key(name.as_str()) {
                return Err(AaharError::InvalidConfig(format!(
                    "missing template variable '{name}'"
                )));
            }
        }

        let pattern = Regex::new(r"\{\{\s*(\w+)\s*\}\}")
            .map_err(|e| AaharError::InvalidConfig(e.to_string()))?;
        let mut missing = None;
        let rendered = pattern.replace_all(&self.template, |caps: &regex::Captures| {
            let key = &caps[1];
            match vars.get(key) {
                Some(value) => value.clone(),
                None => {
                    missing.get_or_insert_with(|| key.to_string());
                    String::new()
                }
            }
        });

        if let Some(name) = missing {
            return Err(AaharError::InvalidConfig(format!(
                "missing template variable '{name}'"
            )));
        }
        Ok(rendered.to_string())
    }
}
