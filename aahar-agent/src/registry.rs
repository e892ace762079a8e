use std::collections::BTreeMap;
use std::sync::Arc;

use aahar_core::Tool;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool name must not be empty or whitespace: {name:?}")]
    InvalidName { name: String },
    #[error("duplicate tool name: {name}")]
    DuplicateName { name: String },
}

/// Named tools available to the planner.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder { tools: Vec::new() }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Numbered tool catalogue for the orchestrator prompt.
    pub fn describe(&self) -> String {
        self.tools
            .values()
            .enumerate()
            .map(|(idx, tool)| format!("{}. **{}**: {}", idx + 1, tool.name(), tool.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistryBuilder {
    pub fn register(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn build(self) -> Result<ToolRegistry, RegistryError> {
        let mut map: BTreeMap<String, Arc<dyn Tool>> = BTreeMap::new();
        for tool in self.tools {
            let name = tool.name().to_string();
            if name.trim().is_empty() {
                return Err(RegistryError::InvalidName { name });
            }
            if map.insert(name.clone(), tool).is_some() {
                return Err(RegistryError::DuplicateName { name });
            }
        }
        Ok(ToolRegistry { tools: map })
    }
}
