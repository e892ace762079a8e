use serde_json::Value;

/// One completed tool call within the current request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScratchpadEntry {
    pub tool_name: String,
    pub tool_input: Value,
    pub tool_output: String,
}

/// Per-request, append-only log of tool calls fed back to the planner so it
/// remembers what it has already tried. Never persisted into session
/// history.
#[derive(Debug, Default)]
pub struct Scratchpad {
    entries: Vec<ScratchpadEntry>,
}

impl Scratchpad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tool_name: impl Into<String>, tool_input: Value, tool_output: impl Into<String>) {
        self.entries.push(ScratchpadEntry {
            tool_name: tool_name.into(),
            tool_input,
            tool_output: tool_output.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "Tool: {}\nInput: {}\nOutput: {}",
                    entry.tool_name, entry.tool_input, entry.tool_output
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
