use aahar_core::{RequestContext, Tool, ToolError};
use serde_json::Value;

pub const GREETING: &str = "Namaste! I'm AAHAR, your AI nutrition assistant with access to a comprehensive Indian food database. How can I help you with healthy diet suggestions today?";

pub const IDENTITY: &str = "I am AAHAR, an AI assistant specialized in Indian diet and nutrition, created by Suprovo. I have access to a detailed nutrition database with information about Indian foods and their nutritional values.";

pub struct GreetingTool;

#[async_trait::async_trait]
impl Tool for GreetingTool {
    fn name(&self) -> &str {
        "handle_greeting"
    }

    fn description(&self) -> &str {
        "Respond to simple greetings"
    }

    async fn execute(&self, _args: Value, _ctx: &RequestContext) -> Result<String, ToolError> {
        Ok(GREETING.to_string())
    }
}

pub struct IdentityTool;

#[async_trait::async_trait]
impl Tool for IdentityTool {
    fn name(&self) -> &str {
        "handle_identity"
    }

    fn description(&self) -> &str {
        "Respond to identity questions"
    }

    async fn execute(&self, _args: Value, _ctx: &RequestContext) -> Result<String, ToolError> {
        Ok(IDENTITY.to_string())
    }
}
