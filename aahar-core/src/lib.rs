mod document;
mod error;
mod llm;
mod template;
mod tool;
mod weather;

pub use document::{Document, Embedding, Retriever, ScoredDocument, VectorStore};
pub use error::{AaharError, EmbeddingError, StoreError};
pub use llm::{CompletionModel, EnsembleModel, LlmRequest, LlmResponse, Message, Role};
pub use template::PromptTemplate;
pub use tool::{RequestContext, Tool, ToolError};
pub use weather::{WeatherProvider, WeatherReport};
