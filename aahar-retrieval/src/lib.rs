mod embedder;
mod indexer;
mod retriever;
mod store;

pub use embedder::HashingEmbedder;
pub use indexer::{index_knowledge_base, split_paragraphs, IndexError};
pub use retriever::EmbeddingRetriever;
pub use store::CosineStore;
