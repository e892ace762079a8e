use serde::{Deserialize, Serialize};

use crate::{AaharError, EmbeddingError, StoreError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            embedding: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f32,
}

#[async_trait::async_trait]
pub trait Embedding: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    fn dimension(&self) -> usize;
}

#[async_trait::async_trait]
pub trait VectorStore: Send + Sync {
    async fn add(&self, docs: Vec<Document>) -> Result<(), StoreError>;

    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredDocument>, StoreError>;
}

/// Nearest-neighbour lookup over the knowledge base. The store and embedder
/// behind it are opaque to callers.
#[async_trait::async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str, top_k: usize)
        -> Result<Vec<ScoredDocument>, AaharError>;
}
