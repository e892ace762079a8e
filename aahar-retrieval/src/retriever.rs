use aahar_core::{AaharError, Embedding, Retriever, ScoredDocument, VectorStore};
use async_trait::async_trait;

/// Embed-then-search composition over any embedder/store pair.
pub struct EmbeddingRetriever<E, S> {
    embedder: E,
    store: S,
}

impl<E, S> EmbeddingRetriever<E, S>
where
    E: Embedding,
    S: VectorStore,
{
    pub fn new(embedder: E, store: S) -> Self {
        Self { embedder, store }
    }
}

#[async_trait]
impl<E, S> Retriever for EmbeddingRetriever<E, S>
where
    E: Embedding + Send + Sync,
    S: VectorStore + Send + Sync,
{
    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredDocument>, AaharError> {
        let embedding = self.embedder.embed(query).await?;
        let results = self.store.search(&embedding, top_k).await?;
        Ok(results)
    }
}
