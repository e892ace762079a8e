use std::sync::Arc;

use aahar_core::{Document, ScoredDocument, StoreError, VectorStore};
use tokio::sync::RwLock;

#[derive(Default)]
struct StoreInner {
    docs: Vec<Document>,
    embeddings: Vec<Vec<f32>>,
    dimension: Option<usize>,
}

/// Append-only in-memory store ranked by cosine similarity.
#[derive(Clone, Default)]
pub struct CosineStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl CosineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.docs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl VectorStore for CosineStore {
    async fn add(&self, docs: Vec<Document>) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        for mut doc in docs {
            if doc.id.trim().is_empty() {
                return Err(StoreError::InvalidId(doc.id));
            }

            let embedding = doc
                .embedding
                .take()
                .ok_or_else(|| StoreError::MissingEmbedding(doc.id.clone()))?;
            match inner.dimension {
                Some(expected) if expected != embedding.len() => {
                    return Err(StoreError::DimensionMismatch {
                        expected,
                        got: embedding.len(),
                    });
                }
                None => inner.dimension = Some(embedding.len()),
                _ => {}
            }

            inner.docs.push(doc);
            inner.embeddings.push(embedding);
        }
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredDocument>, StoreError> {
        let inner = self.inner.read().await;
        if let Some(expected) = inner.dimension {
            if expected != query_embedding.len() {
                return Err(StoreError::DimensionMismatch {
                    expected,
                    got: query_embedding.len(),
                });
            }
        }

        let mut scored: Vec<ScoredDocument> = inner
            .docs
            .iter()
            .zip(inner.embeddings.iter())
            .map(|(doc, embedding)| {
                let mut score = cosine_similarity(query_embedding, embedding);
                if score.is_nan() {
                    score = f32::NEG_INFINITY;
                }
                ScoredDocument {
                    document: doc.clone(),
                    score,
                }
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        Ok(scored)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, content: &str, embedding: Vec<f32>) -> Document {
        Document {
            id: id.to_string(),
            content: content.to_string(),
            embedding: Some(embedding),
        }
    }

    #[tokio::test]
    async fn ranks_by_cosine_similarity() {
        let store = CosineStore::new();
        store
            .add(vec![
                doc("a", "close", vec![1.0, 0.0]),
                doc("b", "far", vec![0.0, 1.0]),
            ])
            .await
            .unwrap();

        let hits = store.search(&[1.0, 0.1], 2).await.unwrap();
        assert_eq!(hits[0].document.id, "a");
        assert_eq!(hits[1].document.id, "b");
    }

    #[tokio::test]
    async fn rejects_dimension_mismatch() {
        let store = CosineStore::new();
        store.add(vec![doc("a", "x", vec![1.0, 0.0])]).await.unwrap();
        let err = store.search(&[1.0], 1).await.unwrap_err();
        assert!(matches!(err, StoreError::DimensionMismatch { .. }));
    }

    #[tokio::test]
    async fn rejects_missing_embedding() {
        let store = CosineStore::new();
        let err = store
            .add(vec![Document::new("a", "no embedding")])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingEmbedding(_)));
    }
}
