use std::path::Path;

use aahar_core::{Document, Embedding, StoreError, VectorStore};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("embedding error: {0}")]
    Embedding(#[from] aahar_core::EmbeddingError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Split a prose corpus into paragraph chunks: blank-line separated blocks,
/// trimmed, with fragments under 40 characters dropped.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(|block| {
            block
                .lines()
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string()
        })
        .filter(|block| block.len() >= 40)
        .collect()
}

/// Load a knowledge-base text file, chunk it, embed each chunk, and add the
/// documents to the store. Returns the number of documents indexed.
pub async fn index_knowledge_base<E, S>(
    path: impl AsRef<Path>,
    embedder: &E,
    store: &S,
) -> Result<usize, IndexError>
where
    E: Embedding,
    S: VectorStore,
{
    let text = tokio::fs::read_to_string(path.as_ref()).await?;
    let chunks = split_paragraphs(&text);
    if chunks.is_empty() {
        tracing::warn!(path = %path.as_ref().display(), "knowledge base produced no chunks");
        return Ok(0);
    }

    let embeddings = embedder.embed_batch(&chunks).await?;
    let docs: Vec<Document> = chunks
        .into_iter()
        .zip(embeddings)
        .enumerate()
        .map(|(idx, (content, embedding))| Document {
            id: format!("kb-{idx}"),
            content,
            embedding: Some(embedding),
        })
        .collect();

    let count = docs.len();
    store.add(docs).await?;
    tracing::info!(count, "knowledge base indexed");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CosineStore, HashingEmbedder};
    use std::io::Write;

    #[test]
    fn splits_on_blank_lines_and_drops_fragments() {
        let text = "First paragraph about balanced Indian breakfasts and dal.\n\nshort\n\nSecond paragraph\ndiscussing seasonal vegetables and millets in detail.";
        let chunks = split_paragraphs(text);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[1].starts_with("Second paragraph discussing"));
    }

    #[tokio::test]
    async fn indexes_file_into_store() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "Lentils are a staple source of vegetarian protein across India.\n\nCooling foods such as curd rice suit hot and humid afternoons."
        )
        .unwrap();

        let embedder = HashingEmbedder::new(32);
        let store = CosineStore::new();
        let count = index_knowledge_base(file.path(), &embedder, &store)
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.len().await, 2);
    }
}
