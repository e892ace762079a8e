use aahar_core::{Embedding, EmbeddingError};
use async_trait::async_trait;

const FNV_OFFSET: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

fn fnv1a(bytes: &[u8], seed: u64) -> u64 {
    let mut hash = FNV_OFFSET ^ seed;
    for byte in bytes {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Deterministic embedder: each dimension is a seeded FNV-1a hash of the
/// lowercased token set, folded into [-1, 1]. The same text always embeds
/// to the same vector.
#[derive(Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut tokens: Vec<&str> = text.split_whitespace().collect();
        tokens.sort_unstable();
        let normalized = tokens.join(" ").to_lowercase();
        let bytes = normalized.as_bytes();

        (0..self.dimension)
            .map(|idx| {
                let value = fnv1a(bytes, idx as u64);
                (value % 20_000) as f32 / 10_000.0 - 1.0
            })
            .collect()
    }
}

#[async_trait]
impl Embedding for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.embed_text(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embedding_is_deterministic() {
        let embedder = HashingEmbedder::new(64);
        let a = embedder.embed("dal chawal for lunch").await.unwrap();
        let b = embedder.embed("dal chawal for lunch").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[tokio::test]
    async fn token_order_does_not_matter() {
        let embedder = HashingEmbedder::new(32);
        let a = embedder.embed("paneer tikka masala").await.unwrap();
        let b = embedder.embed("masala tikka paneer").await.unwrap();
        assert_eq!(a, b);
    }
}
