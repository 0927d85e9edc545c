//! Embedding response types

/// A single embedding vector
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    /// Index of this embedding in the provider response
    index: usize,
    embedding: Vec<f32>,
}

impl Embedding {
    /// Create a new embedding
    pub fn new(index: usize, embedding: Vec<f32>) -> Self {
        Self { index, embedding }
    }

    /// Get the index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the embedding vector
    pub fn vector(&self) -> &[f32] {
        &self.embedding
    }

    /// Get the embedding dimensions
    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }

    /// Consume and return the vector
    pub fn into_vector(self) -> Vec<f32> {
        self.embedding
    }
}

/// Dot product of two vectors.
///
/// Used as the similarity score: provider embeddings are unit length, so
/// this equals cosine similarity. Returns 0.0 when the lengths differ.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Token usage reported by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingUsage {
    prompt_tokens: u32,
    total_tokens: u32,
}

impl EmbeddingUsage {
    pub fn new(prompt_tokens: u32, total_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            total_tokens,
        }
    }

    pub fn prompt_tokens(&self) -> u32 {
        self.prompt_tokens
    }

    pub fn total_tokens(&self) -> u32 {
        self.total_tokens
    }
}

/// Response from an embedding request
#[derive(Debug, Clone)]
pub struct EmbeddingResponse {
    model: String,
    data: Vec<Embedding>,
    usage: Option<EmbeddingUsage>,
}

impl EmbeddingResponse {
    /// Create a new embedding response
    pub fn new(model: String, data: Vec<Embedding>, usage: Option<EmbeddingUsage>) -> Self {
        Self { model, data, usage }
    }

    /// Get the model used
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get all embeddings
    pub fn embeddings(&self) -> &[Embedding] {
        &self.data
    }

    /// Get usage statistics, when the provider reported them
    pub fn usage(&self) -> Option<&EmbeddingUsage> {
        self.usage.as_ref()
    }

    /// Consume the response and return the first embedding
    pub fn into_first(self) -> Option<Embedding> {
        self.data.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_creation() {
        let emb = Embedding::new(0, vec![0.1, 0.2, 0.3]);

        assert_eq!(emb.index(), 0);
        assert_eq!(emb.dimensions(), 3);
        assert_eq!(emb.vector(), &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_dot_product_unit_vectors() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];

        assert!((dot_product(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_product_orthogonal() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];

        assert_eq!(dot_product(&a, &b), 0.0);
    }

    #[test]
    fn test_dot_product_is_not_normalized() {
        let a = vec![2.0, 0.0];
        let b = vec![3.0, 0.0];

        assert_eq!(dot_product(&a, &b), 6.0);
    }

    #[test]
    fn test_dot_product_different_lengths() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];

        assert_eq!(dot_product(&a, &b), 0.0);
    }

    #[test]
    fn test_into_first() {
        let response = EmbeddingResponse::new(
            "text-embedding-ada-002".into(),
            vec![Embedding::new(0, vec![0.5, 0.5])],
            Some(EmbeddingUsage::new(3, 3)),
        );

        assert_eq!(response.usage().map(|u| u.total_tokens()), Some(3));
        assert_eq!(response.into_first().unwrap().into_vector(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_into_first_empty() {
        let response = EmbeddingResponse::new("m".into(), vec![], None);

        assert!(response.into_first().is_none());
    }
}
