//! Reference embedding matrix

use serde::{Deserialize, Serialize};

use super::phrases::fingerprint_of;
use super::ReferencePhraseSet;
use crate::domain::embedding::dot_product;
use crate::domain::DomainError;

/// `dimensions x phrases` table of reference embeddings, stored column-major.
///
/// Column `i` is the embedding of `phrases[i]`. The phrase list and its
/// fingerprint travel with the matrix so a cached copy can be checked
/// against the phrase set it is loaded for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEmbeddingMatrix {
    dimensions: usize,
    phrases: Vec<String>,
    fingerprint: String,
    columns: Vec<Vec<f32>>,
}

impl ReferenceEmbeddingMatrix {
    /// Builds a matrix from one embedding per phrase, in phrase order
    pub fn from_columns(
        phrases: &ReferencePhraseSet,
        columns: Vec<Vec<f32>>,
    ) -> Result<Self, DomainError> {
        let dimensions = columns.first().map(Vec::len).unwrap_or_default();

        let matrix = Self {
            dimensions,
            phrases: phrases.as_slice().to_vec(),
            fingerprint: phrases.fingerprint(),
            columns,
        };
        matrix.validate()?;

        Ok(matrix)
    }

    /// Reassembles a decoded matrix, validating it
    pub fn from_parts(
        dimensions: usize,
        phrases: Vec<String>,
        fingerprint: String,
        columns: Vec<Vec<f32>>,
    ) -> Result<Self, DomainError> {
        let matrix = Self {
            dimensions,
            phrases,
            fingerprint,
            columns,
        };
        matrix.validate()?;

        Ok(matrix)
    }

    /// Checks shape and fingerprint consistency, for matrices read back
    /// from a cache backend
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.columns.len() != self.phrases.len() {
            return Err(DomainError::storage(format!(
                "Reference matrix has {} columns for {} phrases",
                self.columns.len(),
                self.phrases.len()
            )));
        }

        if self.dimensions == 0 {
            return Err(DomainError::storage("Reference matrix has zero dimensions"));
        }

        if let Some((index, column)) = self
            .columns
            .iter()
            .enumerate()
            .find(|(_, column)| column.len() != self.dimensions)
        {
            return Err(DomainError::storage(format!(
                "Reference column {} has {} values, expected {}",
                index,
                column.len(),
                self.dimensions
            )));
        }

        if self.fingerprint != fingerprint_of(&self.phrases) {
            return Err(DomainError::storage(
                "Reference matrix fingerprint does not match its phrases",
            ));
        }

        Ok(())
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of reference phrases (columns)
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn column(&self, index: usize) -> Option<&[f32]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    pub fn columns(&self) -> &[Vec<f32>] {
        &self.columns
    }

    /// True when this matrix was built for exactly `phrases`, in order
    pub fn matches(&self, phrases: &ReferencePhraseSet) -> bool {
        self.fingerprint == phrases.fingerprint()
    }

    /// Index and score of the column with the highest dot product against
    /// `embedding`. Ties keep the earliest column.
    pub fn best_match(&self, embedding: &[f32]) -> Option<(usize, f32)> {
        self.columns
            .iter()
            .map(|column| dot_product(embedding, column))
            .enumerate()
            .fold(None, |best, (index, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((index, score)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases() -> ReferencePhraseSet {
        ReferencePhraseSet::new(["bye", "see you"]).unwrap()
    }

    #[test]
    fn test_from_columns_keeps_phrase_order() {
        let matrix =
            ReferenceEmbeddingMatrix::from_columns(&phrases(), vec![vec![1.0, 0.0], vec![0.0, 1.0]])
                .unwrap();

        assert_eq!(matrix.dimensions(), 2);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.phrases()[1], "see you");
        assert_eq!(matrix.column(1), Some(&[0.0, 1.0][..]));
        assert!(matrix.matches(&phrases()));
    }

    #[test]
    fn test_from_columns_rejects_count_mismatch() {
        let result = ReferenceEmbeddingMatrix::from_columns(&phrases(), vec![vec![1.0, 0.0]]);

        assert!(result.is_err());
    }

    #[test]
    fn test_from_columns_rejects_ragged_columns() {
        let result =
            ReferenceEmbeddingMatrix::from_columns(&phrases(), vec![vec![1.0, 0.0], vec![1.0]]);

        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[test]
    fn test_matches_detects_other_phrase_set() {
        let matrix =
            ReferenceEmbeddingMatrix::from_columns(&phrases(), vec![vec![1.0], vec![0.5]]).unwrap();
        let other = ReferencePhraseSet::new(["bye", "see ya"]).unwrap();

        assert!(!matrix.matches(&other));
    }

    #[test]
    fn test_best_match() {
        let matrix =
            ReferenceEmbeddingMatrix::from_columns(&phrases(), vec![vec![0.2, 0.0], vec![0.95, 0.0]])
                .unwrap();

        let (index, score) = matrix.best_match(&[1.0, 0.0]).unwrap();

        assert_eq!(index, 1);
        assert!((score - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_best_match_tie_keeps_first() {
        let matrix =
            ReferenceEmbeddingMatrix::from_columns(&phrases(), vec![vec![0.5], vec![0.5]]).unwrap();

        assert_eq!(matrix.best_match(&[1.0]).map(|(i, _)| i), Some(0));
    }

    #[test]
    fn test_validate_rejects_tampered_fingerprint() {
        let matrix =
            ReferenceEmbeddingMatrix::from_columns(&phrases(), vec![vec![1.0], vec![0.5]]).unwrap();
        let mut json = serde_json::to_value(&matrix).unwrap();
        json["fingerprint"] = serde_json::json!("0000");
        let tampered: ReferenceEmbeddingMatrix = serde_json::from_value(json).unwrap();

        assert!(tampered.validate().is_err());
    }
}
