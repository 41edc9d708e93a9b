//! TF-IDF vectorizer loaded from a fitted artifact.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{AirsentError, Result};
use crate::text;

/// Sparse feature vector: `(feature index, value)` pairs, sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_true() -> bool {
    true
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Fitted TF-IDF parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    /// Term (or space-joined n-gram) to feature index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    idf: Vec<f64>,
    #[serde(default = "default_true")]
    lowercase: bool,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
}

impl TfidfVectorizer {
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Result<Self> {
        let vectorizer = Self {
            vocabulary,
            idf,
            lowercase: true,
            sublinear_tf: false,
            norm: Some(Norm::L2),
            ngram_range: (1, 1),
        };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let vectorizer: Self = serde_json::from_str(json)?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Number of features; every classifier row must have this many weights.
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(AirsentError::InvalidArtifact(format!(
                "ngram_range ({min_n}, {max_n}) is not a valid range"
            )));
        }
        if let Some((term, idx)) = self.vocabulary.iter().find(|(_, idx)| **idx >= self.idf.len()) {
            return Err(AirsentError::InvalidArtifact(format!(
                "vocabulary term '{term}' maps to feature {idx}, but only {} idf weights exist",
                self.idf.len()
            )));
        }
        Ok(())
    }

    /// Transform one document into its TF-IDF feature vector.
    pub fn transform(&self, document: &str) -> SparseVector {
        let tokens = text::tokenize(document, self.lowercase);

        let mut counts: HashMap<usize, f64> = HashMap::new();
        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n {
            for gram in tokens.windows(n) {
                let term = gram.join(" ");
                if let Some(&idx) = self.vocabulary.get(&term) {
                    *counts.entry(idx).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut features: SparseVector = counts
            .into_iter()
            .map(|(idx, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (idx, tf * self.idf[idx])
            })
            .collect();
        features.sort_by_key(|(idx, _)| *idx);

        let norm = match self.norm {
            Some(Norm::L2) => features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => features.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if norm > 0.0 {
            for (_, v) in features.iter_mut() {
                *v /= norm;
            }
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> HashMap<String, usize> {
        terms.iter().enumerate().map(|(i, t)| (t.to_string(), i)).collect()
    }

    #[test]
    fn transform_weights_and_normalizes() {
        let v = TfidfVectorizer::new(vocab(&["great", "place", "dirty"]), vec![1.0, 2.0, 1.5]).unwrap();
        let x = v.transform("Great great PLACE, unknown");
        // raw: great = 2 * 1.0, place = 1 * 2.0 -> norm = sqrt(8)
        let norm = 8f64.sqrt();
        assert_eq!(x.len(), 2);
        assert_eq!(x[0].0, 0);
        assert!((x[0].1 - 2.0 / norm).abs() < 1e-12);
        assert_eq!(x[1].0, 1);
        assert!((x[1].1 - 2.0 / norm).abs() < 1e-12);
    }

    #[test]
    fn bigrams_are_matched_when_configured() {
        let json = r#"{"vocabulary": {"great": 0, "great place": 1}, "idf": [1.0, 1.0],
                       "ngram_range": [1, 2], "norm": null}"#;
        let v = TfidfVectorizer::from_json(json).unwrap();
        assert_eq!(v.transform("great place"), vec![(0, 1.0), (1, 1.0)]);
    }

    #[test]
    fn vocabulary_index_out_of_range_is_rejected() {
        let err = TfidfVectorizer::new(vocab(&["a1", "b2"]), vec![1.0]).unwrap_err();
        assert!(matches!(err, AirsentError::InvalidArtifact(_)));
    }
}
