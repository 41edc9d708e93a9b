//! Pre-trained sentiment model: a TF-IDF vectorizer followed by a linear classifier.
//!
//! Both halves are fitted offline and exported as JSON. They are loaded once at
//! startup and shared read-only by every prediction.

pub mod classifier;
pub mod vectorizer;

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{AirsentError, Result};
use crate::models::Sentiment;

pub use classifier::LogisticRegression;
pub use vectorizer::{SparseVector, TfidfVectorizer};

/// Predicted label plus the probability of every class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub sentiment: Sentiment,
    pub probabilities: Vec<(Sentiment, f64)>,
}

#[derive(Debug, Clone)]
pub struct SentimentModel {
    vectorizer: TfidfVectorizer,
    classifier: LogisticRegression,
}

impl SentimentModel {
    /// Pair a vectorizer with a classifier of the same feature width.
    pub fn new(vectorizer: TfidfVectorizer, classifier: LogisticRegression) -> Result<Self> {
        if vectorizer.n_features() != classifier.n_features() {
            return Err(AirsentError::InvalidArtifact(format!(
                "vectorizer produces {} features but classifier expects {}",
                vectorizer.n_features(),
                classifier.n_features()
            )));
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Load both artifacts from disk.
    pub fn load(vectorizer_path: &Path, classifier_path: &Path) -> Result<Self> {
        let vectorizer = read_artifact(vectorizer_path, TfidfVectorizer::from_json)?;
        let classifier = read_artifact(classifier_path, LogisticRegression::from_json)?;
        let model = Self::new(vectorizer, classifier)?;
        info!(
            features = model.vectorizer.n_features(),
            classes = ?model.classifier.classes(),
            "Loaded sentiment model"
        );
        Ok(model)
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }

    /// Label a single piece of text.
    pub fn predict(&self, text: &str) -> Sentiment {
        self.classifier.predict(&self.vectorizer.transform(text))
    }

    /// Label a piece of text and report class probabilities.
    pub fn predict_detailed(&self, text: &str) -> Prediction {
        let features = self.vectorizer.transform(text);
        let sentiment = self.classifier.predict(&features);
        let probabilities = self
            .classifier
            .classes()
            .iter()
            .copied()
            .zip(self.classifier.predict_proba(&features))
            .collect();
        Prediction {
            sentiment,
            probabilities,
        }
    }
}

fn read_artifact<T>(path: &Path, parse: impl FnOnce(&str) -> Result<T>) -> Result<T> {
    let json = fs::read_to_string(path).map_err(|e| AirsentError::load(path, e.into()))?;
    parse(&json).map_err(|e| AirsentError::load(path, e))
}
