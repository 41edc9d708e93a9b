//! Linear (logistic regression) classifier loaded from a fitted artifact.

use serde::Deserialize;

use crate::error::{AirsentError, Result};
use crate::models::Sentiment;

use super::vectorizer::SparseVector;

#[derive(Debug, Clone, Deserialize)]
struct RawClassifier {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

/// Fitted logistic regression weights.
///
/// A single coefficient row with two classes is the binary form: a positive
/// decision score selects `classes[1]`. Otherwise there is one row per class
/// and the highest score wins.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    classes: Vec<Sentiment>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl LogisticRegression {
    pub fn new(classes: Vec<Sentiment>, coef: Vec<Vec<f64>>, intercept: Vec<f64>) -> Result<Self> {
        let model = Self {
            classes,
            coef,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawClassifier = serde_json::from_str(json)?;
        let classes = raw
            .classes
            .iter()
            .map(|c| c.parse::<Sentiment>())
            .collect::<Result<Vec<_>>>()
            .map_err(|e| AirsentError::InvalidArtifact(e.to_string()))?;
        Self::new(classes, raw.coef, raw.intercept)
    }

    fn validate(&self) -> Result<()> {
        let rows = self.coef.len();
        let expected_rows = if self.classes.len() == 2 { [1, 2] } else { [self.classes.len(); 2] };
        if self.classes.len() < 2 || !expected_rows.contains(&rows) {
            return Err(AirsentError::InvalidArtifact(format!(
                "{} classes cannot use {} coefficient rows",
                self.classes.len(),
                rows
            )));
        }
        if self.intercept.len() != rows {
            return Err(AirsentError::InvalidArtifact(format!(
                "{} intercepts for {} coefficient rows",
                self.intercept.len(),
                rows
            )));
        }
        let width = self.coef[0].len();
        if self.coef.iter().any(|row| row.len() != width) {
            return Err(AirsentError::InvalidArtifact(
                "coefficient rows have different lengths".to_string(),
            ));
        }
        Ok(())
    }

    pub fn classes(&self) -> &[Sentiment] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.coef[0].len()
    }

    /// Raw decision score per coefficient row.
    pub fn decision_function(&self, x: &SparseVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| x.iter().map(|(idx, v)| row[*idx] * v).sum::<f64>() + b)
            .collect()
    }

    /// Class probabilities, in `classes()` order.
    pub fn predict_proba(&self, x: &SparseVector) -> Vec<f64> {
        let scores = self.decision_function(x);
        if scores.len() == 1 {
            let p = 1.0 / (1.0 + (-scores[0]).exp());
            return vec![1.0 - p, p];
        }
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        exp.into_iter().map(|e| e / total).collect()
    }

    /// Most likely class. Ties go to the class listed first.
    pub fn predict(&self, x: &SparseVector) -> Sentiment {
        let scores = self.decision_function(x);
        if scores.len() == 1 {
            return if scores[0] > 0.0 { self.classes[1] } else { self.classes[0] };
        }
        let mut best = 0;
        for (i, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = i;
            }
        }
        self.classes[best]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_model_uses_sign_of_score() {
        let json = r#"{"classes": ["negative", "positive"], "coef": [[2.0, -3.0]], "intercept": [0.0]}"#;
        let model = LogisticRegression::from_json(json).unwrap();
        assert_eq!(model.predict(&vec![(0, 1.0)]), Sentiment::Positive);
        assert_eq!(model.predict(&vec![(1, 1.0)]), Sentiment::Negative);
        let p = model.predict_proba(&vec![]);
        assert_eq!(p, vec![0.5, 0.5]);
    }

    #[test]
    fn multiclass_model_uses_argmax() {
        let model = LogisticRegression::new(
            vec![Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive],
            vec![vec![1.0, 0.0], vec![0.0, 0.0], vec![0.0, 1.0]],
            vec![0.0, 0.1, 0.0],
        )
        .unwrap();
        assert_eq!(model.predict(&vec![(0, 1.0)]), Sentiment::Negative);
        assert_eq!(model.predict(&vec![(1, 1.0)]), Sentiment::Positive);
        assert_eq!(model.predict(&vec![]), Sentiment::Neutral);
        let total: f64 = model.predict_proba(&vec![(0, 0.5)]).iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_class_label_is_rejected() {
        let json = r#"{"classes": ["good", "bad"], "coef": [[1.0]], "intercept": [0.0]}"#;
        assert!(matches!(
            LogisticRegression::from_json(json),
            Err(AirsentError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn mismatched_intercepts_are_rejected() {
        let json = r#"{"classes": ["negative", "neutral", "positive"],
                       "coef": [[1.0], [1.0], [1.0]], "intercept": [0.0]}"#;
        assert!(LogisticRegression::from_json(json).is_err());
    }
}
