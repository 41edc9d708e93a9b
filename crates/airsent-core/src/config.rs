//! Dashboard configuration: where the datasets, artifacts and review log live.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AirsentError, Result};

/// File locations read at startup, plus the review log written at runtime.
///
/// Every field has a default, so an empty (or absent) YAML file yields the
/// standard directory layout. Relative paths are resolved against a root
/// directory with [`DashboardConfig::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Review set shown in charts; deduplicated and stripped of incomplete rows.
    pub cleaned_reviews: PathBuf,
    /// Review set shown as-is in the "Uncleaned Data" view.
    pub uncleaned_reviews: PathBuf,
    /// Fitted TF-IDF vectorizer (JSON).
    pub vectorizer: PathBuf,
    /// Fitted logistic regression classifier (JSON).
    pub classifier: PathBuf,
    pub logo: PathBuf,
    /// Append-only CSV of submitted reviews.
    pub review_log: PathBuf,
    /// Maximum number of rows read from each dataset.
    pub row_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            cleaned_reviews: PathBuf::from("Dataset/Cleaned Data/reviews.csv"),
            uncleaned_reviews: PathBuf::from("Dataset/Uncleaned Data/clean_reviews.csv"),
            vectorizer: PathBuf::from("Models/tfidf_vectorizer.json"),
            classifier: PathBuf::from("Models/logistic_regression_model.json"),
            logo: PathBuf::from("Images/logo.png"),
            review_log: PathBuf::from("Dataset/User Review/User_reviews.csv"),
            row_limit: 100_000,
        }
    }
}

impl DashboardConfig {
    /// Load a config from a YAML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| AirsentError::load(path, e.into()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| AirsentError::load(path, e.into()))
    }

    /// Build the config for a root directory: read `config_file` if given,
    /// otherwise use the defaults, then resolve relative paths against `root`.
    pub fn for_root(root: &Path, config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(file) => Self::load(file)?,
            None => Self::default(),
        };
        Ok(config.resolve(root))
    }

    /// Resolve every relative path against `root`. Absolute paths are kept.
    pub fn resolve(mut self, root: &Path) -> Self {
        for path in [
            &mut self.cleaned_reviews,
            &mut self.uncleaned_reviews,
            &mut self.vectorizer,
            &mut self.classifier,
            &mut self.logo,
            &mut self.review_log,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("dashboard.yaml");
        fs::write(&file, "row_limit: 10\nlogo: /srv/logo.png\n").unwrap();

        let config = DashboardConfig::for_root(Path::new("/data"), Some(file.as_path())).unwrap();
        assert_eq!(config.row_limit, 10);
        assert_eq!(config.logo, PathBuf::from("/srv/logo.png"));
        assert_eq!(
            config.cleaned_reviews,
            PathBuf::from("/data/Dataset/Cleaned Data/reviews.csv")
        );
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = DashboardConfig::load(Path::new("/nonexistent/dashboard.yaml")).unwrap_err();
        assert!(matches!(err, AirsentError::Load { .. }));
    }
}
