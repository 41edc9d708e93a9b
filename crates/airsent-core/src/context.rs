//! Everything loaded at startup, shared read-only by every request.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::charts::{ChartSet, ChartStyle};
use crate::config::DashboardConfig;
use crate::dataset::{ReviewDataset, ReviewTable, Summary};
use crate::error::{AirsentError, Result};
use crate::model::SentimentModel;

/// Logo image served in the page header.
#[derive(Debug, Clone)]
pub struct Logo {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl Logo {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| AirsentError::load(path, e.into()))?;
        Ok(Self {
            path: path.to_path_buf(),
            bytes,
        })
    }
}

/// Datasets, model and precomputed charts.
///
/// Built once by [`DashboardContext::load`]; any missing or unreadable input
/// aborts startup. Review submissions never feed back into it.
#[derive(Debug)]
pub struct DashboardContext {
    config: DashboardConfig,
    cleaned: ReviewTable,
    uncleaned: ReviewTable,
    dataset: ReviewDataset,
    model: SentimentModel,
    logo: Logo,
    charts: ChartSet,
    summary: Summary,
}

impl DashboardContext {
    pub fn load(config: &DashboardConfig) -> Result<Self> {
        let (cleaned, dataset) =
            ReviewDataset::load_cleaned(&config.cleaned_reviews, config.row_limit)?;
        let uncleaned = ReviewTable::read_csv(&config.uncleaned_reviews, config.row_limit)?;
        info!(rows = uncleaned.len(), "Loaded uncleaned reviews");

        let model = SentimentModel::load(&config.vectorizer, &config.classifier)?;
        let logo = Logo::load(&config.logo)?;

        Ok(Self::from_parts(
            config.clone(),
            cleaned,
            uncleaned,
            dataset,
            model,
            logo,
        ))
    }

    /// Assemble a context from already-loaded inputs and build its charts.
    pub fn from_parts(
        config: DashboardConfig,
        cleaned: ReviewTable,
        uncleaned: ReviewTable,
        dataset: ReviewDataset,
        model: SentimentModel,
        logo: Logo,
    ) -> Self {
        let charts = ChartSet::build(&dataset, &cleaned, &uncleaned, &ChartStyle::default());
        let summary = Summary::from_dataset(&dataset);
        info!(
            reviews = summary.total_reviews,
            reviewers = summary.unique_reviewers,
            "Dashboard context ready"
        );
        Self {
            config,
            cleaned,
            uncleaned,
            dataset,
            model,
            logo,
            charts,
            summary,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn cleaned(&self) -> &ReviewTable {
        &self.cleaned
    }

    pub fn uncleaned(&self) -> &ReviewTable {
        &self.uncleaned
    }

    pub fn dataset(&self) -> &ReviewDataset {
        &self.dataset
    }

    pub fn model(&self) -> &SentimentModel {
        &self.model
    }

    pub fn logo(&self) -> &Logo {
        &self.logo
    }

    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}
