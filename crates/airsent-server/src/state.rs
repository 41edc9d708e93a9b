//! Shared application state for the Axum server.

use std::path::PathBuf;
use std::sync::Arc;

use airsent_core::{DashboardConfig, DashboardContext, ReviewLog};

use crate::page::PageRenderer;

#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<DashboardContext>,
    pub reviews: ReviewLog,
    pub pages: Arc<PageRenderer>,
}

impl AppState {
    /// Start the review log writer and compile the page templates.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(ctx: DashboardContext) -> anyhow::Result<Self> {
        let reviews = ReviewLog::spawn(ctx.config().review_log.clone())?;
        let pages = PageRenderer::new()?;
        Ok(Self {
            ctx: Arc::new(ctx),
            reviews,
            pages: Arc::new(pages),
        })
    }
}

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory that relative dataset, model and log paths resolve against.
    pub root_dir: PathBuf,
    /// Optional YAML file overriding the default file locations.
    pub config_file: Option<PathBuf>,
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            config_file: None,
            host: "127.0.0.1".to_string(),
            port: 8050,
        }
    }
}

impl ServerConfig {
    pub fn dashboard_config(&self) -> airsent_core::error::Result<DashboardConfig> {
        DashboardConfig::for_root(&self.root_dir, self.config_file.as_deref())
    }
}
