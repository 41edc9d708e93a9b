//! airsent-core: datasets, sentiment model and chart builders for airsent.
//!
//! Everything the dashboard shows is derived once, at startup, from the files
//! named in [`DashboardConfig`]. The resulting [`DashboardContext`] is read-only;
//! the only thing that changes while the process runs is the review log, which
//! is owned by a single writer task ([`ReviewLog`]).

pub mod charts;
pub mod config;
pub mod context;
pub mod dataset;
pub mod error;
pub mod model;
pub mod models;
pub mod review_log;
pub mod submit;
pub mod text;

pub use charts::{ChartId, ChartSet, ChartStyle};
pub use config::DashboardConfig;
pub use context::{DashboardContext, Logo};
pub use dataset::{ReviewDataset, ReviewTable, Summary};
pub use error::AirsentError;
pub use model::{Prediction, SentimentModel};
pub use models::{ReviewRecord, ReviewSubmission, Sentiment, SubmittedReview};
pub use review_log::{read_reviews, ReviewLog};
pub use submit::{submit_review, ACKNOWLEDGEMENT};
