//! Data models for airsent.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AirsentError;

/// Sentiment assigned to a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Display order used by the stacked bar and distribution charts.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    /// Capitalized label, as shown in legends.
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = AirsentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            _ => Err(AirsentError::UnknownSentiment(s.to_string())),
        }
    }
}

/// A single review from the cleaned dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub reviewer_name: String,
    /// Raw comment text, when the dataset carries a `comments` column.
    pub comments: Option<String>,
    pub cleaned_comments: String,
    pub date: NaiveDate,
    pub sentiment: Sentiment,
}

impl ReviewRecord {
    /// Calendar bucket used by the monthly charts, e.g. `2016-08`.
    pub fn year_month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// A review as typed into the submission form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub review: String,
}

/// One row of the review log: the submission plus its predicted label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedReview {
    pub name: String,
    pub review: String,
    pub sentiment: Sentiment,
}
