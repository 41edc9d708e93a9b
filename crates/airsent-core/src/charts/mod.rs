//! Dashboard charts.
//!
//! [`builders`] holds one pure function per chart, each returning a
//! [`plotly::Plot`]. [`ChartSet`] runs all of them once against the loaded
//! data; pages and API handlers only ever read from that set.

pub mod builders;
pub mod style;
pub mod treemap;

use std::fmt;
use std::str::FromStr;

use plotly::Plot;
use serde::Serialize;

use crate::dataset::{ReviewDataset, ReviewTable};
use crate::error::AirsentError;
use crate::models::Sentiment;

pub use style::ChartStyle;

/// Every chart the dashboard can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartId {
    TopReviewers,
    SentimentByReviewer,
    CommonWords,
    SentimentDonut,
    SentimentBubble,
    SentimentPolar,
    MonthlyReviews,
    MonthlySentiment,
    SentimentPie,
    SentimentBar,
    PositiveWords,
    NeutralWords,
    NegativeWords,
    CleanedPreview,
    UncleanedPreview,
}

impl ChartId {
    pub const ALL: [ChartId; 15] = [
        ChartId::TopReviewers,
        ChartId::SentimentByReviewer,
        ChartId::CommonWords,
        ChartId::SentimentDonut,
        ChartId::SentimentBubble,
        ChartId::SentimentPolar,
        ChartId::MonthlyReviews,
        ChartId::MonthlySentiment,
        ChartId::SentimentPie,
        ChartId::SentimentBar,
        ChartId::PositiveWords,
        ChartId::NeutralWords,
        ChartId::NegativeWords,
        ChartId::CleanedPreview,
        ChartId::UncleanedPreview,
    ];

    /// Cards on the home page, in display order.
    pub const HOME: [ChartId; 8] = [
        ChartId::TopReviewers,
        ChartId::SentimentByReviewer,
        ChartId::CommonWords,
        ChartId::SentimentDonut,
        ChartId::SentimentBubble,
        ChartId::SentimentPolar,
        ChartId::MonthlyReviews,
        ChartId::MonthlySentiment,
    ];

    /// Word charts for the sentiment page, in [`Sentiment::ALL`] order.
    pub const WORD_CLOUDS: [ChartId; 3] = [
        ChartId::PositiveWords,
        ChartId::NeutralWords,
        ChartId::NegativeWords,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ChartId::TopReviewers => "top-reviewers",
            ChartId::SentimentByReviewer => "sentiment-by-reviewer",
            ChartId::CommonWords => "common-words",
            ChartId::SentimentDonut => "sentiment-donut",
            ChartId::SentimentBubble => "sentiment-bubble",
            ChartId::SentimentPolar => "sentiment-polar",
            ChartId::MonthlyReviews => "monthly-reviews",
            ChartId::MonthlySentiment => "monthly-sentiment",
            ChartId::SentimentPie => "sentiment-pie",
            ChartId::SentimentBar => "sentiment-bar",
            ChartId::PositiveWords => "positive-words",
            ChartId::NeutralWords => "neutral-words",
            ChartId::NegativeWords => "negative-words",
            ChartId::CleanedPreview => "cleaned-preview",
            ChartId::UncleanedPreview => "uncleaned-preview",
        }
    }

    /// Card heading.
    pub fn title(&self) -> &'static str {
        match self {
            ChartId::TopReviewers => "Sentiment Score by Reviewer Name",
            ChartId::SentimentByReviewer => "Sentiment Score by Reviews",
            ChartId::CommonWords => "Common Words",
            ChartId::SentimentDonut | ChartId::SentimentBubble | ChartId::SentimentPolar => {
                "Sentiments"
            }
            ChartId::MonthlyReviews => "Frequency of Reviews by Month",
            ChartId::MonthlySentiment => "Sentiment Score by Date",
            ChartId::SentimentPie => "Sentiment Analysis Pie Chart",
            ChartId::SentimentBar => "Sentiment Analysis Bar Chart",
            ChartId::PositiveWords => "Word Cloud for Positive Sentiment",
            ChartId::NeutralWords => "Word Cloud for Neutral Sentiment",
            ChartId::NegativeWords => "Word Cloud for Negative Sentiment",
            ChartId::CleanedPreview => "Cleaned Data",
            ChartId::UncleanedPreview => "Uncleaned Data",
        }
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ChartId {
    type Err = AirsentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartId::ALL
            .into_iter()
            .find(|id| id.slug() == s)
            .ok_or_else(|| AirsentError::Other(format!("Unknown chart: {s}")))
    }
}

/// All dashboard figures, built once from the startup data.
pub struct ChartSet {
    top_reviewers: Plot,
    sentiment_by_reviewer: Plot,
    common_words: Plot,
    sentiment_donut: Plot,
    sentiment_bubble: Plot,
    sentiment_polar: Plot,
    monthly_reviews: Plot,
    monthly_sentiment: Plot,
    sentiment_pie: Plot,
    sentiment_bar: Plot,
    positive_words: Plot,
    neutral_words: Plot,
    negative_words: Plot,
    cleaned_preview: Plot,
    uncleaned_preview: Plot,
}

impl ChartSet {
    pub fn build(
        dataset: &ReviewDataset,
        cleaned: &ReviewTable,
        uncleaned: &ReviewTable,
        style: &ChartStyle,
    ) -> Self {
        Self {
            top_reviewers: builders::top_reviewers(dataset, style),
            sentiment_by_reviewer: builders::sentiment_by_reviewer(dataset, style),
            common_words: builders::common_words(dataset, style),
            sentiment_donut: builders::sentiment_donut(style),
            sentiment_bubble: builders::sentiment_bubble(style),
            sentiment_polar: builders::sentiment_polar(style),
            monthly_reviews: builders::monthly_reviews(dataset, style),
            monthly_sentiment: builders::monthly_sentiment(dataset, style),
            sentiment_pie: builders::sentiment_pie(dataset, style),
            sentiment_bar: builders::sentiment_bar(dataset, style),
            positive_words: builders::common_words_for(dataset, Sentiment::Positive, style),
            neutral_words: builders::common_words_for(dataset, Sentiment::Neutral, style),
            negative_words: builders::common_words_for(dataset, Sentiment::Negative, style),
            cleaned_preview: builders::preview_table(cleaned, style),
            uncleaned_preview: builders::preview_table(uncleaned, style),
        }
    }

    pub fn get(&self, id: ChartId) -> &Plot {
        match id {
            ChartId::TopReviewers => &self.top_reviewers,
            ChartId::SentimentByReviewer => &self.sentiment_by_reviewer,
            ChartId::CommonWords => &self.common_words,
            ChartId::SentimentDonut => &self.sentiment_donut,
            ChartId::SentimentBubble => &self.sentiment_bubble,
            ChartId::SentimentPolar => &self.sentiment_polar,
            ChartId::MonthlyReviews => &self.monthly_reviews,
            ChartId::MonthlySentiment => &self.monthly_sentiment,
            ChartId::SentimentPie => &self.sentiment_pie,
            ChartId::SentimentBar => &self.sentiment_bar,
            ChartId::PositiveWords => &self.positive_words,
            ChartId::NeutralWords => &self.neutral_words,
            ChartId::NegativeWords => &self.negative_words,
            ChartId::CleanedPreview => &self.cleaned_preview,
            ChartId::UncleanedPreview => &self.uncleaned_preview,
        }
    }
}

impl fmt::Debug for ChartSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(ChartId::ALL.iter().map(ChartId::slug))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for id in ChartId::ALL {
            assert_eq!(id.slug().parse::<ChartId>().unwrap(), id);
        }
        assert!("pie-chart".parse::<ChartId>().is_err());
    }
}
