//! Review submission: classify the text and append it to the review log.

use tracing::info;

use crate::error::{AirsentError, Result};
use crate::model::SentimentModel;
use crate::models::{ReviewSubmission, SubmittedReview};
use crate::review_log::ReviewLog;

/// Message shown once a review has been stored.
pub const ACKNOWLEDGEMENT: &str = "Thank you for your review";

/// Predict the sentiment of a submission and append it to the log.
///
/// Blank review text is rejected with [`AirsentError::EmptyReview`] before
/// anything is written. The name may be empty. The text is stored as typed.
pub async fn submit_review(
    model: &SentimentModel,
    log: &ReviewLog,
    submission: ReviewSubmission,
) -> Result<SubmittedReview> {
    if submission.review.trim().is_empty() {
        return Err(AirsentError::EmptyReview);
    }

    let sentiment = model.predict(&submission.review);
    let row = SubmittedReview {
        name: submission.name,
        review: submission.review,
        sentiment,
    };
    log.append(row.clone()).await?;
    info!(sentiment = %row.sentiment, "Stored submitted review");
    Ok(row)
}
