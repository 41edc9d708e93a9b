//! Append-only log of submitted reviews.
//!
//! A single background task owns the CSV file. [`ReviewLog::append`] is a
//! channel send followed by an await on the task's reply, so concurrent
//! submissions are written one at a time, in arrival order.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use crate::error::{AirsentError, Result};
use crate::models::SubmittedReview;

struct AppendRequest {
    review: SubmittedReview,
    reply: oneshot::Sender<Result<()>>,
}

/// Handle to the review log writer. Cheap to clone; all clones feed the same task.
#[derive(Debug, Clone)]
pub struct ReviewLog {
    sender: mpsc::UnboundedSender<AppendRequest>,
    path: PathBuf,
}

impl ReviewLog {
    /// Create the log's parent directory and start the writer task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(writer_task(receiver, path.clone()));
        info!(path = %path.display(), "Review log writer started");

        Ok(Self { sender, path })
    }

    /// Append one row and wait until it is on disk.
    pub async fn append(&self, review: SubmittedReview) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(AppendRequest { review, reply: tx })
            .map_err(|_| AirsentError::ChannelClosed)?;
        rx.await.map_err(|_| AirsentError::ChannelClosed)?
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ─── Writer task ─────────────────────────────────────────────────────────────

async fn writer_task(mut receiver: mpsc::UnboundedReceiver<AppendRequest>, path: PathBuf) {
    while let Some(AppendRequest { review, reply }) = receiver.recv().await {
        let result = append_row(&path, &review);
        match &result {
            Ok(()) => debug!(sentiment = %review.sentiment, "Appended review"),
            Err(e) => error!("Failed to append review to {}: {}", path.display(), e),
        }
        let _ = reply.send(result);
    }
    debug!("Review log writer stopped");
}

fn append_row(path: &Path, review: &SubmittedReview) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.serialize(review)?;
    writer.flush()?;
    Ok(())
}

/// Read every row of a review log. A log that does not exist yet is empty.
pub fn read_reviews(path: &Path) -> Result<Vec<SubmittedReview>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(AirsentError::load(path, e.into())),
    };
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(file)
        .deserialize()
        .collect::<std::result::Result<Vec<SubmittedReview>, csv::Error>>()
        .map_err(|e| AirsentError::load(path, e.into()))
}
