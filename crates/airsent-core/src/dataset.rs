//! Dataset loading: CSV review tables and the typed review dataset.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{AirsentError, Result};
use crate::models::{ReviewRecord, Sentiment};

// ─── Raw tables ──────────────────────────────────────────────────────────────

/// A CSV file as read from disk: a header and string cells.
///
/// Every row has exactly `columns.len()` cells; short rows are padded with
/// empty cells and long rows are truncated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReviewTable {
    /// Read at most `row_limit` data rows from a CSV file with a header row.
    pub fn read_csv(path: &Path, row_limit: usize) -> Result<Self> {
        Self::read_csv_inner(path, row_limit).map_err(|e| AirsentError::load(path, e))
    }

    fn read_csv_inner(path: &Path, row_limit: usize) -> Result<Self> {
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

        let columns: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let width = columns.len();

        let mut rows = Vec::new();
        for record in reader.records().take(row_limit) {
            let record = record?;
            let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Remove exact duplicate rows, keeping the first occurrence.
    pub fn drop_duplicates(mut self) -> Self {
        let mut seen = HashSet::with_capacity(self.rows.len());
        self.rows.retain(|row| seen.insert(row.clone()));
        self
    }

    /// Remove rows with any missing cell. See [`is_missing`].
    pub fn drop_incomplete(mut self) -> Self {
        self.rows.retain(|row| !row.iter().any(|cell| is_missing(cell)));
        self
    }

    /// The first `n` rows, all columns.
    pub fn head(&self, n: usize) -> ReviewTable {
        ReviewTable {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

/// Cell values read as missing: the empty string and the usual spreadsheet
/// and dataframe null markers. Matching is exact; whitespace is a value.
const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_MARKERS.contains(&cell)
}

// ─── Typed dataset ───────────────────────────────────────────────────────────

const REVIEWER_NAME: &str = "reviewer_name";
const COMMENTS: &str = "comments";
const CLEANED_COMMENTS: &str = "cleaned_comments";
const DATE: &str = "date";
const SENTIMENT: &str = "sentiment";

/// Reviews in dataset order. The source of every chart on the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewDataset {
    records: Vec<ReviewRecord>,
}

impl ReviewDataset {
    pub fn new(records: Vec<ReviewRecord>) -> Self {
        Self { records }
    }

    /// Build typed records from a review table.
    ///
    /// `reviewer_name`, `cleaned_comments`, `date` and `sentiment` are required
    /// columns; `comments` is optional. Rows whose date is not `%Y-%m-%d` or
    /// whose sentiment is not a known label are skipped.
    pub fn from_table(table: &ReviewTable, source: &Path) -> Result<Self> {
        let required = |column: &str| {
            table
                .column_index(column)
                .ok_or_else(|| AirsentError::MissingColumn {
                    column: column.to_string(),
                    path: source.to_path_buf(),
                })
        };
        let name_idx = required(REVIEWER_NAME)?;
        let cleaned_idx = required(CLEANED_COMMENTS)?;
        let date_idx = required(DATE)?;
        let sentiment_idx = required(SENTIMENT)?;
        let comments_idx = table.column_index(COMMENTS);

        let mut records = Vec::with_capacity(table.len());
        let mut skipped = 0usize;
        for row in &table.rows {
            let date = NaiveDate::parse_from_str(row[date_idx].trim(), "%Y-%m-%d");
            let sentiment = row[sentiment_idx].parse::<Sentiment>();
            match (date, sentiment) {
                (Ok(date), Ok(sentiment)) => records.push(ReviewRecord {
                    reviewer_name: row[name_idx].clone(),
                    comments: comments_idx.map(|i| row[i].clone()),
                    cleaned_comments: row[cleaned_idx].clone(),
                    date,
                    sentiment,
                }),
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(path = %source.display(), skipped, "Skipped rows with unparseable date or sentiment");
        }
        Ok(Self { records })
    }

    /// Load the cleaned review set: row cap, duplicate removal, incomplete-row
    /// removal, then typed conversion. Returns the filtered table alongside the
    /// dataset so the tabular view shows exactly what the charts use.
    pub fn load_cleaned(path: &Path, row_limit: usize) -> Result<(ReviewTable, Self)> {
        let raw = ReviewTable::read_csv(path, row_limit)?;
        let read = raw.len();
        let table = raw.drop_duplicates().drop_incomplete();
        let dataset = Self::from_table(&table, path)?;
        info!(
            path = %path.display(),
            read,
            kept = table.len(),
            records = dataset.len(),
            "Loaded cleaned reviews"
        );
        Ok((table, dataset))
    }

    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Reviews per reviewer, ordered by descending count. Ties keep the order
    /// in which reviewers first appear in the dataset.
    pub fn reviewer_counts(&self) -> Vec<(String, usize)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();
        for record in &self.records {
            match index.get(record.reviewer_name.as_str()) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(&record.reviewer_name, counts.len());
                    counts.push((record.reviewer_name.clone(), 1));
                }
            }
        }
        // stable sort: equal counts stay in first-appearance order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Number of reviews with the given sentiment.
    pub fn sentiment_count(&self, sentiment: Sentiment) -> usize {
        self.records.iter().filter(|r| r.sentiment == sentiment).count()
    }

    /// Number of reviews per sentiment, in [`Sentiment::ALL`] order.
    pub fn sentiment_counts(&self) -> Vec<(Sentiment, usize)> {
        Sentiment::ALL
            .iter()
            .map(|s| (*s, self.sentiment_count(*s)))
            .collect()
    }
}

// ─── Summary indicators ──────────────────────────────────────────────────────

/// Headline numbers shown in the dashboard's indicator cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_reviews: usize,
    pub unique_reviewers: usize,
    pub reviews_per_reviewer: f64,
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
}

impl Summary {
    pub fn from_dataset(dataset: &ReviewDataset) -> Self {
        let total = dataset.len();
        let unique_reviewers = dataset
            .records()
            .iter()
            .map(|r| r.reviewer_name.as_str())
            .collect::<HashSet<_>>()
            .len();
        let pct = |sentiment| {
            if total == 0 {
                0.0
            } else {
                round2(dataset.sentiment_count(sentiment) as f64 / total as f64 * 100.0)
            }
        };
        Self {
            total_reviews: total,
            unique_reviewers,
            reviews_per_reviewer: if unique_reviewers == 0 {
                0.0
            } else {
                round2(total as f64 / unique_reviewers as f64)
            },
            positive_pct: pct(Sentiment::Positive),
            negative_pct: pct(Sentiment::Negative),
            neutral_pct: pct(Sentiment::Neutral),
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
