//! Chart builders: pure functions from review data to figures.

use std::collections::{BTreeMap, HashMap};

use plotly::common::{ColorScale, ColorScalePalette, Fill, Marker, Mode, Title};
use plotly::layout::BarMode;
use plotly::traces::table::{Align, Cells, Fill as CellFill, Header};
use plotly::{Bar, Pie, Plot, Scatter, ScatterPolar, Table};

use crate::dataset::{ReviewDataset, ReviewTable};
use crate::models::{ReviewRecord, Sentiment};
use crate::text;

use super::style::ChartStyle;
use super::treemap::Treemap;

pub const TOP_REVIEWERS: usize = 5;
pub const TOP_WORDS: usize = 100;
pub const PREVIEW_ROWS: usize = 10;

fn color_scale() -> ColorScale {
    ColorScale::Palette(ColorScalePalette::RdBu)
}

/// Marker colored by value on the shared scale, with a color bar.
fn scaled_marker(values: &[usize]) -> Marker {
    Marker::new()
        .color_array(values.iter().map(|&v| v as f64).collect())
        .color_scale(color_scale())
        .show_scale(true)
}

/// Bar of the five most prolific reviewers, colored by review count.
pub fn top_reviewers(dataset: &ReviewDataset, style: &ChartStyle) -> Plot {
    let (names, counts): (Vec<String>, Vec<usize>) = dataset
        .reviewer_counts()
        .into_iter()
        .take(TOP_REVIEWERS)
        .unzip();

    let marker = scaled_marker(&counts);
    let mut plot = Plot::new();
    plot.add_trace(Bar::new(names, counts).marker(marker));
    plot.set_layout(style.cartesian("Reviewer Name", "Frequency"));
    plot
}

fn sentiment_bar_color(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "#660000",
        Sentiment::Neutral => "#800020",
        Sentiment::Negative => "#C41E3A",
    }
}

/// Top five reviewers with their reviews split into stacked
/// positive / neutral / negative segments.
pub fn sentiment_by_reviewer(dataset: &ReviewDataset, style: &ChartStyle) -> Plot {
    let names: Vec<String> = dataset
        .reviewer_counts()
        .into_iter()
        .take(TOP_REVIEWERS)
        .map(|(name, _)| name)
        .collect();

    let mut per_sentiment: HashMap<(&str, Sentiment), usize> = HashMap::new();
    for record in dataset.records() {
        *per_sentiment
            .entry((record.reviewer_name.as_str(), record.sentiment))
            .or_insert(0) += 1;
    }

    let mut plot = Plot::new();
    for sentiment in Sentiment::ALL {
        let counts: Vec<usize> = names
            .iter()
            .map(|name| {
                per_sentiment
                    .get(&(name.as_str(), sentiment))
                    .copied()
                    .unwrap_or(0)
            })
            .collect();
        plot.add_trace(
            Bar::new(names.clone(), counts)
                .name(sentiment.label())
                .marker(Marker::new().color(sentiment_bar_color(sentiment))),
        );
    }
    plot.set_layout(
        style
            .cartesian("Reviewer Name", "Frequency")
            .bar_mode(BarMode::Stack),
    );
    plot
}

/// Flat treemap of the most frequent non-stopword tokens.
pub fn word_treemap<'a>(
    texts: impl IntoIterator<Item = &'a str>,
    title: &str,
    style: &ChartStyle,
) -> Plot {
    let (words, counts): (Vec<String>, Vec<usize>) =
        text::top_words(texts, TOP_WORDS).into_iter().unzip();

    let mut plot = Plot::new();
    plot.add_trace(
        Treemap::flat(words, counts)
            .scaled_colors(color_scale())
            .hover_template("<b>%{label}</b><br>Count: %{value}<extra></extra>"),
    );
    plot.set_layout(
        style
            .layout()
            .title(Title::from(title))
            .margin(style.margin(40)),
    );
    plot
}

/// Common words across every cleaned comment.
pub fn common_words(dataset: &ReviewDataset, style: &ChartStyle) -> Plot {
    word_treemap(
        dataset.records().iter().map(|r| r.cleaned_comments.as_str()),
        "Common Words",
        style,
    )
}

/// Common words across the cleaned comments of one sentiment.
pub fn common_words_for(dataset: &ReviewDataset, sentiment: Sentiment, style: &ChartStyle) -> Plot {
    word_treemap(
        dataset
            .records()
            .iter()
            .filter(|r| r.sentiment == sentiment)
            .map(|r| r.cleaned_comments.as_str()),
        &format!("Common Words: {} Sentiment", sentiment.label()),
        style,
    )
}

fn sentiment_labels() -> Vec<String> {
    Sentiment::ALL.iter().map(|s| s.label().to_string()).collect()
}

/// Illustrative donut with a fixed 40/30/30 split; not derived from data.
pub fn sentiment_donut(style: &ChartStyle) -> Plot {
    let mut plot = Plot::new();
    plot.add_trace(
        Pie::new(vec![40usize, 30, 30])
            .labels(sentiment_labels())
            .hole(0.6),
    );
    plot.set_layout(style.layout());
    plot
}

/// Illustrative bubble scatter; not derived from data.
pub fn sentiment_bubble(style: &ChartStyle) -> Plot {
    let marker = scaled_marker(&[0, 1, 2, 3]).size_array(vec![40, 60, 80, 100]);
    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(vec![1usize, 2, 3, 4], vec![10usize, 11, 12, 13])
            .mode(Mode::Markers)
            .marker(marker),
    );
    plot.set_layout(style.cartesian("Reviewer Name", "Frequency"));
    plot
}

/// Illustrative polar area; not derived from data.
pub fn sentiment_polar(style: &ChartStyle) -> Plot {
    let theta = vec!["Positive", "Neutral", "Negative", "Positive", "Neutral"];
    let mut plot = Plot::new();
    plot.add_trace(ScatterPolar::new(theta, vec![1usize, 5, 2, 2, 3]).fill(Fill::ToSelf));
    plot.set_layout(style.layout());
    plot
}

fn monthly_counts<'a>(
    records: impl IntoIterator<Item = &'a ReviewRecord>,
) -> (Vec<String>, Vec<usize>) {
    let mut buckets: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *buckets.entry(record.year_month()).or_insert(0) += 1;
    }
    // `%Y-%m` keys sort chronologically
    buckets.into_iter().unzip()
}

/// Reviews per calendar month, in chronological order.
pub fn monthly_reviews(dataset: &ReviewDataset, style: &ChartStyle) -> Plot {
    let (months, counts) = monthly_counts(dataset.records());
    let mut plot = Plot::new();
    plot.add_trace(Scatter::new(months, counts).mode(Mode::Lines));
    plot.set_layout(style.cartesian("Month", "Reviews"));
    plot
}

fn sentiment_line_color(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "green",
        Sentiment::Negative => "red",
        Sentiment::Neutral => "#e3a817",
    }
}

/// One monthly review-count line per sentiment, overlaid.
pub fn monthly_sentiment(dataset: &ReviewDataset, style: &ChartStyle) -> Plot {
    let mut plot = Plot::new();
    for sentiment in [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral] {
        let (months, counts) =
            monthly_counts(dataset.records().iter().filter(|r| r.sentiment == sentiment));
        plot.add_trace(
            Scatter::new(months, counts)
                .name(sentiment.as_str())
                .mode(Mode::LinesMarkers)
                .marker(Marker::new().color(sentiment_line_color(sentiment))),
        );
    }
    plot.set_layout(style.cartesian("Month", "Reviews"));
    plot
}

fn labelled_sentiment_counts(dataset: &ReviewDataset) -> (Vec<String>, Vec<usize>) {
    dataset
        .sentiment_counts()
        .into_iter()
        .map(|(s, n)| (s.label().to_string(), n))
        .unzip()
}

/// Pie of the actual sentiment distribution.
pub fn sentiment_pie(dataset: &ReviewDataset, style: &ChartStyle) -> Plot {
    let (labels, counts) = labelled_sentiment_counts(dataset);
    let mut plot = Plot::new();
    plot.add_trace(Pie::new(counts).labels(labels));
    plot.set_layout(style.layout());
    plot
}

/// Bar of the actual sentiment distribution.
pub fn sentiment_bar(dataset: &ReviewDataset, style: &ChartStyle) -> Plot {
    let (labels, counts) = labelled_sentiment_counts(dataset);
    let mut plot = Plot::new();
    plot.add_trace(Bar::new(labels, counts));
    plot.set_layout(style.cartesian("Sentiment", "Reviews"));
    plot
}

/// Table of the first rows of a review table, all columns.
pub fn preview_table(table: &ReviewTable, style: &ChartStyle) -> Plot {
    let head = table.head(PREVIEW_ROWS);
    let columns: Vec<Vec<String>> = (0..head.columns.len())
        .map(|c| head.rows.iter().map(|row| row[c].clone()).collect())
        .collect();

    let header = Header::new(head.columns.clone())
        .fill(CellFill::new().color("paleturquoise"))
        .align(Align::Left);
    let cells = Cells::new(columns)
        .fill(CellFill::new().color("lavender"))
        .align(Align::Left);

    let mut plot = Plot::new();
    plot.add_trace(Table::new(header, cells));
    plot.set_layout(style.layout());
    plot
}
