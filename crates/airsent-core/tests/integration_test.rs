//! Integration tests for airsent-core.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use airsent_core::{
    read_reviews, submit_review, AirsentError, ChartId, DashboardConfig, DashboardContext,
    ReviewDataset, ReviewLog, ReviewSubmission, Sentiment,
};
use tempfile::TempDir;

const CLEANED: &str = "\
reviewer_name,comments,cleaned_comments,date,sentiment
Ann,Great place!,great place,2016-08-20,positive
Ben,Dirty and awful.,dirty awful,2016-08-21,negative
Ann,Great place!,great place,2016-08-20,positive
Cat,It was okay,okay,2015-12-01,neutral
Dan,,nice host,2016-09-02,positive
Eve,Lovely stay,lovely stay,2016-09-05,positive
";

const UNCLEANED: &str = "\
listing_id,reviewer_name,comments
1,Ann,Great place!
2,Ben,Dirty and awful.
1,Ann,Great place!
3,Dan,
";

const VECTORIZER: &str = r#"{
  "vocabulary": {"great": 0, "place": 1, "dirty": 2, "awful": 3, "okay": 4},
  "idf": [1.0, 1.0, 1.0, 1.0, 1.0]
}"#;

const CLASSIFIER: &str = r#"{
  "classes": ["negative", "neutral", "positive"],
  "coef": [
    [-1.0, -0.5, 2.0, 2.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 2.0],
    [2.0, 1.0, -1.0, -1.0, 0.0]
  ],
  "intercept": [0.0, 0.1, 0.0]
}"#;

fn write(root: &Path, relative: &Path, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A project root laid out with the default config paths.
fn make_root() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let defaults = DashboardConfig::default();
    write(tmp.path(), &defaults.cleaned_reviews, CLEANED.as_bytes());
    write(tmp.path(), &defaults.uncleaned_reviews, UNCLEANED.as_bytes());
    write(tmp.path(), &defaults.vectorizer, VECTORIZER.as_bytes());
    write(tmp.path(), &defaults.classifier, CLASSIFIER.as_bytes());
    write(tmp.path(), &defaults.logo, b"\x89PNG\r\n\x1a\nlogo");
    tmp
}

fn load(tmp: &TempDir) -> DashboardContext {
    let config = DashboardConfig::for_root(tmp.path(), None).unwrap();
    DashboardContext::load(&config).expect("Failed to load dashboard context")
}

#[test]
fn test_context_cleans_only_the_cleaned_dataset() {
    let tmp = make_root();
    let ctx = load(&tmp);

    // one duplicate and one row with an empty cell removed
    assert_eq!(ctx.cleaned().len(), 4);
    assert_eq!(ctx.dataset().len(), 4);
    // the uncleaned table is shown as read
    assert_eq!(ctx.uncleaned().len(), 4);

    let summary = ctx.summary();
    assert_eq!(summary.total_reviews, 4);
    assert_eq!(summary.unique_reviewers, 4);
    assert_eq!(summary.positive_pct, 50.0);
    assert_eq!(summary.negative_pct, 25.0);
    assert_eq!(summary.neutral_pct, 25.0);
    assert_eq!(ctx.logo().bytes, b"\x89PNG\r\n\x1a\nlogo");
}

#[test]
fn test_null_markers_drop_rows_but_whitespace_is_kept() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("reviews.csv");
    fs::write(
        &path,
        "\
reviewer_name,comments,cleaned_comments,date,sentiment
Ann,Great place!,great place,2016-08-20,positive
Ben,nan,dirty awful,2016-08-21,negative
NA,It was okay,okay,2015-12-01,neutral
Cat, ,nice host,2016-09-02,positive
",
    )
    .unwrap();

    let (table, dataset) = ReviewDataset::load_cleaned(&path, 1000).unwrap();
    let kept: Vec<&str> = dataset
        .records()
        .iter()
        .map(|r| r.reviewer_name.as_str())
        .collect();
    assert_eq!(kept, ["Ann", "Cat"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[1][1], " ");
}

#[test]
fn test_row_limit_caps_both_datasets() {
    let tmp = make_root();
    let mut config = DashboardConfig::for_root(tmp.path(), None).unwrap();
    config.row_limit = 2;
    let ctx = DashboardContext::load(&config).unwrap();

    assert_eq!(ctx.dataset().len(), 2);
    assert_eq!(ctx.uncleaned().len(), 2);
}

#[test]
fn test_config_file_overrides_paths() {
    let tmp = make_root();
    fs::rename(
        tmp.path().join("Images/logo.png"),
        tmp.path().join("brand.png"),
    )
    .unwrap();
    let config_path = tmp.path().join("airsent.yaml");
    fs::write(&config_path, "logo: brand.png\n").unwrap();

    let config = DashboardConfig::for_root(tmp.path(), Some(config_path.as_path())).unwrap();
    assert_eq!(config.logo, tmp.path().join("brand.png"));
    assert!(DashboardContext::load(&config).is_ok());
}

#[test]
fn test_missing_input_is_fatal() {
    let tmp = make_root();
    fs::remove_file(tmp.path().join("Images/logo.png")).unwrap();
    let config = DashboardConfig::for_root(tmp.path(), None).unwrap();

    match DashboardContext::load(&config) {
        Err(AirsentError::Load { path, .. }) => assert!(path.ends_with("Images/logo.png")),
        other => panic!("expected a load error, got {other:?}"),
    }
}

#[test]
fn test_missing_column_is_fatal() {
    let tmp = make_root();
    let defaults = DashboardConfig::default();
    write(
        tmp.path(),
        &defaults.cleaned_reviews,
        b"reviewer_name,date,sentiment\nAnn,2016-08-20,positive\n",
    );
    let config = DashboardConfig::for_root(tmp.path(), None).unwrap();

    assert!(matches!(
        DashboardContext::load(&config),
        Err(AirsentError::MissingColumn { ref column, .. }) if column == "cleaned_comments"
    ));
}

#[test]
fn test_incompatible_artifacts_are_fatal() {
    let tmp = make_root();
    let defaults = DashboardConfig::default();
    write(
        tmp.path(),
        &defaults.classifier,
        br#"{"classes": ["negative", "positive"], "coef": [[1.0, 2.0]], "intercept": [0.0]}"#,
    );
    let config = DashboardConfig::for_root(tmp.path(), None).unwrap();

    assert!(matches!(
        DashboardContext::load(&config),
        Err(AirsentError::InvalidArtifact(_))
    ));
}

#[test]
fn test_model_predictions_are_deterministic() {
    let tmp = make_root();
    let ctx = load(&tmp);
    let model = ctx.model();

    assert_eq!(model.predict("great place"), Sentiment::Positive);
    assert_eq!(model.predict("Dirty. Awful!"), Sentiment::Negative);
    assert_eq!(model.predict("it was okay"), Sentiment::Neutral);
    assert_eq!(model.predict("nothing we know"), Sentiment::Neutral);

    let detailed = model.predict_detailed("great place");
    assert_eq!(detailed.sentiment, Sentiment::Positive);
    let total: f64 = detailed.probabilities.iter().map(|(_, p)| p).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_submit_appends_exactly_one_row() {
    let tmp = make_root();
    let ctx = load(&tmp);
    let log_path = ctx.config().review_log.clone();
    fs::create_dir_all(log_path.parent().unwrap()).unwrap();
    fs::write(&log_path, "Zoe,earlier review,neutral\n").unwrap();

    let log = ReviewLog::spawn(&log_path).unwrap();
    let submission = ReviewSubmission {
        name: "Alice".to_string(),
        review: "great place".to_string(),
    };
    let stored = submit_review(ctx.model(), &log, submission).await.unwrap();
    assert_eq!(stored.sentiment, Sentiment::Positive);

    let content = fs::read_to_string(&log_path).unwrap();
    assert_eq!(
        content,
        "Zoe,earlier review,neutral\nAlice,great place,positive\n"
    );
}

#[tokio::test]
async fn test_empty_review_is_rejected() {
    let tmp = make_root();
    let ctx = load(&tmp);
    let log = ReviewLog::spawn(&ctx.config().review_log).unwrap();

    let submission = ReviewSubmission {
        name: "Alice".to_string(),
        review: "   \n".to_string(),
    };
    let result = submit_review(ctx.model(), &log, submission).await;
    assert!(matches!(result, Err(AirsentError::EmptyReview)));
    assert!(read_reviews(log.path()).unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_name_is_accepted() {
    let tmp = make_root();
    let ctx = load(&tmp);
    let log = ReviewLog::spawn(&ctx.config().review_log).unwrap();

    let submission = ReviewSubmission {
        name: String::new(),
        review: "dirty".to_string(),
    };
    submit_review(ctx.model(), &log, submission).await.unwrap();

    let rows = read_reviews(log.path()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "");
    assert_eq!(rows[0].sentiment, Sentiment::Negative);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submissions_never_interleave() {
    let tmp = make_root();
    let ctx = Arc::new(load(&tmp));
    let log = ReviewLog::spawn(&ctx.config().review_log).unwrap();

    let mut handles = Vec::new();
    for i in 0..50 {
        let ctx = Arc::clone(&ctx);
        let log = log.clone();
        handles.push(tokio::spawn(async move {
            let submission = ReviewSubmission {
                name: format!("guest {i}"),
                review: format!("great place, visit {i}"),
            };
            submit_review(ctx.model(), &log, submission).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let rows = read_reviews(log.path()).unwrap();
    assert_eq!(rows.len(), 50);
    let names: HashSet<_> = rows.iter().map(|r| r.name.clone()).collect();
    assert_eq!(names.len(), 50);
    assert!(rows.iter().all(|r| r.sentiment == Sentiment::Positive));
}

#[tokio::test]
async fn test_submissions_do_not_change_charts() {
    let tmp = make_root();
    let ctx = load(&tmp);
    let before: Vec<String> = ChartId::ALL
        .iter()
        .map(|id| ctx.charts().get(*id).to_json())
        .collect();
    let summary_before = ctx.summary().clone();

    let log = ReviewLog::spawn(&ctx.config().review_log).unwrap();
    let submission = ReviewSubmission {
        name: "Ann".to_string(),
        review: "great place".to_string(),
    };
    submit_review(ctx.model(), &log, submission).await.unwrap();

    let after: Vec<String> = ChartId::ALL
        .iter()
        .map(|id| ctx.charts().get(*id).to_json())
        .collect();
    assert_eq!(before, after);
    assert_eq!(&summary_before, ctx.summary());
}
