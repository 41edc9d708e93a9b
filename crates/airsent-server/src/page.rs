//! Dashboard pages: sidebar navigation and one content pane per section.
//!
//! Navigation state travels in the query string (`/?section=...&view=...`).
//! Every section maps to one render function and one template, and each
//! render only picks figures out of the precomputed chart set.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Form,
};
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};
use tracing::{error, warn};

use airsent_core::{
    submit_review, ChartId, DashboardContext, ReviewSubmission, ACKNOWLEDGEMENT,
};

use crate::api::{status_for, Assets};
use crate::state::AppState;

const PAGE_TITLE: &str = "Airbnb Review Sentiment Dashboard";

/// Sidebar entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Home,
    Uncleaned,
    Cleaned,
    Sentiment,
    Review,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Uncleaned,
        Section::Cleaned,
        Section::Sentiment,
        Section::Review,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Uncleaned => "uncleaned",
            Section::Cleaned => "cleaned",
            Section::Sentiment => "sentiment",
            Section::Review => "review",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Uncleaned => "Uncleaned Data",
            Section::Cleaned => "Cleaned Data",
            Section::Sentiment => "Sentimental Analysis",
            Section::Review => "Provide Review",
        }
    }
}

/// Figure selector on the sentiment section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentView {
    #[default]
    Pie,
    Cloud,
    Bar,
}

impl SentimentView {
    pub const ALL: [SentimentView; 3] = [SentimentView::Pie, SentimentView::Cloud, SentimentView::Bar];

    pub fn slug(&self) -> &'static str {
        match self {
            SentimentView::Pie => "pie",
            SentimentView::Cloud => "cloud",
            SentimentView::Bar => "bar",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SentimentView::Pie => "Sentiment Analysis Pie Chart",
            SentimentView::Cloud => "Word Cloud",
            SentimentView::Bar => "Sentiment Analysis Bar Chart",
        }
    }

    pub fn charts(&self) -> &'static [ChartId] {
        match self {
            SentimentView::Pie => &[ChartId::SentimentPie],
            SentimentView::Cloud => &ChartId::WORD_CLOUDS,
            SentimentView::Bar => &[ChartId::SentimentBar],
        }
    }
}

/// Query string of `GET /`. Unknown values are rejected by the extractor.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub section: Section,
    #[serde(default)]
    pub view: SentimentView,
}

/// Outcome of a form submission, shown under the review form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Acknowledged,
    Error(String),
}

// ─── Rendering ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct NavItem {
    slug: &'static str,
    label: &'static str,
    active: bool,
}

#[derive(Serialize)]
struct ChartCard {
    id: &'static str,
    title: &'static str,
    figure: String,
}

#[derive(Serialize)]
struct Indicator {
    label: &'static str,
    value: String,
}

/// Tera templates compiled from the embedded assets.
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    pub fn new() -> tera::Result<Self> {
        let templates: Vec<(String, String)> = Assets::iter()
            .filter_map(|file| {
                let name = file.strip_prefix("templates/")?.to_string();
                let content = Assets::get(&file)?;
                Some((name, String::from_utf8_lossy(&content.data).into_owned()))
            })
            .collect();

        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;
        Ok(Self { tera })
    }

    /// Render the full page for one section.
    pub fn render(
        &self,
        ctx: &DashboardContext,
        query: PageQuery,
        form: &ReviewSubmission,
        notice: Option<&Notice>,
    ) -> tera::Result<String> {
        let mut context = Context::new();
        context.insert("page_title", PAGE_TITLE);
        context.insert("heading", query.section.label());
        context.insert(
            "nav",
            &Section::ALL
                .iter()
                .map(|s| NavItem {
                    slug: s.slug(),
                    label: s.label(),
                    active: *s == query.section,
                })
                .collect::<Vec<_>>(),
        );

        match query.section {
            Section::Home => self.render_home(ctx, context),
            Section::Uncleaned => self.render_table(ctx, context, ChartId::UncleanedPreview),
            Section::Cleaned => self.render_table(ctx, context, ChartId::CleanedPreview),
            Section::Sentiment => self.render_sentiment(ctx, context, query.view),
            Section::Review => self.render_review(context, form, notice),
        }
    }

    fn render_home(&self, ctx: &DashboardContext, mut context: Context) -> tera::Result<String> {
        let summary = ctx.summary();
        let indicators = vec![
            Indicator {
                label: "Total Reviews",
                value: summary.total_reviews.to_string(),
            },
            Indicator {
                label: "Reviews per Reviewer",
                value: format!("{:.2}", summary.reviews_per_reviewer),
            },
            Indicator {
                label: "Positive Reviews",
                value: format!("{:.2}%", summary.positive_pct),
            },
            Indicator {
                label: "Negative Reviews",
                value: format!("{:.2}%", summary.negative_pct),
            },
            Indicator {
                label: "Neutral Reviews",
                value: format!("{:.2}%", summary.neutral_pct),
            },
        ];
        context.insert("indicators", &indicators);
        context.insert("charts", &cards(ctx, &ChartId::HOME));
        self.tera.render("home.html", &context)
    }

    fn render_table(
        &self,
        ctx: &DashboardContext,
        mut context: Context,
        chart: ChartId,
    ) -> tera::Result<String> {
        context.insert("charts", &cards(ctx, &[chart]));
        self.tera.render("table.html", &context)
    }

    fn render_sentiment(
        &self,
        ctx: &DashboardContext,
        mut context: Context,
        view: SentimentView,
    ) -> tera::Result<String> {
        let views: Vec<_> = SentimentView::ALL
            .iter()
            .map(|v| NavItem {
                slug: v.slug(),
                label: v.label(),
                active: *v == view,
            })
            .collect();
        context.insert("views", &views);
        context.insert("charts", &cards(ctx, view.charts()));
        self.tera.render("sentiment.html", &context)
    }

    fn render_review(
        &self,
        mut context: Context,
        form: &ReviewSubmission,
        notice: Option<&Notice>,
    ) -> tera::Result<String> {
        context.insert("name", &form.name);
        context.insert("review", &form.review);
        match notice {
            Some(Notice::Acknowledged) => context.insert("acknowledgement", ACKNOWLEDGEMENT),
            Some(Notice::Error(message)) => context.insert("error", message),
            None => {}
        }
        self.tera.render("review.html", &context)
    }
}

fn cards(ctx: &DashboardContext, ids: &[ChartId]) -> Vec<ChartCard> {
    ids.iter()
        .map(|id| ChartCard {
            id: id.slug(),
            title: id.title(),
            figure: ctx.charts().get(*id).to_json(),
        })
        .collect()
}

fn html_response(status: StatusCode, rendered: tera::Result<String>) -> axum::response::Response {
    match rendered {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!("Failed to render page: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// `GET /`: render the section named in the query string.
pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> impl IntoResponse {
    let rendered = state
        .pages
        .render(&state.ctx, query, &ReviewSubmission::default(), None);
    html_response(StatusCode::OK, rendered)
}

/// `POST /review`: classify and store a submission, then show the review
/// section with the acknowledgement. On failure the form keeps its input.
pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<ReviewSubmission>,
) -> impl IntoResponse {
    let query = PageQuery {
        section: Section::Review,
        ..Default::default()
    };
    match submit_review(state.ctx.model(), &state.reviews, form.clone()).await {
        Ok(_) => {
            let rendered = state.pages.render(
                &state.ctx,
                query,
                &ReviewSubmission::default(),
                Some(&Notice::Acknowledged),
            );
            html_response(StatusCode::OK, rendered)
        }
        Err(e) => {
            warn!("Review submission failed: {}", e);
            let notice = Notice::Error(e.to_string());
            let rendered = state.pages.render(&state.ctx, query, &form, Some(&notice));
            html_response(status_for(&e), rendered)
        }
    }
}
