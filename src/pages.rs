//! View composition.
//!
//! The state tree's `current_page` string routes to one of a fixed set of
//! pages; anything unrecognized resolves to the feed. Each page builds a
//! serializable view model from the state and the live collections. The
//! dashboard and submissions pages carry the static analytics the review
//! team curates by hand, so they live here rather than in the seed data.

use serde::Serialize;

use crate::filter;
use crate::i18n;
use crate::model::{AlertRule, Claim, Language, Theme};
use crate::store::AppState;

/// Notice shown when the active filters exclude every claim.
pub const EMPTY_FEED_NOTICE: &str =
    "No flagged items in this window. Try expanding filters.";

/// The pages the router recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    Feed,
    Dashboard,
    Submissions,
    Alerts,
    Settings,
}

impl PageId {
    /// Parse a page identifier; anything unrecognized is the feed.
    pub fn parse(id: &str) -> Self {
        match id {
            "feed" => PageId::Feed,
            "dashboard" => PageId::Dashboard,
            "submissions" => PageId::Submissions,
            "alerts" => PageId::Alerts,
            "settings" => PageId::Settings,
            _ => PageId::Feed,
        }
    }
}

/// One headline metric on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Kpi {
    pub label: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub trend: &'static str,
}

/// One bucket of the trust score histogram.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBucket {
    pub range: &'static str,
    pub count: u32,
}

/// One day of the weekly flagged/score trend.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub date: &'static str,
    pub flagged: u32,
    pub avg_score: u32,
}

/// One row of the most-flagged-sources table.
#[derive(Debug, Clone, Serialize)]
pub struct SourceRow {
    pub source: &'static str,
    pub flagged: u32,
    pub avg_score: u32,
    pub change: &'static str,
}

/// One item in the user's submission history.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub id: u32,
    pub kind: &'static str,
    pub content: &'static str,
    pub status: &'static str,
    pub submitted_at: &'static str,
    pub estimated_time: &'static str,
}

/// A rendered page, tagged for the consumer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", content = "view", rename_all = "lowercase")]
pub enum PageView {
    Feed {
        claims: Vec<Claim>,
        selected: Option<Claim>,
        #[serde(skip_serializing_if = "Option::is_none")]
        empty_notice: Option<&'static str>,
    },
    Dashboard {
        kpis: Vec<Kpi>,
        trust_scores: Vec<ScoreBucket>,
        weekly_trend: Vec<TrendPoint>,
        top_sources: Vec<SourceRow>,
    },
    Submissions {
        submissions: Vec<Submission>,
    },
    Alerts {
        rules: Vec<AlertRule>,
    },
    Settings {
        theme: Theme,
        language: Language,
        nav: Vec<NavItem>,
    },
}

/// A navigation entry localized for the active language.
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub key: &'static str,
    pub label: String,
}

const NAV_KEYS: [&str; 5] = ["feed", "trustDashboard", "mySubmissions", "alerts", "settings"];

fn nav_items(language: Language) -> Vec<NavItem> {
    NAV_KEYS
        .iter()
        .map(|key| NavItem {
            key,
            label: i18n::resolve(key, language).to_string(),
        })
        .collect()
}

/// Build the view for the state tree's current page.
pub fn render_page(state: &AppState, claims: &[Claim], rules: &[AlertRule]) -> PageView {
    match PageId::parse(&state.current_page) {
        PageId::Feed => {
            let visible = filter::apply_filters(claims, &state.filters);
            let empty_notice = visible.is_empty().then_some(EMPTY_FEED_NOTICE);
            PageView::Feed {
                claims: visible,
                selected: state.selected_claim.clone(),
                empty_notice,
            }
        }
        PageId::Dashboard => PageView::Dashboard {
            kpis: kpis(),
            trust_scores: trust_score_histogram(),
            weekly_trend: weekly_trend(),
            top_sources: top_sources(),
        },
        PageId::Submissions => PageView::Submissions {
            submissions: submissions(),
        },
        PageId::Alerts => PageView::Alerts {
            rules: rules.to_vec(),
        },
        PageId::Settings => PageView::Settings {
            theme: state.theme,
            language: state.language,
            nav: nav_items(state.language),
        },
    }
}

/// Root element the theme class is applied to.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewRoot {
    classes: Vec<String>,
}

impl ViewRoot {
    /// Apply the theme's root class. Idempotent: applying the same theme
    /// twice leaves the class list unchanged.
    pub fn apply_theme(&mut self, theme: Theme) {
        self.classes.retain(|c| c != "dark");
        if let Some(class) = theme.root_class() {
            self.classes.push(class.to_string());
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

fn kpis() -> Vec<Kpi> {
    vec![
        Kpi { label: "Total Flagged", value: "2,847", change: "+12%", trend: "up" },
        Kpi { label: "% Misleading", value: "23.4%", change: "-2.1%", trend: "down" },
        Kpi { label: "Median Trust Score", value: "67", change: "+5.2%", trend: "up" },
        Kpi { label: "Avg Verification Latency", value: "4.2h", change: "-0.8h", trend: "down" },
    ]
}

fn trust_score_histogram() -> Vec<ScoreBucket> {
    vec![
        ScoreBucket { range: "0-20", count: 45 },
        ScoreBucket { range: "21-40", count: 123 },
        ScoreBucket { range: "41-60", count: 267 },
        ScoreBucket { range: "61-80", count: 398 },
        ScoreBucket { range: "81-100", count: 189 },
    ]
}

fn weekly_trend() -> Vec<TrendPoint> {
    vec![
        TrendPoint { date: "Oct 10", flagged: 234, avg_score: 65 },
        TrendPoint { date: "Oct 11", flagged: 267, avg_score: 63 },
        TrendPoint { date: "Oct 12", flagged: 298, avg_score: 68 },
        TrendPoint { date: "Oct 13", flagged: 312, avg_score: 66 },
        TrendPoint { date: "Oct 14", flagged: 289, avg_score: 69 },
        TrendPoint { date: "Oct 15", flagged: 334, avg_score: 67 },
        TrendPoint { date: "Oct 16", flagged: 356, avg_score: 71 },
    ]
}

fn top_sources() -> Vec<SourceRow> {
    vec![
        SourceRow { source: "@newsaccount", flagged: 45, avg_score: 78, change: "+5" },
        SourceRow { source: "@politicalwatch", flagged: 38, avg_score: 65, change: "-2" },
        SourceRow { source: "@breakingnews24", flagged: 32, avg_score: 72, change: "+8" },
        SourceRow { source: "@localupdates", flagged: 28, avg_score: 69, change: "+3" },
        SourceRow { source: "@socialmedia_x", flagged: 25, avg_score: 58, change: "-1" },
    ]
}

fn submissions() -> Vec<Submission> {
    vec![
        Submission {
            id: 1,
            kind: "URL",
            content: "https://example.com/news-article",
            status: "Verified",
            submitted_at: "2 hours ago",
            estimated_time: "Complete",
        },
        Submission {
            id: 2,
            kind: "Image",
            content: "political_rally_image.jpg",
            status: "In Review",
            submitted_at: "1 day ago",
            estimated_time: "2-4 hours",
        },
        Submission {
            id: 3,
            kind: "URL",
            content: "https://socialmedia.com/post/123",
            status: "Received",
            submitted_at: "2 days ago",
            estimated_time: "4-8 hours",
        },
    ]
}
