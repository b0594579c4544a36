//! Data models for TruthLens.
//!
//! Everything here is a plain in-memory value type: claims, trending topics,
//! and alert rules live only for the lifetime of a session. The enums carry
//! the exact wire strings the dashboard front-end exchanges, so a serialized
//! `Verdict` round-trips as `"Out of Context"`, not `"OutOfContext"`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categorical outcome of a claim assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Not yet assessed.
    Unverified,
    /// The claim checks out.
    Accurate,
    /// The claim distorts or omits key facts.
    Misleading,
    /// Authentic material presented in the wrong context.
    #[serde(rename = "Out of Context")]
    OutOfContext,
    /// The underlying media has been manipulated.
    Altered,
}

impl Verdict {
    /// All verdicts, in the order the review UI lists them.
    pub const ALL: [Verdict; 5] = [
        Verdict::Unverified,
        Verdict::Accurate,
        Verdict::Misleading,
        Verdict::OutOfContext,
        Verdict::Altered,
    ];

    /// Get a human-readable label (also the wire string).
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Unverified => "Unverified",
            Verdict::Accurate => "Accurate",
            Verdict::Misleading => "Misleading",
            Verdict::OutOfContext => "Out of Context",
            Verdict::Altered => "Altered",
        }
    }
}

/// The kind of media a claim was observed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Text,
    Video,
    Image,
    Screenshot,
    Audio,
}

impl MediaType {
    /// All media types, in UI order.
    pub const ALL: [MediaType; 5] = [
        MediaType::Text,
        MediaType::Video,
        MediaType::Image,
        MediaType::Screenshot,
        MediaType::Audio,
    ];
}

/// Languages the dashboard is localized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Mr,
}

impl Language {
    /// Get a human-readable label in the language itself.
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
            Language::Mr => "मराठी",
        }
    }
}

/// Time window a filter can constrain the feed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "1h")]
    LastHour,
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
}

impl TimeWindow {
    /// The concrete cutoff duration, or `None` for the unbounded window.
    pub fn duration(&self) -> Option<chrono::Duration> {
        match self {
            TimeWindow::All => None,
            TimeWindow::LastHour => Some(chrono::Duration::hours(1)),
            TimeWindow::Last24Hours => Some(chrono::Duration::hours(24)),
            TimeWindow::Last7Days => Some(chrono::Duration::days(7)),
        }
    }
}

/// Dashboard color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The CSS class applied to the document root for this theme.
    /// Light mode is the absence of the dark class.
    pub fn root_class(&self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some("dark"),
        }
    }
}

/// Direction a trending topic moved during the last update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Same,
}

/// How a saved alert rule notifies its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyChannel {
    Email,
    Push,
}

/// Where a claim was first observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSource {
    /// Normalized account handle, e.g. `@newsaccount`.
    pub handle: String,

    /// Channel identifier within the platform.
    #[serde(default)]
    pub channel: String,

    /// Human-readable platform name, e.g. "Short-video".
    #[serde(default)]
    pub platform: String,

    /// Display-only relative timestamp, e.g. "2h".
    #[serde(default)]
    pub timestamp: String,
}

/// A single piece of supporting evidence attached to a claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// Evidence category, e.g. "Official Record", "Press Note".
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub timestamp: String,
    pub quote: String,
}

/// Media forensics attached to a claim during review.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forensics {
    /// Media kind the forensics ran against ("video", "image", ...).
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Extracted key frames, when the media is a video.
    #[serde(default)]
    pub frames: Vec<String>,

    /// Voice-clone likelihood, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_spoof_score: Option<u8>,

    /// Per-segment drift between audio and transcript.
    #[serde(default)]
    pub transcript_drift: Vec<u32>,

    /// Raw metadata recovered from the file (EXIF and similar).
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Provenance trail for recycled content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineage {
    /// When the content first appeared, as a display string.
    pub first_seen: String,

    /// Platforms the content hopped across, oldest first.
    #[serde(default)]
    pub hops: Vec<String>,
}

/// A unit of content under review.
///
/// Claims come from the static seed collection at startup or are synthesized
/// by the live feed simulator. They are never mutated in place; ticks and
/// resets always swap in new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique, stable identifier within the in-memory collection.
    pub id: String,

    /// The claim text as circulated.
    pub title: String,

    pub verdict: Verdict,

    /// Credibility summary, 0-100. Clamped on ingestion.
    pub trust_score: u8,

    /// Reviewer confidence in the verdict, 0-100. Clamped on ingestion.
    pub confidence: u8,

    /// Number of evidence items backing the verdict.
    pub evidence_count: u32,

    pub source: ClaimSource,

    pub media_type: MediaType,

    /// Language the claim circulates in. Absent for claims whose language
    /// could not be detected; such claims fail closed under language filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    /// Free-form region, compared case-insensitively by the filter pipeline.
    #[serde(default)]
    pub region: String,

    /// Ordered spread series for sparkline rendering.
    #[serde(default)]
    pub virality: Vec<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<Evidence>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forensics: Option<Forensics>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineage: Option<Lineage>,

    /// Concrete ingestion instant. Set for simulator-synthesized claims;
    /// seed claims carry only display timestamps and leave this empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,

    /// Display flag for freshly injected items.
    #[serde(default)]
    pub is_new: bool,
}

impl Claim {
    /// Create a claim with neutral defaults. Scores and attachments are set
    /// through the builder methods so clamping happens exactly once.
    pub fn new(id: &str, title: &str, verdict: Verdict, media_type: MediaType) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            verdict,
            trust_score: 50,
            confidence: 0,
            evidence_count: 0,
            source: ClaimSource {
                handle: normalize_handle(None, None),
                channel: String::new(),
                platform: String::new(),
                timestamp: String::new(),
            },
            media_type,
            language: None,
            region: String::new(),
            virality: Vec::new(),
            summary: None,
            evidence: Vec::new(),
            forensics: None,
            lineage: None,
            observed_at: None,
            is_new: false,
        }
    }

    /// Set trust score and confidence, clamped to 0-100.
    pub fn with_scores(mut self, trust_score: u8, confidence: u8) -> Self {
        self.trust_score = trust_score.min(100);
        self.confidence = confidence.min(100);
        self
    }

    /// Set the source descriptor, normalizing the handle fallback chain.
    pub fn with_source(
        mut self,
        handle: Option<&str>,
        channel: &str,
        platform: &str,
        timestamp: &str,
    ) -> Self {
        self.source = ClaimSource {
            handle: normalize_handle(handle, None),
            channel: channel.to_string(),
            platform: platform.to_string(),
            timestamp: timestamp.to_string(),
        };
        self
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_virality(mut self, virality: Vec<u32>) -> Self {
        self.virality = virality;
        self
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    /// Attach evidence and keep the display count in sync.
    pub fn with_evidence(mut self, evidence: Vec<Evidence>) -> Self {
        self.evidence_count = self.evidence_count.max(evidence.len() as u32);
        self.evidence = evidence;
        self
    }

    /// Override the evidence count shown on the card (the seed data counts
    /// items the detail view does not carry).
    pub fn with_evidence_count(mut self, count: u32) -> Self {
        self.evidence_count = count;
        self
    }

    pub fn with_forensics(mut self, forensics: Forensics) -> Self {
        self.forensics = Some(forensics);
        self
    }

    pub fn with_lineage(mut self, lineage: Lineage) -> Self {
        self.lineage = Some(lineage);
        self
    }

    /// Mark the claim as freshly observed at a concrete instant.
    pub fn observed_now(mut self, now: DateTime<Utc>) -> Self {
        self.observed_at = Some(now);
        self.is_new = true;
        self
    }
}

/// Resolve the handle fallback chain once, at ingestion.
///
/// Preference order: explicit handle, then the author's handle, then a
/// placeholder. Centralized here so the chain is not re-derived at render
/// time.
pub fn normalize_handle(handle: Option<&str>, author_handle: Option<&str>) -> String {
    fn usable(h: Option<&str>) -> Option<&str> {
        h.map(str::trim).filter(|h| !h.is_empty())
    }
    usable(handle)
        .or_else(|| usable(author_handle))
        .map(|h| {
            if h.starts_with('@') {
                h.to_string()
            } else {
                format!("@{h}")
            }
        })
        .unwrap_or_else(|| "@unknown".to_string())
}

/// A topic in the trending rail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub id: u32,
    pub name: String,

    /// Post count. Only grows during ordinary ticks; a full refresh is the
    /// only path that can lower it.
    pub posts: u64,

    pub category: String,
    pub trend: TrendDirection,
}

impl TrendingTopic {
    pub fn new(id: u32, name: &str, posts: u64, category: &str, trend: TrendDirection) -> Self {
        Self {
            id,
            name: name.to_string(),
            posts,
            category: category.to_string(),
            trend,
        }
    }

    /// Shorten large counts for display ("12.4k").
    pub fn format_posts(&self) -> String {
        if self.posts > 1000 {
            format!("{:.1}k", self.posts as f64 / 1000.0)
        } else {
            self.posts.to_string()
        }
    }
}

/// A saved notification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRule {
    pub id: String,
    pub name: String,

    /// Human-readable condition summary, always non-empty.
    pub conditions: String,

    pub enabled: bool,
    pub channel: NotifyChannel,

    /// Display-only creation label ("Just now", "2 days ago").
    pub created: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_wire_strings() {
        assert_eq!(
            serde_json::to_string(&Verdict::OutOfContext).unwrap(),
            "\"Out of Context\""
        );
        assert_eq!(
            serde_json::from_str::<Verdict>("\"Misleading\"").unwrap(),
            Verdict::Misleading
        );
    }

    #[test]
    fn test_time_window_wire_strings() {
        assert_eq!(
            serde_json::to_string(&TimeWindow::Last24Hours).unwrap(),
            "\"24h\""
        );
        assert_eq!(
            serde_json::from_str::<TimeWindow>("\"all\"").unwrap(),
            TimeWindow::All
        );
    }

    #[test]
    fn test_scores_are_clamped() {
        let claim =
            Claim::new("1", "Test", Verdict::Unverified, MediaType::Text).with_scores(250, 130);
        assert_eq!(claim.trust_score, 100);
        assert_eq!(claim.confidence, 100);
    }

    #[test]
    fn test_normalize_handle_chain() {
        assert_eq!(normalize_handle(Some("@a"), None), "@a");
        assert_eq!(normalize_handle(None, Some("b")), "@b");
        assert_eq!(normalize_handle(Some("  "), Some("@c")), "@c");
        assert_eq!(normalize_handle(None, None), "@unknown");
    }

    #[test]
    fn test_format_posts() {
        let topic = TrendingTopic::new(1, "EVM Tampering", 12400, "Politics", TrendDirection::Up);
        assert_eq!(topic.format_posts(), "12.4k");

        let small = TrendingTopic::new(2, "Quiet", 900, "Misc", TrendDirection::Same);
        assert_eq!(small.format_posts(), "900");
    }

    #[test]
    fn test_theme_root_class() {
        assert_eq!(Theme::Dark.root_class(), Some("dark"));
        assert_eq!(Theme::Light.root_class(), None);
    }
}
