//! Client for the external analysis agent.
//!
//! The agent exposes a single JSON endpoint (`POST /api/analyze`) that every
//! investigation flow goes through; the flows differ only in the prompt
//! wrapped around the user's input. The client never surfaces a transport or
//! decode error to its caller: any failure resolves to a fixed fallback
//! outcome, and the loading flag it reports always transitions back to false.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::markers::{self, TimelineEvent, VoiceAnalysis};
use crate::model::Language;

/// Where the analysis agent listens unless configured otherwise.
pub const DEFAULT_ANALYSIS_URL: &str = "http://127.0.0.1:5500";

/// Shown whenever the agent cannot be reached or returns garbage.
pub const FALLBACK_MESSAGE: &str = "Connection error. Please try again.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Request body for the analysis endpoint. All fields optional on the wire;
/// text flows set `query`, media flows attach data-URL payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_data: Option<String>,
}

impl AnalysisRequest {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn audio(audio_data: impl Into<String>) -> Self {
        Self {
            audio_data: Some(audio_data.into()),
            ..Self::default()
        }
    }
}

/// One step of the agent's externally-performed reasoning trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thought {
    #[serde(default)]
    pub step: String,
    #[serde(default)]
    pub details: String,
}

/// Raw response envelope from the agent.
#[derive(Debug, Clone, Default, Deserialize)]
struct AnalysisEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    analysis: String,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    thoughts: Vec<Thought>,
    #[serde(default)]
    message: String,
}

/// The settled result of one analysis call. Always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisOutcome {
    /// Markdown analysis body, or the fixed fallback message on failure.
    pub analysis: String,
    pub sources: Vec<String>,
    pub thoughts: Vec<Thought>,
    /// False when the fallback path was taken.
    pub ok: bool,
    /// Reported loading state: set true before the request was issued and
    /// false once settled. Always false by the time the caller sees it;
    /// carried so the lifecycle is observable in serialized responses.
    pub loading: bool,
}

impl AnalysisOutcome {
    fn fallback() -> Self {
        Self {
            analysis: FALLBACK_MESSAGE.to_string(),
            sources: Vec::new(),
            thoughts: Vec::new(),
            ok: false,
            loading: false,
        }
    }
}

/// Client for the analysis agent.
#[derive(Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for AnalysisClient {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYSIS_URL)
    }
}

impl AnalysisClient {
    /// Create a client against the given agent base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            // Building a client with a static timeout cannot fail.
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send one analysis request and settle it.
    ///
    /// Never returns an error: transport failures, timeouts, decode
    /// failures, and explicit error envelopes all resolve to the fallback
    /// outcome. Exactly one request is in flight per call.
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        let url = format!("{}/api/analyze", self.base_url);
        debug!(%url, "issuing analysis request");

        let response = match self.client.post(&url).json(request).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, "analysis request failed");
                return AnalysisOutcome::fallback();
            }
        };

        let envelope = match response.json::<AnalysisEnvelope>().await {
            Ok(envelope) => envelope,
            Err(error) => {
                warn!(%error, "analysis response was not valid JSON");
                return AnalysisOutcome::fallback();
            }
        };

        if envelope.status != "success" {
            warn!(status = %envelope.status, message = %envelope.message, "agent reported failure");
            return AnalysisOutcome::fallback();
        }

        AnalysisOutcome {
            analysis: envelope.analysis,
            sources: envelope.sources,
            thoughts: envelope.thoughts,
            ok: true,
            loading: false,
        }
    }

    /// Scam triage flow: wraps the context in the scan prompt and parses
    /// the counter-narrative and risk-score markers out of the body.
    pub async fn scan_scam(&self, context: &str, image_data: Option<String>) -> ScamReport {
        let request = AnalysisRequest {
            query: Some(prompts::scam_scan(context)),
            image_data,
            ..AnalysisRequest::default()
        };
        let outcome = self.analyze(&request).await;
        let split = markers::split_counter_narrative(&outcome.analysis);
        ScamReport {
            risk_score: markers::viral_risk_score(&outcome.analysis),
            analysis: split.analysis,
            counter_narrative: split.counter_narrative,
            thoughts: outcome.thoughts,
            ok: outcome.ok,
        }
    }

    /// Provenance trace flow. The parser guarantees at least the fallback
    /// event pair, so the trace is never empty even on failure.
    pub async fn trace_timeline(&self, query: &str) -> TimelineTrace {
        let request = AnalysisRequest::query(prompts::timeline_trace(query));
        let outcome = self.analyze(&request).await;
        TimelineTrace {
            events: markers::parse_timeline(&outcome.analysis),
            verdict: markers::final_verdict(&outcome.analysis),
            thoughts: outcome.thoughts,
            ok: outcome.ok,
        }
    }

    /// Voice verification flow over a data-URL audio payload.
    pub async fn verify_voice(&self, audio_data: &str) -> VoiceReport {
        let outcome = self.analyze(&AnalysisRequest::audio(audio_data)).await;
        VoiceReport {
            voice: markers::parse_voice(&outcome.analysis),
            analysis: outcome.analysis,
            thoughts: outcome.thoughts,
            ok: outcome.ok,
        }
    }
}

/// Settled scam-scan flow result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScamReport {
    pub analysis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_narrative: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u8>,
    pub thoughts: Vec<Thought>,
    pub ok: bool,
}

/// Settled provenance-trace flow result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineTrace {
    pub events: Vec<TimelineEvent>,
    pub verdict: String,
    pub thoughts: Vec<Thought>,
    pub ok: bool,
}

/// Settled voice-verification flow result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceReport {
    pub voice: VoiceAnalysis,
    pub analysis: String,
    pub thoughts: Vec<Thought>,
    pub ok: bool,
}

/// Prompt templates for the investigation flows. Each flow wraps the user's
/// input differently but goes through the same [`AnalysisClient::analyze`].
pub mod prompts {
    use super::Language;

    /// Follow-up question grounded in a previous analysis.
    pub fn follow_up(context: &str, question: &str) -> String {
        format!(
            "CONTEXT: {context}\n\nUSER QUESTION: {question}\n\nAnswer the user's question \
             based ONLY on the context above. Keep it short (max 2 sentences)."
        )
    }

    /// Scam triage over a pasted message or screenshot.
    pub fn scam_scan(context: &str) -> String {
        format!(
            "Analyze this potential scam context: \"{context}\". Provide a SCAM PROBABILITY, \
             identify the SCAM TYPE, and list IMMEDIATE ACTIONS."
        )
    }

    /// Verify a forwarded message and draft a gentle correction.
    pub fn family_correction(message: &str, language: Language) -> String {
        format!(
            "Verify this forwarded message: \"{message}\". Then, write a polite, respectful \
             reply in {} that I can send to my family group to correct them without being \
             rude. Also provide the English translation of the reply.",
            language.label()
        )
    }

    /// Draft a formal cybercrime complaint.
    pub fn legal_draft(details: &str) -> String {
        format!(
            "Draft a formal Legal Complaint to the Cyber Crime Cell of India regarding this \
             incident: \"{details}\". Cite specific sections of the IT Act 2000 (e.g., 66D, \
             66E, 67). Format it as a professional letter."
        )
    }

    /// Credibility and bias lookup for a news domain.
    pub fn source_bias(domain: &str) -> String {
        format!(
            "Analyze the source credibility and political bias of the domain: \"{domain}\". \
             Provide a 'Bias Rating' (Left/Center/Right), 'Factual Reporting Score' \
             (High/Mixed/Low), and a summary of its reputation."
        )
    }

    /// Trace the provenance of recycled content.
    pub fn timeline_trace(query: &str) -> String {
        format!(
            "Trace the history and origin of this claim/video: \"{query}\". Find out if it \
             is old content being reused. List the timeline of when it first appeared, when \
             it was debunked, and why it's sharing now. Use the TIMELINE_EVENT format."
        )
    }

    /// Side-by-side manifesto comparison on a policy topic.
    pub fn manifesto_compare(topic: &str) -> String {
        format!(
            "Research the 2025 election manifestos of the major opposing parties regarding \
             '{topic}'. Create a structured comparison summary. Format the comparison as a \
             Markdown Table if possible."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_agent_resolves_to_fallback() {
        // Port 9 (discard) refuses connections immediately.
        let client = AnalysisClient::new("http://127.0.0.1:9");
        let outcome = client.analyze(&AnalysisRequest::query("test")).await;
        assert!(!outcome.ok);
        assert!(!outcome.loading);
        assert_eq!(outcome.analysis, FALLBACK_MESSAGE);
        assert!(outcome.sources.is_empty());
        assert!(outcome.thoughts.is_empty());
    }

    #[tokio::test]
    async fn test_timeline_flow_falls_back_to_default_pair() {
        let client = AnalysisClient::new("http://127.0.0.1:9");
        let trace = client.trace_timeline("old flood video").await;
        assert!(!trace.ok);
        assert_eq!(trace.events.len(), 2);
        assert_eq!(trace.events[0].title, "Likely Origin");
        assert_eq!(trace.verdict, "Analysis Complete");
    }

    #[test]
    fn test_request_serializes_only_present_fields() {
        let body = serde_json::to_value(AnalysisRequest::query("who said this?")).unwrap();
        assert_eq!(body, serde_json::json!({"query": "who said this?"}));

        let audio = serde_json::to_value(AnalysisRequest::audio("data:audio/webm;base64,AAAA"))
            .unwrap();
        assert_eq!(
            audio,
            serde_json::json!({"audio_data": "data:audio/webm;base64,AAAA"})
        );
    }

    #[test]
    fn test_prompts_embed_input() {
        let p = prompts::follow_up("the analysis", "is it real?");
        assert!(p.contains("CONTEXT: the analysis"));
        assert!(p.contains("USER QUESTION: is it real?"));

        let family = prompts::family_correction("5G towers", Language::Hi);
        assert!(family.contains("5G towers"));
        assert!(family.contains("हिंदी"));

        assert!(prompts::timeline_trace("old flood video").contains("TIMELINE_EVENT"));
        assert!(prompts::legal_draft("impersonation").contains("IT Act 2000"));
    }
}
