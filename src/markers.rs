//! Parsing for the marker conventions the analysis backend embeds in its
//! free-text responses.
//!
//! The backend is asked, via prompt, to follow formats like
//! `TIMELINE_EVENT: date|title|desc` or a `COUNTER-NARRATIVE:` section. It
//! does not always comply, so every parser here is defensive: a missing or
//! malformed marker resolves to a documented fallback value, never an error.

use std::sync::OnceLock;

use regex_lite::Regex;

/// An analysis body split at the counter-narrative marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeSplit {
    /// Everything before the marker.
    pub analysis: String,
    /// Everything after the marker, when present.
    pub counter_narrative: Option<String>,
}

/// Split an analysis body on the `COUNTER-NARRATIVE:` marker.
pub fn split_counter_narrative(body: &str) -> NarrativeSplit {
    match body.split_once("COUNTER-NARRATIVE:") {
        Some((before, after)) => NarrativeSplit {
            analysis: before.trim().to_string(),
            counter_narrative: Some(after.trim().to_string()),
        },
        None => NarrativeSplit {
            analysis: body.trim().to_string(),
            counter_narrative: None,
        },
    }
}

fn risk_score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)viral risk score:\s*(\d+)%").unwrap())
}

/// Extract a `Viral Risk Score: N%` value, clamped to 100.
pub fn viral_risk_score(body: &str) -> Option<u8> {
    risk_score_re()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .map(|n| n.min(100) as u8)
}

/// Where an event sits in a claim's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelinePhase {
    Origin,
    Resurgence,
    Current,
}

/// One parsed `TIMELINE_EVENT:` line.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TimelineEvent {
    pub date: String,
    pub title: String,
    pub details: String,
    pub phase: TimelinePhase,
}

/// Parse `TIMELINE_EVENT: date|title|desc` lines out of an analysis body.
///
/// A line missing the description gets "Context unavailable"; a line with
/// fewer than two fields is dropped. The first parsed event is the origin,
/// the rest are resurgences. When the backend ignored the format entirely,
/// a fixed two-event fallback is returned so the trace view is never empty.
pub fn parse_timeline(body: &str) -> Vec<TimelineEvent> {
    let mut events = Vec::new();
    for line in body.lines() {
        let Some(idx) = line.find("TIMELINE_EVENT:") else {
            continue;
        };
        let clean = line[idx + "TIMELINE_EVENT:".len()..].trim();
        let parts: Vec<&str> = clean.split('|').collect();
        if parts.len() < 2 {
            continue;
        }
        events.push(TimelineEvent {
            date: parts[0].trim().to_string(),
            title: parts[1].trim().to_string(),
            details: parts
                .get(2)
                .map(|d| d.trim().to_string())
                .unwrap_or_else(|| "Context unavailable".to_string()),
            phase: if events.is_empty() {
                TimelinePhase::Origin
            } else {
                TimelinePhase::Resurgence
            },
        });
    }

    if events.is_empty() {
        events.push(TimelineEvent {
            date: "2019 (Est.)".to_string(),
            title: "Likely Origin".to_string(),
            details: "Similar narratives detected in archives.".to_string(),
            phase: TimelinePhase::Origin,
        });
        events.push(TimelineEvent {
            date: "Today".to_string(),
            title: "Current Viral Spike".to_string(),
            details: "Resurfaced during election cycle.".to_string(),
            phase: TimelinePhase::Current,
        });
    }
    events
}

/// Everything after a `Final Verdict:` trailer, or a fixed completion note.
pub fn final_verdict(body: &str) -> String {
    match body.split_once("Final Verdict:") {
        Some((_, after)) if !after.trim().is_empty() => after.trim().to_string(),
        _ => "Analysis Complete".to_string(),
    }
}

/// Parsed voice-verification response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct VoiceAnalysis {
    /// Transcribed speech, or "Audio processed" if no marker was present.
    pub transcript: String,
    /// Suggested reply text, when the backend produced one.
    pub reply: Option<String>,
    /// BCP 47 tag of the detected language. Defaults to `hi-IN`.
    pub language_tag: String,
}

fn section<'a>(body: &'a str, marker: &str, terminators: &[&str]) -> Option<&'a str> {
    let idx = body.find(marker)?;
    let rest = &body[idx + marker.len()..];
    let end = terminators
        .iter()
        .filter_map(|t| rest.find(t))
        .min()
        .unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// Parse the `TRANSCRIPT:` / `REPLY:` / `LANGUAGE_TAG:` voice markers.
pub fn parse_voice(body: &str) -> VoiceAnalysis {
    let transcript = section(body, "TRANSCRIPT:", &["\nVERDICT:"])
        .filter(|t| !t.is_empty())
        .unwrap_or("Audio processed")
        .to_string();

    let reply = section(body, "REPLY:", &["\nLANGUAGE_TAG:"])
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    let language_tag = section(body, "LANGUAGE_TAG:", &["\n"])
        .filter(|t| !t.is_empty())
        .unwrap_or("hi-IN")
        .to_string();

    VoiceAnalysis {
        transcript,
        reply,
        language_tag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_narrative_split() {
        let split = split_counter_narrative(
            "The claim recycles old footage.\nCOUNTER-NARRATIVE: Original video is from 2019.",
        );
        assert_eq!(split.analysis, "The claim recycles old footage.");
        assert_eq!(
            split.counter_narrative.as_deref(),
            Some("Original video is from 2019.")
        );

        let plain = split_counter_narrative("No marker here.");
        assert_eq!(plain.analysis, "No marker here.");
        assert!(plain.counter_narrative.is_none());
    }

    #[test]
    fn test_viral_risk_score() {
        assert_eq!(viral_risk_score("Viral Risk Score: 85%"), Some(85));
        assert_eq!(viral_risk_score("viral risk score:  7%"), Some(7));
        assert_eq!(viral_risk_score("Risk Score: 85"), None);
        // Out-of-range values clamp rather than overflow.
        assert_eq!(viral_risk_score("Viral Risk Score: 400%"), Some(100));
    }

    #[test]
    fn test_parse_timeline_lines() {
        let body = "intro\n\
                    TIMELINE_EVENT: 2019-04-01|First appearance|Posted on a forum\n\
                    TIMELINE_EVENT: 2024-10-12|Resurfaced\n\
                    TIMELINE_EVENT: broken line\n\
                    outro";
        let events = parse_timeline(body);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].phase, TimelinePhase::Origin);
        assert_eq!(events[0].details, "Posted on a forum");
        assert_eq!(events[1].phase, TimelinePhase::Resurgence);
        assert_eq!(events[1].details, "Context unavailable");
    }

    #[test]
    fn test_parse_timeline_fallback_pair() {
        let events = parse_timeline("The backend rambled instead.");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "Likely Origin");
        assert_eq!(events[0].phase, TimelinePhase::Origin);
        assert_eq!(events[1].title, "Current Viral Spike");
        assert_eq!(events[1].phase, TimelinePhase::Current);
    }

    #[test]
    fn test_final_verdict() {
        assert_eq!(
            final_verdict("...\nFinal Verdict: Recycled content."),
            "Recycled content."
        );
        assert_eq!(final_verdict("no trailer"), "Analysis Complete");
    }

    #[test]
    fn test_parse_voice_full() {
        let body = "TRANSCRIPT: Namaste, this is a test.\n\
                    VERDICT: Fake\n\
                    REPLY: This message is false.\n\
                    LANGUAGE_TAG: mr-IN";
        let voice = parse_voice(body);
        assert_eq!(voice.transcript, "Namaste, this is a test.");
        assert_eq!(voice.reply.as_deref(), Some("This message is false."));
        assert_eq!(voice.language_tag, "mr-IN");
    }

    #[test]
    fn test_parse_voice_defaults() {
        let voice = parse_voice("unstructured response");
        assert_eq!(voice.transcript, "Audio processed");
        assert!(voice.reply.is_none());
        assert_eq!(voice.language_tag, "hi-IN");
    }
}
