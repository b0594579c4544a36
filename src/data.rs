//! Static seed data.
//!
//! Everything the dashboard shows before the live simulator or the user
//! touches it: the reviewed sample claims, the trending-topic pools, the
//! breaking-event pool the feed ticker draws from, and the pre-existing
//! alert rules. All constructors here return fresh owned values.

use std::collections::HashMap;

use crate::model::{
    AlertRule, Claim, Evidence, Forensics, Language, Lineage, MediaType, NotifyChannel,
    TrendDirection, TrendingTopic, Verdict,
};

/// The reviewed claims loaded at startup.
pub fn seed_claims() -> Vec<Claim> {
    vec![
        Claim::new(
            "1",
            "Candidate X promised to waive all student loans by 2026.",
            Verdict::Misleading,
            MediaType::Video,
        )
        .with_scores(32, 78)
        .with_source(Some("@newsaccount"), "ShortVideoApp", "Short-video", "2h")
        .with_language(Language::En)
        .with_region("National")
        .with_virality(vec![10, 25, 45, 78, 92, 85, 70, 55])
        .with_summary(
            "The candidate made a partial statement about student loan relief, but context \
             shows it was conditional on specific economic targets and legislative approval.",
        )
        .with_evidence(vec![
            Evidence {
                kind: "Prior Speech".to_string(),
                title: "Campaign Rally Speech - Oct 15".to_string(),
                timestamp: "3 days ago".to_string(),
                quote: "We will work toward student debt relief contingent on fiscal review..."
                    .to_string(),
            },
            Evidence {
                kind: "Official Record".to_string(),
                title: "Party Manifesto 2024".to_string(),
                timestamp: "2 weeks ago".to_string(),
                quote: "Student loan restructuring will be evaluated based on economic conditions."
                    .to_string(),
            },
            Evidence {
                kind: "Press Note".to_string(),
                title: "Finance Ministry Statement".to_string(),
                timestamp: "1 week ago".to_string(),
                quote: "No commitment has been made for blanket loan waivers without \
                        parliamentary approval."
                    .to_string(),
            },
        ])
        .with_evidence_count(4)
        .with_forensics(Forensics {
            kind: "video".to_string(),
            frames: vec![
                "frame1.jpg".to_string(),
                "frame2.jpg".to_string(),
                "frame3.jpg".to_string(),
            ],
            audio_spoof_score: Some(15),
            transcript_drift: vec![0, 5, 12, 8, 3],
            metadata: HashMap::new(),
        }),
        Claim::new(
            "2",
            "This rally video shows last night's crowd.",
            Verdict::OutOfContext,
            MediaType::Video,
        )
        .with_scores(45, 85)
        .with_source(Some("@politicalwatch"), "SocialMedia", "Social Media", "4h")
        .with_language(Language::En)
        .with_region("Mumbai")
        .with_virality(vec![5, 15, 30, 55, 45, 35, 28, 20])
        .with_summary(
            "The video is authentic but was recorded 3 weeks ago at a different event, not \
             last night's rally.",
        )
        .with_evidence(vec![
            Evidence {
                kind: "Official Record".to_string(),
                title: "Original Event Registration".to_string(),
                timestamp: "3 weeks ago".to_string(),
                quote: "Community gathering held on September 25th at the same venue."
                    .to_string(),
            },
            Evidence {
                kind: "Article".to_string(),
                title: "Local News Coverage".to_string(),
                timestamp: "3 weeks ago".to_string(),
                quote: "The September event drew similar crowds to the venue.".to_string(),
            },
        ])
        .with_evidence_count(3)
        .with_forensics(Forensics {
            kind: "video".to_string(),
            frames: vec![
                "frame1.jpg".to_string(),
                "frame2.jpg".to_string(),
                "frame3.jpg".to_string(),
            ],
            audio_spoof_score: None,
            transcript_drift: Vec::new(),
            metadata: HashMap::from([
                ("Date Created".to_string(), "2024-09-25 18:30".to_string()),
                ("Camera Model".to_string(), "iPhone 14 Pro".to_string()),
                ("GPS Coordinates".to_string(), "19.0760, 72.8777".to_string()),
            ]),
        })
        .with_lineage(Lineage {
            first_seen: "3 weeks ago".to_string(),
            hops: vec![
                "Community forum".to_string(),
                "Social Media".to_string(),
                "Messaging apps".to_string(),
            ],
        }),
        Claim::new(
            "3",
            "Fuel tax cut announced today.",
            Verdict::Accurate,
            MediaType::Text,
        )
        .with_scores(88, 95)
        .with_source(Some("@govtnews"), "OfficialChannel", "Press Release", "1h")
        .with_language(Language::En)
        .with_region("National")
        .with_virality(vec![20, 35, 50, 65, 80, 75, 70, 68])
        .with_summary(
            "The government officially announced a 3% reduction in fuel tax effective \
             immediately.",
        )
        .with_evidence(vec![
            Evidence {
                kind: "Official Record".to_string(),
                title: "Government Gazette Notification".to_string(),
                timestamp: "30min ago".to_string(),
                quote: "Fuel tax reduced by 3% effective immediately as per notification \
                        GZ-2024-1015."
                    .to_string(),
            },
            Evidence {
                kind: "Press Note".to_string(),
                title: "Finance Minister Press Briefing".to_string(),
                timestamp: "45min ago".to_string(),
                quote: "We are implementing immediate relief measures including fuel tax \
                        reduction."
                    .to_string(),
            },
        ])
        .with_evidence_count(5),
    ]
}

/// The five topics shown in the trending rail at startup.
pub fn initial_topics() -> Vec<TrendingTopic> {
    vec![
        TrendingTopic::new(1, "EVM Tampering", 12_400, "Politics", TrendDirection::Up),
        TrendingTopic::new(2, "Deepfake Regulations", 8_200, "Tech Policy", TrendDirection::Up),
        TrendingTopic::new(3, "Maharashtra Elections", 45_100, "Election", TrendDirection::Same),
        TrendingTopic::new(4, "Student Loans", 3_200, "Economy", TrendDirection::Down),
        TrendingTopic::new(5, "Vote Jihad", 1_500, "Viral", TrendDirection::Up),
    ]
}

/// Reserve topics the simulator can swap in as "breaking" entries.
pub fn reserve_topics() -> Vec<TrendingTopic> {
    vec![
        TrendingTopic::new(6, "Manipur Violence", 28_000, "Conflict", TrendDirection::Up),
        TrendingTopic::new(7, "Farmer Protest 2.0", 19_000, "Protest", TrendDirection::Up),
        TrendingTopic::new(8, "Sensex Crash", 5_600, "Finance", TrendDirection::Down),
        TrendingTopic::new(9, "New Education Policy", 11_200, "Education", TrendDirection::Same),
        TrendingTopic::new(10, "Railway Safety", 4_100, "National", TrendDirection::Up),
    ]
}

/// A canned breaking event the feed ticker can synthesize a claim from.
pub struct BreakingEvent {
    pub title: &'static str,
    pub media_type: MediaType,
    pub region: &'static str,
    pub handle: &'static str,
    pub platform: &'static str,
}

/// Pool the feed-injection ticker draws from.
pub const BREAKING_EVENTS: &[BreakingEvent] = &[
    BreakingEvent {
        title: "Leaked audio claims polling booths were relocated overnight.",
        media_type: MediaType::Audio,
        region: "Maharashtra",
        handle: "@breaking_desk",
        platform: "Messaging",
    },
    BreakingEvent {
        title: "Viral screenshot shows fabricated exit poll numbers.",
        media_type: MediaType::Screenshot,
        region: "National",
        handle: "@pollwatch",
        platform: "Social Media",
    },
    BreakingEvent {
        title: "Clip of minister allegedly announcing fuel rationing.",
        media_type: MediaType::Video,
        region: "Delhi",
        handle: "@newsflash_in",
        platform: "Short-video",
    },
    BreakingEvent {
        title: "Forwarded message warns of bank holiday freeze on withdrawals.",
        media_type: MediaType::Text,
        region: "National",
        handle: "@unknown",
        platform: "Messaging",
    },
    BreakingEvent {
        title: "Photo claims new bridge collapsed hours after inauguration.",
        media_type: MediaType::Image,
        region: "Mumbai",
        handle: "@citizenlens",
        platform: "Social Media",
    },
];

/// Alert rules that exist when a session starts.
pub fn seed_alert_rules() -> Vec<AlertRule> {
    vec![
        AlertRule {
            id: "1".to_string(),
            name: "Student Loan Misleading Claims".to_string(),
            conditions: "Topic contains \"student loan\" AND Verdict = Misleading".to_string(),
            enabled: true,
            channel: NotifyChannel::Email,
            created: "2 days ago".to_string(),
        },
        AlertRule {
            id: "2".to_string(),
            name: "Maharashtra Election Content".to_string(),
            conditions: "Region = Maharashtra AND Verdict ∈ {Misleading, Altered}".to_string(),
            enabled: true,
            channel: NotifyChannel::Push,
            created: "1 week ago".to_string(),
        },
        AlertRule {
            id: "3".to_string(),
            name: "Health Policy Misinformation".to_string(),
            conditions: "Topic contains \"health policy\" AND Verdict = Misleading".to_string(),
            enabled: false,
            channel: NotifyChannel::Email,
            created: "2 weeks ago".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_claim_ids_unique() {
        let claims = seed_claims();
        let mut ids: Vec<_> = claims.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), claims.len());
    }

    #[test]
    fn test_seed_scores_in_range() {
        for claim in seed_claims() {
            assert!(claim.trust_score <= 100);
            assert!(claim.confidence <= 100);
        }
    }

    #[test]
    fn test_topic_pools_disjoint() {
        let initial = initial_topics();
        let reserve = reserve_topics();
        assert_eq!(initial.len(), 5);
        assert_eq!(reserve.len(), 5);
        for topic in &reserve {
            assert!(initial.iter().all(|t| t.id != topic.id));
        }
    }

    #[test]
    fn test_seed_alert_conditions_non_empty() {
        for rule in seed_alert_rules() {
            assert!(!rule.conditions.is_empty());
            assert!(!rule.name.is_empty());
        }
    }
}
