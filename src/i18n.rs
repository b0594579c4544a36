//! Translation lookup for the dashboard UI strings.
//!
//! `resolve` is total: a key missing from the requested language falls back
//! to the English table, and a key missing there comes back verbatim. The
//! Hindi and Marathi tables intentionally cover fewer keys than English, so
//! the fallback chain is exercised in normal operation, not just on typos.

use crate::model::Language;

/// English table. The superset; every key the UI uses appears here.
const EN: &[(&str, &str)] = &[
    // Header
    ("searchPlaceholder", "Search claims, keywords, accounts…"),
    // Navigation
    ("feed", "Feed"),
    ("trustDashboard", "Trust Dashboard"),
    ("mySubmissions", "My Submissions"),
    ("alerts", "Alerts"),
    ("settings", "Settings"),
    // Verdicts
    ("Unverified", "Unverified"),
    ("Accurate", "Accurate"),
    ("Misleading", "Misleading"),
    ("Out of Context", "Out of Context"),
    ("Altered", "Altered"),
    // Common
    ("trustScore", "Trust Score"),
    ("confidence", "Confidence"),
    ("evidenceCount", "Evidence Count"),
    // Feed
    ("filterByMediaType", "Filter by media type"),
    ("filterByVerdict", "Filter by verdict"),
    ("openClaim", "Open Claim"),
    ("share", "Share"),
    ("followTopic", "Follow Topic"),
    ("reportError", "Report Error"),
    // Claim detail
    ("overview", "Overview"),
    ("evidence", "Evidence"),
    ("mediaForensics", "Media Forensics"),
    ("lineage", "Lineage"),
    ("timelineCompare", "Timeline Compare"),
    // Dashboard
    ("totalFlagged", "Total Flagged"),
    ("percentMisleading", "% Misleading"),
    ("medianTrustScore", "Median Trust Score"),
    ("avgVerificationLatency", "Avg Verification Latency"),
];

const HI: &[(&str, &str)] = &[
    ("searchPlaceholder", "दावे, कीवर्ड, खाते खोजें…"),
    ("feed", "फ़ीड"),
    ("trustDashboard", "ट्रस्ट डैशबोर्ड"),
    ("mySubmissions", "मेरे सबमिशन"),
    ("alerts", "अलर्ट"),
    ("settings", "सेटिंग्स"),
    ("Unverified", "असत्यापित"),
    ("Accurate", "सटीक"),
    ("Misleading", "भ्रामक"),
    ("Out of Context", "संदर्भ से बाहर"),
    ("Altered", "बदला हुआ"),
    ("trustScore", "ट्रस्ट स्कोर"),
    ("confidence", "विश्वसनीयता"),
    ("evidenceCount", "साक्ष्य संख्या"),
];

const MR: &[(&str, &str)] = &[
    ("searchPlaceholder", "दावे, कीवर्ड, खाती शोधा…"),
    ("feed", "फीड"),
    ("trustDashboard", "ट्रस्ट डॅशबोर्ड"),
    ("mySubmissions", "माझे सबमिशन"),
    ("alerts", "अलर्ट"),
    ("settings", "सेटिंग्ज"),
    ("Unverified", "असत्यापित"),
    ("Accurate", "अचूक"),
    ("Misleading", "दिशाभूल करणारे"),
    ("Out of Context", "संदर्भाबाहेर"),
    ("Altered", "बदललेले"),
];

fn table(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::En => EN,
        Language::Hi => HI,
        Language::Mr => MR,
    }
}

fn lookup(language: Language, key: &str) -> Option<&'static str> {
    table(language)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Resolve a UI string for the given language.
///
/// Fallback chain: requested language, then English, then the key itself.
/// Never fails and never allocates for table hits.
pub fn resolve<'a>(key: &'a str, language: Language) -> &'a str {
    lookup(language, key)
        .or_else(|| lookup(Language::En, key))
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_localized() {
        assert_eq!(resolve("alerts", Language::Hi), "अलर्ट");
        assert_eq!(resolve("Accurate", Language::Mr), "अचूक");
    }

    #[test]
    fn test_resolve_falls_back_to_english() {
        // Not present in the Hindi table, present in English.
        assert_eq!(
            resolve("filterByVerdict", Language::Hi),
            "Filter by verdict"
        );
        assert_eq!(resolve("openClaim", Language::Mr), "Open Claim");
    }

    #[test]
    fn test_resolve_unknown_key_verbatim() {
        assert_eq!(resolve("doesNotExist", Language::Hi), "doesNotExist");
        assert_eq!(resolve("doesNotExist", Language::En), "doesNotExist");
    }

    #[test]
    fn test_english_is_superset() {
        for lang in [Language::Hi, Language::Mr] {
            for (key, _) in table(lang) {
                assert!(
                    lookup(Language::En, key).is_some(),
                    "key {key:?} missing from the English table"
                );
            }
        }
    }
}
