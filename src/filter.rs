//! Feed derivation pipeline.
//!
//! `apply_filters` narrows the claim collection to what the active
//! [`FilterState`] admits. The pipeline is pure (the input collection is
//! untouched), stable (relative order preserved), and idempotent (filtering
//! a filtered result is a no-op). Claims missing an attribute a filter
//! constrains fail closed and are excluded.

use chrono::{DateTime, Utc};

use crate::model::Claim;
use crate::store::FilterState;

/// Region token that disables the region constraint.
const REGION_ALL: &str = "all";

/// Derive the visible feed for the given filters, evaluated at `now`.
///
/// `now` only matters for bounded time windows; callers outside tests use
/// [`apply_filters`].
pub fn apply_filters_at(claims: &[Claim], filters: &FilterState, now: DateTime<Utc>) -> Vec<Claim> {
    claims
        .iter()
        .filter(|claim| passes(claim, filters, now))
        .cloned()
        .collect()
}

/// Derive the visible feed for the given filters against the wall clock.
pub fn apply_filters(claims: &[Claim], filters: &FilterState) -> Vec<Claim> {
    apply_filters_at(claims, filters, Utc::now())
}

fn passes(claim: &Claim, filters: &FilterState, now: DateTime<Utc>) -> bool {
    if !filters.media_type.is_empty() && !filters.media_type.contains(&claim.media_type) {
        return false;
    }

    if !filters.verdict.is_empty() && !filters.verdict.contains(&claim.verdict) {
        return false;
    }

    if !filters.language.is_empty() {
        // A claim with no detected language cannot satisfy a language filter.
        match claim.language {
            Some(language) if filters.language.contains(&language) => {}
            _ => return false,
        }
    }

    if filters.region != REGION_ALL && !claim.region.eq_ignore_ascii_case(&filters.region) {
        return false;
    }

    if let Some(window) = filters.time_window.duration() {
        // Seed claims carry no concrete timestamp and fail closed here.
        match claim.observed_at {
            Some(observed_at) if now - observed_at <= window => {}
            _ => return false,
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::model::{Language, MediaType, TimeWindow, Verdict};

    fn claims() -> Vec<Claim> {
        vec![
            Claim::new("1", "Stadium demolition", Verdict::Misleading, MediaType::Video)
                .with_language(Language::Hi)
                .with_region("Mumbai"),
            Claim::new("2", "Fuel tax cut", Verdict::Accurate, MediaType::Text)
                .with_language(Language::En)
                .with_region("Delhi"),
            Claim::new("3", "Flood photo", Verdict::OutOfContext, MediaType::Image)
                .with_language(Language::Mr)
                .with_region("Mumbai"),
        ]
    }

    #[test]
    fn test_default_filters_are_identity() {
        let input = claims();
        let output = apply_filters(&input, &FilterState::default());
        assert_eq!(output, input);
    }

    #[test]
    fn test_each_dimension_constrains_by_membership() {
        let input = claims();

        let by_media = apply_filters(
            &input,
            &FilterState {
                media_type: vec![MediaType::Video, MediaType::Image],
                ..FilterState::default()
            },
        );
        assert_eq!(
            by_media.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec!["1", "3"]
        );

        let by_verdict = apply_filters(
            &input,
            &FilterState {
                verdict: vec![Verdict::Accurate],
                ..FilterState::default()
            },
        );
        assert_eq!(by_verdict.len(), 1);
        assert_eq!(by_verdict[0].id, "2");

        let by_language = apply_filters(
            &input,
            &FilterState {
                language: vec![Language::Hi, Language::Mr],
                ..FilterState::default()
            },
        );
        assert_eq!(
            by_language.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec!["1", "3"]
        );
    }

    #[test]
    fn test_region_is_case_insensitive() {
        let input = claims();
        let filters = FilterState {
            region: "mumbai".to_string(),
            ..FilterState::default()
        };
        let output = apply_filters(&input, &filters);
        assert_eq!(
            output.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec!["1", "3"]
        );
    }

    #[test]
    fn test_missing_language_fails_closed() {
        let input = vec![Claim::new(
            "x",
            "No language detected",
            Verdict::Unverified,
            MediaType::Text,
        )];
        let filters = FilterState {
            language: vec![Language::En],
            ..FilterState::default()
        };
        assert!(apply_filters(&input, &filters).is_empty());
    }

    #[test]
    fn test_time_window_cutoff() {
        let now = Utc::now();
        let fresh = Claim::new("fresh", "Just in", Verdict::Unverified, MediaType::Text)
            .observed_now(now - Duration::minutes(30));
        let stale = Claim::new("stale", "Old news", Verdict::Unverified, MediaType::Text)
            .observed_now(now - Duration::hours(2));
        // Seed-style claim without a concrete timestamp.
        let undated = Claim::new("undated", "Seeded", Verdict::Unverified, MediaType::Text);

        let filters = FilterState {
            time_window: TimeWindow::LastHour,
            ..FilterState::default()
        };
        let output = apply_filters_at(&[fresh, stale, undated], &filters, now);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].id, "fresh");
    }

    #[test]
    fn test_pipeline_is_stable_and_idempotent() {
        let input = claims();
        let filters = FilterState {
            region: "Mumbai".to_string(),
            ..FilterState::default()
        };

        let once = apply_filters(&input, &filters);
        let twice = apply_filters(&once, &filters);
        assert_eq!(once, twice);

        // Input untouched, relative order preserved.
        assert_eq!(input.len(), 3);
        assert!(once.windows(2).all(|w| {
            let pos = |id: &str| input.iter().position(|c| c.id == id);
            pos(&w[0].id) < pos(&w[1].id)
        }));
    }

    #[test]
    fn test_combined_dimensions_intersect() {
        let input = claims();
        let filters = FilterState {
            media_type: vec![MediaType::Video],
            verdict: vec![Verdict::Misleading],
            language: vec![Language::Hi],
            region: "MUMBAI".to_string(),
            ..FilterState::default()
        };
        let output = apply_filters(&input, &filters);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].id, "1");

        // One mismatched dimension empties the result.
        let none = apply_filters(
            &input,
            &FilterState {
                verdict: vec![Verdict::Altered],
                ..filters
            },
        );
        assert!(none.is_empty());
    }
}
