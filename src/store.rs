//! The application state store.
//!
//! A single `AppState` tree is the source of truth for navigation, theme,
//! language, active filters, and the currently inspected claim. Every
//! mutation flows through [`reduce`], a pure function of (state, action);
//! [`Store`] is the one write path and serializes dispatches, so consumers
//! reading an `Arc<AppState>` snapshot never observe a half-applied update.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{Claim, Language, MediaType, Theme, TimeWindow, Verdict};

/// The page shown when the application starts.
pub const DEFAULT_PAGE: &str = "feed";

/// User-selected view constraints for the feed.
///
/// An empty set on any dimension means "no constraint on that dimension",
/// never "exclude everything". `region` is `"all"` or a specific region
/// token compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub media_type: Vec<MediaType>,
    #[serde(default)]
    pub verdict: Vec<Verdict>,
    #[serde(default)]
    pub language: Vec<Language>,
    pub region: String,
    pub time_window: TimeWindow,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            media_type: Vec::new(),
            verdict: Vec::new(),
            language: Vec::new(),
            region: "all".to_string(),
            time_window: TimeWindow::All,
        }
    }
}

impl FilterState {
    /// Shallow-merge a partial update. Fields absent from the patch are
    /// left untouched.
    pub fn merged(&self, patch: &FilterPatch) -> Self {
        Self {
            media_type: patch.media_type.clone().unwrap_or_else(|| self.media_type.clone()),
            verdict: patch.verdict.clone().unwrap_or_else(|| self.verdict.clone()),
            language: patch.language.clone().unwrap_or_else(|| self.language.clone()),
            region: patch.region.clone().unwrap_or_else(|| self.region.clone()),
            time_window: patch.time_window.unwrap_or(self.time_window),
        }
    }
}

/// A partial filter update. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<Vec<MediaType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Vec<Verdict>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Vec<Language>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
}

/// The single global state tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub theme: Theme,
    pub language: Language,

    /// Current page identifier. Not validated here; the view layer maps
    /// unrecognized identifiers to the default page.
    pub current_page: String,

    /// The claim open in the detail view, if any. Persists across filter
    /// changes until explicitly cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_claim: Option<Claim>,

    pub filters: FilterState,
    pub right_rail_open: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            language: Language::En,
            current_page: DEFAULT_PAGE.to_string(),
            selected_claim: None,
            filters: FilterState::default(),
            right_rail_open: true,
        }
    }
}

/// Tagged state mutations. The wire format matches the front-end action
/// shape: `{"type": "SET_THEME", "payload": "dark"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetTheme(Theme),
    SetLanguage(Language),
    SetCurrentPage(String),
    SetSelectedClaim(Option<Claim>),
    UpdateFilters(FilterPatch),
    ToggleRightRail,
}

/// Pure reducer: (state, action) -> new state.
///
/// Total over all actions, never panics, and touches nothing outside the
/// returned tree. Each action produces a fresh `Arc`, so identity-based
/// change detection on the snapshot works.
pub fn reduce(state: &Arc<AppState>, action: &Action) -> Arc<AppState> {
    let prev = state.as_ref();
    let next = match action {
        Action::SetTheme(theme) => AppState {
            theme: *theme,
            ..prev.clone()
        },
        Action::SetLanguage(language) => AppState {
            language: *language,
            ..prev.clone()
        },
        Action::SetCurrentPage(page) => AppState {
            current_page: page.clone(),
            ..prev.clone()
        },
        Action::SetSelectedClaim(claim) => AppState {
            selected_claim: claim.clone(),
            ..prev.clone()
        },
        Action::UpdateFilters(patch) => AppState {
            filters: prev.filters.merged(patch),
            ..prev.clone()
        },
        Action::ToggleRightRail => AppState {
            right_rail_open: !prev.right_rail_open,
            ..prev.clone()
        },
    };
    Arc::new(next)
}

/// The single write path for [`AppState`].
///
/// Dispatches are applied synchronously in the order they arrive; readers
/// get cheap `Arc` snapshots and are never blocked by a writer mid-update.
#[derive(Debug)]
pub struct Store {
    state: Arc<AppState>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            state: Arc::new(AppState::default()),
        }
    }

    /// Apply one action. Never fails.
    pub fn dispatch(&mut self, action: &Action) {
        self.state = reduce(&self.state, action);
    }

    /// Snapshot of the current tree.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_defaults() {
        let store = Store::new();
        let state = store.state();
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.language, Language::En);
        assert_eq!(state.current_page, "feed");
        assert!(state.selected_claim.is_none());
        assert!(state.right_rail_open);
        assert_eq!(state.filters, FilterState::default());
    }

    #[test]
    fn test_reducer_is_pure() {
        let state = Arc::new(AppState::default());
        let action = Action::SetLanguage(Language::Hi);

        let a = reduce(&state, &action);
        let b = reduce(&state, &action);

        // Same inputs, structurally identical outputs, input untouched.
        assert_eq!(a, b);
        assert_eq!(state.language, Language::En);
        assert_eq!(a.language, Language::Hi);
    }

    #[test]
    fn test_set_theme_replaces_only_theme() {
        let mut store = Store::new();
        store.dispatch(&Action::SetTheme(Theme::Light));
        let state = store.state();
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(state.current_page, "feed");
        assert!(state.right_rail_open);
    }

    #[test]
    fn test_update_filters_merges_partially() {
        let mut store = Store::new();
        store.dispatch(&Action::UpdateFilters(FilterPatch {
            verdict: Some(vec![Verdict::Misleading]),
            ..FilterPatch::default()
        }));
        store.dispatch(&Action::UpdateFilters(FilterPatch {
            region: Some("delhi".to_string()),
            ..FilterPatch::default()
        }));

        let filters = &store.state().filters;
        // Only region changed on the second dispatch.
        assert_eq!(filters.region, "delhi");
        assert_eq!(filters.verdict, vec![Verdict::Misleading]);
        assert!(filters.media_type.is_empty());
        assert!(filters.language.is_empty());
        assert_eq!(filters.time_window, TimeWindow::All);
    }

    #[test]
    fn test_toggle_right_rail_flips() {
        let mut store = Store::new();
        store.dispatch(&Action::ToggleRightRail);
        assert!(!store.state().right_rail_open);
        store.dispatch(&Action::ToggleRightRail);
        assert!(store.state().right_rail_open);
    }

    #[test]
    fn test_selected_claim_survives_filter_changes() {
        let mut store = Store::new();
        let claim = Claim::new("2", "Fuel tax cut", Verdict::Accurate, MediaType::Text);
        store.dispatch(&Action::SetSelectedClaim(Some(claim.clone())));
        store.dispatch(&Action::UpdateFilters(FilterPatch {
            verdict: Some(vec![Verdict::Misleading]),
            ..FilterPatch::default()
        }));

        assert_eq!(store.state().selected_claim.as_ref(), Some(&claim));

        store.dispatch(&Action::SetSelectedClaim(None));
        assert!(store.state().selected_claim.is_none());
    }

    #[test]
    fn test_action_wire_format() {
        let action: Action = serde_json::from_str(
            r#"{"type": "SET_LANGUAGE", "payload": "hi"}"#,
        )
        .unwrap();
        assert_eq!(action, Action::SetLanguage(Language::Hi));

        let toggle: Action = serde_json::from_str(r#"{"type": "TOGGLE_RIGHT_RAIL"}"#).unwrap();
        assert_eq!(toggle, Action::ToggleRightRail);
    }

    #[test]
    fn test_set_current_page_accepts_any_identifier() {
        // Validation is the view layer's job; the store records it as-is.
        let mut store = Store::new();
        store.dispatch(&Action::SetCurrentPage("no-such-page".to_string()));
        assert_eq!(store.state().current_page, "no-such-page");
    }
}
