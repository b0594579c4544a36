//! Saved alert rules.
//!
//! Rules live only for the session. Creation is validated at the boundary
//! (the stored rule always carries a non-empty condition summary); toggling
//! and deletion address rules by id.

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::data;
use crate::model::{AlertRule, NotifyChannel, Verdict};

/// Rejected alert submissions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlertValidationError {
    #[error("alert topic must not be empty")]
    EmptyTopic,
    #[error("at least one verdict must be selected")]
    NoVerdicts,
}

/// A validated alert submission.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AlertDraft {
    pub topic: String,
    pub region: String,
    pub verdicts: Vec<Verdict>,
    pub channel: NotifyChannel,
}

/// In-memory collection of alert rules, newest first.
#[derive(Debug, Default)]
pub struct AlertBook {
    rules: Vec<AlertRule>,
}

impl AlertBook {
    /// Book pre-populated with the session's starting rules.
    pub fn seeded() -> Self {
        Self {
            rules: data::seed_alert_rules(),
        }
    }

    pub fn rules(&self) -> &[AlertRule] {
        &self.rules
    }

    /// Validate a draft and prepend the resulting rule.
    pub fn create(&mut self, draft: &AlertDraft) -> Result<AlertRule, AlertValidationError> {
        let topic = draft.topic.trim();
        if topic.is_empty() {
            return Err(AlertValidationError::EmptyTopic);
        }
        if draft.verdicts.is_empty() {
            return Err(AlertValidationError::NoVerdicts);
        }

        let verdict_list = draft
            .verdicts
            .iter()
            .map(|v| v.label())
            .collect::<Vec<_>>()
            .join(", ");
        let rule = AlertRule {
            id: Utc::now().timestamp_millis().to_string(),
            name: format!("{topic} Alert"),
            conditions: format!(
                "Topic contains \"{topic}\" AND Region = {} AND Verdict ∈ {{{verdict_list}}}",
                draft.region
            ),
            enabled: true,
            channel: draft.channel,
            created: "Just now".to_string(),
        };
        debug!(name = %rule.name, "alert rule created");
        self.rules.insert(0, rule.clone());
        Ok(rule)
    }

    /// Flip a rule's enabled flag. Returns the new state, or `None` for an
    /// unknown id.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let rule = self.rules.iter_mut().find(|r| r.id == id)?;
        rule.enabled = !rule.enabled;
        Some(rule.enabled)
    }

    /// Remove a rule. Returns whether anything was deleted.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.id != id);
        self.rules.len() < before
    }
}
