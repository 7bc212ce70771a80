//! Transient dashboard session state.
//!
//! [`SessionState`] is an immutable value. Every user toggle is a
//! [`SessionAction`] applied through [`SessionState::apply`], which returns
//! the next state and never mutates the previous one in place.

use std::collections::BTreeSet;

use emergence_types::EventId;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::config::TimelineConfig;
use crate::filter::FilterCriteria;
use crate::severity::{Severity, SeveritySet};

/// A discrete user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAction {
    /// Select a category, or `None` for "all".
    SetCategory(Option<Category>),
    /// Flip one severity chip.
    ToggleSeverity(Severity),
    /// Replace the severity set.
    SetSeverities(SeveritySet),
    /// Replace the search text.
    SetSearch(String),
    /// Expand or collapse one event's raw payload.
    ToggleExpanded(EventId),
    /// Collapse or reopen one tick group.
    ToggleCollapsed(u64),
    /// Pause or resume following the newest tick.
    ToggleAutoFollow,
    /// Set auto-follow explicitly.
    SetAutoFollow(bool),
}

/// UI-only state for one dashboard session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Selected category; `None` is "all".
    pub category: Option<Category>,
    /// Enabled severities.
    pub severities: SeveritySet,
    /// Free-text search.
    pub search: String,
    /// Events whose raw payload is shown.
    pub expanded: BTreeSet<EventId>,
    /// Tick groups folded away.
    pub collapsed: BTreeSet<u64>,
    /// Whether the view follows the newest tick.
    pub auto_follow: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            category: None,
            severities: SeveritySet::all(),
            search: String::new(),
            expanded: BTreeSet::new(),
            collapsed: BTreeSet::new(),
            auto_follow: true,
        }
    }
}

impl SessionState {
    /// A fresh session using the configured defaults.
    pub fn from_config(config: &TimelineConfig) -> Self {
        Self {
            severities: config.default_severities.clone(),
            auto_follow: config.auto_follow,
            ..Self::default()
        }
    }

    /// Apply one interaction, returning the next state.
    #[must_use]
    pub fn apply(self, action: SessionAction) -> Self {
        match action {
            SessionAction::SetCategory(category) => Self { category, ..self },
            SessionAction::ToggleSeverity(severity) => Self {
                severities: self.severities.toggled(severity),
                ..self
            },
            SessionAction::SetSeverities(severities) => Self { severities, ..self },
            SessionAction::SetSearch(search) => Self { search, ..self },
            SessionAction::ToggleExpanded(id) => Self {
                expanded: toggled(self.expanded, id),
                ..self
            },
            SessionAction::ToggleCollapsed(tick) => Self {
                collapsed: toggled(self.collapsed, tick),
                ..self
            },
            SessionAction::ToggleAutoFollow => Self {
                auto_follow: !self.auto_follow,
                ..self
            },
            SessionAction::SetAutoFollow(auto_follow) => Self {
                auto_follow,
                ..self
            },
        }
    }

    /// The filter stages implied by this state.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            category: self.category,
            severities: self.severities.clone(),
            search: self.search.clone(),
        }
    }

    /// Whether an event's payload is expanded.
    pub fn is_expanded(&self, id: &EventId) -> bool {
        self.expanded.contains(id)
    }

    /// Whether a tick group is collapsed.
    pub fn is_collapsed(&self, tick: u64) -> bool {
        self.collapsed.contains(&tick)
    }
}

fn toggled<T: Ord>(mut set: BTreeSet<T>, item: T) -> BTreeSet<T> {
    if !set.remove(&item) {
        set.insert(item);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_shows_everything_and_follows() {
        let state = SessionState::default();
        assert_eq!(state.category, None);
        assert_eq!(state.severities, SeveritySet::all());
        assert!(state.search.is_empty());
        assert!(state.auto_follow);
    }

    #[test]
    fn toggles_are_self_inverse() {
        let start = SessionState::default();
        let id = EventId::from("e-1");
        let actions = [
            SessionAction::ToggleSeverity(Severity::Routine),
            SessionAction::ToggleExpanded(id),
            SessionAction::ToggleCollapsed(7),
            SessionAction::ToggleAutoFollow,
        ];
        for action in actions {
            let once = start.clone().apply(action.clone());
            assert_ne!(once, start);
            assert_eq!(once.apply(action), start);
        }
    }

    #[test]
    fn set_actions_replace_fields() {
        let state = SessionState::default()
            .apply(SessionAction::SetCategory(Some(Category::Economy)))
            .apply(SessionAction::SetSearch("wood".to_owned()))
            .apply(SessionAction::SetAutoFollow(false));
        assert_eq!(state.category, Some(Category::Economy));
        assert_eq!(state.search, "wood");
        assert!(!state.auto_follow);

        let criteria = state.criteria();
        assert_eq!(criteria.category, Some(Category::Economy));
        assert_eq!(criteria.search, "wood");
    }

    #[test]
    fn expansion_and_collapse_queries() {
        let id = EventId::from("e-1");
        let state = SessionState::default()
            .apply(SessionAction::ToggleExpanded(id.clone()))
            .apply(SessionAction::ToggleCollapsed(3));
        assert!(state.is_expanded(&id));
        assert!(state.is_collapsed(3));
        assert!(!state.is_collapsed(4));
    }

    #[test]
    fn config_seeds_defaults() {
        let config = TimelineConfig {
            auto_follow: false,
            default_severities: SeveritySet::none(),
            ..TimelineConfig::default()
        };
        let state = SessionState::from_config(&config);
        assert!(!state.auto_follow);
        assert!(state.severities.is_empty());
    }
}
