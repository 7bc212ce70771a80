//! Severity classification.
//!
//! Every event maps to exactly one of five severities. Classification looks
//! only at the event type and, for the two action wrappers, at the embedded
//! action tag. Anything unrecognised falls through to [`Severity::Info`].

use std::collections::BTreeSet;

use emergence_types::{ActionType, EventType};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::event::TimelineEvent;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Display priority of an event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Severity {
    /// Deaths and ledger violations.
    Critical,
    /// Milestones worth surfacing.
    Notable,
    /// Failures and conflict.
    Warning,
    /// Bookkeeping and survival chores.
    Routine,
    /// Everything else.
    Info,
}

impl Severity {
    /// All severities, most urgent first.
    pub const ALL: [Self; 5] = [
        Self::Critical,
        Self::Notable,
        Self::Warning,
        Self::Routine,
        Self::Info,
    ];

    /// Lowercase tag used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Notable => "notable",
            Self::Warning => "warning",
            Self::Routine => "routine",
            Self::Info => "info",
        }
    }

    /// Parse a lowercase tag.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(tag))
    }
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions whose wrapper events are survival chores rather than news.
pub const ROUTINE_ACTIONS: [ActionType; 5] = [
    ActionType::Gather,
    ActionType::Eat,
    ActionType::Drink,
    ActionType::Rest,
    ActionType::NoAction,
];

/// Classify an ingested event.
pub fn classify(event: &TimelineEvent) -> Severity {
    let action = event.action_type();
    classify_parts(event.event_type(), action.as_ref())
}

/// Classify from the event type and, for action wrappers, the action tag.
pub fn classify_parts(event_type: &EventType, action: Option<&ActionType>) -> Severity {
    match event_type {
        EventType::AgentDied | EventType::LedgerAnomaly => Severity::Critical,

        EventType::KnowledgeDiscovered
        | EventType::LocationDiscovered
        | EventType::AgentBorn
        | EventType::TradeCompleted
        | EventType::StructureBuilt
        | EventType::GroupFormed
        | EventType::SeasonChanged
        | EventType::RuleCreated => Severity::Notable,

        EventType::ActionRejected
        | EventType::TradeFailed
        | EventType::TheftOccurred
        | EventType::TheftFailed
        | EventType::CombatInitiated
        | EventType::CombatResolved
        | EventType::StructureDestroyed
        | EventType::RouteDegraded => Severity::Warning,

        EventType::ResourceGathered
        | EventType::ResourceConsumed
        | EventType::TickStart
        | EventType::TickEnd => Severity::Routine,

        EventType::ActionSubmitted | EventType::ActionSucceeded
            if action.is_some_and(|a| ROUTINE_ACTIONS.contains(a)) =>
        {
            Severity::Routine
        }

        _ => Severity::Info,
    }
}

// ---------------------------------------------------------------------------
// SeveritySet
// ---------------------------------------------------------------------------

/// The set of severities a session currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeveritySet(BTreeSet<Severity>);

impl SeveritySet {
    /// Every severity enabled.
    pub fn all() -> Self {
        Self(Severity::ALL.into_iter().collect())
    }

    /// No severity enabled (nothing passes the severity stage).
    pub const fn none() -> Self {
        Self(BTreeSet::new())
    }

    /// Whether `severity` is enabled.
    pub fn contains(&self, severity: Severity) -> bool {
        self.0.contains(&severity)
    }

    /// Enable `severity`.
    pub fn insert(&mut self, severity: Severity) {
        self.0.insert(severity);
    }

    /// Flip `severity`.
    #[must_use]
    pub fn toggled(mut self, severity: Severity) -> Self {
        if !self.0.remove(&severity) {
            self.0.insert(severity);
        }
        self
    }

    /// Enabled severities, most urgent first.
    pub fn iter(&self) -> impl Iterator<Item = Severity> + '_ {
        self.0.iter().copied()
    }

    /// Number of enabled severities.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is enabled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SeveritySet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Severity> for SeveritySet {
    fn from_iter<I: IntoIterator<Item = Severity>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_extremes_are_critical_and_notable() {
        assert_eq!(classify_parts(&EventType::AgentDied, None), Severity::Critical);
        assert_eq!(classify_parts(&EventType::LedgerAnomaly, None), Severity::Critical);
        assert_eq!(classify_parts(&EventType::AgentBorn, None), Severity::Notable);
    }

    #[test]
    fn failures_are_warnings() {
        assert_eq!(classify_parts(&EventType::ActionRejected, None), Severity::Warning);
        assert_eq!(classify_parts(&EventType::TradeFailed, None), Severity::Warning);
    }

    #[test]
    fn routine_actions_are_routine_under_both_wrappers() {
        for action in &ROUTINE_ACTIONS {
            assert_eq!(
                classify_parts(&EventType::ActionSubmitted, Some(action)),
                Severity::Routine
            );
            assert_eq!(
                classify_parts(&EventType::ActionSucceeded, Some(action)),
                Severity::Routine
            );
        }
    }

    #[test]
    fn other_actions_are_info() {
        let build = ActionType::Build;
        assert_eq!(
            classify_parts(&EventType::ActionSucceeded, Some(&build)),
            Severity::Info
        );
        let custom = ActionType::from("SummonRain");
        assert_eq!(
            classify_parts(&EventType::ActionSucceeded, Some(&custom)),
            Severity::Info
        );
        assert_eq!(classify_parts(&EventType::ActionSucceeded, None), Severity::Info);
    }

    #[test]
    fn routine_action_tag_does_not_affect_rejections() {
        let gather = ActionType::Gather;
        assert_eq!(
            classify_parts(&EventType::ActionRejected, Some(&gather)),
            Severity::Warning
        );
    }

    #[test]
    fn unknown_event_types_are_info() {
        assert_eq!(
            classify_parts(&EventType::from("CustomRitual"), None),
            Severity::Info
        );
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Notable).unwrap_or_default();
        assert_eq!(json, "\"notable\"");
        assert_eq!(Severity::parse("WARNING"), Some(Severity::Warning));
        assert_eq!(Severity::parse("loud"), None);
    }

    #[test]
    fn toggling_twice_restores_the_set() {
        let set = SeveritySet::all();
        let toggled = set.clone().toggled(Severity::Routine);
        assert!(!toggled.contains(Severity::Routine));
        assert_eq!(toggled.len(), 4);
        assert_eq!(toggled.toggled(Severity::Routine), set);
    }
}
