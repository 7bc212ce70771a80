//! Render projection.
//!
//! [`project`] composes the pipeline: filter, group, then classify and
//! narrate each event and attach the session's expansion and collapse
//! flags. The output is a plain view model with `TypeScript` bindings.

use chrono::{DateTime, Utc};
use emergence_types::EventId;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::category::Category;
use crate::event::TimelineEvent;
use crate::filter::{filter_events, matches_category, matches_search};
use crate::grouping::{TickEnvironment, TickGroup, group_by_tick};
use crate::lookup::NameLookup;
use crate::narrative::{Narrative, narrate};
use crate::session::SessionState;
use crate::severity::{Severity, classify};

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// One event as rendered in the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventRow {
    /// Event identifier.
    pub id: EventId,
    /// Simulation tick.
    pub tick: u64,
    /// Event type tag.
    pub event_type: String,
    /// Classified severity.
    pub severity: Severity,
    /// Filter category, absent for unknown types.
    pub category: Option<Category>,
    /// Narrative sentence.
    pub narrative: Narrative,
    /// Raw payload, shown when expanded.
    pub details: serde_json::Value,
    /// Wall-clock creation time, if reported.
    pub created_at: Option<DateTime<Utc>>,
    /// Whether the raw payload is expanded.
    pub expanded: bool,
}

/// One tick group as rendered in the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TickGroupView {
    /// Simulation tick.
    pub tick: u64,
    /// World snapshot for the header.
    pub environment: TickEnvironment,
    /// Whether the group is folded away.
    pub collapsed: bool,
    /// Rows in arrival order.
    pub rows: Vec<EventRow>,
}

/// Per-severity counts shown on the severity chips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SeverityCounts {
    /// Critical events.
    pub critical: usize,
    /// Notable events.
    pub notable: usize,
    /// Warnings.
    pub warning: usize,
    /// Routine events.
    pub routine: usize,
    /// Informational events.
    pub info: usize,
}

impl SeverityCounts {
    /// Count for one severity.
    pub const fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::Notable => self.notable,
            Severity::Warning => self.warning,
            Severity::Routine => self.routine,
            Severity::Info => self.info,
        }
    }

    const fn bump(&mut self, severity: Severity) {
        let slot = match severity {
            Severity::Critical => &mut self.critical,
            Severity::Notable => &mut self.notable,
            Severity::Warning => &mut self.warning,
            Severity::Routine => &mut self.routine,
            Severity::Info => &mut self.info,
        };
        *slot = slot.saturating_add(1);
    }
}

/// The complete render model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TimelineView {
    /// Tick groups, newest first. Empty when nothing matches.
    pub groups: Vec<TickGroupView>,
    /// Events in the log.
    pub total_events: usize,
    /// Events that passed every filter stage.
    pub matched_events: usize,
    /// Counts per severity after the category and search stages.
    pub severity_counts: SeverityCounts,
    /// Whether the presentation should scroll to the newest group.
    pub follow_latest: bool,
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Project the event log through the session's filters.
pub fn project<'a, I>(events: I, state: &SessionState, names: &dyn NameLookup) -> TimelineView
where
    I: IntoIterator<Item = &'a TimelineEvent>,
    I::IntoIter: Clone,
{
    let events = events.into_iter();
    let criteria = state.criteria();

    let mut total_events: usize = 0;
    let mut severity_counts = SeverityCounts::default();
    for event in events.clone() {
        total_events = total_events.saturating_add(1);
        if matches_category(event, criteria.category)
            && matches_search(event, &criteria.search, names)
        {
            severity_counts.bump(classify(event));
        }
    }

    let matched = filter_events(events, &criteria, names);
    let matched_events = matched.len();
    let groups: Vec<TickGroupView> = group_by_tick(&matched)
        .into_iter()
        .map(|group| render_group(group, state, names))
        .collect();

    debug!(
        total_events,
        matched_events,
        groups = groups.len(),
        "projected timeline"
    );

    TimelineView {
        groups,
        total_events,
        matched_events,
        severity_counts,
        follow_latest: false,
    }
}

fn render_group(group: TickGroup<'_>, state: &SessionState, names: &dyn NameLookup) -> TickGroupView {
    TickGroupView {
        tick: group.tick,
        environment: group.environment,
        collapsed: state.is_collapsed(group.tick),
        rows: group
            .events
            .into_iter()
            .map(|event| render_row(event, state, names))
            .collect(),
    }
}

/// Render a single event row.
pub fn render_row(event: &TimelineEvent, state: &SessionState, names: &dyn NameLookup) -> EventRow {
    EventRow {
        id: event.id().clone(),
        tick: event.tick(),
        event_type: event.event_type().as_str().to_owned(),
        severity: classify(event),
        category: Category::of(event.event_type()),
        narrative: narrate(event, names),
        details: event.raw_details().clone(),
        created_at: event.raw().created_at,
        expanded: state.is_expanded(event.id()),
    }
}

#[cfg(test)]
mod tests {
    use emergence_types::{Event, EventType};
    use serde_json::json;

    use super::*;
    use crate::lookup::NameTables;
    use crate::session::SessionAction;

    fn sample() -> Vec<TimelineEvent> {
        vec![
            TimelineEvent::ingest(Event::new("t", 9, EventType::TickStart)),
            TimelineEvent::ingest(
                Event::new("g", 9, EventType::ResourceGathered)
                    .with_agent("a-1")
                    .with_details(json!({"resource": "Wood", "quantity": 3})),
            ),
            TimelineEvent::ingest(
                Event::new("d", 10, EventType::AgentDied).with_agent("a-1"),
            ),
        ]
    }

    fn names() -> NameTables {
        NameTables::new().with_agent("a-1", "Kora")
    }

    #[test]
    fn view_groups_newest_first_with_rows() {
        let events = sample();
        let view = project(&events, &SessionState::default(), &names());
        let ticks: Vec<u64> = view.groups.iter().map(|g| g.tick).collect();
        assert_eq!(ticks, vec![10, 9]);
        assert_eq!(view.total_events, 3);
        assert_eq!(view.matched_events, 2);
        let first = view.groups.first().and_then(|g| g.rows.first());
        assert_eq!(first.map(|r| r.severity), Some(Severity::Critical));
        assert_eq!(first.map(|r| r.category), Some(Some(Category::Lifecycle)));
    }

    #[test]
    fn session_flags_reach_the_rows() {
        let events = sample();
        let state = SessionState::default()
            .apply(SessionAction::ToggleExpanded(EventId::from("g")))
            .apply(SessionAction::ToggleCollapsed(10));
        let view = project(&events, &state, &names());
        let collapsed: Vec<bool> = view.groups.iter().map(|g| g.collapsed).collect();
        assert_eq!(collapsed, vec![true, false]);
        let expanded = view
            .groups
            .iter()
            .flat_map(|g| g.rows.iter())
            .find(|r| r.id.as_str() == "g")
            .is_some_and(|r| r.expanded);
        assert!(expanded);
    }

    #[test]
    fn severity_counts_ignore_the_severity_stage() {
        let events = sample();
        let state = SessionState::default()
            .apply(SessionAction::ToggleSeverity(Severity::Critical));
        let view = project(&events, &state, &names());
        assert_eq!(view.matched_events, 1);
        assert_eq!(view.severity_counts.get(Severity::Critical), 1);
        assert_eq!(view.severity_counts.get(Severity::Routine), 1);
    }

    #[test]
    fn no_matches_yield_no_groups() {
        let events = sample();
        let state = SessionState::default().apply(SessionAction::SetSearch("zzz".to_owned()));
        let view = project(&events, &state, &names());
        assert!(view.groups.is_empty());
        assert_eq!(view.matched_events, 0);
    }

    #[test]
    fn view_serializes_for_the_dashboard() {
        let events = sample();
        let view = project(&events, &SessionState::default(), &names());
        let json = serde_json::to_value(&view).unwrap_or_default();
        assert_eq!(json["groups"][0]["rows"][0]["severity"], "critical");
        assert_eq!(
            json["groups"][1]["rows"][0]["narrative"][0],
            json!({"text": "Kora", "emphasized": true})
        );
    }
}
