//! Filter pipeline.
//!
//! Three stages, each narrowing the previous one: category, severity, free
//! text. The result is always a sub-sequence of the input, so filtering is
//! order preserving and idempotent.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::event::TimelineEvent;
use crate::lookup::NameLookup;
use crate::severity::{SeveritySet, classify};

/// The active filter state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Selected category; `None` is "all".
    pub category: Option<Category>,
    /// Severities to keep.
    pub severities: SeveritySet,
    /// Case-insensitive search text; empty disables the stage.
    pub search: String,
}

/// Apply all three stages.
pub fn filter_events<'a, I>(
    events: I,
    criteria: &FilterCriteria,
    names: &dyn NameLookup,
) -> Vec<&'a TimelineEvent>
where
    I: IntoIterator<Item = &'a TimelineEvent>,
{
    let needle = criteria.search.to_lowercase();
    events
        .into_iter()
        .filter(|e| matches_category(e, criteria.category))
        .filter(|e| matches_severity(e, &criteria.severities))
        .filter(|e| matches_lowercase(e, &needle, names))
        .collect()
}

/// Category stage.
///
/// With no category selected, everything passes except the tick-boundary
/// bookkeeping events.
pub fn matches_category(event: &TimelineEvent, category: Option<Category>) -> bool {
    category.map_or_else(
        || !event.event_type().is_tick_boundary(),
        |category| category.contains(event.event_type()),
    )
}

/// Severity stage.
pub fn matches_severity(event: &TimelineEvent, severities: &SeveritySet) -> bool {
    severities.contains(classify(event))
}

/// Free-text stage.
///
/// Matches the event type name, the resolved agent name, the resolved
/// location name, or the serialized payload. Unresolved names contribute
/// nothing. An empty search matches everything.
pub fn matches_search(event: &TimelineEvent, search: &str, names: &dyn NameLookup) -> bool {
    matches_lowercase(event, &search.to_lowercase(), names)
}

fn matches_lowercase(event: &TimelineEvent, needle: &str, names: &dyn NameLookup) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |haystack: &str| haystack.to_lowercase().contains(needle);

    hit(event.event_type().as_str())
        || event
            .agent_id()
            .and_then(|id| names.agent_name(id))
            .is_some_and(hit)
        || event
            .location_id()
            .and_then(|id| names.location_name(id))
            .is_some_and(hit)
        || hit(&event.raw_details().to_string())
}
