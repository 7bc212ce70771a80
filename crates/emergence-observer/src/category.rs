//! Event categories for the filter bar.
//!
//! Categories are a static partition of the known event types. They drive
//! filtering only and play no part in severity.

use emergence_types::EventType;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Coarse grouping of event types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Category {
    /// Births and deaths.
    Lifecycle,
    /// Resources, trade, theft.
    Economy,
    /// Communication, groups, relationships, rules, combat.
    Social,
    /// Structures, routes, exploration.
    World,
    /// Discovery and teaching.
    Knowledge,
    /// Tick bookkeeping, action lifecycle, ledger checks.
    System,
    /// Weather and seasons.
    Environment,
}

const LIFECYCLE: &[EventType] = &[EventType::AgentBorn, EventType::AgentDied];

const ECONOMY: &[EventType] = &[
    EventType::ResourceGathered,
    EventType::ResourceConsumed,
    EventType::TradeCompleted,
    EventType::TradeFailed,
    EventType::TheftOccurred,
    EventType::TheftFailed,
];

const SOCIAL: &[EventType] = &[
    EventType::MessageSent,
    EventType::GroupFormed,
    EventType::RelationshipChanged,
    EventType::RuleCreated,
    EventType::EnforcementApplied,
    EventType::CombatInitiated,
    EventType::CombatResolved,
];

const WORLD: &[EventType] = &[
    EventType::StructureBuilt,
    EventType::StructureDestroyed,
    EventType::StructureRepaired,
    EventType::StructureClaimed,
    EventType::RouteImproved,
    EventType::RouteDegraded,
    EventType::LocationDiscovered,
];

const KNOWLEDGE: &[EventType] = &[EventType::KnowledgeDiscovered, EventType::KnowledgeTaught];

const SYSTEM: &[EventType] = &[
    EventType::TickStart,
    EventType::TickEnd,
    EventType::ActionSubmitted,
    EventType::ActionSucceeded,
    EventType::ActionRejected,
    EventType::LedgerAnomaly,
];

const ENVIRONMENT: &[EventType] = &[EventType::WeatherChanged, EventType::SeasonChanged];

impl Category {
    /// All categories in filter-bar order.
    pub const ALL: [Self; 7] = [
        Self::Lifecycle,
        Self::Economy,
        Self::Social,
        Self::World,
        Self::Knowledge,
        Self::System,
        Self::Environment,
    ];

    /// The event types belonging to this category.
    pub const fn event_types(self) -> &'static [EventType] {
        match self {
            Self::Lifecycle => LIFECYCLE,
            Self::Economy => ECONOMY,
            Self::Social => SOCIAL,
            Self::World => WORLD,
            Self::Knowledge => KNOWLEDGE,
            Self::System => SYSTEM,
            Self::Environment => ENVIRONMENT,
        }
    }

    /// Whether `event_type` belongs to this category.
    pub fn contains(self, event_type: &EventType) -> bool {
        self.event_types().contains(event_type)
    }

    /// The category of an event type; unknown types have none.
    pub fn of(event_type: &EventType) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.contains(event_type))
    }

    /// Lowercase tag used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lifecycle => "lifecycle",
            Self::Economy => "economy",
            Self::Social => "social",
            Self::World => "world",
            Self::Knowledge => "knowledge",
            Self::System => "system",
            Self::Environment => "environment",
        }
    }

    /// Parse a lowercase tag.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(tag))
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_type_has_exactly_one_category() {
        for event_type in EventType::KNOWN {
            let owners = Category::ALL
                .into_iter()
                .filter(|c| c.contains(event_type))
                .count();
            assert_eq!(owners, 1, "{event_type} should belong to one category");
        }
    }

    #[test]
    fn category_sizes_cover_all_known_types() {
        let total: usize = Category::ALL.iter().map(|c| c.event_types().len()).sum();
        assert_eq!(total, EventType::KNOWN.len());
    }

    #[test]
    fn unknown_types_have_no_category() {
        assert_eq!(Category::of(&EventType::from("CustomRitual")), None);
    }

    #[test]
    fn lookups_match_the_table() {
        assert_eq!(
            Category::of(&EventType::ResourceGathered),
            Some(Category::Economy)
        );
        assert_eq!(Category::of(&EventType::TickStart), Some(Category::System));
        assert_eq!(
            Category::of(&EventType::CombatResolved),
            Some(Category::Social)
        );
        assert_eq!(Category::parse("World"), Some(Category::World));
    }
}
