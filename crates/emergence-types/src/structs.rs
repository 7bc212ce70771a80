//! The raw event record as it arrives from the simulation.
//!
//! [`Event`] mirrors the event store row: a stable id, the tick, an open
//! [`EventType`] tag, optional agent/location references, and an untyped
//! JSON payload whose shape depends on the tag. The payload is turned into a
//! typed [`EventDetails`](crate::details::EventDetails) exactly once, when
//! the observer ingests the record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::enums::{Era, EventType, Season, Weather};
use crate::ids::{AgentId, EventId, LocationId};

// ---------------------------------------------------------------------------
// WorldContext
// ---------------------------------------------------------------------------

/// Snapshot of world-level state captured when an event was emitted.
///
/// Never mutated after emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldContext {
    /// Tick number at emission, when the emitter includes it.
    #[serde(default)]
    pub tick: Option<u64>,
    /// Civilizational era.
    pub era: Era,
    /// Season.
    pub season: Season,
    /// Weather.
    pub weather: Weather,
    /// Number of living agents.
    pub population: u32,
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// An immutable event emitted by the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,
    /// The tick when this event occurred.
    pub tick: u64,
    /// The kind of event.
    pub event_type: EventType,
    /// The primary agent involved, if any.
    #[serde(default)]
    pub agent_id: Option<AgentId>,
    /// The location where the event occurred, if any.
    #[serde(default)]
    pub location_id: Option<LocationId>,
    /// Type-specific payload.
    #[serde(default)]
    pub details: serde_json::Value,
    /// World-level context at emission time.
    ///
    /// A context object that does not parse is treated as absent.
    #[serde(default, deserialize_with = "lenient_context")]
    pub world_context: Option<WorldContext>,
    /// Real-world timestamp when the event was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Create an event with an empty payload and no references.
    pub fn new(id: impl Into<EventId>, tick: u64, event_type: EventType) -> Self {
        Self {
            id: id.into(),
            tick,
            event_type,
            agent_id: None,
            location_id: None,
            details: serde_json::Value::Null,
            world_context: None,
            created_at: None,
        }
    }

    /// Attach the primary agent.
    #[must_use]
    pub fn with_agent(mut self, agent_id: impl Into<AgentId>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    /// Attach the location.
    #[must_use]
    pub fn with_location(mut self, location_id: impl Into<LocationId>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }

    /// Replace the payload.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Attach a world context snapshot.
    #[must_use]
    pub const fn with_context(mut self, context: WorldContext) -> Self {
        self.world_context = Some(context);
        self
    }
}

/// Deserialize a world context, mapping any malformed value to `None`.
fn lenient_context<'de, D>(deserializer: D) -> Result<Option<WorldContext>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_parses_from_wire_json() {
        let json = serde_json::json!({
            "id": "evt-1",
            "tick": 5,
            "event_type": "ResourceGathered",
            "agent_id": "agent-a",
            "location_id": "loc-l",
            "details": {"resource": "Wood", "quantity": 3},
            "world_context": {
                "tick": 5,
                "era": "Primitive",
                "season": "Spring",
                "weather": "Clear",
                "population": 12
            }
        });
        let event: Result<Event, _> = serde_json::from_value(json);
        assert!(event.is_ok());
        let Ok(event) = event else { return };
        assert_eq!(event.event_type, EventType::ResourceGathered);
        assert_eq!(event.agent_id, Some(AgentId::from("agent-a")));
        assert_eq!(
            event.world_context.map(|c| c.population),
            Some(12)
        );
    }

    #[test]
    fn malformed_world_context_is_dropped() {
        let json = serde_json::json!({
            "id": "evt-2",
            "tick": 1,
            "event_type": "TickStart",
            "world_context": {"era": "Stone Age"}
        });
        let event: Result<Event, _> = serde_json::from_value(json);
        assert!(event.is_ok_and(|e| e.world_context.is_none()));
    }

    #[test]
    fn optional_fields_default_when_missing() {
        let json = serde_json::json!({"id": "evt-3", "tick": 0, "event_type": "CustomRitual"});
        let event: Result<Event, _> = serde_json::from_value(json);
        assert!(event.is_ok());
        let Ok(event) = event else { return };
        assert!(event.agent_id.is_none());
        assert!(event.details.is_null());
        assert_eq!(event.event_type, EventType::from("CustomRitual"));
    }
}
