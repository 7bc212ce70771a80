//! Ingested events.
//!
//! A [`TimelineEvent`] pairs the raw wire record with its typed payload so
//! the payload is validated once, when the event enters the log, rather
//! than on every projection.

use emergence_types::{
    ActionType, AgentId, Event, EventDetails, EventId, EventType, LocationId, WorldContext,
};

/// A raw event plus its parsed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEvent {
    raw: Event,
    details: EventDetails,
}

impl TimelineEvent {
    /// Parse the payload of a raw event.
    pub fn ingest(raw: Event) -> Self {
        let details = EventDetails::parse(&raw.event_type, &raw.details);
        Self { raw, details }
    }

    /// The raw record as received.
    pub const fn raw(&self) -> &Event {
        &self.raw
    }

    /// Event identifier.
    pub const fn id(&self) -> &EventId {
        &self.raw.id
    }

    /// Simulation tick.
    pub const fn tick(&self) -> u64 {
        self.raw.tick
    }

    /// Event type tag.
    pub const fn event_type(&self) -> &EventType {
        &self.raw.event_type
    }

    /// Primary agent, if any.
    pub const fn agent_id(&self) -> Option<&AgentId> {
        self.raw.agent_id.as_ref()
    }

    /// Location, if any.
    pub const fn location_id(&self) -> Option<&LocationId> {
        self.raw.location_id.as_ref()
    }

    /// World snapshot at emission, if any.
    pub const fn world_context(&self) -> Option<&WorldContext> {
        self.raw.world_context.as_ref()
    }

    /// Typed payload.
    pub const fn details(&self) -> &EventDetails {
        &self.details
    }

    /// Untyped payload, for expansion and search.
    pub const fn raw_details(&self) -> &serde_json::Value {
        &self.raw.details
    }

    /// Embedded action tag for action wrappers and rejections.
    pub fn action_type(&self) -> Option<ActionType> {
        self.details.action_type()
    }
}

impl From<Event> for TimelineEvent {
    fn from(raw: Event) -> Self {
        Self::ingest(raw)
    }
}
